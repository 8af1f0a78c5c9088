use async_trait::async_trait;
use signage_domain::DomainError;

/// Interactive frontend the cleanup command talks to.
#[async_trait]
pub trait OperatorConsole: Send + Sync {
    async fn confirm(&self, prompt: &str, default: bool) -> Result<bool, DomainError>;

    async fn ask(&self, prompt: &str, default: &str) -> Result<String, DomainError>;

    fn say(&self, line: &str);
}
