use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use signage_application::ports::OperatorConsole;
use signage_domain::DomainError;

/// Operator dialog on the controlling terminal.
///
/// Prompts block the calling task until the operator answers; the cleanup
/// command runs on a single-threaded runtime so nothing else is starved.
pub struct TerminalConsole {
    theme: ColorfulTheme,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OperatorConsole for TerminalConsole {
    async fn confirm(&self, prompt: &str, default: bool) -> Result<bool, DomainError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| DomainError::Prompt(e.to_string()))
    }

    async fn ask(&self, prompt: &str, default: &str) -> Result<String, DomainError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()
            .map_err(|e| DomainError::Prompt(e.to_string()))
    }

    fn say(&self, line: &str) {
        println!("{}", line);
    }
}
