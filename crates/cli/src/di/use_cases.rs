use super::Repositories;
use chrono_tz::Tz;
use signage_application::use_cases::RunCleanupUseCase;
use signage_domain::Config;
use signage_infrastructure::console::TerminalConsole;
use std::sync::Arc;

pub struct UseCases {
    pub run_cleanup: Arc<RunCleanupUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, config: &Config) -> Self {
        let console = Arc::new(TerminalConsole::new());
        let timezone = config.cleanup.tz().unwrap_or(Tz::UTC);

        Self {
            run_cleanup: Arc::new(
                RunCleanupUseCase::new(repos.content.clone(), console)
                    .with_timezone(timezone)
                    .with_max_threshold_attempts(config.cleanup.max_threshold_attempts)
                    .with_revalidation(config.cleanup.revalidate_before_delete)
                    .with_commit_mode(config.cleanup.commit_mode),
            ),
        }
    }
}
