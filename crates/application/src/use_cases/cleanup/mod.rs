mod delete_content;
mod find_eligible;
mod report;
mod run_cleanup;

pub use delete_content::DeleteContentUseCase;
pub use find_eligible::FindEligibleContentUseCase;
pub use report::{BatchOutcome, BatchStatus, CleanupReport};
pub use run_cleanup::{CleanupOptions, RunCleanupUseCase, ThresholdMode};
