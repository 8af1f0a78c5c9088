pub mod cleanup;

pub use cleanup::{
    BatchOutcome, BatchStatus, CleanupOptions, CleanupReport, DeleteContentUseCase,
    FindEligibleContentUseCase, RunCleanupUseCase, ThresholdMode,
};
