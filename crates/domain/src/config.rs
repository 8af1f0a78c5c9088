pub mod cleanup;
pub mod database;
pub mod errors;
pub mod logging;
pub mod root;

pub use cleanup::{CleanupConfig, CommitMode};
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
