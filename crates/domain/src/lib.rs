//! Signage Domain Layer
pub mod config;
pub mod content;
pub mod errors;
pub mod retention;
pub mod threshold;

pub use config::{
    CleanupConfig, CliOverrides, CommitMode, Config, ConfigError, DatabaseConfig, LoggingConfig,
};
pub use content::{ContentKind, ContentRecord};
pub use errors::DomainError;
pub use retention::RetentionPolicy;
pub use threshold::{DeletionThreshold, THRESHOLD_DATE_FORMAT};
