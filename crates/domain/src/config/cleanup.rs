use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// When removals become durable during execution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitMode {
    /// One transaction per content type: a batch lands completely or not at all
    #[default]
    Batch,
    /// Commit after every record; a failure keeps the records already removed
    Record,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// IANA zone used to resolve date-only thresholds to start of day
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Re-check each candidate right before removing it, skipping records
    /// that were placed into a layout after discovery.
    #[serde(default = "default_true")]
    pub revalidate_before_delete: bool,

    /// Invalid threshold answers tolerated before the default date is used
    #[serde(default = "default_max_threshold_attempts")]
    pub max_threshold_attempts: u32,

    #[serde(default)]
    pub commit_mode: CommitMode,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            revalidate_before_delete: true,
            max_threshold_attempts: default_max_threshold_attempts(),
            commit_mode: CommitMode::default(),
        }
    }
}

impl CleanupConfig {
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.parse::<Tz>().ok()
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_threshold_attempts() -> u32 {
    3
}
