use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Content types subject to retention cleanup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Media,
    Slide,
    Channel,
}

impl ContentKind {
    /// Discovery and execution order. Channels go last so that a future
    /// cross-type cascade never sees a channel removed before its slides.
    pub const CLEANUP_ORDER: [ContentKind; 3] =
        [ContentKind::Media, ContentKind::Slide, ContentKind::Channel];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Media => "media",
            ContentKind::Slide => "slide",
            ContentKind::Channel => "channel",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            ContentKind::Media => "media",
            ContentKind::Slide => "slides",
            ContentKind::Channel => "channels",
        }
    }

    /// Name of the association that places a record into a display layout
    pub fn association_label(&self) -> &'static str {
        match self {
            ContentKind::Media => "media orders",
            ContentKind::Slide => "channel slide orders",
            ContentKind::Channel => "channel screen regions",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A media, slide or channel row as seen by the retention subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub id: i64,
    pub kind: ContentKind,
    pub title: Option<Arc<str>>,
    pub updated_at: DateTime<Utc>,
    pub association_count: u64,
}

impl ContentRecord {
    pub fn new(id: i64, kind: ContentKind, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            kind,
            title: None,
            updated_at,
            association_count: 0,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(Arc::from(title));
        self
    }

    pub fn with_associations(mut self, count: u64) -> Self {
        self.association_count = count;
        self
    }

    /// No ordering or placement association references this record
    pub fn is_orphaned(&self) -> bool {
        self.association_count == 0
    }

    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{} #{} \"{}\"", self.kind, self.id, title),
            None => format!("{} #{}", self.kind, self.id),
        }
    }
}
