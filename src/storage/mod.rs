//! Local persistence for offline fallback.
//!
//! A successful notice fetch is mirrored to disk so a network outage can
//! serve the previous list in degraded mode. The cache holds exactly one
//! snapshot; every write replaces the previous one.

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::NoticeItem;

// Re-export for convenience
pub use local::LocalCache;

/// Envelope for the cached notice list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedNotices {
    /// ISO 8601 timestamp of the snapshot
    pub updated_at: DateTime<Utc>,
    /// Total notice count
    pub count: usize,
    /// The notices array
    pub notices: Vec<NoticeItem>,
}

impl CachedNotices {
    pub fn new(notices: Vec<NoticeItem>) -> Self {
        Self {
            updated_at: Utc::now(),
            count: notices.len(),
            notices,
        }
    }
}

/// Trait for notice cache backends.
#[async_trait]
pub trait NoticeCache: Send + Sync {
    /// Persist the latest fetched notice list.
    async fn store(&self, notices: &[NoticeItem]) -> Result<()>;

    /// Load the cached list, if one exists.
    async fn load(&self) -> Result<Option<CachedNotices>>;
}
