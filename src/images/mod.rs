//! Image prefetch primitives.
//!
//! Thumbnails are rendered by an external image component; this module is
//! the cache-warming seam the gallery feed drives ahead of scroll.

pub mod http;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use http::HttpImageCache;

/// Image caching/prefetch primitive.
///
/// `prefetch` is a hint, not a guarantee: the gallery feed never relies on
/// a prefetched image being present at render time, and absence falls
/// through to an on-demand load.
#[async_trait]
pub trait ImageCache: Send + Sync {
    /// Request that the image at `uri` be warmed into the cache.
    async fn prefetch(&self, uri: &str) -> Result<()>;
}
