// src/services/galleries.rs

//! Gallery feed service.
//!
//! Fetches the gallery index, derives per-gallery thumbnail URIs, and keeps
//! scroll-ahead thumbnails warm with a sliding prefetch window.

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::error::Result;
use crate::images::ImageCache;
use crate::models::{
    Config, GalleryEntry, GalleryIndex, GalleryPhoto, GalleryRef, ManifestImage,
    swap_manifest_suffix,
};
use crate::utils::http::{create_async_client, get_json};
use crate::utils::{extract_gallery_slug, resolve_url};

/// Result of a gallery refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryRefresh {
    /// The fetched list was committed as the visible state.
    Applied(Vec<GalleryRef>),
    /// Not signed in: the held list was cleared and nothing was fetched.
    SignedOut,
    /// A newer refresh started before this one resolved; result discarded.
    Superseded,
}

/// Service for the gallery index and its thumbnails.
pub struct GalleryFeed {
    config: Arc<Config>,
    client: Client,
    cache: Arc<dyn ImageCache>,
    generation: AtomicU64,
    current: Mutex<Vec<GalleryRef>>,
}

impl GalleryFeed {
    /// Create a new gallery feed with the given configuration.
    pub fn new(config: Arc<Config>, cache: Arc<dyn ImageCache>) -> Result<Self> {
        let client = create_async_client(&config.client)?;
        Ok(Self {
            config,
            client,
            cache,
            generation: AtomicU64::new(0),
            current: Mutex::new(Vec::new()),
        })
    }

    fn state(&self) -> MutexGuard<'_, Vec<GalleryRef>> {
        self.current.lock().expect("gallery state lock poisoned")
    }

    /// Galleries currently committed as visible state.
    pub fn galleries(&self) -> Vec<GalleryRef> {
        self.state().clone()
    }

    /// Drop the held gallery list. Must run immediately on sign-out.
    pub fn clear(&self) {
        self.state().clear();
    }

    /// Refresh the gallery list.
    ///
    /// Gallery content requires a signed-in session, so a signed-out
    /// refresh clears the held list and fetches nothing. When refreshes
    /// overlap, only the latest caller's result is committed. A committed
    /// refresh also warms the first prefetch window.
    pub async fn refresh(&self, signed_in: bool) -> Result<GalleryRefresh> {
        if !signed_in {
            self.clear();
            return Ok(GalleryRefresh::SignedOut);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let galleries = self.load_galleries().await?;

        if self.generation.load(Ordering::SeqCst) != generation {
            return Ok(GalleryRefresh::Superseded);
        }

        *self.state() = galleries.clone();

        let initial = 0..self.config.client.prefetch_window.min(galleries.len());
        self.prefetch(&galleries, initial);

        Ok(GalleryRefresh::Applied(galleries))
    }

    /// Fetch and shape the gallery index.
    pub async fn load_galleries(&self) -> Result<Vec<GalleryRef>> {
        let url = self.config.galleries_url();
        let index: GalleryIndex = get_json(&self.client, &url).await?;
        Ok(build_gallery_list(
            &self.config.client.base_url,
            index.galleries,
        ))
    }

    /// Fetch the photo manifest of one gallery.
    pub async fn load_photos(&self, gallery: &GalleryRef) -> Result<Vec<GalleryPhoto>> {
        let images: Vec<ManifestImage> = get_json(&self.client, &gallery.api_endpoint).await?;
        let base = self.config.base()?;
        Ok(images
            .into_iter()
            .enumerate()
            .map(|(index, image)| GalleryPhoto {
                id: format!("{}-{}", index, image.url),
                uri: resolve_url(&base, &image.url),
                width: image.width,
                height: image.height,
            })
            .collect())
    }

    /// Fire-and-forget prefetch of both thumbnail URIs for a range of items.
    ///
    /// The fire set is unordered and failures are logged, never propagated:
    /// a cold image at render time falls through to an on-demand load.
    pub fn prefetch(&self, items: &[GalleryRef], range: Range<usize>) {
        let start = range.start.min(items.len());
        let end = range.end.min(items.len());
        if start >= end {
            return;
        }

        let uris: Vec<String> = items[start..end]
            .iter()
            .flat_map(|item| {
                [
                    item.thumbnail_uri.clone(),
                    item.fallback_thumbnail_uri.clone(),
                ]
            })
            .collect();

        let cache = Arc::clone(&self.cache);
        let concurrency = self.config.client.prefetch_concurrent.max(1);
        tokio::spawn(async move {
            let mut warmups = stream::iter(uris)
                .map(|uri| {
                    let cache = Arc::clone(&cache);
                    async move {
                        let result = cache.prefetch(&uri).await;
                        (uri, result)
                    }
                })
                .buffer_unordered(concurrency);

            while let Some((uri, result)) = warmups.next().await {
                if let Err(error) = result {
                    log::warn!("Failed to prefetch {uri}: {error}");
                }
            }
        });
    }

    /// Compute the prefetch window to request after a scroll, using the
    /// configured window size.
    pub fn next_window(&self, visible_end: usize, total: usize) -> Range<usize> {
        next_prefetch_window(visible_end, total, self.config.client.prefetch_window)
    }
}

/// Compute the prefetch window following the last visible item.
///
/// Half-open `[visible_end + 1, min(visible_end + 1 + window, total))`,
/// clamped so it never exceeds the list.
pub fn next_prefetch_window(visible_end: usize, total: usize, window: usize) -> Range<usize> {
    let start = (visible_end + 1).min(total);
    let end = start.saturating_add(window).min(total);
    start..end
}

/// Shape index entries into display order.
///
/// Entries without a usable href are dropped with a warning rather than
/// failing the load. Survivors are reversed so the last-declared (newest)
/// gallery leads the list.
pub fn build_gallery_list(base_url: &str, entries: Vec<GalleryEntry>) -> Vec<GalleryRef> {
    let mut galleries: Vec<GalleryRef> = entries
        .into_iter()
        .filter_map(|entry| {
            let Some(href) = entry.href else {
                log::warn!("Invalid or missing link for gallery: {}", entry.name);
                return None;
            };
            Some(GalleryRef {
                slug: extract_gallery_slug(&href),
                api_endpoint: format!("{base_url}{href}"),
                thumbnail_uri: format!("{base_url}{}", swap_manifest_suffix(&href, "-1.jpg")),
                fallback_thumbnail_uri: format!(
                    "{base_url}{}",
                    swap_manifest_suffix(&href, "-1.jpeg")
                ),
                name: entry.name,
            })
        })
        .collect();
    galleries.reverse();
    galleries
}
