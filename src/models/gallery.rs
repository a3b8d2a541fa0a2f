//! Gallery data structures.

use serde::{Deserialize, Serialize};

/// Wire shape of the gallery index endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryIndex {
    pub galleries: Vec<GalleryEntry>,
}

/// One gallery entry as served by the index endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryEntry {
    /// Display label
    #[serde(default)]
    pub name: String,

    /// Relative path of the per-gallery manifest.
    ///
    /// Decoded leniently: a missing, empty, or non-string value becomes
    /// `None`, so a single bad entry cannot fail the whole index decode.
    #[serde(default, deserialize_with = "lenient_href")]
    pub href: Option<String>,
}

fn lenient_href<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// A gallery reference shaped for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GalleryRef {
    /// Display label
    pub name: String,

    /// Stable list key derived from the manifest stem, when one exists
    pub slug: Option<String>,

    /// Absolute URL of the per-gallery photo manifest
    pub api_endpoint: String,

    /// Absolute URL of the primary thumbnail
    pub thumbnail_uri: String,

    /// Absolute URL of the fallback thumbnail
    ///
    /// The origin serves `.jpg` for some galleries and `.jpeg` for others,
    /// so both spellings are derived up front.
    pub fallback_thumbnail_uri: String,
}

impl GalleryRef {
    /// Stable key for list rendering.
    pub fn key(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.api_endpoint)
    }
}

/// Replace a trailing `.json` with the given suffix.
///
/// An href without the suffix passes through unchanged, matching the
/// server's own link format.
pub fn swap_manifest_suffix(href: &str, suffix: &str) -> String {
    match href.strip_suffix(".json") {
        Some(stem) => format!("{stem}{suffix}"),
        None => href.to_string(),
    }
}

/// One image of a per-gallery manifest as served.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A photo shaped for grid display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GalleryPhoto {
    /// Stable id: manifest index plus source path
    pub id: String,

    /// Absolute image URL
    pub uri: String,

    /// Original pixel width
    pub width: u32,

    /// Original pixel height
    pub height: u32,
}

/// Load state of a rendered thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailState {
    Loading,
    Loaded,
    Failed,
}

/// Per-item thumbnail load tracker with a one-shot fallback retry.
///
/// Transitions: `Loading --success--> Loaded`;
/// `Loading --error, fallback unused--> Loading` (URI switched to the
/// fallback); `Loading --error, fallback used or absent--> Failed`.
/// `Failed` is terminal for the render instance.
#[derive(Debug, Clone)]
pub struct ThumbnailSlot {
    primary: String,
    fallback: Option<String>,
    on_fallback: bool,
    state: ThumbnailState,
}

impl ThumbnailSlot {
    /// Create a slot for a gallery reference.
    pub fn new(gallery: &GalleryRef) -> Self {
        Self::with_sources(
            gallery.thumbnail_uri.clone(),
            Some(gallery.fallback_thumbnail_uri.clone()),
        )
    }

    /// Create a slot from explicit sources.
    pub fn with_sources(primary: String, fallback: Option<String>) -> Self {
        Self {
            primary,
            fallback,
            on_fallback: false,
            state: ThumbnailState::Loading,
        }
    }

    /// URI the renderer should currently display.
    pub fn current_uri(&self) -> &str {
        if self.on_fallback {
            self.fallback.as_deref().unwrap_or(&self.primary)
        } else {
            &self.primary
        }
    }

    pub fn state(&self) -> ThumbnailState {
        self.state
    }

    /// Whether press interaction is enabled for this item.
    pub fn is_interactive(&self) -> bool {
        self.state != ThumbnailState::Failed
    }

    /// Record a successful load of the current URI.
    pub fn mark_loaded(&mut self) {
        if self.state == ThumbnailState::Loading {
            self.state = ThumbnailState::Loaded;
        }
    }

    /// Record a load error for the current URI.
    ///
    /// Returns `true` when a fallback retry was scheduled; the caller
    /// should re-attempt with [`current_uri`](Self::current_uri).
    pub fn mark_failed(&mut self) -> bool {
        if self.state != ThumbnailState::Loading {
            return false;
        }
        if !self.on_fallback && self.fallback.is_some() {
            self.on_fallback = true;
            return true;
        }
        self.state = ThumbnailState::Failed;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_gallery() -> GalleryRef {
        GalleryRef {
            name: "2024 夏令營".to_string(),
            slug: Some("2024-summer-camp".to_string()),
            api_endpoint: "https://example.com/galleries/2024-summer-camp.json".to_string(),
            thumbnail_uri: "https://example.com/galleries/2024-summer-camp-1.jpg".to_string(),
            fallback_thumbnail_uri: "https://example.com/galleries/2024-summer-camp-1.jpeg"
                .to_string(),
        }
    }

    #[test]
    fn swap_suffix_replaces_trailing_json() {
        assert_eq!(
            swap_manifest_suffix("/galleries/camp.json", "-1.jpg"),
            "/galleries/camp-1.jpg"
        );
        assert_eq!(
            swap_manifest_suffix("/galleries/camp.json", "-1.jpeg"),
            "/galleries/camp-1.jpeg"
        );
    }

    #[test]
    fn swap_suffix_passes_through_without_json() {
        assert_eq!(swap_manifest_suffix("/galleries/camp", "-1.jpg"), "/galleries/camp");
    }

    #[test]
    fn lenient_href_drops_non_string_values() {
        let index: GalleryIndex = serde_json::from_str(
            r#"{"galleries": [
                {"name": "a", "href": "/galleries/a.json"},
                {"name": "b", "href": 42},
                {"name": "c"},
                {"name": "d", "href": ""}
            ]}"#,
        )
        .unwrap();
        let hrefs: Vec<_> = index.galleries.iter().map(|g| g.href.clone()).collect();
        assert_eq!(
            hrefs,
            vec![Some("/galleries/a.json".to_string()), None, None, None]
        );
    }

    #[test]
    fn slot_loads_from_primary() {
        let mut slot = ThumbnailSlot::new(&sample_gallery());
        assert_eq!(slot.state(), ThumbnailState::Loading);
        slot.mark_loaded();
        assert_eq!(slot.state(), ThumbnailState::Loaded);
        assert!(slot.is_interactive());
    }

    #[test]
    fn slot_retries_fallback_then_loads() {
        let gallery = sample_gallery();
        let mut slot = ThumbnailSlot::new(&gallery);
        assert!(slot.mark_failed());
        assert_eq!(slot.state(), ThumbnailState::Loading);
        assert_eq!(slot.current_uri(), gallery.fallback_thumbnail_uri);
        slot.mark_loaded();
        assert_eq!(slot.state(), ThumbnailState::Loaded);
    }

    #[test]
    fn slot_fails_terminally_after_both_sources() {
        let mut slot = ThumbnailSlot::new(&sample_gallery());
        assert!(slot.mark_failed());
        assert!(!slot.mark_failed());
        assert_eq!(slot.state(), ThumbnailState::Failed);
        assert!(!slot.is_interactive());

        // A third error must not restart the retry cycle.
        assert!(!slot.mark_failed());
        assert_eq!(slot.state(), ThumbnailState::Failed);
    }

    #[test]
    fn slot_without_fallback_fails_on_first_error() {
        let mut slot = ThumbnailSlot::with_sources("https://x/1.jpg".to_string(), None);
        assert!(!slot.mark_failed());
        assert_eq!(slot.state(), ThumbnailState::Failed);
    }

    #[test]
    fn key_prefers_slug() {
        let gallery = sample_gallery();
        assert_eq!(gallery.key(), "2024-summer-camp");

        let mut anonymous = gallery.clone();
        anonymous.slug = None;
        assert_eq!(anonymous.key(), anonymous.api_endpoint);
    }
}
