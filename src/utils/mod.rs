//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Extract the manifest stem of a gallery href.
///
/// `/galleries/2024-summer-camp.json` → `2024-summer-camp`. Used as a
/// stable list key for gallery references.
pub fn extract_gallery_slug(href: &str) -> Option<String> {
    let pattern = regex::Regex::new(r"([^/]+)\.json$").ok()?;
    pattern
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_url(&base, "page.html"),
            "https://example.com/path/page.html"
        );
        assert_eq!(
            resolve_url(&base, "/root.html"),
            "https://example.com/root.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_extract_gallery_slug() {
        assert_eq!(
            extract_gallery_slug("/galleries/2024-summer-camp.json"),
            Some("2024-summer-camp".to_string())
        );
        assert_eq!(
            extract_gallery_slug("https://example.com/g/trip.json"),
            Some("trip".to_string())
        );
        assert_eq!(extract_gallery_slug("/galleries/2024-summer-camp"), None);
    }
}
