// src/services/notices.rs

//! Notice board service.
//!
//! Fetches the notice feed and shapes it into dated display buckets, with a
//! local cache fallback for offline refreshes.

use std::cmp::Reverse;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::Client;

use crate::error::Result;
use crate::models::{
    BucketKind, Config, NoticeBucket, NoticeItem, TARGET_ADVENTURER, TARGET_PATHFINDER,
    TargetColor,
};
use crate::storage::NoticeCache;
use crate::utils::http::{create_async_client, get_json};

/// A loaded notice list plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeLoad {
    pub notices: Vec<NoticeItem>,
    /// True when the list was served from the local cache after a
    /// network-level failure (degraded mode).
    pub from_cache: bool,
}

/// Result of a notice refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeRefresh {
    /// The loaded list should be applied as the visible state.
    Applied(NoticeLoad),
    /// A newer refresh started before this one resolved; result discarded.
    Superseded,
}

/// Service for the notice feed.
pub struct NoticeBoard {
    config: Arc<Config>,
    client: Client,
    cache: Option<Arc<dyn NoticeCache>>,
    generation: AtomicU64,
}

impl NoticeBoard {
    /// Create a new notice board with the given configuration.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = create_async_client(&config.client)?;
        Ok(Self {
            config,
            client,
            cache: None,
            generation: AtomicU64::new(0),
        })
    }

    /// Attach a cache used for offline fallback.
    pub fn with_cache(mut self, cache: Arc<dyn NoticeCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Fetch and decode the notice feed.
    ///
    /// A malformed body fails the whole load; there is no per-item
    /// salvage on this endpoint.
    pub async fn load_notices(&self) -> Result<Vec<NoticeItem>> {
        let url = self.config.notices_url();
        get_json(&self.client, &url).await
    }

    /// Refresh the notice list.
    ///
    /// On success the list is mirrored to the local cache. On a
    /// network-level failure the cached list is served in degraded mode;
    /// decode failures always propagate. When refreshes overlap, only the
    /// latest caller's result is applied.
    pub async fn refresh(&self) -> Result<NoticeRefresh> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let load = match self.load_notices().await {
            Ok(notices) => {
                if let Some(cache) = &self.cache {
                    if let Err(error) = cache.store(&notices).await {
                        log::warn!("Failed to cache notices: {error}");
                    }
                }
                NoticeLoad {
                    notices,
                    from_cache: false,
                }
            }
            Err(error) if error.is_network_failure() => {
                let Some(cache) = &self.cache else {
                    return Err(error);
                };
                match cache.load().await {
                    Ok(Some(snapshot)) => {
                        log::warn!(
                            "Notice fetch failed ({error}); serving {} cached notices",
                            snapshot.count
                        );
                        NoticeLoad {
                            notices: snapshot.notices,
                            from_cache: true,
                        }
                    }
                    _ => return Err(error),
                }
            }
            Err(error) => return Err(error),
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            return Ok(NoticeRefresh::Superseded);
        }
        Ok(NoticeRefresh::Applied(load))
    }
}

/// Parse a feed date string to a calendar day.
///
/// Single normalization point for every day-granularity comparison in the
/// crate. Dates are plain local calendar days; no timezone conversion.
pub fn normalize_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Partition notices into display buckets for the given day.
///
/// Today's items count as upcoming. Upcoming sorts ascending (soonest
/// first), past sorts descending (most recent first); both sorts are
/// stable so equal dates keep source order. Empty buckets are omitted.
/// Items whose date does not parse are dropped with a warning.
pub fn partition(notices: &[NoticeItem], today: NaiveDate) -> Vec<NoticeBucket> {
    let mut upcoming: Vec<(NaiveDate, NoticeItem)> = Vec::new();
    let mut past: Vec<(NaiveDate, NoticeItem)> = Vec::new();

    for notice in notices {
        let Some(date) = normalize_date(&notice.date) else {
            log::warn!("Unparseable date '{}' for notice {}", notice.date, notice.id);
            continue;
        };
        if date >= today {
            upcoming.push((date, notice.clone()));
        } else {
            past.push((date, notice.clone()));
        }
    }

    upcoming.sort_by_key(|(date, _)| *date);
    past.sort_by_key(|(date, _)| Reverse(*date));

    let mut buckets = Vec::new();
    if !upcoming.is_empty() {
        buckets.push(NoticeBucket {
            kind: BucketKind::Upcoming,
            items: upcoming.into_iter().map(|(_, notice)| notice).collect(),
        });
    }
    if !past.is_empty() {
        buckets.push(NoticeBucket {
            kind: BucketKind::Past,
            items: past.into_iter().map(|(_, notice)| notice).collect(),
        });
    }
    buckets
}

/// Map a notice's audience tag set to its display category.
///
/// Total mapping: anything that is not exactly one section (both sections,
/// 所有成員, unknown tags, empty) is the combined category.
pub fn target_color(targets: &[String]) -> TargetColor {
    let pathfinder = targets.iter().any(|t| t == TARGET_PATHFINDER);
    let adventurer = targets.iter().any(|t| t == TARGET_ADVENTURER);
    match (pathfinder, adventurer) {
        (true, false) => TargetColor::Pathfinder,
        (false, true) => TargetColor::Adventurer,
        _ => TargetColor::Combined,
    }
}

/// Color for one rendered audience tag.
pub fn single_target_color(target: &str) -> TargetColor {
    if target == TARGET_PATHFINDER {
        TargetColor::Pathfinder
    } else if target == TARGET_ADVENTURER {
        TargetColor::Adventurer
    } else {
        TargetColor::Combined
    }
}

/// Whether a notice is at most seven days old.
///
/// Ceiling day difference: a date exactly seven days before `reference` is
/// recent, eight days is not. Future dates are always recent.
pub fn is_recent(date: NaiveDate, reference: NaiveDateTime) -> bool {
    let midnight = date.and_time(NaiveTime::MIN);
    // Ceiling division of seconds by one day. `i64::div_ceil` is still unstable
    // (int_roundings), so inline its definition for the positive divisor case.
    let secs = (reference - midnight).num_seconds();
    let days = {
        let d = secs / 86_400;
        let r = secs % 86_400;
        if r > 0 { d + 1 } else { d }
    };
    days <= 7
}

/// Whether a notice's day is before the reference day.
pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Whether the "新" badge should render for a notice.
pub fn shows_new_badge(date: NaiveDate, reference: NaiveDateTime) -> bool {
    is_recent(date, reference) && !is_past(date, reference.date())
}

/// Format a feed date for display: `2024-06-05` → `2024年6月5日`.
///
/// Unparseable input is returned as-is.
pub fn format_display_date(value: &str) -> String {
    match normalize_date(value) {
        Some(date) => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: &str, date: &str, targets: &[&str]) -> NoticeItem {
        NoticeItem {
            id: id.to_string(),
            title: format!("notice {id}"),
            date: date.to_string(),
            activity_type: "集會".to_string(),
            pdf_url: Vec::new(),
            target: targets.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn day(value: &str) -> NaiveDate {
        normalize_date(value).unwrap()
    }

    #[test]
    fn partition_splits_on_today_inclusive() {
        let notices = vec![
            notice("a", "2024-06-09", &[]),
            notice("b", "2024-06-10", &[]),
            notice("c", "2024-06-15", &[]),
        ];
        let buckets = partition(&notices, day("2024-06-10"));

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].kind, BucketKind::Upcoming);
        let upcoming: Vec<_> = buckets[0].items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(upcoming, vec!["b", "c"]);

        assert_eq!(buckets[1].kind, BucketKind::Past);
        let past: Vec<_> = buckets[1].items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(past, vec!["a"]);
    }

    #[test]
    fn partition_sorts_past_descending() {
        let notices = vec![
            notice("old", "2024-01-05", &[]),
            notice("older", "2023-12-01", &[]),
            notice("recent", "2024-05-20", &[]),
        ];
        let buckets = partition(&notices, day("2024-06-10"));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].kind, BucketKind::Past);
        let ids: Vec<_> = buckets[0].items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["recent", "old", "older"]);
    }

    #[test]
    fn partition_keeps_source_order_on_equal_dates() {
        let notices = vec![
            notice("first", "2024-07-01", &[]),
            notice("second", "2024-07-01", &[]),
            notice("third", "2024-07-01", &[]),
        ];
        let buckets = partition(&notices, day("2024-06-10"));
        let ids: Vec<_> = buckets[0].items.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn partition_omits_empty_buckets() {
        let buckets = partition(&[notice("a", "2024-06-15", &[])], day("2024-06-10"));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].kind, BucketKind::Upcoming);

        assert!(partition(&[], day("2024-06-10")).is_empty());
    }

    #[test]
    fn partition_drops_unparseable_dates() {
        let notices = vec![
            notice("good", "2024-06-15", &[]),
            notice("bad", "soon", &[]),
        ];
        let buckets = partition(&notices, day("2024-06-10"));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].items.len(), 1);
        assert_eq!(buckets[0].items[0].id, "good");
    }

    #[test]
    fn target_color_mapping() {
        let tags = |values: &[&str]| -> Vec<String> {
            values.iter().map(|v| v.to_string()).collect()
        };

        assert_eq!(
            target_color(&tags(&["前鋒會", "幼鋒會"])),
            TargetColor::Combined
        );
        assert_eq!(target_color(&tags(&["前鋒會"])), TargetColor::Pathfinder);
        assert_eq!(target_color(&tags(&["幼鋒會"])), TargetColor::Adventurer);
        assert_eq!(target_color(&tags(&["所有成員"])), TargetColor::Combined);
        assert_eq!(target_color(&tags(&[])), TargetColor::Combined);
    }

    #[test]
    fn single_target_color_mapping() {
        assert_eq!(single_target_color("前鋒會"), TargetColor::Pathfinder);
        assert_eq!(single_target_color("幼鋒會"), TargetColor::Adventurer);
        assert_eq!(single_target_color("所有成員"), TargetColor::Combined);
    }

    #[test]
    fn is_recent_boundary_at_seven_days() {
        let reference = day("2024-06-10").and_time(NaiveTime::MIN);
        assert!(is_recent(day("2024-06-03"), reference));
        assert!(!is_recent(day("2024-06-02"), reference));
    }

    #[test]
    fn is_recent_for_future_dates() {
        let reference = day("2024-06-10").and_time(NaiveTime::MIN);
        assert!(is_recent(day("2024-06-15"), reference));
    }

    #[test]
    fn new_badge_excludes_past_items() {
        let reference = day("2024-06-10").and_time(NaiveTime::MIN);
        // Three days old: recent by age, but already past — no badge.
        assert!(is_recent(day("2024-06-07"), reference));
        assert!(!shows_new_badge(day("2024-06-07"), reference));
        // Today and future dates carry the badge.
        assert!(shows_new_badge(day("2024-06-10"), reference));
        assert!(shows_new_badge(day("2024-06-20"), reference));
    }

    #[test]
    fn display_date_formatting() {
        assert_eq!(format_display_date("2024-06-05"), "2024年6月5日");
        assert_eq!(format_display_date("2024-12-25"), "2024年12月25日");
        assert_eq!(format_display_date("not a date"), "not a date");
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_date(" 2024-06-05 "), Some(day("2024-06-05")));
        assert_eq!(normalize_date("2024/06/05"), None);
    }
}
