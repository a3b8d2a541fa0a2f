//! Notice data structures.

use serde::{Deserialize, Serialize};

/// Audience tag of the pathfinder section (前鋒會).
pub const TARGET_PATHFINDER: &str = "前鋒會";

/// Audience tag of the adventurer section (幼鋒會).
pub const TARGET_ADVENTURER: &str = "幼鋒會";

/// A dated announcement as served by the notice feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeItem {
    /// Unique identifier
    pub id: String,

    /// Notice title
    pub title: String,

    /// Activity date, `YYYY-MM-DD` (day granularity)
    pub date: String,

    /// Activity type label
    #[serde(rename = "activityType")]
    pub activity_type: String,

    /// Attachment paths, in display order
    #[serde(rename = "pdfUrl", default)]
    pub pdf_url: Vec<String>,

    /// Audience tags (前鋒會, 幼鋒會, or other labels such as 所有成員)
    #[serde(default)]
    pub target: Vec<String>,
}

/// Which display section a bucket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    Upcoming,
    Past,
}

impl BucketKind {
    /// Section header text.
    pub fn title(self) -> &'static str {
        match self {
            BucketKind::Upcoming => "即將舉行",
            BucketKind::Past => "較早通知",
        }
    }
}

/// An ordered display section of notices.
///
/// Buckets are rebuilt from the full notice list on every refresh, never
/// mutated in place. Empty buckets are not emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeBucket {
    pub kind: BucketKind,
    pub items: Vec<NoticeItem>,
}

impl NoticeBucket {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Visual category for a notice, keyed on its audience tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetColor {
    /// 前鋒會 only
    Pathfinder,
    /// 幼鋒會 only
    Adventurer,
    /// Both sections, or any other audience
    Combined,
}

impl TargetColor {
    /// Display color, matching the app's legend.
    pub fn hex(self) -> &'static str {
        match self {
            TargetColor::Pathfinder => "#8fce91",
            TargetColor::Adventurer => "#6bb9f7",
            TargetColor::Combined => "#a17cc4",
        }
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            TargetColor::Pathfinder => TARGET_PATHFINDER,
            TargetColor::Adventurer => TARGET_ADVENTURER,
            TargetColor::Combined => "前鋒會及幼鋒會",
        }
    }
}
