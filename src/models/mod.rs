// src/models/mod.rs

//! Domain models for the club content client.
//!
//! This module contains all data structures used throughout the crate,
//! organized by the feed they belong to.

mod calendar;
mod config;
mod gallery;
mod notice;

// Re-export all public types
pub use calendar::{ActivityMarking, CalendarActivity, CalendarData, DayColor, DayMarking};
pub use config::{ClientConfig, Config, EndpointsConfig};
pub use gallery::{
    GalleryEntry, GalleryIndex, GalleryPhoto, GalleryRef, ManifestImage, ThumbnailSlot,
    ThumbnailState, swap_manifest_suffix,
};
pub use notice::{
    BucketKind, NoticeBucket, NoticeItem, TARGET_ADVENTURER, TARGET_PATHFINDER, TargetColor,
};
