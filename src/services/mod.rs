//! Service layer for the club content client.
//!
//! This module contains the business logic for:
//! - Gallery index and thumbnails (`GalleryFeed`)
//! - Notice board shaping (`NoticeBoard`)
//! - Activity calendar (`CalendarFeed`)
//! - Contact form submission (`ContactForm`)

mod calendar;
mod contact;
mod galleries;
mod notices;

pub use calendar::{CalendarFeed, activities_in_month, day_markings};
pub use contact::{ContactForm, ContactMessage};
pub use galleries::{GalleryFeed, GalleryRefresh, build_gallery_list, next_prefetch_window};
pub use notices::{
    NoticeBoard, NoticeLoad, NoticeRefresh, format_display_date, is_past, is_recent,
    normalize_date, partition, shows_new_badge, single_target_color, target_color,
};
