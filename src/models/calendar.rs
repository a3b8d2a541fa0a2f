//! Calendar feed data structures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Calendar feed: activities grouped by `YYYY-MM-DD` date string.
///
/// A `BTreeMap` keeps days in chronological order, which the lexical
/// ordering of the date format guarantees.
pub type CalendarData = BTreeMap<String, Vec<CalendarActivity>>;

/// A single scheduled activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarActivity {
    /// Unique identifier
    pub id: i64,

    /// Activity title
    pub title: String,

    /// Display time, e.g. "10:00 - 12:00"
    pub time: String,

    /// Venue
    pub location: String,

    /// Set for multi-day camps
    #[serde(rename = "isCamp", default)]
    pub is_camp: bool,

    /// Groups the days of one camp together
    #[serde(rename = "campId", default)]
    pub camp_id: Option<i64>,

    /// Period-marking hints for multi-day spans
    #[serde(default)]
    pub marking: ActivityMarking,
}

/// Period-marking hints carried per day of a multi-day span.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityMarking {
    #[serde(rename = "startingDay", default)]
    pub starting_day: bool,

    #[serde(rename = "endingDay", default)]
    pub ending_day: bool,
}

/// Highlight category of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayColor {
    /// Multi-day camp
    Camp,
    /// Regular activity
    Activity,
}

impl DayColor {
    /// Display color used by the calendar grid.
    pub fn hex(self) -> &'static str {
        match self {
            DayColor::Camp => "#A6B1E1",
            DayColor::Activity => "#B7C4CF",
        }
    }
}

/// Render-ready marking for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayMarking {
    pub color: DayColor,
    pub starting_day: bool,
    pub ending_day: bool,
}
