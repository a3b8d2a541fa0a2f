// src/services/calendar.rs

//! Calendar feed service.
//!
//! Fetches the activity calendar (a map of date string to activity list)
//! and derives the per-day grid markings.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::Client;

use crate::error::Result;
use crate::models::{CalendarActivity, CalendarData, Config, DayColor, DayMarking};
use crate::utils::http::{create_async_client, get_json};

/// Service for the activity calendar feed.
pub struct CalendarFeed {
    config: Arc<Config>,
    client: Client,
}

impl CalendarFeed {
    /// Create a new calendar feed with the given configuration.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = create_async_client(&config.client)?;
        Ok(Self { config, client })
    }

    /// Fetch and decode the calendar feed.
    pub async fn load_activities(&self) -> Result<CalendarData> {
        let url = self.config.calendar_url();
        get_json(&self.client, &url).await
    }
}

/// Activities of one `YYYY-MM` month, flattened in day order.
pub fn activities_in_month<'a>(
    data: &'a CalendarData,
    month: &str,
) -> Vec<(&'a str, &'a CalendarActivity)> {
    data.iter()
        .filter(|(date, _)| date.starts_with(month))
        .flat_map(|(date, activities)| {
            activities.iter().map(move |activity| (date.as_str(), activity))
        })
        .collect()
}

/// Derive per-day highlight markings for the calendar grid.
///
/// The first activity of a day decides its color; camp days carry the
/// span's starting/ending flags. Days with an empty activity list are
/// skipped.
pub fn day_markings(data: &CalendarData) -> BTreeMap<String, DayMarking> {
    data.iter()
        .filter_map(|(date, activities)| {
            let first = activities.first()?;
            Some((
                date.clone(),
                DayMarking {
                    color: if first.is_camp {
                        DayColor::Camp
                    } else {
                        DayColor::Activity
                    },
                    starting_day: first.marking.starting_day,
                    ending_day: first.marking.ending_day,
                },
            ))
        })
        .collect()
}
