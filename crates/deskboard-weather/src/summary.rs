//! Reduce the 3-hourly forecast to one entry per upcoming calendar day.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::types::{DailyForecastSummary, ForecastResponse};

/// Number of days shown in the forecast row.
pub const MAX_SUMMARY_DAYS: usize = 6;

/// One summary per calendar day after `now`'s date, oldest first, at most
/// [`MAX_SUMMARY_DAYS`].
///
/// Days are computed in `now`'s timezone. Each day is represented by the
/// first sample the forecast lists for it; later samples of the same day
/// are ignored.
pub fn daily_summaries<Tz: TimeZone>(
    forecast: &ForecastResponse,
    now: &DateTime<Tz>,
) -> Vec<DailyForecastSummary> {
    let tz = now.timezone();
    let today = now.date_naive();
    let mut days: BTreeMap<NaiveDate, DailyForecastSummary> = BTreeMap::new();

    for entry in &forecast.list {
        let Some(sampled_at) = entry.time() else {
            tracing::debug!("Skipping forecast sample with invalid timestamp {}", entry.dt);
            continue;
        };

        let date = sampled_at.with_timezone(&tz).date_naive();
        if date == today {
            continue;
        }

        days.entry(date).or_insert_with(|| {
            let conditions = entry.weather.first();
            DailyForecastSummary {
                date,
                temp: entry.main.temp,
                description: conditions.map(|c| c.description.clone()).unwrap_or_default(),
                icon: conditions.map(|c| c.icon.clone()).unwrap_or_default(),
                sampled_at,
            }
        });
    }

    days.into_values().take(MAX_SUMMARY_DAYS).collect()
}

/// [`daily_summaries`] in the machine's local timezone.
pub fn daily_summaries_local(forecast: &ForecastResponse) -> Vec<DailyForecastSummary> {
    daily_summaries(forecast, &Local::now())
}
