//! Forecast aggregation: group 3-hour samples by calendar day and reduce
//! each day to a display summary.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::types::{Sample, WeatherIcon};

/// Number of days shown by default.
pub const DISPLAY_WINDOW_DAYS: usize = skycast_core::MAX_FORECAST_DAYS;

/// All samples that fall on one calendar date, in input order.
///
/// Only built by [`group_by_day_in`], so a group always holds at least one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    date: NaiveDate,
    samples: Vec<Sample>,
}

impl DayGroup {
    fn new(date: NaiveDate, first: Sample) -> Self {
        Self {
            date,
            samples: vec![first],
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

/// Display-ready reduction of a [`DayGroup`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Arithmetic mean of the day's temperatures (unrounded)
    pub average_temperature: f64,
    pub description: String,
    pub icon: String,
}

impl DailySummary {
    /// Average temperature rounded for display
    pub fn display_temperature(&self) -> i64 {
        round_half_up(self.average_temperature)
    }

    pub fn weather_icon(&self) -> WeatherIcon {
        WeatherIcon::from_code(&self.icon)
    }
}

/// Round to the nearest integer with halves going toward positive infinity,
/// so -2.5 becomes -2 and 2.5 becomes 3.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Group samples by their calendar date in the local time zone.
pub fn group_by_day(samples: &[Sample]) -> Vec<DayGroup> {
    group_by_day_in(samples, &Local)
}

/// Group samples by their calendar date in `tz`.
///
/// Groups come back in the order their dates first appear. A sample whose
/// date was seen earlier joins that group even when other dates came in
/// between. No sample is dropped: a timestamp outside chrono's range is
/// filed under `NaiveDate::MAX` (or `NaiveDate::MIN` when negative).
pub fn group_by_day_in<Tz: TimeZone>(samples: &[Sample], tz: &Tz) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let date = local_date(sample.timestamp, tz);

        match index.get(&date) {
            Some(&i) => groups[i].samples.push(sample.clone()),
            None => {
                index.insert(date, groups.len());
                groups.push(DayGroup::new(date, sample.clone()));
            }
        }
    }

    groups
}

fn local_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> NaiveDate {
    match tz.timestamp_opt(timestamp, 0).earliest() {
        Some(moment) => moment.date_naive(),
        None => {
            tracing::warn!("Timestamp {} is out of range", timestamp);
            if timestamp < 0 {
                NaiveDate::MIN
            } else {
                NaiveDate::MAX
            }
        }
    }
}

/// Reduce a day to its average temperature and most frequent description and icon.
pub fn summarize(group: &DayGroup) -> DailySummary {
    let count = group.samples.len().max(1) as f64;
    let total: f64 = group.samples.iter().map(|s| s.temperature).sum();

    DailySummary {
        date: group.date,
        average_temperature: total / count,
        description: dominant(group.samples.iter().map(|s| s.description.as_str()))
            .unwrap_or_default()
            .to_string(),
        icon: dominant(group.samples.iter().map(|s| s.icon.as_str()))
            .unwrap_or_default()
            .to_string(),
    }
}

/// Summaries for the first `days` groups, in group order.
pub fn select_display_window(groups: &[DayGroup], days: usize) -> Vec<DailySummary> {
    groups.iter().take(days).map(summarize).collect()
}

/// Most frequent value. Ties go to the value seen first.
pub fn dominant<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    let mut first_seen: Vec<&'a str> = Vec::new();

    for value in values {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            first_seen.push(value);
        }
        *count += 1;
    }

    let mut best: Option<(&'a str, usize)> = None;
    for value in first_seen {
        let count = counts.get(value).copied().unwrap_or(0);
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value)
}
