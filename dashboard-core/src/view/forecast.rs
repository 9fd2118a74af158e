use chrono::NaiveDate;
use std::fmt;

use crate::model::{ForecastSample, round_half_up};

/// Samples shown in the hourly strip (eight 3-hour steps, about a day).
pub const HOURLY_SLOTS: usize = 8;
/// Days shown in the daily list.
pub const DAILY_GROUPS: usize = 5;

/// One calendar day of the forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Rounded mean of the day's samples.
    pub temp: i64,
    /// Description of the day's first sample.
    pub description: String,
    pub samples: usize,
}

/// First `HOURLY_SLOTS` samples, in their original order.
pub fn hourly(samples: &[ForecastSample]) -> &[ForecastSample] {
    &samples[..samples.len().min(HOURLY_SLOTS)]
}

/// Groups samples by calendar date, in order of first appearance, and keeps
/// at most `DAILY_GROUPS` days.
pub fn daily(samples: &[ForecastSample]) -> Vec<DailyForecast> {
    let mut groups: Vec<(NaiveDate, Vec<&ForecastSample>)> = Vec::new();

    for sample in samples {
        let date = sample.datetime.date();
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, items)) => items.push(sample),
            None => groups.push((date, vec![sample])),
        }
    }

    groups
        .into_iter()
        .take(DAILY_GROUPS)
        .map(|(date, items)| {
            let sum: f64 = items.iter().map(|s| s.temp).sum();
            DailyForecast {
                date,
                temp: round_half_up(sum / items.len() as f64),
                description: items[0].description.clone(),
                samples: items.len(),
            }
        })
        .collect()
}

/// Hourly strip plus 5-day list for one forecast sequence.
#[derive(Debug, Clone)]
pub struct ForecastView<'a> {
    hourly: &'a [ForecastSample],
    daily: Vec<DailyForecast>,
}

impl<'a> ForecastView<'a> {
    pub fn new(samples: &'a [ForecastSample]) -> Self {
        Self { hourly: hourly(samples), daily: daily(samples) }
    }

    pub fn hourly(&self) -> &[ForecastSample] {
        self.hourly
    }

    pub fn daily(&self) -> &[DailyForecast] {
        &self.daily
    }
}

impl fmt::Display for ForecastView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hourly Forecast")?;
        for sample in self.hourly {
            writeln!(
                f,
                "  {}  {:>4}°  {}",
                sample.datetime.format("%H:%M"),
                round_half_up(sample.temp),
                sample.description
            )?;
        }

        write!(f, "5-Day Forecast")?;
        for (index, day) in self.daily.iter().enumerate() {
            let label = if index == 0 {
                "Today".to_string()
            } else {
                day.date.format("%a, %b %-d").to_string()
            };
            write!(f, "\n  {label:<12}{:>4}°C  {}", day.temp, day.description)?;
        }

        Ok(())
    }
}
