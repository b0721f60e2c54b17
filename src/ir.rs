//! Input model. The wire types mirror the JSON a contributions API hands
//! back; [`ContributionSet`] is the validated, date-indexed form the layout
//! engine consumes.

use crate::error::{HeatmapError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapData {
    #[serde(default)]
    pub years: Vec<YearSummary>,
    #[serde(default)]
    pub contributions: Vec<ContributionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: String,
    #[serde(default)]
    pub total: u64,
    pub range: DateRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub date: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<i64>,
}

impl ContributionRecord {
    pub fn new(date: impl Into<String>, count: u64) -> Self {
        Self {
            date: date.into(),
            count,
            color: None,
            intensity: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_intensity(mut self, intensity: i64) -> Self {
        self.intensity = Some(intensity);
        self
    }
}

impl YearSummary {
    pub fn new(year: impl Into<String>, total: u64, start: &str, end: &str) -> Self {
        Self {
            year: year.into(),
            total,
            range: DateRange {
                start: start.to_string(),
                end: end.to_string(),
            },
        }
    }
}

/// Where a day's color comes from, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSource {
    Explicit(String),
    Intensity(i64),
    Count,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub date: NaiveDate,
    pub count: u64,
    pub source: ColorSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Year {
    pub year: i32,
    pub total: u64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Year {
    /// True when the range is exactly Jan 1 to Dec 31 of `year`.
    pub fn is_calendar_year(&self) -> bool {
        self.start.year() == self.year
            && self.end.year() == self.year
            && self.start.ordinal() == 1
            && self.end.month() == 12
            && self.end.day() == 31
    }
}

/// Validated input: every date parsed, at most one record per day.
#[derive(Debug, Clone, Default)]
pub struct ContributionSet {
    days: BTreeMap<NaiveDate, Contribution>,
    years: Vec<Year>,
}

impl ContributionSet {
    pub fn from_data(data: &HeatmapData) -> Result<Self> {
        let mut days = BTreeMap::new();
        for (idx, record) in data.contributions.iter().enumerate() {
            let label = format!("contributions[{idx}]");
            let date = parse_date(&record.date, &label)?;
            let source = match (&record.color, record.intensity) {
                (Some(color), _) if !color.trim().is_empty() => {
                    ColorSource::Explicit(color.clone())
                }
                (_, Some(intensity)) => ColorSource::Intensity(intensity),
                _ => ColorSource::Count,
            };
            let entry = Contribution {
                date,
                count: record.count,
                source,
            };
            if days.insert(date, entry).is_some() {
                return Err(HeatmapError::data(
                    label,
                    format!("duplicate record for {}", record.date),
                ));
            }
        }

        let mut years: Vec<Year> = Vec::with_capacity(data.years.len());
        for (idx, summary) in data.years.iter().enumerate() {
            let label = format!("years[{idx}]");
            let year = summary.year.trim().parse::<i32>().map_err(|_| {
                HeatmapError::data(&label, format!("invalid year `{}`", summary.year))
            })?;
            let start = parse_date(&summary.range.start, &label)?;
            let end = parse_date(&summary.range.end, &label)?;
            if start > end {
                return Err(HeatmapError::data(
                    label,
                    format!("range start {start} is after end {end}"),
                ));
            }
            if let Some(other) = years
                .iter()
                .find(|other| start <= other.end && other.start <= end)
            {
                return Err(HeatmapError::data(
                    label,
                    format!("range overlaps the range of year {}", other.year),
                ));
            }
            years.push(Year {
                year,
                total: summary.total,
                start,
                end,
            });
        }

        Ok(Self { days, years })
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Contribution> {
        self.days.get(&date)
    }

    pub fn year(&self, year: i32) -> Option<&Year> {
        self.years.iter().find(|summary| summary.year == year)
    }

    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Highest count among records dated within `[start, end]`.
    pub fn max_count(&self, start: NaiveDate, end: NaiveDate) -> u64 {
        self.days
            .range(start..=end)
            .map(|(_, day)| day.count)
            .max()
            .unwrap_or(0)
    }
}

fn parse_date(raw: &str, record: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| HeatmapError::data(record, format!("invalid date `{raw}`")))
}

pub fn parse_data(json: &str) -> anyhow::Result<HeatmapData> {
    Ok(serde_json::from_str(json)?)
}
