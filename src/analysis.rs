//! Evolution analysis of the case dataset.
//!
//! Aggregates confirmed cases and deaths into a gapless daily time series
//! and derives the trend figures: cumulative totals, the trailing 7-day
//! mean of new cases, and week-over-week growth.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde_derive::Serialize;

use crate::error::Result;
use crate::records::CaseRecord;

/// Window, in days, of the rolling mean and the growth comparison.
pub const TREND_WINDOW: usize = 7;

/// Record selection criteria. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFilter {
    /// Federal entity of residence (ENTIDAD_RES).
    pub state: Option<u32>,

    /// First symptom-onset date to include.
    pub from: Option<NaiveDate>,

    /// Last symptom-onset date to include.
    pub to: Option<NaiveDate>,
}

impl CaseFilter {
    fn matches(&self, record: &CaseRecord) -> bool {
        if let Some(state) = self.state {
            if record.entidad_res != state {
                return false;
            }
        }
        self.in_range(record.fecha_sintomas)
    }

    fn in_range(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// One calendar day of the evolution series.
#[derive(Debug, Clone, Serialize)]
pub struct EvolutionPoint {
    pub date: NaiveDate,
    pub new_cases: u64,
    pub cumulative_cases: u64,
    pub new_deaths: u64,
    pub cumulative_deaths: u64,
    /// Trailing mean of new cases over the last [`TREND_WINDOW`] days.
    pub average_cases: f64,
}

/// Daily evolution of confirmed cases and deaths, gapless from the first
/// to the last observed date.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvolutionSeries {
    pub points: Vec<EvolutionPoint>,
}

impl EvolutionSeries {
    /// Aggregate an iterator of dataset records.
    ///
    /// Only confirmed cases count; cases are keyed by symptom-onset date
    /// and deaths by date of death. A death outside the filter's date
    /// range is not counted even when its record is.
    pub fn from_records<I>(records: I, filter: &CaseFilter) -> Self
    where
        I: IntoIterator<Item = CaseRecord>,
    {
        let mut days = BTreeMap::new();
        for record in records {
            accumulate(&mut days, &record, filter);
        }
        Self::from_daily_counts(&days)
    }

    /// Stream a dataset CSV file through the aggregation.
    pub fn from_csv_path(path: &Path, filter: &CaseFilter) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut days = BTreeMap::new();
        for record in reader.deserialize::<CaseRecord>() {
            accumulate(&mut days, &record?, filter);
        }
        Ok(Self::from_daily_counts(&days))
    }

    fn from_daily_counts(days: &BTreeMap<NaiveDate, (u64, u64)>) -> Self {
        let (first, last) = match (days.keys().next(), days.keys().next_back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Self::default(),
        };

        let mut points = Vec::new();
        let mut cumulative_cases = 0;
        let mut cumulative_deaths = 0;
        let mut date = first;
        while date <= last {
            let (new_cases, new_deaths) = days.get(&date).copied().unwrap_or((0, 0));
            cumulative_cases += new_cases;
            cumulative_deaths += new_deaths;

            let window_start = points.len().saturating_sub(TREND_WINDOW - 1);
            let window_sum: u64 = points[window_start..]
                .iter()
                .map(|p: &EvolutionPoint| p.new_cases)
                .sum::<u64>()
                + new_cases;
            let window_len = points.len() - window_start + 1;

            points.push(EvolutionPoint {
                date,
                new_cases,
                cumulative_cases,
                new_deaths,
                cumulative_deaths,
                average_cases: window_sum as f64 / window_len as f64,
            });
            date += Duration::days(1);
        }
        Self { points }
    }

    /// Total confirmed cases and deaths over the whole series.
    pub fn totals(&self) -> (u64, u64) {
        self.points
            .last()
            .map(|p| (p.cumulative_cases, p.cumulative_deaths))
            .unwrap_or((0, 0))
    }

    /// Week-over-week growth of the rolling case mean: the latest 7-day
    /// mean against the mean of the 7 days before it, minus 1.
    pub fn growth_rate(&self) -> Option<f64> {
        if self.points.len() < 2 * TREND_WINDOW {
            return None;
        }
        let latest: u64 = self.points[self.points.len() - TREND_WINDOW..]
            .iter()
            .map(|p| p.new_cases)
            .sum();
        let previous: u64 = self.points
            [self.points.len() - 2 * TREND_WINDOW..self.points.len() - TREND_WINDOW]
            .iter()
            .map(|p| p.new_cases)
            .sum();
        if previous == 0 {
            return None;
        }
        Some(latest as f64 / previous as f64 - 1.0)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Fold one record into the per-day (cases, deaths) counters.
fn accumulate(
    days: &mut BTreeMap<NaiveDate, (u64, u64)>,
    record: &CaseRecord,
    filter: &CaseFilter,
) {
    if !record.is_confirmed() || !filter.matches(record) {
        return;
    }
    days.entry(record.fecha_sintomas).or_default().0 += 1;
    if let Some(death_date) = record.fecha_def {
        if filter.in_range(death_date) {
            days.entry(death_date).or_default().1 += 1;
        }
    }
}
