//! Analytics queries read from JSON and their bucketed reports
//!
//! A query carries the date range, the bucket interval and the activity
//! spans already fetched for one entity. Running it produces a report with
//! one duration per bucket.

use crate::config::{AppConfig, DurationUnit};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use confstats_core::{DurationAggregator, Interval};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// A bucketed duration query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    /// Start of the queried range
    pub start_time: DateTime<Utc>,
    /// End of the queried range (exclusive)
    pub end_time: DateTime<Utc>,
    /// Bucket width in milliseconds
    pub interval_ms: i64,
    /// Activity spans to aggregate
    #[serde(default)]
    pub intervals: Vec<Interval>,
}

/// Bucket durations in the configured unit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Durations {
    Millis(Vec<u64>),
    Seconds(Vec<f64>),
}

impl Durations {
    pub fn len(&self) -> usize {
        match self {
            Self::Millis(values) => values.len(),
            Self::Seconds(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of running an [`AnalyticsQuery`]
#[derive(Debug, Clone, Serialize)]
pub struct DurationReport {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub interval_ms: i64,
    pub unit: DurationUnit,
    pub durations: Durations,
    /// Sum of all bucket durations, in milliseconds
    pub total_ms: u64,
}

impl AnalyticsQuery {
    /// Parse a query from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read query {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse query {}", path.display()))
    }

    /// Parse a query from any reader (e.g. stdin)
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .context("Failed to read query input")?;
        serde_json::from_str(&contents).context("Failed to parse query input")
    }

    /// Aggregate the query's intervals into buckets
    pub fn run(&self, config: &AppConfig) -> Result<DurationReport> {
        let aggregator = DurationAggregator::new(config.max_buckets)?;
        let width = Duration::try_milliseconds(self.interval_ms)
            .with_context(|| format!("Bucket interval out of range: {}ms", self.interval_ms))?;
        let buckets = aggregator
            .aggregate(self.start_time, self.end_time, width, &self.intervals)
            .context("Failed to aggregate durations")?;

        tracing::info!(
            buckets = buckets.len(),
            intervals = self.intervals.len(),
            total_ms = buckets.total(),
            "Aggregated analytics query"
        );

        let durations = match config.unit {
            DurationUnit::Millis => Durations::Millis(buckets.as_millis().to_vec()),
            DurationUnit::Seconds => Durations::Seconds(buckets.to_secs()),
        };

        Ok(DurationReport {
            start_time: self.start_time,
            end_time: self.end_time,
            interval_ms: self.interval_ms,
            unit: config.unit,
            durations,
            total_ms: buckets.total(),
        })
    }
}
