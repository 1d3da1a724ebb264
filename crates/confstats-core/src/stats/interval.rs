//! Time spans fed into the aggregator
//!
//! An [`Interval`] is one recorded span of activity (a participant session
//! or a conference lifespan). A [`TimeRange`] is the queried window that
//! gets partitioned into buckets.

use crate::error::AggregateError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open span of recorded activity `[start, end)`
///
/// No ordering is enforced between `start` and `end`. An inverted or empty
/// interval simply overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// When the activity began
    #[serde(rename = "start_time")]
    pub start: DateTime<Utc>,
    /// When the activity ended
    #[serde(rename = "end_time")]
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Length of the interval in milliseconds (0 if inverted)
    pub fn duration_ms(&self) -> u64 {
        let span = self.end.timestamp_millis() - self.start.timestamp_millis();
        u64::try_from(span).unwrap_or(0)
    }

    /// True when the interval covers no time at all
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// The queried analytics window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range, rejecting empty or inverted windows
    ///
    /// Compared at millisecond resolution, so a window narrower than 1ms
    /// counts as empty.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, AggregateError> {
        if end.timestamp_millis() <= start.timestamp_millis() {
            return Err(AggregateError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Width of the range in milliseconds
    pub fn span_ms(&self) -> u64 {
        let span = self.end.timestamp_millis() - self.start.timestamp_millis();
        u64::try_from(span).unwrap_or(0)
    }

    /// Number of buckets of `width` needed to cover the range
    ///
    /// The final bucket may be narrower than `width` when it does not divide
    /// the range evenly.
    pub fn bucket_count(&self, width: Duration) -> Result<u64, AggregateError> {
        let width_ms = width_millis(width)?;
        Ok(self.span_ms().div_ceil(width_ms))
    }
}

/// Validate a bucket width and return it in whole milliseconds
pub(crate) fn width_millis(width: Duration) -> Result<u64, AggregateError> {
    let width_ms = width.num_milliseconds();
    u64::try_from(width_ms)
        .ok()
        .filter(|&ms| ms > 0)
        .ok_or(AggregateError::InvalidBucketWidth { width_ms })
}
