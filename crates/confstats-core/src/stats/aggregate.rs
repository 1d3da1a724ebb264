//! Interval-to-bucket duration aggregation
//!
//! Partitions a queried time range into fixed-width buckets and sums, for
//! every bucket, how much of each interval falls inside it. Intervals are
//! clamped against the bucket, their own bounds, and the range on every
//! pass, so spans leaking outside the window are truncated rather than
//! over-counted. Overlapping intervals are never merged: two participants
//! active at the same time both count.

use crate::error::AggregateError;
use crate::stats::interval::{width_millis, Interval, TimeRange};
use chrono::{DateTime, Duration, Utc};

/// Aggregates interval durations into time buckets
///
/// Holds only the bucket limit; every call is independent, so a single
/// aggregator can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationAggregator {
    max_buckets: usize,
}

impl DurationAggregator {
    /// Create an aggregator allowing at most `max_buckets` buckets per call
    pub fn new(max_buckets: usize) -> Result<Self, AggregateError> {
        if max_buckets == 0 {
            return Err(AggregateError::InvalidMaxBuckets);
        }
        Ok(Self { max_buckets })
    }

    /// Configured bucket limit
    pub fn max_buckets(&self) -> usize {
        self.max_buckets
    }

    /// Sum interval overlap per bucket over `[range_start, range_end)`
    ///
    /// # Arguments
    /// * `range_start` - Start of the queried window (inclusive)
    /// * `range_end` - End of the queried window (exclusive)
    /// * `bucket_width` - Nominal width of each bucket, at least 1ms
    /// * `intervals` - Activity spans, in any order
    ///
    /// # Errors
    /// Fails before computing anything if the width is below 1ms, the range
    /// is empty or inverted, or the range needs more than `max_buckets`
    /// buckets.
    pub fn aggregate(
        &self,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        bucket_width: Duration,
        intervals: &[Interval],
    ) -> Result<BucketSequence, AggregateError> {
        let width_ms = width_millis(bucket_width)?;
        let range = TimeRange::new(range_start, range_end)?;
        self.aggregate_validated(range, width_ms, intervals)
    }

    /// Same as [`aggregate`](Self::aggregate) for an already-built range
    pub fn aggregate_range(
        &self,
        range: TimeRange,
        bucket_width: Duration,
        intervals: &[Interval],
    ) -> Result<BucketSequence, AggregateError> {
        let width_ms = width_millis(bucket_width)?;
        // Fields are public, so the range may not have gone through TimeRange::new
        let range = TimeRange::new(range.start, range.end)?;
        self.aggregate_validated(range, width_ms, intervals)
    }

    fn aggregate_validated(
        &self,
        range: TimeRange,
        width_ms: u64,
        intervals: &[Interval],
    ) -> Result<BucketSequence, AggregateError> {
        let bucket_count = range.span_ms().div_ceil(width_ms);
        if bucket_count > self.max_buckets as u64 {
            tracing::warn!(
                requested = bucket_count,
                max = self.max_buckets,
                "Rejecting aggregation with too many buckets"
            );
            return Err(AggregateError::TooManyBuckets {
                requested: bucket_count,
                max: self.max_buckets,
            });
        }

        tracing::debug!(
            buckets = bucket_count,
            intervals = intervals.len(),
            width_ms,
            "Aggregating interval durations"
        );

        let range_start = range.start.timestamp_millis();
        let range_end = range.end.timestamp_millis();
        // Fits: width_ms originated from a positive i64
        let width = width_ms as i64;

        let durations: Vec<u64> = (0..bucket_count as i64)
            .map(|i| {
                let bucket_start = range_start + i * width;
                let bucket_end = bucket_start.saturating_add(width).min(range_end);

                intervals
                    .iter()
                    .map(|iv| {
                        let overlap_start = bucket_start
                            .max(iv.start.timestamp_millis())
                            .max(range_start);
                        let overlap_end = bucket_end.min(iv.end.timestamp_millis()).min(range_end);
                        u64::try_from(overlap_end - overlap_start).unwrap_or(0)
                    })
                    .fold(0u64, u64::saturating_add)
            })
            .collect();

        Ok(BucketSequence {
            range,
            width_ms,
            durations,
        })
    }
}

/// Build a stateless aggregation function bound to `max_buckets`
///
/// The returned closure is `Copy`, so it can be handed to as many request
/// handlers as needed.
pub fn duration_aggregator(
    max_buckets: usize,
) -> Result<
    impl Fn(DateTime<Utc>, DateTime<Utc>, Duration, &[Interval]) -> Result<BucketSequence, AggregateError>
        + Copy
        + Send
        + Sync,
    AggregateError,
> {
    let aggregator = DurationAggregator::new(max_buckets)?;
    Ok(
        move |start: DateTime<Utc>, end: DateTime<Utc>, width: Duration, intervals: &[Interval]| {
            aggregator.aggregate(start, end, width, intervals)
        },
    )
}

/// One bucket of an aggregation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Start of this bucket (inclusive)
    pub start: DateTime<Utc>,
    /// End of this bucket (exclusive); truncated to the range end for the last bucket
    pub end: DateTime<Utc>,
    /// Total interval overlap within the bucket in milliseconds
    pub duration_ms: u64,
}

/// Per-bucket durations in chronological order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSequence {
    range: TimeRange,
    width_ms: u64,
    durations: Vec<u64>,
}

impl BucketSequence {
    /// Number of buckets
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Durations in milliseconds, one per bucket
    pub fn as_millis(&self) -> &[u64] {
        &self.durations
    }

    /// Durations converted to fractional seconds
    pub fn to_secs(&self) -> Vec<f64> {
        self.durations
            .iter()
            .map(|&ms| ms as f64 / 1000.0)
            .collect()
    }

    /// Total duration across all buckets in milliseconds, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.durations.iter().fold(0, |acc, &ms| acc.saturating_add(ms))
    }

    /// The range these buckets partition
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Nominal bucket width in milliseconds
    pub fn width_ms(&self) -> u64 {
        self.width_ms
    }

    /// Iterate buckets together with their boundaries
    pub fn buckets(&self) -> impl Iterator<Item = Bucket> + '_ {
        let width_ms = self.width_ms as i64;
        let width = Duration::milliseconds(width_ms);
        self.durations.iter().enumerate().map(move |(i, &duration_ms)| {
            let start = self.range.start + Duration::milliseconds(width_ms * i as i64);
            Bucket {
                start,
                end: (start + width).min(self.range.end),
                duration_ms,
            }
        })
    }

    pub fn into_inner(self) -> Vec<u64> {
        self.durations
    }
}
