//! Errors raised while validating an aggregation request

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur before any bucket is computed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Too many buckets: requested {requested}, maximum is {max}")]
    TooManyBuckets { requested: u64, max: usize },

    #[error("Bucket width must be at least 1ms, got {width_ms}ms")]
    InvalidBucketWidth { width_ms: i64 },

    #[error("Range end {end} must be after range start {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Maximum bucket count must be positive")]
    InvalidMaxBuckets,
}
