//! Confstats Core - Duration aggregation for conference analytics
//!
//! Turns participant sessions and conference lifespans into per-bucket
//! activity durations over a queried time range (e.g. hourly totals
//! across a day).

pub mod error;
pub mod stats;

pub use error::AggregateError;
pub use stats::aggregate::{duration_aggregator, Bucket, BucketSequence, DurationAggregator};
pub use stats::interval::{Interval, TimeRange};

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default upper bound on buckets per aggregation call
pub const DEFAULT_MAX_BUCKETS: usize = 1000;
