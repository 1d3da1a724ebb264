//! Confstats - bucketed activity durations for conference analytics
//!
//! This library re-exports the duration aggregator from `confstats-core`
//! and adds the file-based configuration and query layer used by the
//! `confstats` binary.

pub mod config;
pub mod query;

pub use confstats_core::error;
pub use confstats_core::stats;

pub use confstats_core::{
    duration_aggregator, AggregateError, Bucket, BucketSequence, DurationAggregator, Interval, TimeRange,
};
pub use confstats_core::{DEFAULT_MAX_BUCKETS, VERSION};

pub use config::{AppConfig, DurationUnit};
pub use query::{AnalyticsQuery, DurationReport, Durations};
