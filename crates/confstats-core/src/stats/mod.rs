//! Activity statistics
//!
//! - Interval and range types ([`interval`])
//! - Bucketed duration aggregation ([`aggregate`])

pub mod aggregate;
pub mod interval;
