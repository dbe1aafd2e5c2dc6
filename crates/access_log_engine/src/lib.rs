//! Parsing and aggregation engine for web server access logs.
//!
//! The engine turns raw log lines into [RequestRecord]s, aggregates them into
//! an [AggregationState] and derives [RankedViews] and success/failure rates
//! from it. It performs no I/O: callers hand in already decompressed lines and
//! receive plain in-memory data structures.
//!
//! ```
//! use access_log_engine::{Statistics, parse_lines};
//!
//! let log = r#"in24.inetnebr.com - - [01/Aug/1995:00:00:01 -0400] "GET /shuttle/countdown/ HTTP/1.0" 200 1839"#;
//!
//! let records = parse_lines(log.lines());
//! let statistics = Statistics::compute(Some(records.as_slice())).unwrap();
//! assert_eq!(statistics.success_rate(), Ok(100.));
//! ```

mod aggregate;
mod error;
pub mod parser;
mod percentage;
pub mod ranking;
mod record;
mod statistics;
#[cfg(test)]
mod test_utils;

pub use crate::aggregate::{AggregationState, Host, Resource, aggregate};
pub use crate::error::StatsError;
pub use crate::parser::{Anomaly, parse_line, parse_lines};
pub use crate::percentage::{failure_rate, success_rate};
pub use crate::record::RequestRecord;
pub use crate::statistics::{
    RankedViews, Statistics, TOP_FAILING_RESOURCES, TOP_HOSTS, TOP_RESOURCES_PER_HOST,
};
