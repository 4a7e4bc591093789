//! Core types for the tsbench workload generator.
//!
//! This crate provides the foundational types shared by the data and query
//! pipelines:
//!
//! - [`Point`] - Reusable buffer holding one synthetic measurement sample
//! - [`FieldValue`] - Value of a single point field
//! - [`Query`] - Engine-specific benchmark query payload
//! - [`QueryPool`] - Free-list of reusable query objects
//! - [`TimeInterval`] - Half-open time range with random sub-window selection
//!
//! # Architecture
//!
//! ```text
//! bench-core (this crate)
//!    │
//!    ├─── bench-generator  (fills Points from simulated hosts)
//!    ├─── bench-serialize  (encodes Points into bulk-load formats)
//!    └─── bench-querygen   (fills pooled Queries per engine)
//! ```
//!
//! # Example
//!
//! ```rust
//! use bench_core::{FieldValue, Point};
//! use chrono::{TimeZone, Utc};
//!
//! let mut point = Point::new();
//! point.set_measurement_name("cpu");
//! point.set_timestamp(Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap());
//! point.append_tag("hostname", "host_0");
//! point.append_field("usage_user", FieldValue::Float(58.0));
//!
//! point.reset();
//! assert_eq!(point, Point::new());
//! ```

pub mod interval;
pub mod point;
pub mod query;

pub use interval::{IntervalError, TimeInterval};
pub use point::{FieldValue, Point};
pub use query::{Query, QueryPool};
