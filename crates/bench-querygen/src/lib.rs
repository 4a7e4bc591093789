//! Benchmark query generation.
//!
//! A query generator is built per (engine, query type) pair from a
//! [`DatabaseConfig`] and the time range the loaded data covers. Each call to
//! [`QueryGenerator::dispatch`] draws fresh random parameters (hosts, time
//! window) from the generator's seeded RNG and fills a pooled query in the
//! engine's dialect.
//!
//! ```rust
//! use bench_querygen::{factory_for, DatabaseConfig};
//! use bench_serialize::Format;
//! use chrono::{TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2016, 1, 2, 6, 0, 0).unwrap();
//!
//! let build = factory_for("high-cpu-all", Format::TimescaleDb).unwrap();
//! let mut generator = build(&DatabaseConfig::new("benchmark", 7), start, end).unwrap();
//! let query = generator.dispatch(100).unwrap();
//! assert_eq!(query.human_label(), "TimescaleDB CPU over threshold, all hosts");
//! ```

pub mod config;
pub mod devops;
pub mod error;
pub mod generator;
pub mod matrix;

pub use config::DatabaseConfig;
pub use error::QueryGenError;
pub use generator::{QueryGenerator, QueryGeneratorFactory};
pub use matrix::{check_use_case, factory_for, USE_CASES};
