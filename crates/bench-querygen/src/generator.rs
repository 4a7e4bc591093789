//! The generator seam shared by every engine and use case.

use crate::{DatabaseConfig, QueryGenError};
use bench_core::Query;
use chrono::{DateTime, Utc};

/// Produces benchmark queries for one (engine, use case) pair.
pub trait QueryGenerator {
    /// Fill a pooled query for a population of `scale_var` hosts.
    ///
    /// The returned query borrows the generator and is recycled by the next
    /// call, so callers consume it (serialize, count) before dispatching
    /// again.
    fn dispatch(&mut self, scale_var: usize) -> Result<&dyn Query, QueryGenError>;
}

/// Builds a generator for a database and the time range the data covers.
pub type QueryGeneratorFactory = Box<
    dyn Fn(&DatabaseConfig, DateTime<Utc>, DateTime<Utc>) -> Result<Box<dyn QueryGenerator>, QueryGenError>,
>;
