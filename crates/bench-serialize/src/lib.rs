//! Bulk-load encoders for generated points.
//!
//! Every encoder implements [`PointSerializer`]: one call writes exactly one
//! record, terminated by the format's own delimiter, into the sink. Encoders
//! hold no per-run state, so a single instance serves the whole run.
//!
//! | format        | record                                          |
//! |---------------|-------------------------------------------------|
//! | `cassandra`   | one `series_<type>` CSV line per field          |
//! | `influx`      | one line-protocol line                          |
//! | `mongo`       | one BSON document                               |
//! | `timescaledb` | a `tags,...` row followed by a field row        |
//!
//! The `timescaledb` format additionally needs a schema preamble, which is
//! a property of the whole run and is written by the generation driver.

mod cassandra;
mod error;
mod format;
mod influx;
mod mongo;
mod timescaledb;

use bench_core::Point;
use std::io::Write;

pub use cassandra::CassandraSerializer;
pub use error::{ParseFormatError, SerializeError};
pub use format::Format;
pub use influx::InfluxSerializer;
pub use mongo::{point_to_document, MongoSerializer};
pub use timescaledb::TimescaleDbSerializer;

/// Encoder from a point to one record of a bulk-load format.
pub trait PointSerializer {
    /// Write exactly one encoded record for `point` into `w`.
    fn serialize(&self, point: &Point, w: &mut dyn Write) -> Result<(), SerializeError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use bench_core::{FieldValue, Point};
    use chrono::{TimeZone, Utc};

    /// Point exercising every field value type.
    pub fn sample_point() -> Point {
        let mut p = Point::new();
        p.set_measurement_name("cpu");
        p.set_timestamp(Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap());
        p.append_tag("hostname", "host_0");
        p.append_tag("region", "eu-west-1");
        p.append_field("usage_user", 58.5);
        p.append_field("usage_system", 2.0);
        p.append_field("context_switches", 12i64);
        p.append_field("online", FieldValue::Bool(true));
        p.append_field("label", FieldValue::Bytes(b"a \"b\"".to_vec()));
        p
    }
}
