//! Cassandra series CSV.
//!
//! One line per field; the series id packs measurement, tags, field name and
//! the UTC day bucket:
//!
//! ```text
//! series_double,cpu,hostname=host_0,region=eu-west-1#usage_user#2016-01-01,1451606400000000000,58
//! ```

use crate::{PointSerializer, SerializeError};
use bench_core::{FieldValue, Point};
use std::io::Write;

pub struct CassandraSerializer;

/// Cassandra table suffix holding values of this type.
fn type_name(value: &FieldValue) -> &'static str {
    match value {
        FieldValue::Float(_) => "double",
        FieldValue::Int(_) => "bigint",
        FieldValue::Bool(_) => "boolean",
        FieldValue::Bytes(_) => "blob",
    }
}

impl PointSerializer for CassandraSerializer {
    fn serialize(&self, point: &Point, w: &mut dyn Write) -> Result<(), SerializeError> {
        let mut series_prefix = String::with_capacity(256);
        series_prefix.push_str(point.measurement_name());
        for (key, value) in point.tags() {
            series_prefix.push(',');
            series_prefix.push_str(key);
            series_prefix.push('=');
            series_prefix.push_str(value);
        }

        let nanos = point.timestamp_nanos();
        let bucket = point.timestamp().format("%Y-%m-%d").to_string();

        for (key, value) in point.fields() {
            writeln!(
                w,
                "series_{},{}#{}#{},{},{}",
                type_name(value),
                series_prefix,
                key,
                bucket,
                nanos,
                value
            )?;
        }
        Ok(())
    }
}
