//! TimescaleDB pseudo-CSV.
//!
//! Each point becomes a tag row followed by a field row:
//!
//! ```text
//! tags,hostname=host_0,region=eu-west-1,datacenter=eu-west-1b
//! cpu,1451606400000000000,58,2,24
//! ```
//!
//! Field names are not repeated per row; the loader takes them from the
//! schema preamble the driver writes once before the first point.

use crate::{PointSerializer, SerializeError};
use bench_core::Point;
use std::io::Write;

pub struct TimescaleDbSerializer;

impl PointSerializer for TimescaleDbSerializer {
    fn serialize(&self, point: &Point, w: &mut dyn Write) -> Result<(), SerializeError> {
        w.write_all(b"tags")?;
        for (key, value) in point.tags() {
            write!(w, ",{key}={value}")?;
        }
        w.write_all(b"\n")?;

        write!(w, "{},{}", point.measurement_name(), point.timestamp_nanos())?;
        for (_, value) in point.fields() {
            write!(w, ",{value}")?;
        }
        w.write_all(b"\n")?;
        Ok(())
    }
}
