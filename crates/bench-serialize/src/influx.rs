//! InfluxDB line protocol.
//!
//! ```text
//! cpu,hostname=host_0,region=eu-west-1 usage_user=58,usage_system=2 1451606400000000000
//! ```

use crate::{PointSerializer, SerializeError};
use bench_core::{FieldValue, Point};
use std::io::Write;

pub struct InfluxSerializer;

/// Escape the characters line protocol treats as delimiters in keys and tag
/// values.
fn write_escaped(w: &mut dyn Write, s: &str) -> std::io::Result<()> {
    if !s.contains(&[',', ' ', '='][..]) {
        return w.write_all(s.as_bytes());
    }
    for c in s.chars() {
        if matches!(c, ',' | ' ' | '=') {
            w.write_all(b"\\")?;
        }
        let mut buf = [0u8; 4];
        w.write_all(c.encode_utf8(&mut buf).as_bytes())?;
    }
    Ok(())
}

fn write_value(w: &mut dyn Write, value: &FieldValue) -> std::io::Result<()> {
    match value {
        FieldValue::Float(v) => write!(w, "{v}"),
        FieldValue::Int(v) => write!(w, "{v}i"),
        FieldValue::Bool(v) => write!(w, "{v}"),
        FieldValue::Bytes(v) => {
            w.write_all(b"\"")?;
            for c in String::from_utf8_lossy(v).chars() {
                if matches!(c, '"' | '\\') {
                    w.write_all(b"\\")?;
                }
                let mut buf = [0u8; 4];
                w.write_all(c.encode_utf8(&mut buf).as_bytes())?;
            }
            w.write_all(b"\"")
        }
    }
}

impl PointSerializer for InfluxSerializer {
    fn serialize(&self, point: &Point, w: &mut dyn Write) -> Result<(), SerializeError> {
        write_escaped(w, point.measurement_name())?;
        for (key, value) in point.tags() {
            w.write_all(b",")?;
            write_escaped(w, key)?;
            w.write_all(b"=")?;
            write_escaped(w, value)?;
        }

        for (i, (key, value)) in point.fields().enumerate() {
            w.write_all(if i == 0 { b" " } else { b"," })?;
            write_escaped(w, key)?;
            w.write_all(b"=")?;
            write_value(w, value)?;
        }

        writeln!(w, " {}", point.timestamp_nanos())?;
        Ok(())
    }
}
