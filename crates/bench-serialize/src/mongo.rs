//! MongoDB BSON documents.
//!
//! Each point is written as one self-length-prefixed BSON document:
//!
//! ```text
//! { measurement: "cpu", timestamp_ns: <i64>,
//!   tags: { hostname: "host_0", ... }, fields: { usage_user: 58.0, ... } }
//! ```

use crate::{PointSerializer, SerializeError};
use bench_core::{FieldValue, Point};
use bson::spec::BinarySubtype;
use bson::{doc, Binary, Bson, Document};
use std::io::Write;

pub struct MongoSerializer;

fn to_bson(value: &FieldValue) -> Bson {
    match value {
        FieldValue::Float(v) => Bson::Double(*v),
        FieldValue::Int(v) => Bson::Int64(*v),
        FieldValue::Bool(v) => Bson::Boolean(*v),
        FieldValue::Bytes(v) => Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: v.clone(),
        }),
    }
}

/// Build the document for one point.
pub fn point_to_document(point: &Point) -> Document {
    let mut tags = Document::new();
    for (key, value) in point.tags() {
        tags.insert(key, value);
    }

    let mut fields = Document::new();
    for (key, value) in point.fields() {
        fields.insert(key, to_bson(value));
    }

    doc! {
        "measurement": point.measurement_name(),
        "timestamp_ns": point.timestamp_nanos(),
        "tags": tags,
        "fields": fields,
    }
}

impl PointSerializer for MongoSerializer {
    fn serialize(&self, point: &Point, w: &mut dyn Write) -> Result<(), SerializeError> {
        point_to_document(point).to_writer(w)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_point;

    #[test]
    fn test_document_round_trip() {
        let mut out = Vec::new();
        MongoSerializer.serialize(&sample_point(), &mut out).unwrap();

        let len = i32::from_le_bytes([out[0], out[1], out[2], out[3]]) as usize;
        assert_eq!(len, out.len());

        let doc = Document::from_reader(&mut out.as_slice()).unwrap();
        assert_eq!(doc.get_str("measurement").unwrap(), "cpu");
        assert_eq!(doc.get_i64("timestamp_ns").unwrap(), 1_451_606_400_000_000_000);

        let tags = doc.get_document("tags").unwrap();
        assert_eq!(tags.get_str("hostname").unwrap(), "host_0");

        let fields = doc.get_document("fields").unwrap();
        assert_eq!(fields.get_f64("usage_user").unwrap(), 58.5);
        assert_eq!(fields.get_i64("context_switches").unwrap(), 12);
        assert!(fields.get_bool("online").unwrap());
    }

    #[test]
    fn test_field_order_preserved() {
        let doc = point_to_document(&sample_point());
        let keys: Vec<_> = doc.get_document("fields").unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["usage_user", "usage_system", "context_switches", "online", "label"]
        );
    }
}
