//! Reusable point buffer.
//!
//! A [`Point`] is allocated once per generation run and refilled by the
//! simulator on every iteration. Keys are `&'static str` because every tag and
//! field name comes from a fixed schema table; values are owned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a single point field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 64-bit floating point
    Float(f64),

    /// 64-bit signed integer
    Int(i64),

    /// Boolean value
    Bool(bool),

    /// Raw bytes (rendered as UTF-8 where the format is textual)
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Plain textual rendering shared by the text formats: shortest
    /// round-trip floats, decimal integers, `true`/`false`, lossy UTF-8 bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Bytes(v) => f.write_str(&String::from_utf8_lossy(v)),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

/// One synthetic time-series sample.
///
/// Tag and field pairs keep insertion order. After a point has been written
/// or discarded it must be [`reset`](Point::reset) before the next fill, so no
/// value from one record can leak into the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    measurement_name: &'static str,
    timestamp: Option<DateTime<Utc>>,
    tag_keys: Vec<&'static str>,
    tag_values: Vec<String>,
    field_keys: Vec<&'static str>,
    field_values: Vec<FieldValue>,
}

impl Point {
    /// Create an empty point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every attribute while keeping the allocated capacity.
    pub fn reset(&mut self) {
        self.measurement_name = "";
        self.timestamp = None;
        self.tag_keys.clear();
        self.tag_values.clear();
        self.field_keys.clear();
        self.field_values.clear();
    }

    pub fn set_measurement_name(&mut self, name: &'static str) {
        self.measurement_name = name;
    }

    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = Some(timestamp);
    }

    pub fn append_tag(&mut self, key: &'static str, value: impl Into<String>) {
        self.tag_keys.push(key);
        self.tag_values.push(value.into());
    }

    pub fn append_field(&mut self, key: &'static str, value: impl Into<FieldValue>) {
        self.field_keys.push(key);
        self.field_values.push(value.into());
    }

    pub fn measurement_name(&self) -> &'static str {
        self.measurement_name
    }

    /// Timestamp of the sample; the Unix epoch when none was set.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp.unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Timestamp in nanoseconds since the Unix epoch.
    pub fn timestamp_nanos(&self) -> i64 {
        let ts = self.timestamp();
        ts.timestamp_nanos_opt()
            .unwrap_or_else(|| ts.timestamp().saturating_mul(1_000_000_000))
    }

    /// Iterate tag pairs in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.tag_keys
            .iter()
            .copied()
            .zip(self.tag_values.iter().map(String::as_str))
    }

    /// Iterate field pairs in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        self.field_keys.iter().copied().zip(self.field_values.iter())
    }

    pub fn tag_count(&self) -> usize {
        self.tag_keys.len()
    }

    pub fn field_count(&self) -> usize {
        self.field_keys.len()
    }

    /// Look up a field value by key.
    pub fn get_field(&self, key: &str) -> Option<&FieldValue> {
        self.field_keys
            .iter()
            .position(|k| *k == key)
            .map(|i| &self.field_values[i])
    }

    /// Look up a tag value by key.
    pub fn get_tag(&self, key: &str) -> Option<&str> {
        self.tag_keys
            .iter()
            .position(|k| *k == key)
            .map(|i| self.tag_values[i].as_str())
    }

    /// True when the point carries no measurement, timestamp, tags or fields.
    pub fn is_empty(&self) -> bool {
        self.measurement_name.is_empty()
            && self.timestamp.is_none()
            && self.tag_keys.is_empty()
            && self.field_keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled_point() -> Point {
        let mut p = Point::new();
        p.set_measurement_name("cpu");
        p.set_timestamp(Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 10).unwrap());
        p.append_tag("hostname", "host_0");
        p.append_tag("region", "us-west-1");
        p.append_field("usage_user", 58.0);
        p.append_field("context_switches", 12i64);
        p
    }

    #[test]
    fn test_reset_matches_fresh_point() {
        let mut p = filled_point();
        assert!(!p.is_empty());

        p.reset();

        assert!(p.is_empty());
        assert_eq!(p, Point::new());
        assert_eq!(p.tags().count(), 0);
        assert_eq!(p.fields().count(), 0);
    }

    #[test]
    fn test_pairs_keep_insertion_order() {
        let p = filled_point();

        let tags: Vec<_> = p.tags().collect();
        assert_eq!(tags, vec![("hostname", "host_0"), ("region", "us-west-1")]);

        let keys: Vec<_> = p.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["usage_user", "context_switches"]);
    }

    #[test]
    fn test_lookup() {
        let p = filled_point();
        assert_eq!(p.get_tag("region"), Some("us-west-1"));
        assert_eq!(p.get_field("usage_user"), Some(&FieldValue::Float(58.0)));
        assert_eq!(p.get_field("missing"), None);
    }

    #[test]
    fn test_timestamp_nanos() {
        let p = filled_point();
        assert_eq!(p.timestamp_nanos(), 1_451_606_410_000_000_000);
        assert_eq!(Point::new().timestamp_nanos(), 0);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Float(58.0).to_string(), "58");
        assert_eq!(FieldValue::Float(0.25).to_string(), "0.25");
        assert_eq!(FieldValue::Int(-3).to_string(), "-3");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
        assert_eq!(FieldValue::Bytes(b"abc".to_vec()).to_string(), "abc");
    }
}
