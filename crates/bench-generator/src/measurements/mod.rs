//! Simulated measurements attached to each host.
//!
//! A measurement is a named, ordered list of fields, each driven by its own
//! [`Distribution`]. The concrete field tables live in the submodules.

pub mod cpu;
pub mod services;
pub mod system;

use crate::distribution::Distribution;
use bench_core::{FieldValue, Point};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// How a field's distribution state is rendered into a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    /// Truncated towards zero.
    Int,
}

/// One field of a simulated measurement.
#[derive(Debug, Clone)]
pub struct MetricField {
    key: &'static str,
    kind: FieldKind,
    distribution: Distribution,
}

impl MetricField {
    pub fn float(key: &'static str, distribution: Distribution) -> Self {
        Self {
            key,
            kind: FieldKind::Float,
            distribution,
        }
    }

    pub fn int(key: &'static str, distribution: Distribution) -> Self {
        Self {
            key,
            kind: FieldKind::Int,
            distribution,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    fn value(&self) -> FieldValue {
        let v = self.distribution.get();
        match self.kind {
            FieldKind::Float => FieldValue::Float(v),
            FieldKind::Int => FieldValue::Int(v as i64),
        }
    }
}

/// A measurement simulated over time for one host.
#[derive(Debug, Clone)]
pub struct Measurement {
    name: &'static str,
    timestamp: DateTime<Utc>,
    fields: Vec<MetricField>,
}

impl Measurement {
    pub fn new(name: &'static str, start: DateTime<Utc>, fields: Vec<MetricField>) -> Self {
        Self {
            name,
            timestamp: start,
            fields,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Field names in emission order.
    pub fn field_keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(MetricField::key).collect()
    }

    /// Advance simulated time by `d` and every field by one step.
    pub fn tick<R: Rng + ?Sized>(&mut self, d: Duration, rng: &mut R) {
        self.timestamp += d;
        for field in &mut self.fields {
            field.distribution.advance(rng);
        }
    }

    /// Write measurement name, timestamp and fields into `point`.
    pub fn to_point(&self, point: &mut Point) {
        point.set_measurement_name(self.name);
        point.set_timestamp(self.timestamp);
        for field in &self.fields {
            point.append_field(field.key, field.value());
        }
    }
}
