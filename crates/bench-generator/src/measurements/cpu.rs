//! CPU usage measurement.

use super::{Measurement, MetricField};
use crate::distribution::{Distribution, Step};
use chrono::{DateTime, Utc};
use rand::Rng;

pub const CPU_MEASUREMENT: &str = "cpu";

/// Field names of the full CPU measurement, in emission order.
pub const CPU_FIELD_KEYS: [&str; 10] = [
    "usage_user",
    "usage_system",
    "usage_idle",
    "usage_nice",
    "usage_iowait",
    "usage_irq",
    "usage_softirq",
    "usage_steal",
    "usage_guest",
    "usage_guest_nice",
];

fn usage_percent<R: Rng + ?Sized>(rng: &mut R) -> Distribution {
    let initial = rng.gen::<f64>() * 100.0;
    Distribution::clamped(Step::normal(0.0, 1.0), 0.0, 100.0, initial)
}

/// CPU measurement with all ten usage fields.
pub fn cpu<R: Rng + ?Sized>(start: DateTime<Utc>, rng: &mut R) -> Measurement {
    let fields = CPU_FIELD_KEYS
        .iter()
        .map(|&key| MetricField::float(key, usage_percent(rng)))
        .collect();
    Measurement::new(CPU_MEASUREMENT, start, fields)
}

/// CPU measurement reduced to `usage_user`.
pub fn cpu_single<R: Rng + ?Sized>(start: DateTime<Utc>, rng: &mut R) -> Measurement {
    let fields = vec![MetricField::float(CPU_FIELD_KEYS[0], usage_percent(rng))];
    Measurement::new(CPU_MEASUREMENT, start, fields)
}
