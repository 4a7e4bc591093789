//! Operating system measurements: disk, disk I/O, kernel, memory, network.

use super::{Measurement, MetricField};
use crate::distribution::{Distribution, Step};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Memory sizes a host can be provisioned with.
const MEMORY_TOTALS: [f64; 3] = [8.0 * GIB, 12.0 * GIB, 16.0 * GIB];

const DISK_TOTAL: f64 = 500.0 * GIB;
const INODES_TOTAL: f64 = 32_000_000.0;

fn counter(key: &'static str, mean: f64, std_dev: f64) -> MetricField {
    MetricField::int(key, Distribution::monotonic(Step::normal(mean, std_dev), 0.0))
}

fn uniform_counter(key: &'static str, high: f64) -> MetricField {
    MetricField::int(key, Distribution::monotonic(Step::uniform(0.0, high), 0.0))
}

pub fn diskio(start: DateTime<Utc>) -> Measurement {
    Measurement::new(
        "diskio",
        start,
        vec![
            counter("reads", 50.0, 1.0),
            counter("writes", 50.0, 1.0),
            counter("read_bytes", 100.0, 1.0),
            counter("write_bytes", 100.0, 1.0),
            counter("read_time", 5.0, 1.0),
            counter("write_time", 5.0, 1.0),
            counter("io_time", 5.0, 1.0),
        ],
    )
}

pub fn disk<R: Rng + ?Sized>(start: DateTime<Utc>, rng: &mut R) -> Measurement {
    let used = rng.gen::<f64>() * DISK_TOTAL;
    let inodes_used = rng.gen::<f64>() * INODES_TOTAL;
    Measurement::new(
        "disk",
        start,
        vec![
            MetricField::int("total", Distribution::constant(DISK_TOTAL)),
            MetricField::int(
                "free",
                Distribution::clamped(
                    Step::normal(0.0, 50.0 * 1024.0 * 1024.0),
                    0.0,
                    DISK_TOTAL,
                    DISK_TOTAL - used,
                ),
            ),
            MetricField::int(
                "used",
                Distribution::clamped(
                    Step::normal(0.0, 50.0 * 1024.0 * 1024.0),
                    0.0,
                    DISK_TOTAL,
                    used,
                ),
            ),
            MetricField::float(
                "used_percent",
                Distribution::clamped(
                    Step::normal(0.0, 1.0),
                    0.0,
                    100.0,
                    used / DISK_TOTAL * 100.0,
                ),
            ),
            MetricField::int("inodes_total", Distribution::constant(INODES_TOTAL)),
            MetricField::int(
                "inodes_free",
                Distribution::clamped(
                    Step::normal(0.0, 100.0),
                    0.0,
                    INODES_TOTAL,
                    INODES_TOTAL - inodes_used,
                ),
            ),
            MetricField::int(
                "inodes_used",
                Distribution::clamped(Step::normal(0.0, 100.0), 0.0, INODES_TOTAL, inodes_used),
            ),
        ],
    )
}

pub fn kernel<R: Rng + ?Sized>(start: DateTime<Utc>, rng: &mut R) -> Measurement {
    // Boot up to a week before the simulated window opens.
    let boot_time = start.timestamp() as f64 - rng.gen_range(0.0..604_800.0);
    Measurement::new(
        "kernel",
        start,
        vec![
            MetricField::int("boot_time", Distribution::constant(boot_time.floor())),
            counter("interrupts", 5.0, 1.0),
            counter("context_switches", 5.0, 1.0),
            uniform_counter("processes_forked", 100.0),
            uniform_counter("disk_pages_in", 100.0),
            uniform_counter("disk_pages_out", 100.0),
        ],
    )
}

pub fn mem<R: Rng + ?Sized>(start: DateTime<Utc>, rng: &mut R) -> Measurement {
    let total = *MEMORY_TOTALS.choose(rng).unwrap_or(&MEMORY_TOTALS[0]);
    let step = Step::normal(0.0, total / 64.0);
    let percent = || Distribution::clamped(Step::normal(0.0, 1.0), 0.0, 100.0, 50.0);
    Measurement::new(
        "mem",
        start,
        vec![
            MetricField::int("total", Distribution::constant(total)),
            MetricField::int(
                "available",
                Distribution::clamped(step, 0.0, total, rng.gen::<f64>() * total),
            ),
            MetricField::int(
                "used",
                Distribution::clamped(step, 0.0, total, rng.gen::<f64>() * total),
            ),
            MetricField::int(
                "free",
                Distribution::clamped(step, 0.0, total, rng.gen::<f64>() * total),
            ),
            MetricField::int(
                "cached",
                Distribution::clamped(step, 0.0, total, rng.gen::<f64>() * total),
            ),
            MetricField::int(
                "buffered",
                Distribution::clamped(step, 0.0, total, rng.gen::<f64>() * total),
            ),
            MetricField::float("used_percent", percent()),
            MetricField::float("available_percent", percent()),
            MetricField::float("buffered_percent", percent()),
        ],
    )
}

pub fn net(start: DateTime<Utc>) -> Measurement {
    Measurement::new(
        "net",
        start,
        vec![
            counter("bytes_sent", 0.0, 1024.0),
            counter("bytes_recv", 0.0, 1024.0),
            counter("packets_sent", 0.0, 32.0),
            counter("packets_recv", 0.0, 32.0),
            counter("err_in", 0.0, 1.0),
            counter("err_out", 0.0, 1.0),
            counter("drop_in", 0.0, 1.0),
            counter("drop_out", 0.0, 1.0),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_core::{FieldValue, Point};
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_counters_are_monotonic() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut m = net(start());
        let mut last = vec![0i64; m.field_keys().len()];

        for _ in 0..50 {
            m.tick(Duration::seconds(10), &mut rng);
            let mut p = Point::new();
            m.to_point(&mut p);
            for (i, (_, v)) in p.fields().enumerate() {
                let v = v.as_i64().unwrap();
                assert!(v >= last[i]);
                last[i] = v;
            }
        }
    }

    #[test]
    fn test_mem_total_is_a_known_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = mem(start(), &mut rng);
        let mut p = Point::new();
        m.to_point(&mut p);
        let total = p.get_field("total").and_then(FieldValue::as_i64).unwrap();
        assert!(MEMORY_TOTALS.contains(&(total as f64)));
    }

    #[test]
    fn test_kernel_boot_time_before_start() {
        let mut rng = StdRng::seed_from_u64(5);
        let m = kernel(start(), &mut rng);
        let mut p = Point::new();
        m.to_point(&mut p);
        let boot = p.get_field("boot_time").and_then(FieldValue::as_i64).unwrap();
        assert!(boot <= start().timestamp());
    }

    #[test]
    fn test_field_names() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(diskio(start()).field_keys().len(), 7);
        assert_eq!(disk(start(), &mut rng).field_keys()[0], "total");
        assert_eq!(kernel(start(), &mut rng).field_keys().len(), 6);
    }
}
