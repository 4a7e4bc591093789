//! Service-level measurements: nginx, PostgreSQL and Redis.

use super::{Measurement, MetricField};
use crate::distribution::{Distribution, Step};
use chrono::{DateTime, Utc};
use rand::Rng;

fn counter(key: &'static str, high: f64) -> MetricField {
    MetricField::int(key, Distribution::monotonic(Step::uniform(0.0, high), 0.0))
}

fn gauge(key: &'static str, delta: f64, max: f64) -> MetricField {
    MetricField::int(
        key,
        Distribution::clamped(Step::uniform(-delta, delta), 0.0, max, max / 2.0),
    )
}

pub fn nginx(start: DateTime<Utc>) -> Measurement {
    Measurement::new(
        "nginx",
        start,
        vec![
            counter("accepts", 5.0),
            gauge("active", 1.0, 100.0),
            counter("handled", 5.0),
            gauge("reading", 1.0, 100.0),
            counter("requests", 5.0),
            gauge("waiting", 1.0, 100.0),
            gauge("writing", 1.0, 100.0),
        ],
    )
}

/// PostgreSQL statistics. The measurement name keeps the historical
/// `postgresl` spelling so generated data stays comparable across loaders.
pub fn postgresql(start: DateTime<Utc>) -> Measurement {
    Measurement::new(
        "postgresl",
        start,
        vec![
            gauge("numbackends", 5.0, 1000.0),
            counter("xact_commit", 1000.0),
            counter("xact_rollback", 1000.0),
            counter("blks_read", 1000.0),
            counter("blks_hit", 1000.0),
            counter("tup_returned", 1000.0),
            counter("tup_fetched", 1000.0),
            counter("tup_inserted", 1000.0),
            counter("tup_updated", 1000.0),
            counter("tup_deleted", 1000.0),
            counter("conflicts", 1000.0),
            counter("temp_files", 1000.0),
            counter("temp_bytes", 1024.0 * 1024.0),
            counter("deadlocks", 1000.0),
            counter("blk_read_time", 1000.0),
            counter("blk_write_time", 1000.0),
        ],
    )
}

pub fn redis<R: Rng + ?Sized>(start: DateTime<Utc>, rng: &mut R) -> Measurement {
    let used_memory = rng.gen_range(1024.0 * 1024.0..8.0 * 1024.0 * 1024.0 * 1024.0);
    Measurement::new(
        "redis",
        start,
        vec![
            MetricField::int(
                "uptime_in_seconds",
                Distribution::monotonic(Step::uniform(10.0, 10.0), 0.0),
            ),
            counter("total_connections_received", 10.0),
            counter("expired_keys", 100.0),
            counter("evicted_keys", 100.0),
            counter("keyspace_hits", 100.0),
            counter("keyspace_misses", 100.0),
            gauge("instantaneous_ops_per_sec", 100.0, 10_000.0),
            MetricField::float(
                "instantaneous_input_kbps",
                Distribution::clamped(Step::uniform(-10.0, 10.0), 0.0, 10_000.0, 100.0),
            ),
            MetricField::float(
                "instantaneous_output_kbps",
                Distribution::clamped(Step::uniform(-10.0, 10.0), 0.0, 10_000.0, 100.0),
            ),
            gauge("connected_clients", 10.0, 10_000.0),
            MetricField::int(
                "used_memory",
                Distribution::clamped(
                    Step::normal(0.0, 1024.0 * 1024.0),
                    0.0,
                    8.0 * 1024.0 * 1024.0 * 1024.0,
                    used_memory,
                ),
            ),
            counter("rdb_changes_since_last_save", 100.0),
            counter("sync_full", 1.0),
            counter("sync_partial_ok", 1.0),
            counter("sync_partial_err", 1.0),
            gauge("pubsub_channels", 1.0, 100.0),
            gauge("pubsub_patterns", 1.0, 100.0),
            gauge("latest_fork_usec", 100.0, 10_000.0),
            gauge("connected_slaves", 1.0, 10.0),
            counter("master_repl_offset", 1024.0),
            MetricField::float(
                "mem_fragmentation_ratio",
                Distribution::clamped(Step::normal(0.0, 0.01), 1.0, 2.0, 1.1),
            ),
            MetricField::float(
                "used_cpu_sys",
                Distribution::monotonic(Step::uniform(0.0, 1.0), 0.0),
            ),
            MetricField::float(
                "used_cpu_user",
                Distribution::monotonic(Step::uniform(0.0, 1.0), 0.0),
            ),
        ],
    )
}
