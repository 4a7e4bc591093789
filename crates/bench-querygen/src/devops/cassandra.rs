//! Cassandra devops queries.
//!
//! Cassandra has no server-side time bucketing, so a query is a structured
//! plan that the client executes against the `series_*` tables: which
//! measurement and fields to read, the time bounds, the tag sets selecting
//! series, and how to aggregate client-side.

use super::{
    cpu_metrics, duration_label, hosts_label, random_hosts, DevopsCommon, DevopsHighCpu,
    DevopsSingleGroupby, HIGH_CPU_THRESHOLD, HIGH_CPU_WINDOW_HOURS,
};
use crate::{DatabaseConfig, QueryGenError};
use bench_core::{Query, QueryPool, TimeInterval};
use chrono::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;

const MINUTE_NANOS: i64 = 60_000_000_000;

#[derive(Debug, Default, Clone, Serialize)]
pub struct CassandraQuery {
    pub human_label: String,
    pub human_description: String,
    pub keyspace: String,
    pub measurement_name: String,
    pub field_names: Vec<String>,
    /// `max`, or `none` for raw rows.
    pub aggregation_type: String,
    /// Row filter applied client-side, empty for none.
    pub condition: String,
    pub time_start_ns: i64,
    pub time_end_ns: i64,
    /// Bucket width for aggregation, zero for a single bucket.
    pub group_by_duration_ns: i64,
    /// Each inner set is OR-ed; an empty list selects every series.
    pub tag_sets: Vec<Vec<String>>,
}

impl Query for CassandraQuery {
    fn human_label(&self) -> &str {
        &self.human_label
    }

    fn human_description(&self) -> &str {
        &self.human_description
    }

    fn reset(&mut self) {
        self.human_label.clear();
        self.human_description.clear();
        self.keyspace.clear();
        self.measurement_name.clear();
        self.field_names.clear();
        self.aggregation_type.clear();
        self.condition.clear();
        self.time_start_ns = 0;
        self.time_end_ns = 0;
        self.group_by_duration_ns = 0;
        self.tag_sets.clear();
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug)]
pub struct CassandraDevops {
    keyspace: String,
    all_interval: TimeInterval,
    rng: StdRng,
    pool: QueryPool<CassandraQuery>,
}

pub type CassandraDevopsHighCpu = DevopsHighCpu<CassandraDevops>;
pub type CassandraDevopsSingleGroupby = DevopsSingleGroupby<CassandraDevops>;

fn push_host_tag_set(tag_sets: &mut Vec<Vec<String>>, hosts: &[String]) {
    tag_sets.push(hosts.iter().map(|h| format!("hostname={h}")).collect());
}

impl DevopsCommon for CassandraDevops {
    type Query = CassandraQuery;

    fn new(db: &DatabaseConfig, interval: TimeInterval) -> Self {
        Self {
            keyspace: db.database_name.clone(),
            all_interval: interval,
            rng: StdRng::seed_from_u64(db.seed),
            pool: QueryPool::default(),
        }
    }

    fn pool(&mut self) -> &mut QueryPool<CassandraQuery> {
        &mut self.pool
    }

    fn high_cpu_for_hosts(
        &mut self,
        q: &mut CassandraQuery,
        scale_var: usize,
        nhosts: usize,
    ) -> Result<(), QueryGenError> {
        let window = self
            .all_interval
            .rand_window(Duration::hours(HIGH_CPU_WINDOW_HOURS), &mut self.rng)?;
        if nhosts > 0 {
            let hosts = random_hosts(&mut self.rng, scale_var, nhosts)?;
            push_host_tag_set(&mut q.tag_sets, &hosts);
        }

        write!(q.human_label, "Cassandra CPU over threshold, {}", hosts_label(nhosts))?;
        write!(q.human_description, "{}: {}", q.human_label, window.start_string())?;
        q.keyspace.push_str(&self.keyspace);
        q.measurement_name.push_str("cpu");
        q.field_names.push("usage_user".to_string());
        q.aggregation_type.push_str("none");
        write!(q.condition, "usage_user > {HIGH_CPU_THRESHOLD:.1}")?;
        q.time_start_ns = window.start_unix_nanos();
        q.time_end_ns = window.end_unix_nanos();
        Ok(())
    }

    fn group_by_time(
        &mut self,
        q: &mut CassandraQuery,
        scale_var: usize,
        nhosts: usize,
        nmetrics: usize,
        hours: i64,
    ) -> Result<(), QueryGenError> {
        let window_len = Duration::hours(hours);
        let window = self.all_interval.rand_window(window_len, &mut self.rng)?;
        let hosts = random_hosts(&mut self.rng, scale_var, nhosts)?;
        let metrics = cpu_metrics(nmetrics);

        write!(
            q.human_label,
            "Cassandra {} cpu metric(s), random {} hosts, random {} by 1m",
            metrics.len(),
            nhosts,
            duration_label(window_len)
        )?;
        write!(q.human_description, "{}: {}", q.human_label, window.start_string())?;
        q.keyspace.push_str(&self.keyspace);
        q.measurement_name.push_str("cpu");
        q.field_names.extend(metrics.iter().map(|m| m.to_string()));
        q.aggregation_type.push_str("max");
        q.time_start_ns = window.start_unix_nanos();
        q.time_end_ns = window.end_unix_nanos();
        q.group_by_duration_ns = MINUTE_NANOS;
        push_host_tag_set(&mut q.tag_sets, &hosts);
        Ok(())
    }
}
