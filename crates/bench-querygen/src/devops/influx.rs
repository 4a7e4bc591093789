//! InfluxDB devops queries, expressed as InfluxQL over the HTTP query API.

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

/// An HTTP request against `/query`. The client URL-encodes `influxql` into
/// the `q` parameter.
#[derive(Debug, Default, Clone, Serialize)]
pub struct InfluxQuery {
    pub human_label: String,
    pub human_description: String,
    pub method: String,
    pub path: String,
    pub database: String,
    pub influxql: String,
}

impl Query for InfluxQuery {
    fn human_label(&self) -> &str {
        &self.human_label
    }

    fn human_description(&self) -> &str {
        &self.human_description
    }

    fn reset(&mut self) {
        self.human_label.clear();
        self.human_description.clear();
        self.method.clear();
        self.path.clear();
        self.database.clear();
        self.influxql.clear();
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug)]
pub struct InfluxDevops {
    database_name: String,
    all_interval: TimeInterval,
    rng: StdRng,
    pool: QueryPool<InfluxQuery>,
}

pub type InfluxDevopsHighCpu = DevopsHighCpu<InfluxDevops>;
pub type InfluxDevopsSingleGroupby = DevopsSingleGroupby<InfluxDevops>;

fn push_hostname_clause(influxql: &mut String, hosts: &[String]) {
    influxql.push('(');
    for (i, host) in hosts.iter().enumerate() {
        if i > 0 {
            influxql.push_str(" or ");
        }
        influxql.push_str("hostname = '");
        influxql.push_str(host);
        influxql.push('\'');
    }
    influxql.push(')');
}

impl InfluxDevops {
    fn fill_request(&self, q: &mut InfluxQuery) {
        q.method.push_str("GET");
        q.path.push_str("/query");
        q.database.push_str(&self.database_name);
    }
}

impl DevopsCommon for InfluxDevops {
    type Query = InfluxQuery;

    fn new(db: &DatabaseConfig, interval: TimeInterval) -> Self {
        Self {
            database_name: db.database_name.clone(),
            all_interval: interval,
            rng: StdRng::seed_from_u64(db.seed),
            pool: QueryPool::default(),
        }
    }

    fn pool(&mut self) -> &mut QueryPool<InfluxQuery> {
        &mut self.pool
    }

    fn high_cpu_for_hosts(
        &mut self,
        q: &mut InfluxQuery,
        scale_var: usize,
        nhosts: usize,
    ) -> Result<(), QueryGenError> {
        let window = self
            .all_interval
            .rand_window(Duration::hours(HIGH_CPU_WINDOW_HOURS), &mut self.rng)?;
        let hosts = if nhosts == 0 {
            Vec::new()
        } else {
            random_hosts(&mut self.rng, scale_var, nhosts)?
        };

        write!(q.human_label, "Influx CPU over threshold, {}", hosts_label(nhosts))?;
        write!(q.human_description, "{}: {}", q.human_label, window.start_string())?;
        self.fill_request(q);

        write!(q.influxql, "SELECT * from cpu where usage_user > {HIGH_CPU_THRESHOLD:.1}")?;
        if !hosts.is_empty() {
            q.influxql.push_str(" and ");
            push_hostname_clause(&mut q.influxql, &hosts);
        }
        write!(
            q.influxql,
            " and time >= '{}' and time < '{}'",
            window.start_string(),
            window.end_string(),
        )?;
        Ok(())
    }

    fn group_by_time(
        &mut self,
        q: &mut InfluxQuery,
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
            "Influx {} cpu metric(s), random {} hosts, random {} by 1m",
            metrics.len(),
            nhosts,
            duration_label(window_len)
        )?;
        write!(q.human_description, "{}: {}", q.human_label, window.start_string())?;
        self.fill_request(q);

        q.influxql.push_str("SELECT ");
        for (i, m) in metrics.iter().enumerate() {
            if i > 0 {
                q.influxql.push(',');
            }
            write!(q.influxql, "max({m})")?;
        }
        q.influxql.push_str(" from cpu where ");
        push_hostname_clause(&mut q.influxql, &hosts);
        write!(
            q.influxql,
            " and time >= '{}' and time < '{}' group by time(1m)",
            window.start_string(),
            window.end_string(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryGenerator;
    use chrono::{TimeZone, Utc};

    fn common() -> InfluxDevops {
        let interval = TimeInterval::new(
            Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2016, 1, 2, 6, 0, 0).unwrap(),
        )
        .unwrap();
        InfluxDevops::new(&DatabaseConfig::new("benchmark", 11), interval)
    }

    #[test]
    fn test_high_cpu_request() {
        let mut generator = InfluxDevopsHighCpu::new(common(), 1);
        let json = generator.dispatch(10).unwrap().to_json().unwrap();
        assert_eq!(json["human_label"], "Influx CPU over threshold, 1 host(s)");
        assert_eq!(json["method"], "GET");
        assert_eq!(json["path"], "/query");
        assert_eq!(json["database"], "benchmark");
        let influxql = json["influxql"].as_str().unwrap();
        assert!(influxql.starts_with("SELECT * from cpu where usage_user > 90.0 and (hostname = 'host_"));
    }

    #[test]
    fn test_single_groupby_request() {
        let mut generator = InfluxDevopsSingleGroupby::new(common(), 1, 1, 12);
        let json = generator.dispatch(10).unwrap().to_json().unwrap();
        assert_eq!(
            json["human_label"],
            "Influx 1 cpu metric(s), random 1 hosts, random 12h0m0s by 1m"
        );
        let influxql = json["influxql"].as_str().unwrap();
        assert!(influxql.starts_with("SELECT max(usage_user) from cpu where (hostname = 'host_"));
        assert!(influxql.ends_with("group by time(1m)"));
    }

    #[test]
    fn test_fill_appends_into_existing_buffer() {
        let mut generator = InfluxDevopsSingleGroupby::new(common(), 5, 8, 1);
        generator.dispatch(100).unwrap();
        assert!(generator.common.pool.live().is_some());

        let mut q = InfluxQuery::default();
        q.influxql.reserve(4096);
        let buffer = q.influxql.as_ptr();
        generator.common.group_by_time(&mut q, 100, 8, 5, 1).unwrap();
        assert_eq!(q.influxql.as_ptr(), buffer);
        assert_eq!(q.method, "GET");
        assert_eq!(q.influxql.matches("hostname = 'host_").count(), 8);
        assert_eq!(generator.common.pool.allocated(), 1);
    }
}
