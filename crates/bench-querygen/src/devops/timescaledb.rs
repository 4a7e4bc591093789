//! TimescaleDB (PostgreSQL) devops queries.

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

/// A SQL statement against one hypertable.
#[derive(Debug, Default, Clone, Serialize)]
pub struct TimescaleDbQuery {
    pub human_label: String,
    pub human_description: String,
    pub database: String,
    pub hypertable: String,
    pub sql_query: String,
}

impl Query for TimescaleDbQuery {
    fn human_label(&self) -> &str {
        &self.human_label
    }

    fn human_description(&self) -> &str {
        &self.human_description
    }

    fn reset(&mut self) {
        self.human_label.clear();
        self.human_description.clear();
        self.database.clear();
        self.hypertable.clear();
        self.sql_query.clear();
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug)]
pub struct TimescaleDbDevops {
    database_name: String,
    all_interval: TimeInterval,
    rng: StdRng,
    pool: QueryPool<TimescaleDbQuery>,
}

pub type TimescaleDbDevopsHighCpu = DevopsHighCpu<TimescaleDbDevops>;
pub type TimescaleDbDevopsSingleGroupby = DevopsSingleGroupby<TimescaleDbDevops>;

fn push_hostname_clause(sql: &mut String, hosts: &[String]) {
    sql.push_str("hostname IN (");
    for (i, host) in hosts.iter().enumerate() {
        if i > 0 {
            sql.push(',');
        }
        sql.push('\'');
        sql.push_str(host);
        sql.push('\'');
    }
    sql.push(')');
}

impl DevopsCommon for TimescaleDbDevops {
    type Query = TimescaleDbQuery;

    fn new(db: &DatabaseConfig, interval: TimeInterval) -> Self {
        Self {
            database_name: db.database_name.clone(),
            all_interval: interval,
            rng: StdRng::seed_from_u64(db.seed),
            pool: QueryPool::default(),
        }
    }

    fn pool(&mut self) -> &mut QueryPool<TimescaleDbQuery> {
        &mut self.pool
    }

    fn high_cpu_for_hosts(
        &mut self,
        q: &mut TimescaleDbQuery,
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

        write!(q.human_label, "TimescaleDB CPU over threshold, {}", hosts_label(nhosts))?;
        write!(q.human_description, "{}: {}", q.human_label, window.start_string())?;
        q.database.push_str(&self.database_name);
        q.hypertable.push_str("cpu");
        write!(
            q.sql_query,
            "SELECT * FROM cpu WHERE usage_user > {HIGH_CPU_THRESHOLD:.1} AND time >= '{}' AND time < '{}'",
            window.start_string(),
            window.end_string(),
        )?;
        if !hosts.is_empty() {
            q.sql_query.push_str(" AND ");
            push_hostname_clause(&mut q.sql_query, &hosts);
        }
        Ok(())
    }

    fn group_by_time(
        &mut self,
        q: &mut TimescaleDbQuery,
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
            "TimescaleDB {} cpu metric(s), random {} hosts, random {} by 1m",
            metrics.len(),
            nhosts,
            duration_label(window_len)
        )?;
        write!(q.human_description, "{}: {}", q.human_label, window.start_string())?;
        q.database.push_str(&self.database_name);
        q.hypertable.push_str("cpu");

        q.sql_query.push_str("SELECT time_bucket('1 minute', time) AS minute");
        for m in metrics {
            write!(q.sql_query, ", max({m}) AS max_{m}")?;
        }
        q.sql_query.push_str(" FROM cpu WHERE ");
        push_hostname_clause(&mut q.sql_query, &hosts);
        write!(
            q.sql_query,
            " AND time >= '{}' AND time < '{}' GROUP BY minute ORDER BY minute ASC",
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

    fn common(seed: u64) -> TimescaleDbDevops {
        let interval = TimeInterval::new(
            Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2016, 1, 2, 6, 0, 0).unwrap(),
        )
        .unwrap();
        TimescaleDbDevops::new(&DatabaseConfig::new("benchmark", seed), interval)
    }

    #[test]
    fn test_high_cpu_one_host() {
        let mut generator = TimescaleDbDevopsHighCpu::new(common(3), 1);
        let q = generator.dispatch(10).unwrap();
        assert_eq!(q.human_label(), "TimescaleDB CPU over threshold, 1 host(s)");
        assert!(q.human_description().starts_with("TimescaleDB CPU over threshold, 1 host(s): 2016-01-01T"));

        let json = q.to_json().unwrap();
        let sql = json["sql_query"].as_str().unwrap();
        assert!(sql.starts_with("SELECT * FROM cpu WHERE usage_user > 90.0 AND time >= '2016-01-01T"));
        assert!(sql.contains("AND hostname IN ('host_"));
        assert_eq!(json["hypertable"], "cpu");
        assert_eq!(json["database"], "benchmark");
    }

    #[test]
    fn test_high_cpu_all_hosts_has_no_host_filter() {
        let mut generator = TimescaleDbDevopsHighCpu::new(common(3), 0);
        let q = generator.dispatch(10).unwrap();
        assert_eq!(q.human_label(), "TimescaleDB CPU over threshold, all hosts");
        let sql = q.to_json().unwrap()["sql_query"].as_str().unwrap().to_string();
        assert!(!sql.contains("hostname"));
    }

    #[test]
    fn test_single_groupby() {
        let mut generator = TimescaleDbDevopsSingleGroupby::new(common(5), 5, 8, 1);
        let q = generator.dispatch(100).unwrap();
        assert_eq!(
            q.human_label(),
            "TimescaleDB 5 cpu metric(s), random 8 hosts, random 1h0m0s by 1m"
        );
        let sql = q.to_json().unwrap()["sql_query"].as_str().unwrap().to_string();
        assert!(sql.contains("max(usage_user) AS max_usage_user"));
        assert!(sql.contains("max(usage_iowait) AS max_usage_iowait"));
        assert!(!sql.contains("usage_irq"));
        assert_eq!(sql.matches("'host_").count(), 8);
        assert!(sql.ends_with("GROUP BY minute ORDER BY minute ASC"));
    }

    #[test]
    fn test_too_many_hosts() {
        let mut generator = TimescaleDbDevopsSingleGroupby::new(common(5), 1, 8, 1);
        assert!(matches!(
            generator.dispatch(4),
            Err(QueryGenError::TooManyHosts { requested: 8, scale: 4 })
        ));
    }

    #[test]
    fn test_same_seed_same_queries() {
        let mut a = TimescaleDbDevopsHighCpu::new(common(9), 1);
        let mut b = TimescaleDbDevopsHighCpu::new(common(9), 1);
        for _ in 0..5 {
            let qa = a.dispatch(50).unwrap().to_json().unwrap();
            let qb = b.dispatch(50).unwrap().to_json().unwrap();
            assert_eq!(qa, qb);
        }
    }

    #[test]
    fn test_fill_appends_into_existing_buffer() {
        let mut common = common(4);
        let mut q = TimescaleDbQuery::default();
        q.sql_query.reserve(4096);
        let buffer = q.sql_query.as_ptr();

        common.group_by_time(&mut q, 100, 8, 5, 1).unwrap();
        assert_eq!(q.sql_query.as_ptr(), buffer);
        assert_eq!(q.database, "benchmark");

        q.reset();
        common.high_cpu_for_hosts(&mut q, 100, 1).unwrap();
        assert_eq!(q.sql_query.as_ptr(), buffer);
        assert!(q.sql_query.starts_with("SELECT * FROM cpu"));
    }

    #[test]
    fn test_pool_recycles_one_query() {
        let mut generator = TimescaleDbDevopsHighCpu::new(common(6), 1);
        for _ in 0..10 {
            generator.dispatch(10).unwrap();
        }
        assert_eq!(generator.common.pool.allocated(), 1);
    }
}
