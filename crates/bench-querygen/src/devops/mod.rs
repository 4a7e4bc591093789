//! Devops query use cases.
//!
//! Every engine implements [`DevopsCommon`]: it owns the query pool, the
//! seeded RNG and the full time range, and knows how to render the shared
//! query shapes in its own dialect. The use-case generators
//! ([`DevopsHighCpu`], [`DevopsSingleGroupby`]) wrap a common generator and
//! add only their fixed parameters.

pub mod cassandra;
pub mod influx;
pub mod mongo;
pub mod timescaledb;

use crate::{DatabaseConfig, QueryGenError, QueryGenerator, QueryGeneratorFactory};
use bench_core::{Query, QueryPool, TimeInterval};
use bench_generator::measurements::cpu::CPU_FIELD_KEYS;
use chrono::Duration;
use rand::rngs::StdRng;
use rand::seq::index;

/// Length of the random window for the high-CPU queries.
pub const HIGH_CPU_WINDOW_HOURS: i64 = 12;

/// Threshold on `usage_user` above which a CPU reading counts as high.
pub const HIGH_CPU_THRESHOLD: f64 = 90.0;

/// Engine-specific state and query builders shared by all devops use cases.
///
/// Builders receive `q` freshly reset from the pool and append into its
/// existing buffers.
pub trait DevopsCommon {
    type Query: Query + Default + 'static;

    fn new(db: &DatabaseConfig, interval: TimeInterval) -> Self;

    fn pool(&mut self) -> &mut QueryPool<Self::Query>;

    /// Readings with `usage_user` above [`HIGH_CPU_THRESHOLD`] in a random
    /// 12 hour window, for `nhosts` random hosts or all hosts when zero.
    fn high_cpu_for_hosts(
        &mut self,
        q: &mut Self::Query,
        scale_var: usize,
        nhosts: usize,
    ) -> Result<(), QueryGenError>;

    /// Per-minute maximum of the first `nmetrics` CPU fields for `nhosts`
    /// random hosts over a random window of `hours`.
    fn group_by_time(
        &mut self,
        q: &mut Self::Query,
        scale_var: usize,
        nhosts: usize,
        nmetrics: usize,
        hours: i64,
    ) -> Result<(), QueryGenError>;
}

/// `high-cpu-*`: CPU over threshold for a fixed number of hosts.
#[derive(Debug)]
pub struct DevopsHighCpu<C> {
    common: C,
    hosts: usize,
}

impl<C: DevopsCommon> DevopsHighCpu<C> {
    pub fn new(common: C, hosts: usize) -> Self {
        Self { common, hosts }
    }
}

impl<C: DevopsCommon> QueryGenerator for DevopsHighCpu<C> {
    fn dispatch(&mut self, scale_var: usize) -> Result<&dyn Query, QueryGenError> {
        let mut q = self.common.pool().acquire();
        self.common.high_cpu_for_hosts(&mut q, scale_var, self.hosts)?;
        Ok(self.common.pool().lend(q))
    }
}

/// `single-groupby-M-N-H`: one group-by-minute aggregation.
#[derive(Debug)]
pub struct DevopsSingleGroupby<C> {
    common: C,
    metrics: usize,
    hosts: usize,
    hours: i64,
}

impl<C: DevopsCommon> DevopsSingleGroupby<C> {
    pub fn new(common: C, metrics: usize, hosts: usize, hours: i64) -> Self {
        Self {
            common,
            metrics,
            hosts,
            hours,
        }
    }
}

impl<C: DevopsCommon> QueryGenerator for DevopsSingleGroupby<C> {
    fn dispatch(&mut self, scale_var: usize) -> Result<&dyn Query, QueryGenError> {
        let mut q = self.common.pool().acquire();
        self.common
            .group_by_time(&mut q, scale_var, self.hosts, self.metrics, self.hours)?;
        Ok(self.common.pool().lend(q))
    }
}

pub fn high_cpu_factory<C: DevopsCommon + 'static>(hosts: usize) -> QueryGeneratorFactory {
    Box::new(move |db, start, end| {
        let common = C::new(db, TimeInterval::new(start, end)?);
        Ok(Box::new(DevopsHighCpu::new(common, hosts)) as Box<dyn QueryGenerator>)
    })
}

pub fn single_groupby_factory<C: DevopsCommon + 'static>(
    metrics: usize,
    hosts: usize,
    hours: i64,
) -> QueryGeneratorFactory {
    Box::new(move |db, start, end| {
        let common = C::new(db, TimeInterval::new(start, end)?);
        Ok(Box::new(DevopsSingleGroupby::new(common, metrics, hosts, hours)) as Box<dyn QueryGenerator>)
    })
}

/// `nhosts` distinct host names drawn from a population of `scale_var`.
pub(crate) fn random_hosts(
    rng: &mut StdRng,
    scale_var: usize,
    nhosts: usize,
) -> Result<Vec<String>, QueryGenError> {
    if nhosts > scale_var {
        return Err(QueryGenError::TooManyHosts {
            requested: nhosts,
            scale: scale_var,
        });
    }
    Ok(index::sample(rng, scale_var, nhosts)
        .into_iter()
        .map(|i| format!("host_{i}"))
        .collect())
}

/// The first `n` CPU fields, in model order.
pub(crate) fn cpu_metrics(n: usize) -> &'static [&'static str] {
    &CPU_FIELD_KEYS[..n.min(CPU_FIELD_KEYS.len())]
}

/// Render a duration the way the query labels spell it, e.g. `12h0m0s`.
pub(crate) fn duration_label(d: Duration) -> String {
    let secs = d.num_seconds();
    format!("{}h{}m{}s", secs / 3600, secs % 3600 / 60, secs % 60)
}

pub(crate) fn hosts_label(nhosts: usize) -> String {
    if nhosts == 0 {
        "all hosts".to_string()
    } else {
        format!("{nhosts} host(s)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_random_hosts_are_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let hosts = random_hosts(&mut rng, 10, 8).unwrap();
        assert_eq!(hosts.len(), 8);
        let mut sorted = hosts.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 8);
        assert!(hosts.iter().all(|h| h.starts_with("host_")));
    }

    #[test]
    fn test_random_hosts_rejects_more_than_scale() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = random_hosts(&mut rng, 4, 8).unwrap_err();
        assert_eq!(
            err.to_string(),
            "number of hosts (8) cannot be greater than scale (4)"
        );
    }

    #[test]
    fn test_cpu_metrics_prefix() {
        assert_eq!(cpu_metrics(1), &["usage_user"]);
        assert_eq!(cpu_metrics(5).len(), 5);
        assert_eq!(cpu_metrics(50).len(), 10);
    }

    #[test]
    fn test_duration_label() {
        assert_eq!(duration_label(Duration::hours(12)), "12h0m0s");
        assert_eq!(duration_label(Duration::minutes(90)), "1h30m0s");
    }
}
