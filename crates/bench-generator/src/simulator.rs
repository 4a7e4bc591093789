//! Simulator contract and the shared host-population state machine.

use crate::host::{Host, HostConstructor};
use bench_core::Point;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use tracing::warn;

/// Deterministic generator of an ordered stream of points.
///
/// Progress is a pure function of the seed, the configuration and the number
/// of `next` calls made so far.
pub trait Simulator {
    /// True once every point of the simulated window has been made.
    fn finished(&self) -> bool;

    /// Advance by one step and fill `point`.
    ///
    /// Returns whether the filled point is to be emitted. A `false` result
    /// still consumes one step; the caller resets the buffer and moves on.
    fn next(&mut self, point: &mut Point) -> bool;

    /// Field names per measurement name, in emission order.
    fn fields(&self) -> HashMap<&'static str, Vec<&'static str>>;
}

/// Immutable description of a simulation; produces exactly one simulator.
pub trait SimulatorConfig {
    fn to_simulator(&self, interval: Duration) -> Box<dyn Simulator>;
}

/// Parameters shared by every host-based simulator configuration.
#[derive(Debug, Clone, Copy)]
pub struct HostPopulation {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Hosts online in the first epoch.
    pub init_host_count: usize,
    /// Hosts online in the last epoch.
    pub host_count: usize,
    pub host_constructor: HostConstructor,
    pub seed: u64,
}

/// State machine shared by the devops and CPU-only simulators.
///
/// Points are made host by host; after the last host of an epoch every host
/// ticks forward by one interval. The population grows linearly from
/// `init_hosts` to the full host list across the epochs, and points of hosts
/// that are not yet online are made but reported as not-to-be-emitted.
pub(crate) struct HostSimulation {
    hosts: Vec<Host>,
    host_index: usize,
    made_points: u64,
    max_points: u64,
    epoch: u64,
    epochs: u64,
    epoch_hosts: usize,
    init_hosts: usize,
    interval: Duration,
    rng: StdRng,
}

impl HostSimulation {
    pub(crate) fn new(population: &HostPopulation, interval: Duration, per_host: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(population.seed);

        let mut init_hosts = population.init_host_count;
        if init_hosts > population.host_count {
            warn!(
                "initial host count {} exceeds target host count {}; using {}",
                init_hosts, population.host_count, population.host_count
            );
            init_hosts = population.host_count;
        }

        let hosts: Vec<Host> = (0..population.host_count)
            .map(|i| (population.host_constructor)(i, population.start, &mut rng))
            .collect();

        let epochs = epoch_count(population.start, population.end, interval);
        let max_points = epochs * hosts.len() as u64 * per_host;

        Self {
            hosts,
            host_index: 0,
            made_points: 0,
            max_points,
            epoch: 0,
            epochs,
            epoch_hosts: init_hosts,
            init_hosts,
            interval,
            rng,
        }
    }

    pub(crate) fn finished(&self) -> bool {
        self.made_points >= self.max_points
    }

    #[cfg(test)]
    pub(crate) fn max_points(&self) -> u64 {
        self.max_points
    }

    /// True when every host has been visited in the current pass.
    pub(crate) fn pass_complete(&self) -> bool {
        self.host_index == self.hosts.len()
    }

    /// Start another pass over the host list.
    pub(crate) fn rewind(&mut self) {
        self.host_index = 0;
    }

    /// Tick every host forward and move to the next epoch.
    pub(crate) fn advance_epoch(&mut self) {
        for host in &mut self.hosts {
            host.tick_all(self.interval, &mut self.rng);
        }
        self.epoch += 1;

        let missing = (self.hosts.len() - self.init_hosts) as u64;
        self.epoch_hosts = if self.epochs <= 1 {
            self.hosts.len()
        } else {
            let grown = missing * self.epoch / (self.epochs - 1);
            (self.init_hosts + grown as usize).min(self.hosts.len())
        };
    }

    /// Fill `point` from measurement `idx` of the current host and move to
    /// the next host.
    pub(crate) fn populate_point(&mut self, point: &mut Point, idx: usize) -> bool {
        let Some(host) = self.hosts.get(self.host_index) else {
            return false;
        };
        host.populate_point(point, idx);

        let write = self.host_index < self.epoch_hosts;
        self.made_points += 1;
        self.host_index += 1;
        write
    }

    pub(crate) fn fields(&self) -> HashMap<&'static str, Vec<&'static str>> {
        self.hosts
            .first()
            .map(|host| {
                host.measurements()
                    .iter()
                    .map(|m| (m.name(), m.field_keys()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Number of whole sampling intervals between `start` and `end`.
pub fn epoch_count(start: DateTime<Utc>, end: DateTime<Utc>, interval: Duration) -> u64 {
    let window = (end - start).num_milliseconds();
    let step = interval.num_milliseconds();
    if step <= 0 || window <= 0 {
        return 0;
    }
    (window / step) as u64
}
