//! CPU-only use cases: one CPU measurement per host per epoch.

use crate::host::{new_host_cpu_only, new_host_cpu_single, HostConstructor};
use crate::simulator::{HostPopulation, HostSimulation, Simulator, SimulatorConfig};
use bench_core::Point;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Configuration shared by the `cpu-only` and `cpu-single` use cases; they
/// differ only in the host constructor.
#[derive(Debug, Clone, Copy)]
pub struct CpuOnlySimulatorConfig {
    pub population: HostPopulation,
}

impl CpuOnlySimulatorConfig {
    pub fn with_constructor(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        init_host_count: usize,
        host_count: usize,
        host_constructor: HostConstructor,
        seed: u64,
    ) -> Self {
        Self {
            population: HostPopulation {
                start,
                end,
                init_host_count,
                host_count,
                host_constructor,
                seed,
            },
        }
    }

    /// Hosts reporting all ten CPU usage fields.
    pub fn cpu_only(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        init_host_count: usize,
        host_count: usize,
        seed: u64,
    ) -> Self {
        Self::with_constructor(start, end, init_host_count, host_count, new_host_cpu_only, seed)
    }

    /// Hosts reporting only `usage_user`.
    pub fn cpu_single(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        init_host_count: usize,
        host_count: usize,
        seed: u64,
    ) -> Self {
        Self::with_constructor(
            start,
            end,
            init_host_count,
            host_count,
            new_host_cpu_single,
            seed,
        )
    }
}

impl SimulatorConfig for CpuOnlySimulatorConfig {
    fn to_simulator(&self, interval: Duration) -> Box<dyn Simulator> {
        Box::new(CpuOnlySimulator::new(&self.population, interval))
    }
}

pub struct CpuOnlySimulator {
    sim: HostSimulation,
}

impl CpuOnlySimulator {
    pub fn new(population: &HostPopulation, interval: Duration) -> Self {
        Self {
            sim: HostSimulation::new(population, interval, 1),
        }
    }
}

impl Simulator for CpuOnlySimulator {
    fn finished(&self) -> bool {
        self.sim.finished()
    }

    fn next(&mut self, point: &mut Point) -> bool {
        if self.sim.pass_complete() {
            self.sim.rewind();
            self.sim.advance_epoch();
        }
        self.sim.populate_point(point, 0)
    }

    fn fields(&self) -> HashMap<&'static str, Vec<&'static str>> {
        self.sim.fields()
    }
}
