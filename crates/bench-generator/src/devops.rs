//! Devops use case: every host reports the full measurement set.

use crate::host::{new_host, HostConstructor};
use crate::simulator::{HostPopulation, HostSimulation, Simulator, SimulatorConfig};
use bench_core::Point;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Measurements reported by each devops host per epoch.
pub const DEVOPS_MEASUREMENTS_PER_HOST: usize = 9;

/// Configuration of the devops simulator.
#[derive(Debug, Clone, Copy)]
pub struct DevopsSimulatorConfig {
    pub population: HostPopulation,
}

impl DevopsSimulatorConfig {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        init_host_count: usize,
        host_count: usize,
        seed: u64,
    ) -> Self {
        Self::with_constructor(start, end, init_host_count, host_count, new_host, seed)
    }

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
}

impl SimulatorConfig for DevopsSimulatorConfig {
    fn to_simulator(&self, interval: Duration) -> Box<dyn Simulator> {
        Box::new(DevopsSimulator::new(&self.population, interval))
    }
}

/// Emits, per epoch, measurement 0 for every host, then measurement 1 for
/// every host, and so on.
pub struct DevopsSimulator {
    sim: HostSimulation,
    measurement_index: usize,
}

impl DevopsSimulator {
    pub fn new(population: &HostPopulation, interval: Duration) -> Self {
        Self {
            sim: HostSimulation::new(population, interval, DEVOPS_MEASUREMENTS_PER_HOST as u64),
            measurement_index: 0,
        }
    }
}

impl Simulator for DevopsSimulator {
    fn finished(&self) -> bool {
        self.sim.finished()
    }

    fn next(&mut self, point: &mut Point) -> bool {
        if self.sim.pass_complete() {
            self.sim.rewind();
            self.measurement_index += 1;
            if self.measurement_index == DEVOPS_MEASUREMENTS_PER_HOST {
                self.measurement_index = 0;
                self.sim.advance_epoch();
            }
        }
        self.sim.populate_point(point, self.measurement_index)
    }

    fn fields(&self) -> HashMap<&'static str, Vec<&'static str>> {
        self.sim.fields()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config(hosts: usize) -> DevopsSimulatorConfig {
        DevopsSimulatorConfig::new(
            Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 30).unwrap(),
            hosts,
            hosts,
            42,
        )
    }

    #[test]
    fn test_emits_every_measurement_per_epoch() {
        let mut sim = config(2).to_simulator(Duration::seconds(10));
        let mut p = Point::new();
        let mut names = Vec::new();

        while !sim.finished() {
            assert!(sim.next(&mut p));
            names.push((p.measurement_name(), p.get_tag("hostname").unwrap().to_string()));
            p.reset();
        }

        assert_eq!(names.len(), 3 * 2 * DEVOPS_MEASUREMENTS_PER_HOST);
        assert_eq!(names[0], ("cpu", "host_0".to_string()));
        assert_eq!(names[1], ("cpu", "host_1".to_string()));
        assert_eq!(names[2], ("diskio", "host_0".to_string()));
        assert_eq!(names[17], ("redis", "host_1".to_string()));
        assert_eq!(names[18], ("cpu", "host_0".to_string()));
    }

    #[test]
    fn test_timestamps_advance_per_epoch() {
        let mut sim = config(1).to_simulator(Duration::seconds(10));
        let mut p = Point::new();
        let mut stamps = Vec::new();

        while !sim.finished() {
            sim.next(&mut p);
            stamps.push(p.timestamp());
            p.reset();
        }

        let start = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(stamps[0], start);
        assert_eq!(stamps[DEVOPS_MEASUREMENTS_PER_HOST - 1], start);
        assert_eq!(stamps[DEVOPS_MEASUREMENTS_PER_HOST], start + Duration::seconds(10));
    }

    #[test]
    fn test_fields_cover_all_measurements() {
        let sim = config(1).to_simulator(Duration::seconds(10));
        let fields = sim.fields();
        assert_eq!(fields.len(), DEVOPS_MEASUREMENTS_PER_HOST);
        assert_eq!(fields["cpu"].len(), 10);
        assert_eq!(fields["cpu"][0], "usage_user");
        assert!(fields.contains_key("postgresl"));
    }
}
