//! Simulated hosts and their identifying tags.

use crate::measurements::{cpu, services, system, Measurement};
use bench_core::Point;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Tag keys every host point carries, in emission order.
///
/// Schema-requiring formats write this list in their preamble, so the order
/// never depends on the run.
pub const MACHINE_TAG_KEYS: [&str; 10] = [
    "hostname",
    "region",
    "datacenter",
    "rack",
    "os",
    "arch",
    "team",
    "service",
    "service_version",
    "service_environment",
];

/// Cloud regions and the datacenters inside each.
const REGIONS: [(&str, &[&str]); 9] = [
    (
        "us-east-1",
        &["us-east-1a", "us-east-1b", "us-east-1c", "us-east-1e"],
    ),
    ("us-west-1", &["us-west-1a", "us-west-1b"]),
    ("us-west-2", &["us-west-2a", "us-west-2b", "us-west-2c"]),
    ("eu-west-1", &["eu-west-1a", "eu-west-1b", "eu-west-1c"]),
    ("eu-central-1", &["eu-central-1a", "eu-central-1b"]),
    ("ap-southeast-1", &["ap-southeast-1a", "ap-southeast-1b"]),
    ("ap-southeast-2", &["ap-southeast-2a", "ap-southeast-2b"]),
    ("ap-northeast-1", &["ap-northeast-1a", "ap-northeast-1c"]),
    ("sa-east-1", &["sa-east-1a", "sa-east-1b", "sa-east-1c"]),
];

const OS_CHOICES: [&str; 3] = ["Ubuntu16.10", "Ubuntu16.04LTS", "Ubuntu15.10"];
const ARCH_CHOICES: [&str; 2] = ["x64", "x86"];
const TEAM_CHOICES: [&str; 4] = ["SF", "NYC", "LON", "CHI"];
const SERVICE_ENVIRONMENTS: [&str; 3] = ["production", "staging", "test"];

/// Builds host number `index` whose measurements start at `start`.
pub type HostConstructor = fn(usize, DateTime<Utc>, &mut StdRng) -> Host;

/// One simulated machine.
#[derive(Debug, Clone)]
pub struct Host {
    tag_values: [String; 10],
    measurements: Vec<Measurement>,
}

fn pick<'a, R: Rng + ?Sized>(choices: &[&'a str], rng: &mut R) -> &'a str {
    choices.choose(rng).copied().unwrap_or("")
}

impl Host {
    /// Create a host with randomly drawn tags and the given measurements.
    pub fn with_measurements<R: Rng + ?Sized>(
        index: usize,
        rng: &mut R,
        measurements: Vec<Measurement>,
    ) -> Self {
        let (region, datacenters) = REGIONS[rng.gen_range(0..REGIONS.len())];
        let tag_values = [
            format!("host_{index}"),
            region.to_string(),
            pick(datacenters, rng).to_string(),
            rng.gen_range(0..100u32).to_string(),
            pick(&OS_CHOICES, rng).to_string(),
            pick(&ARCH_CHOICES, rng).to_string(),
            pick(&TEAM_CHOICES, rng).to_string(),
            rng.gen_range(0..20u32).to_string(),
            rng.gen_range(0..2u32).to_string(),
            pick(&SERVICE_ENVIRONMENTS, rng).to_string(),
        ];
        Self {
            tag_values,
            measurements,
        }
    }

    pub fn name(&self) -> &str {
        &self.tag_values[0]
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Advance every measurement by `d`.
    pub fn tick_all<R: Rng + ?Sized>(&mut self, d: Duration, rng: &mut R) {
        for m in &mut self.measurements {
            m.tick(d, rng);
        }
    }

    /// Fill `point` with this host's tags followed by measurement `idx`.
    pub fn populate_point(&self, point: &mut Point, idx: usize) {
        for (key, value) in MACHINE_TAG_KEYS.iter().copied().zip(self.tag_values.iter()) {
            point.append_tag(key, value.as_str());
        }
        if let Some(m) = self.measurements.get(idx) {
            m.to_point(point);
        }
    }
}

/// Host with the full devops measurement set.
pub fn new_host(index: usize, start: DateTime<Utc>, rng: &mut StdRng) -> Host {
    let measurements = vec![
        cpu::cpu(start, rng),
        system::diskio(start),
        system::disk(start, rng),
        system::kernel(start, rng),
        system::mem(start, rng),
        system::net(start),
        services::nginx(start),
        services::postgresql(start),
        services::redis(start, rng),
    ];
    Host::with_measurements(index, rng, measurements)
}

/// Host emitting only the ten-field CPU measurement.
pub fn new_host_cpu_only(index: usize, start: DateTime<Utc>, rng: &mut StdRng) -> Host {
    let measurements = vec![cpu::cpu(start, rng)];
    Host::with_measurements(index, rng, measurements)
}

/// Host emitting only `cpu.usage_user`.
pub fn new_host_cpu_single(index: usize, start: DateTime<Utc>, rng: &mut StdRng) -> Host {
    let measurements = vec![cpu::cpu_single(start, rng)];
    Host::with_measurements(index, rng, measurements)
}
