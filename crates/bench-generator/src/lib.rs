//! Deterministic devops host simulator.
//!
//! This crate produces the ordered stream of synthetic points that the
//! generation driver partitions and serializes. A simulator owns a seeded
//! RNG, so the same seed and configuration always yield the same stream.
//!
//! # Architecture
//!
//! ```text
//! SimulatorConfig ──to_simulator(interval)──▶ Box<dyn Simulator>
//!                                                │
//!                                  ┌─────────────┴─────────────┐
//!                                  │  HostSimulation           │
//!                                  │  - hosts (tags + metrics) │
//!                                  │  - rng (StdRng)           │
//!                                  │  - epoch / made points    │
//!                                  └─────────────┬─────────────┘
//!                                                ▼
//!                                     next(&mut Point) -> bool
//! ```
//!
//! # Use cases
//!
//! - `devops` - [`DevopsSimulatorConfig`], nine measurements per host
//! - `cpu-only` - [`CpuOnlySimulatorConfig::cpu_only`], ten CPU fields per host
//! - `cpu-single` - [`CpuOnlySimulatorConfig::cpu_single`], `usage_user` only
//!
//! # Example
//!
//! ```rust
//! use bench_core::Point;
//! use bench_generator::{CpuOnlySimulatorConfig, SimulatorConfig};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2016, 1, 1, 0, 1, 0).unwrap();
//! let config = CpuOnlySimulatorConfig::cpu_single(start, end, 1, 1, 42);
//! let mut sim = config.to_simulator(Duration::seconds(10));
//!
//! let mut point = Point::new();
//! let mut produced = 0;
//! while !sim.finished() {
//!     if sim.next(&mut point) {
//!         produced += 1;
//!     }
//!     point.reset();
//! }
//! assert_eq!(produced, 6);
//! ```

pub mod cpu_only;
pub mod devops;
pub mod distribution;
pub mod host;
pub mod measurements;
pub mod simulator;

// Re-exports for convenience
pub use cpu_only::{CpuOnlySimulator, CpuOnlySimulatorConfig};
pub use devops::{DevopsSimulator, DevopsSimulatorConfig};
pub use host::{Host, HostConstructor, MACHINE_TAG_KEYS};
pub use simulator::{HostPopulation, Simulator, SimulatorConfig};
