//! tsbench
//!
//! Deterministic workload generator for comparing time-series databases. It
//! produces the same synthetic devops metrics, and the same benchmark
//! queries, in the bulk formats of several engines.
//!
//! # Commands
//!
//! ```bash
//! # One day and six hours of devops data for 100 hosts, InfluxDB line protocol
//! tsbench generate-data --format influx --use-case devops --scale-var 100 --seed 123 > data.txt
//!
//! # Split the same stream across four processes (run with group ids 0..3)
//! tsbench generate-data --format timescaledb --use-case cpu-only --seed 123 \
//!   --interleaved-generation-group-id 2 --interleaved-generation-groups 4 > part-2.txt
//!
//! # 1000 high-CPU queries against the loaded data
//! tsbench generate-queries --format timescaledb --query-type high-cpu-1 \
//!   --scale-var 100 --queries 1000 --seed 123 > queries.jsonl
//! ```
//!
//! Diagnostics go to stderr (`RUST_LOG` controls the level); stdout carries
//! only data.
//!
//! # Crates
//!
//! - `bench_core` - Point, Query, QueryPool, TimeInterval
//! - `bench_generator` - host simulators
//! - `bench_serialize` - per-engine encoders
//! - `bench_querygen` - per-engine query generators

pub mod config;
pub mod generate_data;
pub mod generate_queries;
