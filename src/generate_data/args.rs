//! CLI argument definitions for `generate-data`.

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Clone, Debug)]
pub struct GenerateDataArgs {
    /// Format to emit (choices: cassandra, influx, mongo, timescaledb)
    #[arg(long, default_value = "")]
    pub format: String,

    /// Use case to model (choices: devops, cpu-only, cpu-single)
    #[arg(long, default_value = "")]
    pub use_case: String,

    /// Initial number of hosts; 0 means use --scale-var
    #[arg(long, default_value = "0")]
    pub initial_scale_var: u64,

    /// Number of hosts at the end of the run
    #[arg(long, default_value = "1")]
    pub scale_var: u64,

    /// Beginning timestamp (RFC 3339)
    #[arg(long, default_value = "2016-01-01T00:00:00Z")]
    pub timestamp_start: String,

    /// Ending timestamp (RFC 3339)
    #[arg(long, default_value = "2016-01-02T06:00:00Z")]
    pub timestamp_end: String,

    /// PRNG seed (0 uses the current time)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub seed: i64,

    /// Duration between host data points (e.g. 10s, 1m)
    #[arg(long, default_value = "10s")]
    pub log_interval: String,

    /// Group (0-indexed) whose round-robin share this process writes
    #[arg(long, default_value = "0")]
    pub interleaved_generation_group_id: u32,

    /// Number of round-robin groups the stream is split into
    #[arg(long, default_value = "1")]
    pub interleaved_generation_groups: u32,

    /// File to which to write a memory profile
    #[arg(long)]
    pub profile_file: Option<PathBuf>,
}

impl Default for GenerateDataArgs {
    fn default() -> Self {
        Self {
            format: String::new(),
            use_case: String::new(),
            initial_scale_var: 0,
            scale_var: 1,
            timestamp_start: "2016-01-01T00:00:00Z".to_string(),
            timestamp_end: "2016-01-02T06:00:00Z".to_string(),
            seed: 0,
            log_interval: "10s".to_string(),
            interleaved_generation_group_id: 0,
            interleaved_generation_groups: 1,
            profile_file: None,
        }
    }
}
