//! CLI argument definitions for `generate-queries`.

use clap::Args;

#[derive(Args, Clone, Debug)]
pub struct GenerateQueriesArgs {
    /// Target engine (choices: cassandra, influx, mongo, timescaledb)
    #[arg(long, default_value = "")]
    pub format: String,

    /// Query type, e.g. high-cpu-1 or single-groupby-5-8-1
    #[arg(long, default_value = "")]
    pub query_type: String,

    /// Number of hosts in the loaded data
    #[arg(long, default_value = "1")]
    pub scale_var: u64,

    /// Number of queries to generate
    #[arg(long, default_value = "1000")]
    pub queries: u64,

    /// PRNG seed (0 uses the current time)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub seed: i64,

    /// Database (or keyspace) the queries address
    #[arg(long, default_value = "benchmark_db")]
    pub db_name: String,

    /// Beginning of the loaded data (RFC 3339)
    #[arg(long, default_value = "2016-01-01T00:00:00Z")]
    pub timestamp_start: String,

    /// End of the loaded data (RFC 3339)
    #[arg(long, default_value = "2016-01-02T06:00:00Z")]
    pub timestamp_end: String,
}

impl Default for GenerateQueriesArgs {
    fn default() -> Self {
        Self {
            format: String::new(),
            query_type: String::new(),
            scale_var: 1,
            queries: 1000,
            seed: 0,
            db_name: "benchmark_db".to_string(),
            timestamp_start: "2016-01-01T00:00:00Z".to_string(),
            timestamp_end: "2016-01-02T06:00:00Z".to_string(),
        }
    }
}
