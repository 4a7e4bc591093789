//! Flag parsing helpers shared by the subcommands.

mod duration;
mod error;

pub use duration::parse_interval;
pub use error::ConfigError;

use chrono::{DateTime, Utc};

/// Parse an RFC 3339 timestamp and normalise it to UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ConfigError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| ConfigError::Timestamp {
            value: s.to_string(),
            source,
        })
}

/// Resolve the `--seed` flag: zero asks for a seed derived from the clock.
pub fn resolve_seed(seed: i64) -> u64 {
    if seed == 0 {
        u64::from(Utc::now().timestamp_subsec_nanos())
    } else {
        seed as u64
    }
}
