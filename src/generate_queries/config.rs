//! Validated configuration for `generate-queries`.

use super::args::GenerateQueriesArgs;
use crate::config::{parse_timestamp, resolve_seed, ConfigError};
use bench_querygen::{check_use_case, factory_for, DatabaseConfig, QueryGeneratorFactory};
use bench_serialize::Format;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct GenerateQueriesConfig {
    pub format: Format,
    pub query_type: String,
    pub scale: usize,
    pub queries: u64,
    pub database: DatabaseConfig,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl GenerateQueriesConfig {
    pub fn from_args(args: &GenerateQueriesArgs) -> Result<Self, ConfigError> {
        let format: Format = args.format.parse()?;
        // a typo fails here, before any output
        check_use_case(&args.query_type)?;

        Ok(Self {
            format,
            query_type: args.query_type.clone(),
            scale: args.scale_var as usize,
            queries: args.queries,
            database: DatabaseConfig::new(args.db_name.clone(), resolve_seed(args.seed)),
            start: parse_timestamp(&args.timestamp_start)?,
            end: parse_timestamp(&args.timestamp_end)?,
        })
    }

    pub fn factory(&self) -> Result<QueryGeneratorFactory, ConfigError> {
        Ok(factory_for(&self.query_type, self.format)?)
    }
}
