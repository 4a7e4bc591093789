//! Target database settings shared by every query generator.

/// Connection-independent settings a generator bakes into its queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database (or keyspace) the queries address.
    pub database_name: String,
    /// Seed for the generator's parameter draws (hosts, time windows).
    pub seed: u64,
}

impl DatabaseConfig {
    pub fn new(database_name: impl Into<String>, seed: u64) -> Self {
        Self {
            database_name: database_name.into(),
            seed,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("benchmark_db", 0)
    }
}
