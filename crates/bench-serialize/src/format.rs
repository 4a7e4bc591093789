//! Output format selection.

use crate::error::ParseFormatError;
use crate::{
    CassandraSerializer, InfluxSerializer, MongoSerializer, PointSerializer,
    TimescaleDbSerializer,
};
use std::fmt;
use std::str::FromStr;

/// Bulk-load formats the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Cassandra,
    Influx,
    Mongo,
    TimescaleDb,
}

impl Format {
    /// Accepted names, alphabetical.
    pub const CHOICES: [&'static str; 4] = ["cassandra", "influx", "mongo", "timescaledb"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Cassandra => "cassandra",
            Format::Influx => "influx",
            Format::Mongo => "mongo",
            Format::TimescaleDb => "timescaledb",
        }
    }

    /// Whether the driver must write a schema preamble before any record.
    pub fn requires_schema_preamble(&self) -> bool {
        matches!(self, Format::TimescaleDb)
    }

    /// Encoder for this format.
    pub fn serializer(&self) -> Box<dyn PointSerializer> {
        match self {
            Format::Cassandra => Box::new(CassandraSerializer),
            Format::Influx => Box::new(InfluxSerializer),
            Format::Mongo => Box::new(MongoSerializer),
            Format::TimescaleDb => Box::new(TimescaleDbSerializer),
        }
    }
}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cassandra" => Ok(Format::Cassandra),
            "influx" => Ok(Format::Influx),
            "mongo" => Ok(Format::Mongo),
            "timescaledb" => Ok(Format::TimescaleDb),
            other => Err(ParseFormatError(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_choice() {
        for name in Format::CHOICES {
            let format: Format = name.parse().unwrap();
            assert_eq!(format.as_str(), name);
        }
    }

    #[test]
    fn test_unknown_format_message() {
        let err = "csv".parse::<Format>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid format specifier: csv (valid choices: cassandra, influx, mongo, timescaledb)"
        );
    }

    #[test]
    fn test_only_timescaledb_needs_preamble() {
        assert!(Format::TimescaleDb.requires_schema_preamble());
        assert!(!Format::Influx.requires_schema_preamble());
        assert!(!Format::Cassandra.requires_schema_preamble());
        assert!(!Format::Mongo.requires_schema_preamble());
    }
}
