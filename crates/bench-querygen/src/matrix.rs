//! Use-case matrix: query type name → engine → generator factory.

use crate::devops::cassandra::CassandraDevops;
use crate::devops::influx::InfluxDevops;
use crate::devops::mongo::MongoDevops;
use crate::devops::timescaledb::TimescaleDbDevops;
use crate::devops::{high_cpu_factory, single_groupby_factory, DevopsCommon};
use crate::{QueryGenError, QueryGeneratorFactory};
use bench_serialize::Format;

/// Every supported query type.
pub const USE_CASES: [&str; 8] = [
    "high-cpu-1",
    "high-cpu-all",
    "single-groupby-1-1-1",
    "single-groupby-1-1-12",
    "single-groupby-1-8-1",
    "single-groupby-5-1-1",
    "single-groupby-5-1-12",
    "single-groupby-5-8-1",
];

enum UseCase {
    HighCpu { hosts: usize },
    SingleGroupby { metrics: usize, hosts: usize, hours: i64 },
}

fn parse_use_case(name: &str) -> Result<UseCase, QueryGenError> {
    let unknown = || QueryGenError::UnknownUseCase(name.to_string());
    if !USE_CASES.contains(&name) {
        return Err(unknown());
    }

    if let Some(hosts) = name.strip_prefix("high-cpu-") {
        let hosts = match hosts {
            "all" => 0,
            n => n.parse().map_err(|_| unknown())?,
        };
        return Ok(UseCase::HighCpu { hosts });
    }

    let params: Vec<&str> = name
        .strip_prefix("single-groupby-")
        .ok_or_else(unknown)?
        .split('-')
        .collect();
    match params.as_slice() {
        [metrics, hosts, hours] => Ok(UseCase::SingleGroupby {
            metrics: metrics.parse().map_err(|_| unknown())?,
            hosts: hosts.parse().map_err(|_| unknown())?,
            hours: hours.parse().map_err(|_| unknown())?,
        }),
        _ => Err(unknown()),
    }
}

fn factory<C: DevopsCommon + 'static>(use_case: UseCase) -> QueryGeneratorFactory {
    match use_case {
        UseCase::HighCpu { hosts } => high_cpu_factory::<C>(hosts),
        UseCase::SingleGroupby {
            metrics,
            hosts,
            hours,
        } => single_groupby_factory::<C>(metrics, hosts, hours),
    }
}

/// Check that `use_case` names a known query type without building anything.
pub fn check_use_case(use_case: &str) -> Result<(), QueryGenError> {
    parse_use_case(use_case).map(|_| ())
}

/// Look up the factory for a query type on an engine.
pub fn factory_for(use_case: &str, engine: Format) -> Result<QueryGeneratorFactory, QueryGenError> {
    let use_case = parse_use_case(use_case)?;
    Ok(match engine {
        Format::Cassandra => factory::<CassandraDevops>(use_case),
        Format::Influx => factory::<InfluxDevops>(use_case),
        Format::Mongo => factory::<MongoDevops>(use_case),
        Format::TimescaleDb => factory::<TimescaleDbDevops>(use_case),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DatabaseConfig;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_every_use_case_on_every_engine() {
        let start = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2016, 1, 2, 6, 0, 0).unwrap();
        let db = DatabaseConfig::new("benchmark", 1);

        for name in USE_CASES {
            for engine in Format::CHOICES {
                let engine: Format = engine.parse().unwrap();
                let build = factory_for(name, engine).unwrap();
                let mut generator = build(&db, start, end).unwrap();
                let q = generator.dispatch(8).unwrap();
                assert!(!q.human_label().is_empty(), "{name} on {engine}");
                assert!(q.to_json().is_ok());
            }
        }
    }

    #[test]
    fn test_unknown_use_case() {
        let err = factory_for("lastpoint", Format::Influx).err().unwrap();
        assert!(err.to_string().starts_with("unknown query type: 'lastpoint'"));
    }

    #[test]
    fn test_check_use_case() {
        for name in USE_CASES {
            assert!(check_use_case(name).is_ok(), "{name}");
        }
        assert!(matches!(
            check_use_case("single-groupby-1-1"),
            Err(QueryGenError::UnknownUseCase(_))
        ));
    }

    #[test]
    fn test_parse_single_groupby_params() {
        match parse_use_case("single-groupby-5-8-1").unwrap() {
            UseCase::SingleGroupby {
                metrics,
                hosts,
                hours,
            } => assert_eq!((metrics, hosts, hours), (5, 8, 1)),
            UseCase::HighCpu { .. } => panic!("expected single-groupby"),
        }
    }

    #[test]
    fn test_inverted_range_fails_at_construction() {
        let start = Utc.with_ymd_and_hms(2016, 1, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap();
        let build = factory_for("high-cpu-1", Format::TimescaleDb).unwrap();
        assert!(matches!(
            build(&DatabaseConfig::default(), start, end),
            Err(QueryGenError::Interval(_))
        ));
    }
}
