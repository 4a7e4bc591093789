//! Validated configuration for `generate-data`.

use super::args::GenerateDataArgs;
use crate::config::{parse_interval, parse_timestamp, resolve_seed, ConfigError};
use bench_generator::{CpuOnlySimulatorConfig, DevopsSimulatorConfig, SimulatorConfig};
use bench_serialize::Format;
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which host model to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCase {
    Devops,
    CpuOnly,
    CpuSingle,
}

impl UseCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::Devops => "devops",
            UseCase::CpuOnly => "cpu-only",
            UseCase::CpuSingle => "cpu-single",
        }
    }
}

impl FromStr for UseCase {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devops" => Ok(UseCase::Devops),
            "cpu-only" => Ok(UseCase::CpuOnly),
            "cpu-single" => Ok(UseCase::CpuSingle),
            other => Err(ConfigError::UnknownUseCase(other.to_string())),
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check the interleaved-generation group settings.
pub fn validate_groups(group_id: u32, total_groups: u32) -> Result<(), ConfigError> {
    if total_groups == 0 {
        return Err(ConfigError::ZeroGroups);
    }
    if group_id >= total_groups {
        return Err(ConfigError::GroupIdOutOfRange {
            group_id,
            total_groups,
        });
    }
    Ok(())
}

/// Immutable run configuration built once from the command line.
#[derive(Debug, Clone)]
pub struct GenerateDataConfig {
    pub format: Format,
    pub use_case: UseCase,
    pub init_scale: usize,
    pub scale: usize,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub seed: u64,
    pub interval: Duration,
    pub group_id: u32,
    pub total_groups: u32,
    pub profile_file: Option<PathBuf>,
}

impl GenerateDataConfig {
    /// Validate the arguments. Groups are checked first, then the format,
    /// then everything else.
    pub fn from_args(args: &GenerateDataArgs) -> Result<Self, ConfigError> {
        validate_groups(
            args.interleaved_generation_group_id,
            args.interleaved_generation_groups,
        )?;
        let format: Format = args.format.parse()?;
        let use_case: UseCase = args.use_case.parse()?;

        let scale = args.scale_var as usize;
        let init_scale = match args.initial_scale_var {
            0 => scale,
            n => n as usize,
        };

        Ok(Self {
            format,
            use_case,
            init_scale,
            scale,
            start: parse_timestamp(&args.timestamp_start)?,
            end: parse_timestamp(&args.timestamp_end)?,
            seed: resolve_seed(args.seed),
            interval: parse_interval(&args.log_interval)?,
            group_id: args.interleaved_generation_group_id,
            total_groups: args.interleaved_generation_groups,
            profile_file: args.profile_file.clone(),
        })
    }

    pub fn simulator_config(&self) -> Box<dyn SimulatorConfig> {
        match self.use_case {
            UseCase::Devops => Box::new(DevopsSimulatorConfig::new(
                self.start,
                self.end,
                self.init_scale,
                self.scale,
                self.seed,
            )),
            UseCase::CpuOnly => Box::new(CpuOnlySimulatorConfig::cpu_only(
                self.start,
                self.end,
                self.init_scale,
                self.scale,
                self.seed,
            )),
            UseCase::CpuSingle => Box::new(CpuOnlySimulatorConfig::cpu_single(
                self.start,
                self.end,
                self.init_scale,
                self.scale,
                self.seed,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args(format: &str, use_case: &str) -> GenerateDataArgs {
        GenerateDataArgs {
            format: format.to_string(),
            use_case: use_case.to_string(),
            seed: 42,
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_groups_boundaries() {
        assert_eq!(
            validate_groups(0, 0).unwrap_err().to_string(),
            "incorrect interleaved groups configuration: total groups = 0"
        );
        assert_eq!(
            validate_groups(3, 3).unwrap_err().to_string(),
            "incorrect interleaved groups configuration: id 3 >= total groups 3"
        );
        assert!(validate_groups(2, 3).is_ok());
        assert!(validate_groups(0, 1).is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = GenerateDataConfig::from_args(&args("influx", "devops")).unwrap();
        assert_eq!(config.format, Format::Influx);
        assert_eq!(config.use_case, UseCase::Devops);
        assert_eq!(config.scale, 1);
        assert_eq!(config.init_scale, 1);
        assert_eq!(config.seed, 42);
        assert_eq!(config.interval, Duration::seconds(10));
        assert_eq!(config.start, Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(config.end, Utc.with_ymd_and_hms(2016, 1, 2, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_initial_scale_zero_uses_scale() {
        let mut a = args("influx", "cpu-only");
        a.scale_var = 100;
        assert_eq!(GenerateDataConfig::from_args(&a).unwrap().init_scale, 100);
        a.initial_scale_var = 10;
        assert_eq!(GenerateDataConfig::from_args(&a).unwrap().init_scale, 10);
    }

    #[test]
    fn test_group_errors_take_precedence() {
        let mut a = args("bogus", "devops");
        a.interleaved_generation_groups = 0;
        assert!(matches!(
            GenerateDataConfig::from_args(&a),
            Err(ConfigError::ZeroGroups)
        ));
    }

    #[test]
    fn test_unknown_format_and_use_case() {
        let err = GenerateDataConfig::from_args(&args("csv", "devops")).unwrap_err();
        assert!(err.to_string().starts_with("invalid format specifier: csv"));

        let err = GenerateDataConfig::from_args(&args("influx", "iot")).unwrap_err();
        assert_eq!(err.to_string(), "unknown use case: 'iot'");
    }

    #[test]
    fn test_bad_timestamp() {
        let mut a = args("influx", "devops");
        a.timestamp_end = "2016-13-01".to_string();
        assert!(matches!(
            GenerateDataConfig::from_args(&a),
            Err(ConfigError::Timestamp { .. })
        ));
    }
}
