use bench_querygen::QueryGenError;
use bench_serialize::ParseFormatError;
use thiserror::Error;

/// Startup configuration failures. All are reported before any output.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("incorrect interleaved groups configuration: total groups = 0")]
    ZeroGroups,

    #[error("incorrect interleaved groups configuration: id {group_id} >= total groups {total_groups}")]
    GroupIdOutOfRange { group_id: u32, total_groups: u32 },

    #[error(transparent)]
    Format(#[from] ParseFormatError),

    #[error("unknown use case: '{0}'")]
    UnknownUseCase(String),

    #[error("invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid duration: '{0}'")]
    InvalidDuration(String),

    #[error(transparent)]
    QueryGen(#[from] QueryGenError),
}
