use bench_core::IntervalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryGenError {
    #[error("unknown query type: '{0}' (valid choices: {choices})", choices = crate::USE_CASES.join(", "))]
    UnknownUseCase(String),

    #[error("number of hosts ({requested}) cannot be greater than scale ({scale})")]
    TooManyHosts { requested: usize, scale: usize },

    #[error("invalid time range: {0}")]
    Interval(#[from] IntervalError),

    #[error("could not render query text")]
    Render(#[from] std::fmt::Error),
}
