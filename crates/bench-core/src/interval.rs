//! Half-open time intervals used by query generation.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;
use thiserror::Error;

/// Errors produced when building or sub-dividing an interval.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// End does not come after start.
    #[error("interval end {end} is not after start {start}")]
    Inverted { start: String, end: String },

    /// The requested window does not fit inside the interval.
    #[error("window of {window_secs}s does not fit in interval of {interval_secs}s")]
    WindowTooLarge { window_secs: i64, interval_secs: i64 },
}

/// Time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, IntervalError> {
        if end <= start {
            return Err(IntervalError::Inverted {
                start: format_rfc3339(start),
                end: format_rfc3339(end),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Start formatted as RFC 3339 with a `Z` suffix.
    pub fn start_string(&self) -> String {
        format_rfc3339(self.start)
    }

    /// End formatted as RFC 3339 with a `Z` suffix.
    pub fn end_string(&self) -> String {
        format_rfc3339(self.end)
    }

    pub fn start_unix_nanos(&self) -> i64 {
        nanos(self.start)
    }

    pub fn end_unix_nanos(&self) -> i64 {
        nanos(self.end)
    }

    pub fn start_unix_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_unix_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    /// Pick a random sub-interval of length `window` that lies fully inside
    /// this interval.
    ///
    /// The window start is drawn uniformly from `[start, end - window)` with
    /// nanosecond resolution.
    pub fn rand_window<R: Rng>(
        &self,
        window: Duration,
        rng: &mut R,
    ) -> Result<TimeInterval, IntervalError> {
        let lower = self.start_unix_nanos();
        let upper = nanos(self.end - window);
        if upper <= lower {
            return Err(IntervalError::WindowTooLarge {
                window_secs: window.num_seconds(),
                interval_secs: self.duration().num_seconds(),
            });
        }

        let offset = rng.gen_range(0..upper - lower);
        let start = DateTime::from_timestamp_nanos(lower + offset);
        Ok(TimeInterval {
            start,
            end: start + window,
        })
    }
}

fn nanos(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_nanos_opt()
        .unwrap_or_else(|| ts.timestamp().saturating_mul(1_000_000_000))
}

fn format_rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
