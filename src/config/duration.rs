//! Duration parsing for `--log-interval`.

use super::ConfigError;
use chrono::Duration;

/// Parse a duration string like "10s", "500ms", "5m", "1h" or "300".
/// Supports:
/// - Plain numbers (interpreted as seconds): "300"
/// - Milliseconds suffix: "500ms"
/// - Seconds suffix: "10s"
/// - Minutes suffix: "5m"
/// - Hours suffix: "1h"
///
/// The result must be strictly positive.
pub fn parse_interval(s: &str) -> Result<Duration, ConfigError> {
    let trimmed = s.trim();
    let invalid = || ConfigError::InvalidDuration(s.to_string());

    let (num_str, unit): (&str, fn(i64) -> Option<Duration>) =
        if let Some(n) = trimmed.strip_suffix("ms") {
            (n, Duration::try_milliseconds)
        } else if let Some(n) = trimmed.strip_suffix('h') {
            (n, Duration::try_hours)
        } else if let Some(n) = trimmed.strip_suffix('m') {
            (n, Duration::try_minutes)
        } else if let Some(n) = trimmed.strip_suffix('s') {
            (n, Duration::try_seconds)
        } else {
            (trimmed, Duration::try_seconds)
        };

    let value: i64 = num_str.parse().map_err(|_| invalid())?;
    if value <= 0 {
        return Err(invalid());
    }
    unit(value).ok_or_else(invalid)
}
