//! Timezone resolution and UTC conversion for local recurrence timestamps.

use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Error during timezone conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Non-existent time during DST gap.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),

    /// Invalid datetime format.
    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),
}

/// ## Summary
/// Resolves a timezone identifier to a `chrono_tz::Tz`.
///
/// Vendor-prefixed and Windows TZIDs are mapped to their IANA equivalents
/// before lookup.
///
/// ## Errors
///
/// Returns `ConversionError::UnknownTimezone` if the TZID cannot be resolved.
pub fn resolve_tzid(tzid: &str) -> Result<Tz, ConversionError> {
    let normalized = normalize_tzid(tzid);

    Tz::from_str(normalized).map_err(|_e| ConversionError::UnknownTimezone(tzid.to_string()))
}

/// Normalizes common calendar-client timezone identifiers to IANA names.
fn normalize_tzid(tzid: &str) -> &str {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid)
        .trim();

    // Windows timezone names (Outlook)
    match stripped {
        "Eastern Standard Time" => "America/New_York",
        "Pacific Standard Time" => "America/Los_Angeles",
        "Central Standard Time" => "America/Chicago",
        "Mountain Standard Time" => "America/Denver",
        "Tokyo Standard Time" => "Asia/Tokyo",
        "GMT Standard Time" => "Europe/London",
        "W. Europe Standard Time" => "Europe/Berlin",
        other => other,
    }
}

/// ## Summary
/// Converts a local datetime in `tz` to UTC.
///
/// Ambiguous times (DST fold) resolve to the first occurrence.
///
/// ## Errors
///
/// Returns `ConversionError::NonExistentTime` if the local time falls in a
/// DST gap.
pub fn convert_to_utc(local_time: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, ConversionError> {
    match tz.from_local_datetime(&local_time) {
        LocalResult::None => Err(ConversionError::NonExistentTime(format!(
            "{local_time} in timezone {}",
            tz.name()
        ))),
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _latest) => Ok(earliest.with_timezone(&Utc)),
    }
}

/// ## Summary
/// Converts a local datetime to UTC, shifting non-existent times forward by
/// one hour instead of failing.
///
/// ## Errors
///
/// Returns an error only if the shifted time is still non-existent.
pub fn convert_to_utc_lenient(
    local_time: NaiveDateTime,
    tz: Tz,
) -> Result<DateTime<Utc>, ConversionError> {
    match convert_to_utc(local_time, tz) {
        Err(ConversionError::NonExistentTime(_)) => {
            let shifted = local_time + chrono::Duration::hours(1);
            convert_to_utc(shifted, tz)
        }
        other => other,
    }
}
