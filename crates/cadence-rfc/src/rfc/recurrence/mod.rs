//! Recurrence rules and their exception/addition date lists.
//!
//! - `core`: Rule model (`RecurrenceRule`, `Recurrence`) and invariants
//! - `parse`: Text to model (RRULE, RDATE/EXDATE, DTSTART lines)
//! - `build`: Model to text, in a fixed line and field order
//! - `export`: Reduction to the subset safe for UTC-reinterpreting providers
//! - `timezone`: TZID resolution and local to UTC conversion
//!
//! ## Example
//!
//! ```rust
//! use cadence_rfc::rfc::recurrence::{build, export, parse};
//!
//! let rule = parse::parse_rule("RRULE:FREQ=MONTHLY;BYDAY=2MO,-1FR", false).unwrap();
//! assert_eq!(
//!     build::serialize_rule(&rule, false),
//!     "RRULE:FREQ=MONTHLY;INTERVAL=1;BYDAY=2MO,-1FR"
//! );
//!
//! let exported = export::sanitize_rrule("RRULE:FREQ=WEEKLY;BYDAY=MO,WE;BYHOUR=9").unwrap();
//! assert_eq!(exported, "RRULE:FREQ=WEEKLY;INTERVAL=1");
//! ```

pub mod build;
pub mod core;
pub mod export;
pub mod parse;
pub mod timezone;

#[cfg(test)]
mod tests;

use crate::error::RfcResult;

pub use build::{serialize, serialize_rule};
pub use self::core::{Frequency, Recurrence, RecurrenceRule, Weekday, WeekdayNum};
pub use export::{sanitize_date_rule, sanitize_recurrence_lines, sanitize_rrule};
pub use parse::{GrammarError, ParseResult, parse_date_list, parse_recurrence, parse_rule};

pub const RRULE: &str = "RRULE";
pub const RRULE_PREFIX: &str = const_str::concat!(RRULE, ":");
pub const DTSTART: &str = "DTSTART";

/// `YYYYMMDD`
pub const DATE_FORMAT: &str = "%Y%m%d";
/// `YYYYMMDDTHHMMSS`
pub const LOCAL_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";
/// `YYYYMMDDTHHMMSSZ`
pub const UTC_DATETIME_FORMAT: &str = const_str::concat!(LOCAL_DATETIME_FORMAT, "Z");

/// ## Summary
/// Parses stored recurrence lines (DTSTART included) and re-emits them in
/// canonical form for the given zone.
///
/// Returns an empty list when `lines` is empty.
///
/// ## Errors
/// Returns an error if `tzid` is unknown, if no DTSTART line is present,
/// or if any recurrence line fails to parse.
#[tracing::instrument(skip(lines), fields(count = lines.len()))]
pub fn normalize_lines<S: AsRef<str>>(
    lines: &[S],
    is_all_day: bool,
    tzid: &str,
) -> RfcResult<Vec<String>> {
    let tz = timezone::resolve_tzid(tzid)?;

    let Some(recurrence) = parse_recurrence(lines, is_all_day)? else {
        return Ok(Vec::new());
    };

    let dtstart_line = lines
        .iter()
        .map(|line| line.as_ref().trim())
        .find(|line| line.starts_with(DTSTART))
        .ok_or_else(|| GrammarError::new(parse::GrammarErrorKind::MissingStart, ""))?;
    let dtstart = parse::parse_dtstart(dtstart_line, is_all_day)?;

    Ok(serialize(Some(&recurrence), &dtstart, is_all_day, tz))
}
