//! Value parsers for recurrence rule parts and date tokens.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::error::{GrammarError, GrammarErrorKind, ParseResult};
use crate::rfc::recurrence::core::{Weekday, WeekdayNum};
use crate::rfc::recurrence::timezone::convert_to_utc_lenient;

/// Parses a fixed-width run of ASCII digits.
fn parse_digits(s: &str, kind: &GrammarErrorKind, token: &str) -> ParseResult<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GrammarError::new(kind.clone(), token));
    }
    s.parse()
        .map_err(|_e| GrammarError::new(kind.clone(), token))
}

/// Parses a DATE token.
///
/// Format: YYYYMMDD (e.g., "20251013")
///
/// ## Errors
/// Returns an error if the token is not an 8-digit calendar date.
pub fn parse_date(s: &str) -> ParseResult<NaiveDate> {
    let kind = GrammarErrorKind::InvalidDate;
    if s.len() != 8 || !s.is_ascii() {
        return Err(GrammarError::new(kind, s));
    }

    let year = parse_digits(&s[0..4], &kind, s)?;
    let month = parse_digits(&s[4..6], &kind, s)?;
    let day = parse_digits(&s[6..8], &kind, s)?;

    let year = i32::try_from(year).map_err(|_e| GrammarError::new(kind.clone(), s))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| GrammarError::new(kind, s))
}

/// Parses a local DATE-TIME token without a zone designator.
///
/// Format: YYYYMMDD"T"HHMMSS (e.g., "20251013T173000")
///
/// ## Errors
/// Returns an error if the token does not have exactly that shape or names
/// an impossible date or time.
pub fn parse_local_datetime(s: &str) -> ParseResult<NaiveDateTime> {
    let kind = GrammarErrorKind::InvalidDateTime;
    if s.len() != 15 || !s.is_ascii() || &s[8..9] != "T" {
        return Err(GrammarError::new(kind, s));
    }

    let date = parse_date(&s[0..8]).map_err(|_e| GrammarError::new(kind.clone(), s))?;
    let hour = parse_digits(&s[9..11], &kind, s)?;
    let minute = parse_digits(&s[11..13], &kind, s)?;
    let second = parse_digits(&s[13..15], &kind, s)?;

    let time =
        NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| GrammarError::new(kind, s))?;

    Ok(NaiveDateTime::new(date, time))
}

/// Parses a timed RDATE/EXDATE/DTSTART token into an absolute instant.
///
/// `YYYYMMDDTHHMMSSZ` is UTC; `YYYYMMDDTHHMMSS` is local time in `tz`, or
/// UTC when no zone is given. Local times inside a DST gap move forward one
/// hour; ambiguous ones take the earlier instant.
///
/// ## Errors
/// Returns an error if the token is malformed.
pub fn parse_instant(token: &str, tz: Option<Tz>) -> ParseResult<DateTime<Utc>> {
    if let Some(utc) = token.strip_suffix('Z') {
        let local = parse_local_datetime(utc)
            .map_err(|_e| GrammarError::new(GrammarErrorKind::InvalidDateTime, token))?;
        return Ok(Utc.from_utc_datetime(&local));
    }

    let local = parse_local_datetime(token)?;
    match tz {
        Some(tz) => {
            convert_to_utc_lenient(local, tz).map_err(|e| GrammarError::conversion(e, token))
        }
        None => Ok(Utc.from_utc_datetime(&local)),
    }
}

/// Parses an all-day token into midnight UTC of that date.
///
/// ## Errors
/// Returns an error if the token is not `YYYYMMDD`.
pub fn parse_all_day_instant(token: &str) -> ParseResult<DateTime<Utc>> {
    let date = parse_date(token)?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Parses an UNTIL value in the form dictated by the event's all-day flag.
///
/// ## Errors
/// Returns an error if the value does not match that form.
pub fn parse_until(value: &str, is_all_day: bool) -> ParseResult<NaiveDateTime> {
    let parsed = if is_all_day {
        parse_date(value).map(|date| date.and_time(NaiveTime::MIN))
    } else {
        parse_local_datetime(value)
    };
    parsed.map_err(|_e| GrammarError::new(GrammarErrorKind::InvalidUntil, value))
}

/// Parses a comma-separated list of integers, keeping order and duplicates.
///
/// ## Errors
/// Returns an error naming the first item that is not an integer.
pub fn parse_int_list(s: &str) -> ParseResult<Vec<i32>> {
    s.split(',')
        .map(|v| {
            let v = v.trim();
            v.parse()
                .map_err(|_e| GrammarError::new(GrammarErrorKind::InvalidInteger, v))
        })
        .collect()
}

/// Parses a BYDAY value (weekdays with optional ordinals).
///
/// ## Errors
/// Returns an error naming the first malformed entry.
pub fn parse_byday(s: &str) -> ParseResult<Vec<WeekdayNum>> {
    s.split(',').map(|v| parse_weekday_num(v.trim())).collect()
}

/// Parses a single weekday with optional ordinal (e.g., "MO", "2MO", "-1FR").
fn parse_weekday_num(s: &str) -> ParseResult<WeekdayNum> {
    let invalid = || GrammarError::new(GrammarErrorKind::InvalidWeekdayNum, s);

    // The last two characters are the weekday
    let split = s.len().checked_sub(2).ok_or_else(invalid)?;
    if !s.is_char_boundary(split) {
        return Err(invalid());
    }
    let (ordinal_str, weekday_str) = s.split_at(split);

    let weekday = Weekday::parse(weekday_str).ok_or_else(invalid)?;

    let ordinal = if ordinal_str.is_empty() {
        0
    } else {
        let digits = ordinal_str
            .strip_prefix(['+', '-'])
            .unwrap_or(ordinal_str);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        ordinal_str.parse().map_err(|_e| invalid())?
    };

    Ok(WeekdayNum { ordinal, weekday })
}

/// Parses a single weekday code (WKST).
///
/// ## Errors
/// Returns an error if the value is not a two-letter weekday code.
pub fn parse_weekday(s: &str) -> ParseResult<Weekday> {
    Weekday::parse(s.trim())
        .ok_or_else(|| GrammarError::new(GrammarErrorKind::InvalidWeekday, s))
}
