//! RDATE / EXDATE / DTSTART line parsers and recurrence assembly.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::error::{GrammarError, GrammarErrorKind, ParseResult};
use super::rule::parse_rule;
use super::values::{parse_all_day_instant, parse_instant};
use crate::rfc::recurrence::core::{DateListKind, Recurrence, RecurrenceRule};
use crate::rfc::recurrence::timezone::resolve_tzid;
use crate::rfc::recurrence::{DTSTART, RRULE_PREFIX};

/// A `NAME;PARAM=value:tokens` line split into its pieces.
struct DateLine<'a> {
    name: &'a str,
    tzid: Option<&'a str>,
    value: &'a str,
}

/// Splits a date line on its first colon and extracts the TZID parameter.
fn split_date_line(line: &str) -> ParseResult<DateLine<'_>> {
    let (header, value) = line
        .split_once(':')
        .ok_or_else(|| GrammarError::new(GrammarErrorKind::MissingColon, line))?;

    let mut params = header.split(';');
    let name = params.next().unwrap_or_default().trim();
    let tzid = params.find_map(|param| param.strip_prefix("TZID="));

    Ok(DateLine { name, tzid, value })
}

/// Parses the tokens of a date line in all-day or timed form.
fn parse_tokens(line: &DateLine<'_>, is_all_day: bool) -> ParseResult<Vec<DateTime<Utc>>> {
    if is_all_day {
        return line.value.split(',').map(|t| parse_all_day_instant(t.trim())).collect();
    }

    let tz: Option<Tz> = line
        .tzid
        .map(|tzid| resolve_tzid(tzid).map_err(|e| GrammarError::conversion(e, tzid)))
        .transpose()?;

    line.value
        .split(',')
        .map(|t| parse_instant(t.trim(), tz))
        .collect()
}

/// Parses an RDATE or EXDATE line into its instants.
///
/// All-day lines carry `YYYYMMDD` tokens (any TZID is ignored) and yield
/// midnight UTC. Timed lines carry `YYYYMMDDTHHMMSSZ` tokens, or local
/// `YYYYMMDDTHHMMSS` tokens read in the TZID zone (UTC without one).
///
/// ## Errors
/// Returns an error if the line is not RDATE/EXDATE, has no colon, names an
/// unknown zone, or contains any unparseable token. No partial result is
/// returned.
#[tracing::instrument(skip(line), fields(line_len = line.len()))]
pub fn parse_date_list(line: &str, is_all_day: bool) -> ParseResult<Vec<DateTime<Utc>>> {
    parse_date_list_with_kind(line, is_all_day).map(|(_, dates)| dates)
}

/// Parses an RDATE or EXDATE line, also reporting which list it belongs to.
///
/// ## Errors
/// See [`parse_date_list`].
pub fn parse_date_list_with_kind(
    line: &str,
    is_all_day: bool,
) -> ParseResult<(DateListKind, Vec<DateTime<Utc>>)> {
    let parsed = split_date_line(line)?;
    let kind = DateListKind::parse(parsed.name)
        .ok_or_else(|| GrammarError::new(GrammarErrorKind::UnexpectedProperty, parsed.name))?;

    Ok((kind, parse_tokens(&parsed, is_all_day)?))
}

/// Parses a DTSTART line into its instant.
///
/// Accepts `DTSTART;VALUE=DATE:YYYYMMDD`, `DTSTART;TZID=zone:YYYYMMDDTHHMMSS`
/// and `DTSTART:YYYYMMDDTHHMMSSZ`.
///
/// ## Errors
/// Returns an error if the line is not DTSTART or does not hold exactly one
/// valid token.
pub fn parse_dtstart(line: &str, is_all_day: bool) -> ParseResult<DateTime<Utc>> {
    let parsed = split_date_line(line)?;
    if !parsed.name.eq_ignore_ascii_case(DTSTART) {
        return Err(GrammarError::new(
            GrammarErrorKind::UnexpectedProperty,
            parsed.name,
        ));
    }

    match parse_tokens(&parsed, is_all_day)?.as_slice() {
        [instant] => Ok(*instant),
        _ => {
            let kind = if is_all_day {
                GrammarErrorKind::InvalidDate
            } else {
                GrammarErrorKind::InvalidDateTime
            };
            Err(GrammarError::new(kind, parsed.value))
        }
    }
}

/// ## Summary
/// Assembles a recurrence from its stored text lines.
///
/// `RRULE:` lines are parsed as rules (a later one replaces an earlier
/// one); RDATE and EXDATE lines are appended to their lists in order.
/// DTSTART and any other lines are ignored.
///
/// ## Errors
/// Returns an error if any RRULE/RDATE/EXDATE line fails to parse, or if
/// the lines are non-empty but contain no RRULE.
#[tracing::instrument(skip(lines), fields(count = lines.len()))]
pub fn parse_recurrence<S: AsRef<str>>(
    lines: &[S],
    is_all_day: bool,
) -> ParseResult<Option<Recurrence>> {
    if lines.is_empty() {
        return Ok(None);
    }

    let mut rrule: Option<RecurrenceRule> = None;
    let mut rdate = Vec::new();
    let mut exdate = Vec::new();

    for line in lines {
        let line = line.as_ref().trim();
        if line.starts_with(RRULE_PREFIX) {
            rrule = Some(parse_rule(line, is_all_day)?);
        } else if line.starts_with(DateListKind::RDate.as_str())
            || line.starts_with(DateListKind::ExDate.as_str())
        {
            match parse_date_list_with_kind(line, is_all_day)? {
                (DateListKind::RDate, dates) => rdate.extend(dates),
                (DateListKind::ExDate, dates) => exdate.extend(dates),
            }
        } else {
            tracing::trace!(line, "Skipping non-recurrence line");
        }
    }

    let rrule = rrule.ok_or_else(|| GrammarError::new(GrammarErrorKind::MissingRule, ""))?;

    Recurrence::new(rrule, rdate, exdate)
        .map(Some)
        .map_err(|e| GrammarError::structural(e, ""))
}
