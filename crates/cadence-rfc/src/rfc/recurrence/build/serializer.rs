//! Recurrence serializer.
//!
//! Renders a recurrence back to its text lines in a fixed order.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::rfc::recurrence::core::{DateListKind, Recurrence, RecurrenceRule};
use crate::rfc::recurrence::{DATE_FORMAT, DTSTART, LOCAL_DATETIME_FORMAT, RRULE_PREFIX};

/// Joins list values with commas.
fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Appends `;KEY=v1,v2` when the list is present and non-empty.
fn push_list<T: Display>(line: &mut String, key: &str, values: Option<&Vec<T>>) {
    if let Some(values) = values.filter(|v| !v.is_empty()) {
        line.push(';');
        line.push_str(key);
        line.push('=');
        line.push_str(&join(values));
    }
}

/// Renders an instant as a UTC calendar date or as local time in `tz`.
fn format_instant(instant: &DateTime<Utc>, is_all_day: bool, tz: Tz) -> String {
    if is_all_day {
        instant.format(DATE_FORMAT).to_string()
    } else {
        instant
            .with_timezone(&tz)
            .format(LOCAL_DATETIME_FORMAT)
            .to_string()
    }
}

/// Serializes a rule to its `RRULE:` line.
///
/// Fields follow a fixed order: FREQ, UNTIL, COUNT, INTERVAL, BYSECOND,
/// BYMINUTE, BYHOUR, BYDAY, BYMONTHDAY, BYYEARDAY, BYWEEKNO, BYMONTH,
/// BYSETPOS, WKST. Absent or empty fields are omitted; INTERVAL is always
/// written.
///
/// An all-day UNTIL is written as its date only; rules passing
/// [`RecurrenceRule::validate_for`] lose nothing.
#[must_use]
pub fn serialize_rule(rule: &RecurrenceRule, is_all_day: bool) -> String {
    let mut line = format!("{RRULE_PREFIX}FREQ={}", rule.freq);

    if let Some(until) = rule.until {
        let format = if is_all_day {
            DATE_FORMAT
        } else {
            LOCAL_DATETIME_FORMAT
        };
        line.push_str(&format!(";UNTIL={}", until.format(format)));
    }

    if let Some(count) = rule.count {
        line.push_str(&format!(";COUNT={count}"));
    }

    line.push_str(&format!(";INTERVAL={}", rule.interval));

    push_list(&mut line, "BYSECOND", rule.by_second.as_ref());
    push_list(&mut line, "BYMINUTE", rule.by_minute.as_ref());
    push_list(&mut line, "BYHOUR", rule.by_hour.as_ref());
    push_list(&mut line, "BYDAY", rule.by_day.as_ref());
    push_list(&mut line, "BYMONTHDAY", rule.by_monthday.as_ref());
    push_list(&mut line, "BYYEARDAY", rule.by_yearday.as_ref());
    push_list(&mut line, "BYWEEKNO", rule.by_weekno.as_ref());
    push_list(&mut line, "BYMONTH", rule.by_month.as_ref());
    push_list(&mut line, "BYSETPOS", rule.by_setpos.as_ref());

    if let Some(wkst) = rule.wkst {
        line.push_str(&format!(";WKST={wkst}"));
    }

    line
}

/// Serializes the event start as a `DTSTART` line.
#[must_use]
pub fn serialize_dtstart(dtstart: &DateTime<Utc>, is_all_day: bool, tz: Tz) -> String {
    let value = format_instant(dtstart, is_all_day, tz);
    if is_all_day {
        format!("{DTSTART};VALUE=DATE:{value}")
    } else {
        format!("{DTSTART};TZID={}:{value}", tz.name())
    }
}

/// Serializes an RDATE or EXDATE list.
///
/// Timed instants are rendered as local time in the event's declared zone,
/// not in UTC.
#[must_use]
pub fn serialize_date_list(
    kind: DateListKind,
    dates: &[DateTime<Utc>],
    is_all_day: bool,
    tz: Tz,
) -> String {
    let values = dates
        .iter()
        .map(|d| format_instant(d, is_all_day, tz))
        .collect::<Vec<_>>()
        .join(",");

    if is_all_day {
        format!("{kind};VALUE=DATE:{values}")
    } else {
        format!("{kind};TZID={}:{values}", tz.name())
    }
}

/// ## Summary
/// Serializes a recurrence to its text lines.
///
/// Lines come in a fixed order: DTSTART, RRULE, RDATE (if any), EXDATE (if
/// any). Returns an empty list when there is no recurrence.
#[must_use]
pub fn serialize(
    recurrence: Option<&Recurrence>,
    dtstart: &DateTime<Utc>,
    is_all_day: bool,
    tz: Tz,
) -> Vec<String> {
    let Some(recurrence) = recurrence else {
        return Vec::new();
    };

    let mut lines = vec![
        serialize_dtstart(dtstart, is_all_day, tz),
        serialize_rule(&recurrence.rrule, is_all_day),
    ];

    for kind in [DateListKind::RDate, DateListKind::ExDate] {
        let dates = recurrence.dates(kind);
        if !dates.is_empty() {
            lines.push(serialize_date_list(kind, dates, is_all_day, tz));
        }
    }

    lines
}
