//! RRULE line parser.

use std::collections::HashMap;

use super::error::{GrammarError, GrammarErrorKind, ParseResult};
use super::values::{parse_byday, parse_int_list, parse_until, parse_weekday};
use crate::rfc::recurrence::RRULE_PREFIX;
use crate::rfc::recurrence::core::{Frequency, RecurrenceRule};

/// Splits the body of an RRULE into a key → raw value map.
///
/// Keys are uppercased; a repeated key keeps its last value. Empty segments
/// (such as a trailing `;`) are skipped.
fn split_parts(body: &str) -> ParseResult<HashMap<String, &str>> {
    let mut parts = HashMap::new();

    for part in body.split(';') {
        if part.trim().is_empty() {
            continue;
        }
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| GrammarError::new(GrammarErrorKind::InvalidPart, part))?;
        parts.insert(key.trim().to_ascii_uppercase(), value.trim());
    }

    Ok(parts)
}

/// Parses a RECUR (RRULE) line.
///
/// The UNTIL form cannot be inferred from the rule text, so the caller
/// passes the owning event's all-day flag: `YYYYMMDD` for all-day events,
/// `YYYYMMDDTHHMMSS` otherwise. Unknown rule parts are ignored.
///
/// ## Errors
/// Returns an error if the prefix or FREQ is missing, if COUNT and UNTIL
/// are both present, if any known part fails to parse, or if the result
/// violates a structural invariant.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn parse_rule(text: &str, is_all_day: bool) -> ParseResult<RecurrenceRule> {
    let body = text
        .strip_prefix(RRULE_PREFIX)
        .ok_or_else(|| GrammarError::new(GrammarErrorKind::MissingPrefix, text))?;

    let mut parts = split_parts(body)?;

    let freq = parts
        .remove("FREQ")
        .ok_or_else(|| GrammarError::new(GrammarErrorKind::MissingFreq, body))?;
    let mut rule = RecurrenceRule::new(
        Frequency::parse(freq)
            .ok_or_else(|| GrammarError::new(GrammarErrorKind::InvalidFrequency, freq))?,
    );

    if parts.contains_key("COUNT") && parts.contains_key("UNTIL") {
        return Err(GrammarError::new(GrammarErrorKind::UntilCountConflict, body));
    }

    for (key, value) in parts {
        parse_rule_part(&mut rule, &key, value, is_all_day)?;
    }

    rule.validate_for(is_all_day)
        .map_err(|e| GrammarError::structural(e, body))?;

    Ok(rule)
}

/// Projects a single known rule part into the rule.
fn parse_rule_part(
    rule: &mut RecurrenceRule,
    key: &str,
    value: &str,
    is_all_day: bool,
) -> ParseResult<()> {
    match key {
        "UNTIL" => rule.until = Some(parse_until(value, is_all_day)?),
        "COUNT" => rule.count = Some(parse_unsigned(value)?),
        "INTERVAL" => rule.interval = parse_unsigned(value)?,
        "BYSECOND" => rule.by_second = Some(parse_int_list(value)?),
        "BYMINUTE" => rule.by_minute = Some(parse_int_list(value)?),
        "BYHOUR" => rule.by_hour = Some(parse_int_list(value)?),
        "BYDAY" => rule.by_day = Some(parse_byday(value)?),
        "BYMONTHDAY" => rule.by_monthday = Some(parse_int_list(value)?),
        "BYYEARDAY" => rule.by_yearday = Some(parse_int_list(value)?),
        "BYWEEKNO" => rule.by_weekno = Some(parse_int_list(value)?),
        "BYMONTH" => rule.by_month = Some(parse_int_list(value)?),
        "BYSETPOS" => rule.by_setpos = Some(parse_int_list(value)?),
        "WKST" => rule.wkst = Some(parse_weekday(value)?),
        _ => {
            tracing::debug!(key, "Ignoring unknown rule part");
        }
    }
    Ok(())
}

/// Parses a non-negative integer (COUNT, INTERVAL).
fn parse_unsigned(value: &str) -> ParseResult<u32> {
    value
        .parse()
        .map_err(|_e| GrammarError::new(GrammarErrorKind::InvalidInteger, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::recurrence::core::{StructuralError, Weekday, WeekdayNum};

    #[test]
    fn parse_rule_basic() {
        let rule = parse_rule("RRULE:FREQ=DAILY;COUNT=10", false).unwrap();
        assert_eq!(rule.freq, Frequency::Daily);
        assert_eq!(rule.count, Some(10));
        assert_eq!(rule.interval, 1);
    }

    #[test]
    fn parse_rule_defaults_interval_and_leaves_wkst_unset() {
        let rule = parse_rule("RRULE:FREQ=WEEKLY", false).unwrap();
        assert_eq!(rule, RecurrenceRule::weekly());
        assert_eq!(rule.wkst, None);
    }

    #[test]
    fn parse_rule_weekly_byday() {
        let rule = parse_rule("RRULE:FREQ=MONTHLY;BYDAY=2MO,-1FR,SU", false).unwrap();
        assert_eq!(
            rule.by_day,
            Some(vec![
                WeekdayNum::nth(2, Weekday::Monday),
                WeekdayNum::nth(-1, Weekday::Friday),
                WeekdayNum::every(Weekday::Sunday),
            ])
        );
    }

    #[test]
    fn parse_rule_requires_prefix() {
        let err = parse_rule("FREQ=DAILY", false).unwrap_err();
        assert_eq!(err.kind, GrammarErrorKind::MissingPrefix);
        assert_eq!(err.to_string(), "missing RRULE prefix: \"FREQ=DAILY\"");
    }

    #[test]
    fn parse_rule_requires_freq() {
        let err = parse_rule("RRULE:INTERVAL=2", false).unwrap_err();
        assert_eq!(err.kind, GrammarErrorKind::MissingFreq);
    }

    #[test]
    fn parse_rule_rejects_count_with_until() {
        for text in [
            "RRULE:FREQ=DAILY;COUNT=3;UNTIL=20250101T000000",
            "RRULE:FREQ=DAILY;UNTIL=20250101T000000;COUNT=3",
        ] {
            let err = parse_rule(text, false).unwrap_err();
            assert_eq!(err.kind, GrammarErrorKind::UntilCountConflict);
        }
    }

    #[test]
    fn parse_rule_until_depends_on_all_day_flag() {
        let all_day = parse_rule("RRULE:FREQ=DAILY;UNTIL=20251231", true).unwrap();
        assert_eq!(
            all_day.until.map(|u| u.to_string()),
            Some("2025-12-31 00:00:00".to_string())
        );

        let err = parse_rule("RRULE:FREQ=DAILY;UNTIL=20251231", false).unwrap_err();
        assert_eq!(err.kind, GrammarErrorKind::InvalidUntil);
    }

    #[test]
    fn parse_rule_ignores_unknown_keys() {
        let rule = parse_rule("RRULE:FREQ=YEARLY;X-NAME=foo;RSCALE=GREGORIAN", false).unwrap();
        assert_eq!(rule, RecurrenceRule::yearly());
    }

    #[test]
    fn parse_rule_lists_keep_order_and_duplicates() {
        let rule =
            parse_rule("RRULE:FREQ=MONTHLY;BYMONTHDAY=15,1,15;BYSETPOS=-1", false).unwrap();
        assert_eq!(rule.by_monthday, Some(vec![15, 1, 15]));
        assert_eq!(rule.by_setpos, Some(vec![-1]));
    }

    #[test]
    fn parse_rule_rejects_malformed_parts() {
        let cases = [
            ("RRULE:FREQ=FORTNIGHTLY", GrammarErrorKind::InvalidFrequency),
            ("RRULE:FREQ=DAILY;COUNT", GrammarErrorKind::InvalidPart),
            ("RRULE:FREQ=DAILY;COUNT=-1", GrammarErrorKind::InvalidInteger),
            ("RRULE:FREQ=DAILY;BYHOUR=", GrammarErrorKind::InvalidInteger),
            ("RRULE:FREQ=WEEKLY;BYDAY=MO,XX", GrammarErrorKind::InvalidWeekdayNum),
            ("RRULE:FREQ=WEEKLY;WKST=MONDAY", GrammarErrorKind::InvalidWeekday),
            (
                "RRULE:FREQ=DAILY;INTERVAL=0",
                GrammarErrorKind::Structural(StructuralError::ZeroInterval),
            ),
        ];
        for (text, kind) in cases {
            let err = parse_rule(text, false).unwrap_err();
            assert_eq!(err.kind, kind, "{text}");
        }
    }

    #[test]
    fn parse_rule_error_carries_fragment() {
        let err = parse_rule("RRULE:FREQ=WEEKLY;BYDAY=MO,3XX", false).unwrap_err();
        assert_eq!(err.fragment, "3XX");
    }

    #[test]
    fn parse_rule_is_lenient_about_case_and_trailing_separator() {
        let rule = parse_rule("RRULE:freq=weekly;wkst=su;", false).unwrap();
        assert_eq!(rule.freq, Frequency::Weekly);
        assert_eq!(rule.wkst, Some(Weekday::Sunday));
    }
}
