//! Round-trip parsing and serialization tests for recurrence lines.
//!
//! Canonical lines must come back unchanged after parse then serialize, and
//! rules built in code must survive serialize then parse.

use super::fixtures::*;
use crate::rfc::recurrence::build::serialize_rule;
use crate::rfc::recurrence::core::{
    Frequency, RecurrenceRule, StructuralError, Weekday, WeekdayNum,
};
use crate::rfc::recurrence::normalize_lines;
use crate::rfc::recurrence::parse::parse_rule;
use chrono::NaiveDate;

fn rule_round_trip(rule: &RecurrenceRule, is_all_day: bool) -> Result<(), String> {
    let text = serialize_rule(rule, is_all_day);
    let parsed = parse_rule(&text, is_all_day).map_err(|e| format!("parse failed: {e}\n{text}"))?;

    if &parsed != rule {
        return Err(format!("rule mismatch for {text}: {parsed:?} vs {rule:?}"));
    }
    Ok(())
}

#[test]
fn canonical_fixtures_are_stable() {
    for (name, lines, is_all_day, tzid) in ALL_FIXTURES {
        let normalized = normalize_lines(*lines, *is_all_day, tzid)
            .unwrap_or_else(|e| panic!("{name}: normalize failed: {e}"));
        assert_eq!(normalized, *lines, "{name}");
    }
}

#[test]
fn normalize_is_idempotent() {
    let input = [
        "RRULE:FREQ=WEEKLY;BYDAY=WE,MO;X-NAME=ignored",
        "DTSTART;TZID=Asia/Tokyo:20251017T083000",
        "EXDATE:20251019T233000Z",
    ];
    let once = normalize_lines(&input, false, "Asia/Tokyo").unwrap();
    assert_eq!(
        once,
        vec![
            "DTSTART;TZID=Asia/Tokyo:20251017T083000",
            "RRULE:FREQ=WEEKLY;INTERVAL=1;BYDAY=WE,MO",
            "EXDATE;TZID=Asia/Tokyo:20251020T083000",
        ]
    );

    let twice = normalize_lines(&once, false, "Asia/Tokyo").unwrap();
    assert_eq!(once, twice);
}

#[test]
fn round_trip_every_frequency() {
    for freq in [
        Frequency::Secondly,
        Frequency::Minutely,
        Frequency::Hourly,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ] {
        rule_round_trip(&RecurrenceRule::new(freq), false).expect("round trip should succeed");
    }
}

#[test]
fn round_trip_full_timed_rule() {
    let rule = RecurrenceRule::monthly()
        .with_interval(4)
        .with_until(
            NaiveDate::from_ymd_opt(2027, 6, 30)
                .unwrap()
                .and_hms_opt(18, 45, 0)
                .unwrap(),
        )
        .with_by_second(vec![0, 30])
        .with_by_minute(vec![15])
        .with_by_hour(vec![8, 20])
        .with_by_day(vec![
            WeekdayNum::nth(1, Weekday::Monday),
            WeekdayNum::nth(-2, Weekday::Thursday),
            WeekdayNum::every(Weekday::Saturday),
        ])
        .with_by_monthday(vec![1, 15, -1])
        .with_by_setpos(vec![1, -1])
        .with_wkst(Weekday::Sunday);

    rule_round_trip(&rule, false).expect("round trip should succeed");
}

#[test]
fn round_trip_yearly_all_day_rule() {
    let rule = RecurrenceRule::yearly()
        .with_count(12)
        .with_by_yearday(vec![1, 100, -1])
        .with_by_weekno(vec![1, 53])
        .with_by_month(vec![2, 12]);

    rule_round_trip(&rule, true).expect("round trip should succeed");
}

#[test]
fn round_trip_all_day_until() {
    let rule = RecurrenceRule::weekly().with_until(
        NaiveDate::from_ymd_opt(2025, 12, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    );

    rule_round_trip(&rule, true).expect("round trip should succeed");
}

#[test]
fn all_day_until_with_time_is_not_representable() {
    let rule = RecurrenceRule::weekly().with_until(
        NaiveDate::from_ymd_opt(2025, 12, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    );

    assert_eq!(rule.validate_for(true), Err(StructuralError::UntilNotMidnight));
    assert_eq!(
        serialize_rule(&rule, true),
        "RRULE:FREQ=WEEKLY;UNTIL=20251231;INTERVAL=1"
    );
    assert!(rule_round_trip(&rule, true).is_err());
    rule_round_trip(&rule, false).expect("timed round trip should succeed");
}
