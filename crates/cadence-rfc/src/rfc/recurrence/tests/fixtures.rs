//! Stored recurrence line sets shared by the round-trip tests.

pub const WEEKLY_TIMED: &[&str] = &[
    "DTSTART;TZID=Asia/Tokyo:20251017T083000",
    "RRULE:FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,WE",
    "RDATE;TZID=Asia/Tokyo:20251013T173000",
    "EXDATE;TZID=Asia/Tokyo:20251020T083000",
];

pub const MONTHLY_ORDINALS: &[&str] = &[
    "DTSTART;TZID=America/New_York:20250310T090000",
    "RRULE:FREQ=MONTHLY;UNTIL=20261231T235959;INTERVAL=2;BYDAY=2MO,-1FR;BYSETPOS=1;WKST=SU",
];

pub const ALL_DAY_COUNT: &[&str] = &[
    "DTSTART;VALUE=DATE:20251013",
    "RRULE:FREQ=DAILY;COUNT=10;INTERVAL=3",
    "EXDATE;VALUE=DATE:20251016,20251019",
];

pub const YEARLY_ALL_DAY_UNTIL: &[&str] = &[
    "DTSTART;VALUE=DATE:20250101",
    "RRULE:FREQ=YEARLY;UNTIL=20301231;INTERVAL=1;BYMONTHDAY=1,-1;BYMONTH=1,6",
    "RDATE;VALUE=DATE:20250704",
];

pub const ALL_FIXTURES: &[(&str, &[&str], bool, &str)] = &[
    ("weekly_timed", WEEKLY_TIMED, false, "Asia/Tokyo"),
    ("monthly_ordinals", MONTHLY_ORDINALS, false, "America/New_York"),
    ("all_day_count", ALL_DAY_COUNT, true, "UTC"),
    ("yearly_all_day_until", YEARLY_ALL_DAY_UNTIL, true, "Europe/Berlin"),
];
