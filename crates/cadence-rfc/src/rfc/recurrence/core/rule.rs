//! Recurrence rule value type (RRULE).

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::error::{StructuralError, StructuralResult};

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Self::Secondly,
            "MINUTELY" => Self::Minutely,
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week, ordered as the grammar lists them (Monday first).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    #[serde(rename = "MO")]
    Monday,
    #[serde(rename = "TU")]
    Tuesday,
    #[serde(rename = "WE")]
    Wednesday,
    #[serde(rename = "TH")]
    Thursday,
    #[serde(rename = "FR")]
    Friday,
    #[serde(rename = "SA")]
    Saturday,
    #[serde(rename = "SU")]
    Sunday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
            Self::Sunday => "SU",
        }
    }

    /// Parses a weekday from a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            "SU" => Self::Sunday,
            _ => return None,
        })
    }

    /// Returns all weekdays in grammar order (Monday through Sunday).
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekday with an occurrence number, used in the BYDAY rule part.
///
/// - `MO` - every Monday (ordinal 0)
/// - `2MO` - second Monday of the period
/// - `-1FR` - last Friday of the period
///
/// Stored as an `(ordinal, weekday)` pair, which is also its JSON shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, Weekday)", into = "(i32, Weekday)")]
pub struct WeekdayNum {
    /// Occurrence number; 0 selects every occurrence, negative counts from the end.
    pub ordinal: i32,
    /// The day of the week.
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Creates a weekday entry matching every occurrence.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: 0,
            weekday,
        }
    }

    /// Creates a weekday entry selecting the Nth occurrence.
    #[must_use]
    pub const fn nth(ordinal: i32, weekday: Weekday) -> Self {
        Self { ordinal, weekday }
    }
}

impl From<(i32, Weekday)> for WeekdayNum {
    fn from((ordinal, weekday): (i32, Weekday)) -> Self {
        Self { ordinal, weekday }
    }
}

impl From<WeekdayNum> for (i32, Weekday) {
    fn from(value: WeekdayNum) -> Self {
        (value.ordinal, value.weekday)
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ordinal != 0 {
            write!(f, "{}", self.ordinal)?;
        }
        write!(f, "{}", self.weekday)
    }
}

/// Recurrence rule.
///
/// `until` is a naive timestamp: it shares the floating or all-day semantics
/// of the owning event. For all-day events it sits at midnight.
///
/// List fields are `None` when absent; a present list is never empty on a
/// valid rule (see [`RecurrenceRule::validate`]). Deserializing runs the
/// same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecurrenceRule")]
pub struct RecurrenceRule {
    /// Recurrence frequency.
    pub freq: Frequency,

    /// Last instant of the recurrence (mutually exclusive with count).
    pub until: Option<NaiveDateTime>,

    /// Number of occurrences (mutually exclusive with until).
    pub count: Option<u32>,

    /// How often the frequency repeats (at least 1).
    pub interval: u32,

    pub by_second: Option<Vec<i32>>,
    pub by_minute: Option<Vec<i32>>,
    pub by_hour: Option<Vec<i32>>,

    /// By-day list with occurrence numbers.
    pub by_day: Option<Vec<WeekdayNum>>,

    pub by_monthday: Option<Vec<i32>>,
    pub by_yearday: Option<Vec<i32>>,
    pub by_weekno: Option<Vec<i32>>,
    pub by_month: Option<Vec<i32>>,

    /// Filters on position within the frequency period.
    pub by_setpos: Option<Vec<i32>>,

    /// Week start day. Left unset unless the source names one.
    pub wkst: Option<Weekday>,
}

/// Unchecked field-for-field shape of a stored rule.
#[derive(Deserialize)]
struct RawRecurrenceRule {
    freq: Frequency,
    until: Option<NaiveDateTime>,
    count: Option<u32>,
    #[serde(default = "default_interval")]
    interval: u32,
    by_second: Option<Vec<i32>>,
    by_minute: Option<Vec<i32>>,
    by_hour: Option<Vec<i32>>,
    by_day: Option<Vec<WeekdayNum>>,
    by_monthday: Option<Vec<i32>>,
    by_yearday: Option<Vec<i32>>,
    by_weekno: Option<Vec<i32>>,
    by_month: Option<Vec<i32>>,
    by_setpos: Option<Vec<i32>>,
    wkst: Option<Weekday>,
}

const fn default_interval() -> u32 {
    1
}

impl TryFrom<RawRecurrenceRule> for RecurrenceRule {
    type Error = StructuralError;

    fn try_from(raw: RawRecurrenceRule) -> StructuralResult<Self> {
        Self {
            freq: raw.freq,
            until: raw.until,
            count: raw.count,
            interval: raw.interval,
            by_second: raw.by_second,
            by_minute: raw.by_minute,
            by_hour: raw.by_hour,
            by_day: raw.by_day,
            by_monthday: raw.by_monthday,
            by_yearday: raw.by_yearday,
            by_weekno: raw.by_weekno,
            by_month: raw.by_month,
            by_setpos: raw.by_setpos,
            wkst: raw.wkst,
        }
        .build()
    }
}

impl RecurrenceRule {
    /// Creates a rule with the given frequency and an interval of 1.
    #[must_use]
    pub const fn new(freq: Frequency) -> Self {
        Self {
            freq,
            until: None,
            count: None,
            interval: 1,
            by_second: None,
            by_minute: None,
            by_hour: None,
            by_day: None,
            by_monthday: None,
            by_yearday: None,
            by_weekno: None,
            by_month: None,
            by_setpos: None,
            wkst: None,
        }
    }

    /// Creates a daily recurrence rule.
    #[must_use]
    pub const fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    /// Creates a weekly recurrence rule.
    #[must_use]
    pub const fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    /// Creates a monthly recurrence rule.
    #[must_use]
    pub const fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    /// Creates a yearly recurrence rule.
    #[must_use]
    pub const fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the count. Combining it with `until` fails [`Self::build`].
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the until timestamp. Combining it with `count` fails [`Self::build`].
    #[must_use]
    pub fn with_until(mut self, until: NaiveDateTime) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub fn with_by_second(mut self, seconds: Vec<i32>) -> Self {
        self.by_second = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_by_minute(mut self, minutes: Vec<i32>) -> Self {
        self.by_minute = Some(minutes);
        self
    }

    #[must_use]
    pub fn with_by_hour(mut self, hours: Vec<i32>) -> Self {
        self.by_hour = Some(hours);
        self
    }

    /// Sets the by-day list.
    #[must_use]
    pub fn with_by_day(mut self, days: Vec<WeekdayNum>) -> Self {
        self.by_day = Some(days);
        self
    }

    #[must_use]
    pub fn with_by_monthday(mut self, days: Vec<i32>) -> Self {
        self.by_monthday = Some(days);
        self
    }

    #[must_use]
    pub fn with_by_yearday(mut self, days: Vec<i32>) -> Self {
        self.by_yearday = Some(days);
        self
    }

    #[must_use]
    pub fn with_by_weekno(mut self, weeks: Vec<i32>) -> Self {
        self.by_weekno = Some(weeks);
        self
    }

    /// Sets the by-month list.
    #[must_use]
    pub fn with_by_month(mut self, months: Vec<i32>) -> Self {
        self.by_month = Some(months);
        self
    }

    #[must_use]
    pub fn with_by_setpos(mut self, positions: Vec<i32>) -> Self {
        self.by_setpos = Some(positions);
        self
    }

    /// Sets the week start day.
    #[must_use]
    pub fn with_wkst(mut self, wkst: Weekday) -> Self {
        self.wkst = Some(wkst);
        self
    }

    /// ## Summary
    /// Checks the structural invariants of the rule.
    ///
    /// ## Errors
    /// Returns an error if both `until` and `count` are set, if `interval`
    /// is zero, or if any list field is present but empty.
    pub fn validate(&self) -> StructuralResult<()> {
        if self.until.is_some() && self.count.is_some() {
            return Err(StructuralError::UntilCountConflict);
        }
        if self.interval == 0 {
            return Err(StructuralError::ZeroInterval);
        }

        let lists = [
            ("BYSECOND", self.by_second.as_ref().map(Vec::is_empty)),
            ("BYMINUTE", self.by_minute.as_ref().map(Vec::is_empty)),
            ("BYHOUR", self.by_hour.as_ref().map(Vec::is_empty)),
            ("BYDAY", self.by_day.as_ref().map(Vec::is_empty)),
            ("BYMONTHDAY", self.by_monthday.as_ref().map(Vec::is_empty)),
            ("BYYEARDAY", self.by_yearday.as_ref().map(Vec::is_empty)),
            ("BYWEEKNO", self.by_weekno.as_ref().map(Vec::is_empty)),
            ("BYMONTH", self.by_month.as_ref().map(Vec::is_empty)),
            ("BYSETPOS", self.by_setpos.as_ref().map(Vec::is_empty)),
        ];
        if let Some((field, _)) = lists.iter().find(|(_, empty)| *empty == Some(true)) {
            return Err(StructuralError::EmptyList { field: *field });
        }

        Ok(())
    }

    /// ## Summary
    /// Checks the structural invariants plus those of the owning event's form.
    ///
    /// An all-day rule can only express UNTIL as a date, so its `until` must
    /// sit at midnight for `parse_rule(serialize_rule(r)) == r` to hold.
    ///
    /// ## Errors
    /// Returns any error from [`Self::validate`], or `UntilNotMidnight` for
    /// an all-day rule whose `until` carries a time of day.
    pub fn validate_for(&self, is_all_day: bool) -> StructuralResult<()> {
        self.validate()?;
        if is_all_day && self.until.is_some_and(|until| until.time() != NaiveTime::MIN) {
            return Err(StructuralError::UntilNotMidnight);
        }
        Ok(())
    }

    /// ## Summary
    /// Finishes a builder chain, returning the rule only if it is valid.
    ///
    /// ## Errors
    /// Returns the first structural violation found by [`Self::validate`].
    pub fn build(self) -> StructuralResult<Self> {
        self.validate()?;
        Ok(self)
    }
}
