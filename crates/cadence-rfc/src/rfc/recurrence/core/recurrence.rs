//! Recurrence set value type: one rule plus explicit additions and exclusions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{StructuralError, StructuralResult};
use super::rule::RecurrenceRule;

/// Which explicit date list a line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateListKind {
    /// Additional instants (`RDATE`).
    RDate,
    /// Excluded instants (`EXDATE`).
    ExDate,
}

impl DateListKind {
    /// Returns the property name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RDate => "RDATE",
            Self::ExDate => "EXDATE",
        }
    }

    /// Parses a property name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("RDATE") {
            Some(Self::RDate)
        } else if s.eq_ignore_ascii_case("EXDATE") {
            Some(Self::ExDate)
        } else {
            None
        }
    }
}

impl fmt::Display for DateListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recurrence: exactly one rule with ordered RDATE and EXDATE instants.
///
/// The lists are not required to be disjoint. All-day instants are stored as
/// midnight UTC of the calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecurrence")]
pub struct Recurrence {
    pub rrule: RecurrenceRule,
    pub rdate: Vec<DateTime<Utc>>,
    pub exdate: Vec<DateTime<Utc>>,
}

/// Unchecked shape of a stored recurrence.
#[derive(Deserialize)]
struct RawRecurrence {
    rrule: RecurrenceRule,
    #[serde(default)]
    rdate: Vec<DateTime<Utc>>,
    #[serde(default)]
    exdate: Vec<DateTime<Utc>>,
}

impl TryFrom<RawRecurrence> for Recurrence {
    type Error = StructuralError;

    fn try_from(raw: RawRecurrence) -> StructuralResult<Self> {
        Self::new(raw.rrule, raw.rdate, raw.exdate)
    }
}

impl Recurrence {
    /// ## Summary
    /// Creates a recurrence after checking the rule's structural invariants.
    ///
    /// ## Errors
    /// Returns an error if the rule fails [`RecurrenceRule::validate`].
    pub fn new(
        rrule: RecurrenceRule,
        rdate: Vec<DateTime<Utc>>,
        exdate: Vec<DateTime<Utc>>,
    ) -> StructuralResult<Self> {
        rrule.validate()?;
        Ok(Self {
            rrule,
            rdate,
            exdate,
        })
    }

    /// Creates a recurrence with no explicit dates.
    ///
    /// ## Errors
    /// Returns an error if the rule fails [`RecurrenceRule::validate`].
    pub fn from_rule(rrule: RecurrenceRule) -> StructuralResult<Self> {
        Self::new(rrule, Vec::new(), Vec::new())
    }

    /// Returns the date list of the given kind.
    #[must_use]
    pub fn dates(&self, kind: DateListKind) -> &[DateTime<Utc>] {
        match kind {
            DateListKind::RDate => &self.rdate,
            DateListKind::ExDate => &self.exdate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_validates_rule() {
        let rule = RecurrenceRule::daily().with_interval(0);
        assert_eq!(
            Recurrence::from_rule(rule),
            Err(StructuralError::ZeroInterval)
        );
    }

    #[test]
    fn overlapping_lists_are_allowed() {
        let instant = Utc.with_ymd_and_hms(2025, 10, 13, 8, 30, 0).unwrap();
        let recurrence =
            Recurrence::new(RecurrenceRule::weekly(), vec![instant], vec![instant]).unwrap();
        assert_eq!(recurrence.dates(DateListKind::RDate), &[instant]);
        assert_eq!(recurrence.dates(DateListKind::ExDate), &[instant]);
    }

    #[test]
    fn deserialize_rejects_invalid_rule() {
        let err = serde_json::from_value::<Recurrence>(serde_json::json!({
            "rrule": { "freq": "DAILY", "interval": 0 },
            "rdate": ["2025-10-13T08:30:00Z"],
        }))
        .unwrap_err();
        assert!(err.to_string().contains(&StructuralError::ZeroInterval.to_string()));
    }

    #[test]
    fn json_round_trip_keeps_lists() {
        let instant = Utc.with_ymd_and_hms(2025, 10, 13, 8, 30, 0).unwrap();
        let recurrence =
            Recurrence::new(RecurrenceRule::weekly(), vec![instant], Vec::new()).unwrap();

        let json = serde_json::to_value(&recurrence).unwrap();
        let back: Recurrence = serde_json::from_value(json).unwrap();
        assert_eq!(back, recurrence);
    }

    #[test]
    fn kind_parse() {
        assert_eq!(DateListKind::parse("rdate"), Some(DateListKind::RDate));
        assert_eq!(DateListKind::parse("EXDATE"), Some(DateListKind::ExDate));
        assert_eq!(DateListKind::parse("DTSTART"), None);
    }
}
