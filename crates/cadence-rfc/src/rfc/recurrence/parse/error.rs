//! Recurrence grammar error types.

use std::fmt;

use crate::rfc::recurrence::core::StructuralError;
use crate::rfc::recurrence::timezone::ConversionError;

/// Result type for recurrence parsing operations.
pub type ParseResult<T> = Result<T, GrammarError>;

/// Malformed or contradictory recurrence text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError {
    /// Kind of error.
    pub kind: GrammarErrorKind,
    /// The offending fragment of input.
    pub fragment: String,
}

impl GrammarError {
    /// Creates a new grammar error for the given fragment.
    #[must_use]
    pub fn new(kind: GrammarErrorKind, fragment: impl Into<String>) -> Self {
        Self {
            kind,
            fragment: fragment.into(),
        }
    }

    /// Wraps a structural violation found after parsing.
    #[must_use]
    pub fn structural(error: StructuralError, fragment: impl Into<String>) -> Self {
        Self::new(GrammarErrorKind::Structural(error), fragment)
    }

    /// Wraps a timezone failure met while reading a timestamp.
    #[must_use]
    pub fn conversion(error: ConversionError, fragment: impl Into<String>) -> Self {
        let kind = match error {
            ConversionError::UnknownTimezone(_) => GrammarErrorKind::UnknownTimezone,
            ConversionError::NonExistentTime(_) | ConversionError::InvalidDateTime(_) => {
                GrammarErrorKind::InvalidDateTime
            }
        };
        Self::new(kind, fragment)
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.fragment.is_empty() {
            write!(f, ": {:?}", self.fragment)?;
        }
        Ok(())
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            GrammarErrorKind::Structural(err) => Some(err),
            _ => None,
        }
    }
}

/// Kinds of grammar errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarErrorKind {
    /// Line does not start with `RRULE:`.
    MissingPrefix,
    /// Rule part is not a `KEY=VALUE` pair.
    InvalidPart,
    /// FREQ rule part is absent.
    MissingFreq,
    /// Invalid frequency.
    InvalidFrequency,
    /// UNTIL and COUNT are mutually exclusive.
    UntilCountConflict,
    /// UNTIL does not match the event's all-day or timed form.
    InvalidUntil,
    /// Invalid integer value.
    InvalidInteger,
    /// Invalid weekday.
    InvalidWeekday,
    /// Invalid BYDAY entry.
    InvalidWeekdayNum,
    /// Missing colon separator.
    MissingColon,
    /// Line is not the expected property.
    UnexpectedProperty,
    /// Invalid date format.
    InvalidDate,
    /// Invalid date-time format.
    InvalidDateTime,
    /// TZID names no known timezone.
    UnknownTimezone,
    /// Recurrence lines carry no RRULE.
    MissingRule,
    /// Recurrence lines carry no DTSTART.
    MissingStart,
    /// Parsed rule violates a model invariant.
    Structural(StructuralError),
}

impl fmt::Display for GrammarErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPrefix => write!(f, "missing RRULE prefix"),
            Self::InvalidPart => write!(f, "rule part is not a KEY=VALUE pair"),
            Self::MissingFreq => write!(f, "RRULE must contain FREQ parameter"),
            Self::InvalidFrequency => write!(f, "invalid frequency"),
            Self::UntilCountConflict => write!(f, "RRULE cannot have both COUNT and UNTIL"),
            Self::InvalidUntil => write!(f, "invalid UNTIL value"),
            Self::InvalidInteger => write!(f, "invalid integer value"),
            Self::InvalidWeekday => write!(f, "invalid weekday"),
            Self::InvalidWeekdayNum => write!(f, "invalid BYDAY entry"),
            Self::MissingColon => write!(f, "missing colon separator"),
            Self::UnexpectedProperty => write!(f, "unexpected property"),
            Self::InvalidDate => write!(f, "invalid date format"),
            Self::InvalidDateTime => write!(f, "invalid date-time format"),
            Self::UnknownTimezone => write!(f, "unknown timezone"),
            Self::MissingRule => write!(f, "missing RRULE in recurrence list"),
            Self::MissingStart => write!(f, "missing DTSTART in recurrence list"),
            Self::Structural(err) => write!(f, "{err}"),
        }
    }
}
