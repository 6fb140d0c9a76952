//! Recurrence value types.
//!
//! - `rule`: `RecurrenceRule` and its enumerations
//! - `recurrence`: `Recurrence`, a rule plus its RDATE/EXDATE lists
//! - `error`: structural invariant violations

mod error;
mod recurrence;
mod rule;

pub use error::{StructuralError, StructuralResult};
pub use recurrence::{DateListKind, Recurrence};
pub use rule::{Frequency, RecurrenceRule, Weekday, WeekdayNum};
