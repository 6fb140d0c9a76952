//! Recurrence text parsers.
//!
//! - Rule: `RRULE:` lines into [`RecurrenceRule`](crate::rfc::recurrence::core::RecurrenceRule)
//! - Date lists: `RDATE` / `EXDATE` / `DTSTART` lines into UTC instants
//! - Values: date, date-time, integer-list and BYDAY tokens

mod date_list;
mod error;
mod rule;
mod values;

pub use date_list::{parse_date_list, parse_date_list_with_kind, parse_dtstart, parse_recurrence};
pub use error::{GrammarError, GrammarErrorKind, ParseResult};
pub use rule::parse_rule;
pub use values::{
    parse_all_day_instant, parse_byday, parse_date, parse_instant, parse_int_list,
    parse_local_datetime, parse_until, parse_weekday,
};
