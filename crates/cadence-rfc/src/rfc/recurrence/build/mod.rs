//! Recurrence serialization.
//!
//! Emits DTSTART, RRULE, RDATE and EXDATE lines in a fixed order, with
//! timed values rendered in the event's declared zone.

mod serializer;

pub use serializer::{serialize, serialize_date_list, serialize_dtstart, serialize_rule};
