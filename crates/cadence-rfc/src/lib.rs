//! Recurrence-rule engine.
//!
//! Parses, models and re-serializes RRULE / RDATE / EXDATE lines, and reduces
//! them to the subset accepted by calendar providers that read local time
//! fields as UTC.

pub mod error;
pub mod rfc;

pub use error::{RfcError, RfcResult};
