//! Export of recurrence lines to calendar providers that read local
//! time-of-day fields as UTC.

mod sanitize;

pub use sanitize::{
    FallbackReason, Sanitized, sanitize_date_rule, sanitize_date_rule_outcome,
    sanitize_recurrence_lines, sanitize_rrule,
};
