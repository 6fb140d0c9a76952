//! Calendar export sanitizer.
//!
//! Some calendar providers read time-of-day rule parts (BYHOUR and the
//! like) as UTC whatever zone the event was authored in. Rewriting them
//! is ambiguous across DST changes, so they are dropped instead; only the
//! zone-independent rule parts survive, and explicit dates are converted to
//! absolute UTC.

use std::fmt;

use crate::rfc::recurrence::parse::{
    GrammarError, GrammarErrorKind, ParseResult, parse_local_datetime,
};
use crate::rfc::recurrence::timezone::{ConversionError, convert_to_utc_lenient, resolve_tzid};
use crate::rfc::recurrence::{DTSTART, RRULE_PREFIX, UTC_DATETIME_FORMAT};

/// Rule parts that survive export, in output order.
const EXPORTED_PARTS: [&str; 4] = ["FREQ", "UNTIL", "COUNT", "INTERVAL"];

/// Why a date line was passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The line has no `:` separating header from values.
    MissingColon,
    /// A token or the zone could not be converted to UTC.
    Conversion(ConversionError),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColon => write!(f, "missing colon separator"),
            Self::Conversion(err) => write!(f, "{err}"),
        }
    }
}

/// Outcome of sanitizing one RDATE/EXDATE line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sanitized {
    /// The line was rewritten into its export form.
    Converted(String),
    /// The line could not be rewritten and is returned as given.
    Fallback {
        original: String,
        reason: FallbackReason,
    },
}

impl Sanitized {
    /// Returns the line to export, whichever branch produced it.
    #[must_use]
    pub fn into_line(self) -> String {
        match self {
            Self::Converted(line) | Self::Fallback { original: line, .. } => line,
        }
    }

    /// Returns true if the line was rewritten.
    #[must_use]
    pub const fn is_converted(&self) -> bool {
        matches!(self, Self::Converted(_))
    }
}

/// ## Summary
/// Reduces an RRULE to the parts a UTC-reinterpreting provider handles
/// correctly: FREQ, UNTIL, COUNT and INTERVAL, in that order.
///
/// All BY* parts and WKST are dropped. INTERVAL is always written (1 when
/// absent), so sanitizing an already sanitized rule returns it unchanged.
/// Keys match exactly: a lowercase `freq` is not FREQ.
///
/// ## Errors
/// Returns an error if the `RRULE:` prefix or the FREQ part is missing.
pub fn sanitize_rrule(text: &str) -> ParseResult<String> {
    let body = text
        .strip_prefix(RRULE_PREFIX)
        .ok_or_else(|| GrammarError::new(GrammarErrorKind::MissingPrefix, text))?;

    let mut kept: [Option<&str>; 4] = [None; 4];
    for (key, value) in body.split(';').filter_map(|part| part.split_once('=')) {
        let key = key.trim();
        if let Some(slot) = EXPORTED_PARTS.iter().position(|k| *k == key) {
            kept[slot] = Some(value.trim());
        }
    }

    let [freq, until, count, interval] = kept;
    let freq = freq.ok_or_else(|| GrammarError::new(GrammarErrorKind::MissingFreq, text))?;

    let mut line = format!("{RRULE_PREFIX}FREQ={freq}");
    if let Some(until) = until {
        line.push_str(&format!(";UNTIL={until}"));
    }
    if let Some(count) = count {
        line.push_str(&format!(";COUNT={count}"));
    }
    line.push_str(&format!(";INTERVAL={}", interval.unwrap_or("1")));

    Ok(line)
}

/// Converts each local token to a `YYYYMMDDTHHMMSSZ` UTC token.
fn convert_tokens(tzid: &str, values: &str) -> Result<Vec<String>, ConversionError> {
    let tz = resolve_tzid(tzid)?;

    values
        .split(',')
        .map(|token| {
            let local = parse_local_datetime(token.trim())
                .map_err(|e| ConversionError::InvalidDateTime(e.fragment))?;
            let utc = convert_to_utc_lenient(local, tz)?;
            Ok(utc.format(UTC_DATETIME_FORMAT).to_string())
        })
        .collect()
}

/// Marks bare local timestamps as UTC, leaving dates and UTC values alone.
fn mark_utc(token: &str) -> String {
    if token.contains('T') && !token.ends_with('Z') {
        format!("{token}Z")
    } else {
        token.to_string()
    }
}

/// ## Summary
/// Rewrites an RDATE or EXDATE line into zone-free UTC form, reporting
/// which branch ran.
///
/// With a TZID, every token is read as local time in that zone and
/// converted to UTC. Without one, bare timestamps get a `Z` suffix and
/// other tokens are kept. Parameters (TZID, VALUE) are dropped from the
/// header.
///
/// A line without a colon, an unknown zone or an unparseable token yields
/// [`Sanitized::Fallback`] carrying the original line.
#[must_use]
pub fn sanitize_date_rule_outcome(text: &str) -> Sanitized {
    let fallback = |reason: FallbackReason| {
        tracing::warn!(line = text, %reason, "Passing date rule through unchanged");
        Sanitized::Fallback {
            original: text.to_string(),
            reason,
        }
    };

    // TODO: return an error for colon-less lines once export callers stop relying on the passthrough
    let Some((header, values)) = text.split_once(':') else {
        return fallback(FallbackReason::MissingColon);
    };

    let mut params = header.split(';');
    let keyword = params.next().unwrap_or_default();
    let tzid = params.find_map(|param| param.strip_prefix("TZID="));

    let tokens = match tzid {
        Some(tzid) => match convert_tokens(tzid, values) {
            Ok(tokens) => tokens,
            Err(err) => return fallback(FallbackReason::Conversion(err)),
        },
        None => values.split(',').map(|t| mark_utc(t.trim())).collect(),
    };

    Sanitized::Converted(format!("{keyword}:{}", tokens.join(",")))
}

/// Rewrites an RDATE or EXDATE line into zone-free UTC form.
///
/// Never fails: lines that cannot be converted are returned unchanged. Use
/// [`sanitize_date_rule_outcome`] to tell the two cases apart.
#[must_use]
pub fn sanitize_date_rule(text: &str) -> String {
    sanitize_date_rule_outcome(text).into_line()
}

/// ## Summary
/// Sanitizes a list of recurrence lines for export.
///
/// DTSTART lines are dropped, RRULE lines go through [`sanitize_rrule`],
/// RDATE and EXDATE lines through [`sanitize_date_rule`], and anything else
/// passes through verbatim. Relative order is kept.
///
/// ## Errors
/// Returns an error if an RRULE line has no FREQ part.
#[tracing::instrument(skip(lines), fields(count = lines.len()))]
pub fn sanitize_recurrence_lines<S: AsRef<str>>(lines: &[S]) -> ParseResult<Vec<String>> {
    let mut sanitized = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.as_ref();
        if line.starts_with(DTSTART) {
            continue;
        }

        if line.starts_with(RRULE_PREFIX) {
            sanitized.push(sanitize_rrule(line)?);
        } else if line.starts_with("RDATE") || line.starts_with("EXDATE") {
            sanitized.push(sanitize_date_rule(line));
        } else {
            sanitized.push(line.to_string());
        }
    }

    tracing::debug!(count = sanitized.len(), "Sanitized recurrence lines");

    Ok(sanitized)
}
