//! Command-line front end for the recurrence engine.
//!
//! Reads stored recurrence lines and prints them either sanitized for
//! export or re-emitted in canonical form.

use std::io::BufRead;

use cadence_core::config::{OutputMode, Settings};
use cadence_rfc::rfc::recurrence::{normalize_lines, sanitize_recurrence_lines};

/// ## Summary
/// Reads recurrence lines, trimming each and dropping blank ones.
///
/// ## Errors
/// Returns an error if reading from `reader` fails.
pub fn read_lines(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    reader
        .lines()
        .filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(Ok(line.trim().to_string())),
            Err(e) => Some(Err(e)),
        })
        .collect()
}

/// ## Summary
/// Transforms recurrence lines according to the configured output mode.
///
/// ## Errors
/// Returns an error if a line fails to parse, or in normalize mode if the
/// configured event timezone is unknown.
#[tracing::instrument(skip(settings, lines), fields(mode = ?settings.output.mode, count = lines.len()))]
pub fn run(settings: &Settings, lines: &[String]) -> anyhow::Result<Vec<String>> {
    let output = match settings.output.mode {
        OutputMode::Export => sanitize_recurrence_lines(lines)?,
        OutputMode::Normalize => {
            let tz = settings.event_timezone()?;
            normalize_lines(lines, settings.event.all_day, tz.name())?
        }
    };

    tracing::debug!(count = output.len(), "Transformed recurrence lines");

    Ok(output)
}
