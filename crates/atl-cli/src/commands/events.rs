//! Events command: turns an activity log into event lines.
//!
//! The output is the line format read back by `atl table` and `atl chart`.

use std::io::Write;

use anyhow::Result;
use atl_core::{Event, ExtractConfig, build_timeline};

/// Runs the events command over the activity log in `text`.
pub fn run<W: Write>(writer: &mut W, text: &str, config: &ExtractConfig, json: bool) -> Result<()> {
    let events = build_timeline(text, config);
    tracing::debug!(count = events.len(), "built timeline");

    if json {
        writeln!(writer, "{}", format_events_json(&events)?)?;
    } else {
        write!(writer, "{}", format_events(&events))?;
    }

    Ok(())
}

/// Formats events as newline-terminated event lines.
pub fn format_events(events: &[Event]) -> String {
    events
        .iter()
        .map(|event| format!("{}\n", event.to_line()))
        .collect()
}

/// Formats events as a pretty-printed JSON array.
pub fn format_events_json(events: &[Event]) -> Result<String> {
    Ok(serde_json::to_string_pretty(events)?)
}
