//! Timeline events and their line-oriented text form.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::REWORK_LABEL;

/// Timestamp layout of an event line. Date and time are each a single token.
pub const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single entry on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// When the activity happened, in the log's own (unzoned) clock.
    pub timestamp: NaiveDateTime,
    /// Human-readable summary of the activity.
    pub description: String,
}

impl Event {
    pub fn new(timestamp: NaiveDateTime, description: impl Into<String>) -> Self {
        Self {
            timestamp,
            description: description.into(),
        }
    }

    /// Renders the event as an event line.
    ///
    /// Sub-second precision is not represented, so only whole-second
    /// timestamps survive a trip through [`parse_event_line`].
    pub fn to_line(&self) -> String {
        self.to_string()
    }

    /// Whether the event records a project being sent back for rework.
    pub fn is_rework(&self) -> bool {
        self.description.contains(REWORK_LABEL)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.timestamp.format(LINE_TIMESTAMP_FORMAT),
            self.description
        )
    }
}

/// Errors from parsing a single event line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventLineError {
    #[error("event line is empty")]
    Empty,

    #[error("event line has no time token: {line}")]
    MissingTime { line: String },

    #[error("invalid timestamp '{date} {time}'")]
    InvalidTimestamp { date: String, time: String },
}

/// Parses an event line produced by [`Event::to_line`].
///
/// The first two whitespace-separated tokens are the date and time. Everything
/// after the whitespace character ending the time token is the description,
/// kept verbatim.
pub fn parse_event_line(line: &str) -> Result<Event, EventLineError> {
    let line = line.trim_start();
    if line.trim_end().is_empty() {
        return Err(EventLineError::Empty);
    }

    let (date, rest) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| EventLineError::MissingTime {
            line: line.to_string(),
        })?;
    let rest = rest.trim_start();
    let (time, description) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));

    let timestamp = NaiveDateTime::parse_from_str(&format!("{date} {time}"), LINE_TIMESTAMP_FORMAT)
        .map_err(|_| EventLineError::InvalidTimestamp {
            date: date.to_string(),
            time: time.to_string(),
        })?;

    Ok(Event::new(timestamp, description))
}

/// Parses a block of event lines, dropping blank and malformed ones.
pub fn parse_event_lines(text: &str) -> Vec<Event> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(idx, line)| match parse_event_line(line) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::debug!(line = idx + 1, %err, "dropping malformed event line");
                None
            }
        })
        .collect()
}
