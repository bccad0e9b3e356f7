//! Log-to-event extraction.
//!
//! The scan walks the log once, carrying the most recent date and time markers
//! in a [`ScanContext`] that is threaded by value through a fold. Content lines
//! seen while both markers are set are classified, enriched by look-ahead, and
//! stamped with the combined marker timestamp.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::classify::{self, Classification, EventKind};
use crate::event::Event;
use crate::marker::{self, LineKind};

/// Default layout of date marker lines (day first).
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Layout of time marker lines after normalization.
const TIME_FORMAT: &str = "%I:%M %p";

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// chrono format string used to parse date markers.
    pub date_format: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Most recent date and time markers seen by the scan.
#[derive(Debug, Clone, Copy, Default)]
struct ScanContext<'a> {
    date: Option<&'a str>,
    time: Option<&'a str>,
}

impl<'a> ScanContext<'a> {
    /// Returns the context after seeing `line`.
    fn advance(self, line: &'a str, kind: LineKind) -> Self {
        match kind {
            LineKind::TimeMarker => Self {
                time: Some(line),
                ..self
            },
            LineKind::DateMarker => Self {
                date: Some(line),
                ..self
            },
            LineKind::Content => self,
        }
    }
}

/// Extracts events from an activity log using default settings.
pub fn extract(text: &str) -> Vec<Event> {
    extract_events(text, &ExtractConfig::default())
}

/// Extracts events from an activity log in the order they appear.
///
/// Lines that cannot be classified, appear before both markers are set, or
/// whose timestamp cannot be parsed are skipped.
pub fn extract_events(text: &str, config: &ExtractConfig) -> Vec<Event> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let (_, events) = lines.iter().enumerate().fold(
        (ScanContext::default(), Vec::new()),
        |(context, mut events), (index, &line)| {
            let kind = marker::classify_line_with(line, &config.date_format);
            if kind == LineKind::Content {
                events.extend(content_event(context, &lines, index, config));
            }
            (context.advance(line, kind), events)
        },
    );

    tracing::debug!(
        lines = lines.len(),
        events = events.len(),
        "extracted events"
    );
    events
}

/// Builds the event for the content line at `index`, if it carries one.
fn content_event(
    context: ScanContext<'_>,
    lines: &[&str],
    index: usize,
    config: &ExtractConfig,
) -> Option<Event> {
    let (Some(date), Some(time)) = (context.date, context.time) else {
        return None;
    };
    let kind = resolve_kind(lines, index, config)?;

    match parse_timestamp(date, time, &config.date_format) {
        Ok(timestamp) => Some(Event::new(timestamp, kind.description())),
        Err(err) => {
            tracing::debug!(
                line = index + 1,
                date,
                time,
                %err,
                "skipping event with unparseable timestamp"
            );
            None
        }
    }
}

/// Classifies the line at `index` and resolves look-ahead details.
pub fn resolve_kind(lines: &[&str], index: usize, config: &ExtractConfig) -> Option<EventKind> {
    let line = lines.get(index)?;
    let is_marker = |line: &str| marker::classify_line_with(line, &config.date_format).is_marker();

    match classify::classify(line) {
        Classification::ProjectCreated => Some(EventKind::ProjectCreated),
        Classification::ProjectRework => {
            let reason = find_following(lines, index, is_marker, |line| {
                classify::rework_reason(line).is_some()
            })
            .and_then(classify::rework_reason)
                .map(str::to_string);
            Some(EventKind::ProjectRework { reason })
        }
        Classification::AssignedToPilot => {
            let pilot = find_following(lines, index, is_marker, |line| {
                !line.trim().is_empty()
            })
            .map(|name| name.trim().to_string());
            Some(EventKind::AssignedToPilot { pilot })
        }
        Classification::StatusChanged(status) => Some(EventKind::StatusChanged {
            status: status.to_string(),
        }),
        Classification::Unclassified => None,
    }
}

/// Finds the first line after `from` satisfying `matches`.
///
/// Returns `None` if a line satisfying `stop` comes first or the input ends.
pub fn find_following<'a, S, M>(lines: &[&'a str], from: usize, stop: S, matches: M) -> Option<&'a str>
where
    S: Fn(&str) -> bool,
    M: Fn(&str) -> bool,
{
    lines
        .iter()
        .skip(from + 1)
        .copied()
        .take_while(|&line| !stop(line))
        .find(|&line| matches(line))
}

fn parse_timestamp(
    date: &str,
    time: &str,
    date_format: &str,
) -> Result<NaiveDateTime, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(date, date_format)?;
    let time = NaiveTime::parse_from_str(&marker::normalize_time(time), TIME_FORMAT)?;
    Ok(date.and_time(time))
}
