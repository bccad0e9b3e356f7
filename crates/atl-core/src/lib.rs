//! Core extraction logic for the activity timeline.
//!
//! This crate turns a free-text activity log into timeline events:
//! - Marker recognition: date and time lines that set the scan context
//! - Classification: mapping status lines onto semantic event kinds
//! - Extraction: scanning the log with look-ahead for pilot names and rework titles
//! - Timeline: deduplicating and ordering extracted events
//! - Event lines: the `<date> <time> <description>` exchange format

pub mod classify;
pub mod event;
pub mod extract;
pub mod marker;
pub mod timeline;

pub use classify::{Classification, EventKind, classify};
pub use event::{Event, EventLineError, parse_event_line, parse_event_lines};
pub use extract::{ExtractConfig, extract, extract_events, find_following};
pub use marker::{LineKind, classify_line, classify_line_with};
pub use timeline::{build_timeline, dedup_and_sort, sort_chronologically};
