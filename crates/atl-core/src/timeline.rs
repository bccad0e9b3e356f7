//! Ordering and deduplication of extracted events.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDateTime;

use crate::event::Event;
use crate::extract::{ExtractConfig, extract_events};

/// Collapses events sharing a timestamp and sorts the result ascending.
///
/// Within a timestamp the longest description (by character count) wins;
/// on a tie the first one seen is kept.
pub fn dedup_and_sort(events: impl IntoIterator<Item = Event>) -> Vec<Event> {
    let mut by_timestamp: BTreeMap<NaiveDateTime, String> = BTreeMap::new();
    let mut seen = 0usize;

    for event in events {
        seen += 1;
        match by_timestamp.entry(event.timestamp) {
            Entry::Vacant(slot) => {
                slot.insert(event.description);
            }
            Entry::Occupied(mut slot) => {
                if event.description.chars().count() > slot.get().chars().count() {
                    slot.insert(event.description);
                }
            }
        }
    }

    let timeline: Vec<Event> = by_timestamp
        .into_iter()
        .map(|(timestamp, description)| Event::new(timestamp, description))
        .collect();

    tracing::debug!(seen, kept = timeline.len(), "deduplicated events");
    timeline
}

/// Stable ascending sort by timestamp, without deduplication.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_key(|event| event.timestamp);
}

/// Extracts, deduplicates, and orders the events of an activity log.
pub fn build_timeline(text: &str, config: &ExtractConfig) -> Vec<Event> {
    dedup_and_sort(extract_events(text, config))
}
