//! Table command for rendering event lines, newest first.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use atl_core::{Event, parse_event_lines, sort_chronologically};
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;

const TIME_HEADER: &str = "TIME";
const EVENT_HEADER: &str = "EVENT";

/// Formats a timestamp the way the activity log writes it.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%d/%m/%Y %-I:%M %p").to_string()
}

/// Formats the event table followed by a summary.
pub fn format_table(events: &[Event], color: bool) -> String {
    let mut output = String::new();

    if events.is_empty() {
        writeln!(output, "No events.").unwrap();
        return output;
    }

    let times: Vec<String> = events
        .iter()
        .map(|event| format_timestamp(event.timestamp))
        .collect();
    let time_width = times
        .iter()
        .map(String::len)
        .chain([TIME_HEADER.len()])
        .max()
        .unwrap_or_default();
    let event_width = events
        .iter()
        .map(|event| event.description.chars().count())
        .chain([EVENT_HEADER.len()])
        .max()
        .unwrap_or_default();

    writeln!(output, "{TIME_HEADER:<time_width$}  {EVENT_HEADER}").unwrap();
    writeln!(output, "{}  {}", "─".repeat(time_width), "─".repeat(event_width)).unwrap();

    for (time, event) in times.iter().zip(events).rev() {
        let description = if color && event.is_rework() {
            event.description.red().to_string()
        } else {
            event.description.clone()
        };
        writeln!(output, "{time:<time_width$}  {description}").unwrap();
    }

    let reworks = events.iter().filter(|event| event.is_rework()).count();

    // SUMMARY section
    writeln!(output).unwrap();
    writeln!(output, "SUMMARY").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(output, "Events:   {}", events.len()).unwrap();
    writeln!(output, "Reworks:  {reworks}").unwrap();
    if let (Some(first), Some(last)) = (times.first(), times.last()) {
        writeln!(output, "First:    {first}").unwrap();
        writeln!(output, "Last:     {last}").unwrap();
    }

    output
}

/// Runs the table command over event lines in `text`.
pub fn run<W: Write>(writer: &mut W, text: &str, color: bool) -> Result<()> {
    let mut events = parse_event_lines(text);
    sort_chronologically(&mut events);

    write!(writer, "{}", format_table(&events, color))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use insta::assert_snapshot;

    fn at(d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_format_timestamp_uses_twelve_hour_clock() {
        assert_eq!(format_timestamp(at(1, 10, 0)), "01/02/2024 10:00 AM");
        assert_eq!(format_timestamp(at(1, 14, 5)), "01/02/2024 2:05 PM");
        assert_eq!(format_timestamp(at(1, 0, 30)), "01/02/2024 12:30 AM");
    }

    #[test]
    fn test_table_empty() {
        assert_eq!(format_table(&[], false), "No events.\n");
    }

    #[test]
    fn test_table_newest_first_with_summary() {
        let events = vec![
            Event::new(at(1, 10, 0), "Project created"),
            Event::new(at(1, 14, 45), "Assigned to Pilot (J. Smith)"),
            Event::new(at(3, 8, 5), "Project Rework: Misaligned panel"),
        ];

        assert_snapshot!(format_table(&events, false), @r"
        TIME                 EVENT
        ───────────────────  ────────────────────────────────
        03/02/2024 8:05 AM   Project Rework: Misaligned panel
        01/02/2024 2:45 PM   Assigned to Pilot (J. Smith)
        01/02/2024 10:00 AM  Project created

        SUMMARY
        ───────
        Events:   3
        Reworks:  1
        First:    01/02/2024 10:00 AM
        Last:     03/02/2024 8:05 AM
        ");
    }

    #[test]
    fn test_table_highlights_rework_rows() {
        let events = vec![
            Event::new(at(1, 10, 0), "Project created"),
            Event::new(at(2, 9, 0), "Project Rework"),
        ];

        let output = format_table(&events, true);
        assert!(output.contains(&"Project Rework".red().to_string()));
        assert!(!output.contains(&"Project created".red().to_string()));
    }

    #[test]
    fn test_run_sorts_unordered_event_lines() {
        let text = "2024-02-03 08:05:00 Delivered\n\
                    garbage\n\
                    2024-02-01 10:00:00 Project created\n";
        let mut output = Vec::new();
        run(&mut output, text, false).unwrap();

        let output = String::from_utf8(output).unwrap();
        let delivered = output.find("Delivered").unwrap();
        let created = output.find("Project created").unwrap();
        assert!(delivered < created, "newest event should be listed first");
        assert!(output.contains("Events:   2"));
    }
}
