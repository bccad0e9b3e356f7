//! Date and time marker recognition.
//!
//! Activity logs interleave bare date lines (`01/02/2024`) and bare time lines
//! (`10:00 AM`) with free text. Markers must make up the whole trimmed line,
//! which keeps the two patterns mutually exclusive.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DATE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap());

static TIME_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s*([ap]m)$").unwrap());

/// Role of a single log line in the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    DateMarker,
    TimeMarker,
    Content,
}

impl LineKind {
    pub const fn is_marker(self) -> bool {
        matches!(self, Self::DateMarker | Self::TimeMarker)
    }
}

/// Classifies a log line. Time markers are checked first.
pub fn classify_line(line: &str) -> LineKind {
    let line = line.trim();
    if TIME_MARKER_RE.is_match(line) {
        LineKind::TimeMarker
    } else if DATE_MARKER_RE.is_match(line) {
        LineKind::DateMarker
    } else {
        LineKind::Content
    }
}

/// Classifies a log line, also accepting date markers written in `date_format`.
pub fn classify_line_with(line: &str, date_format: &str) -> LineKind {
    match classify_line(line) {
        LineKind::Content if NaiveDate::parse_from_str(line.trim(), date_format).is_ok() => {
            LineKind::DateMarker
        }
        kind => kind,
    }
}

/// Whether the line is a date or time marker.
pub fn is_marker(line: &str) -> bool {
    classify_line(line).is_marker()
}

/// Rewrites a time marker into the canonical `H:MM AM` shape.
pub(crate) fn normalize_time(marker: &str) -> String {
    let marker = marker.trim();
    TIME_MARKER_RE.captures(marker).map_or_else(
        || marker.to_ascii_uppercase(),
        |caps| {
            format!(
                "{}:{} {}",
                &caps[1],
                &caps[2],
                caps[3].to_ascii_uppercase()
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_date_markers() {
        assert_eq!(classify_line("01/02/2024"), LineKind::DateMarker);
        assert_eq!(classify_line("  1/2/2024  "), LineKind::DateMarker);
    }

    #[test]
    fn recognizes_time_markers() {
        assert_eq!(classify_line("10:00 AM"), LineKind::TimeMarker);
        assert_eq!(classify_line("9:05 pm"), LineKind::TimeMarker);
        assert_eq!(classify_line("12:30PM"), LineKind::TimeMarker);
    }

    #[test]
    fn markers_must_fill_the_line() {
        assert_eq!(
            classify_line("Meeting on 01/02/2024 at 10:00 AM"),
            LineKind::Content
        );
        assert_eq!(classify_line("10:00"), LineKind::Content);
        assert_eq!(classify_line("2024-02-01"), LineKind::Content);
        assert_eq!(classify_line(""), LineKind::Content);
    }

    #[test]
    fn is_marker_covers_both_kinds() {
        assert!(is_marker("01/02/2024"));
        assert!(is_marker("10:00 AM"));
        assert!(!is_marker("J. Smith"));
    }

    #[test]
    fn configured_date_layouts_are_markers() {
        assert_eq!(
            classify_line_with("2024-02-01", "%Y-%m-%d"),
            LineKind::DateMarker
        );
        assert_eq!(
            classify_line_with("01.02.2024", "%d.%m.%Y"),
            LineKind::DateMarker
        );
        assert_eq!(
            classify_line_with("01/02/2024", "%Y-%m-%d"),
            LineKind::DateMarker
        );
        assert_eq!(classify_line_with("10:00 AM", "%Y-%m-%d"), LineKind::TimeMarker);
        assert_eq!(classify_line_with("Created Project", "%Y-%m-%d"), LineKind::Content);
        assert_eq!(classify_line_with("", "%Y-%m-%d"), LineKind::Content);
    }

    #[test]
    fn normalize_time_canonicalizes_spacing_and_case() {
        assert_eq!(normalize_time("9:05 pm"), "9:05 PM");
        assert_eq!(normalize_time("12:30PM"), "12:30 PM");
        assert_eq!(normalize_time("10:00   am"), "10:00 AM");
    }
}
