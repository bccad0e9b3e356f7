//! Semantic classification of content lines.
//!
//! Matching is case-insensitive substring containment against an ordered rule
//! table. The first rule whose phrase appears in the line wins, so more
//! specific "changed the status to ..." phrases sit above the generic one.

/// Label shared by every rework description.
pub const REWORK_LABEL: &str = "Project Rework";

const CREATED_PROJECT: &str = "created project";
const STATUS_TO_REWORK: &str = "changed the status to project rework";
const ASSIGNED_PILOT: &str = "assigned pilot to";
const STATUS_TO_ASSIGNED_PILOT: &str = "changed the status to assigned to pilot";
const STATUS_CHANGED: &str = "changed the status to";

/// Prefix of the line carrying a rework reason.
pub(crate) const TITLE_PREFIX: &str = "title:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    ProjectCreated,
    ProjectRework,
    AssignedToPilot,
    StatusChanged,
}

const RULES: [(&str, Trigger); 5] = [
    (CREATED_PROJECT, Trigger::ProjectCreated),
    (STATUS_TO_REWORK, Trigger::ProjectRework),
    (ASSIGNED_PILOT, Trigger::AssignedToPilot),
    (STATUS_TO_ASSIGNED_PILOT, Trigger::AssignedToPilot),
    (STATUS_CHANGED, Trigger::StatusChanged),
];

/// Result of classifying a single content line, before any look-ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    ProjectCreated,
    /// Needs a look-ahead for the `Title:` line.
    ProjectRework,
    /// Needs a look-ahead for the pilot name.
    AssignedToPilot,
    /// Carries the status text following the trigger phrase.
    StatusChanged(&'a str),
    Unclassified,
}

/// Classifies a content line by its first matching trigger phrase.
pub fn classify(line: &str) -> Classification<'_> {
    let lower = line.to_ascii_lowercase();

    RULES
        .iter()
        .find_map(|&(phrase, trigger)| {
            let at = lower.find(phrase)?;
            Some(match trigger {
                Trigger::ProjectCreated => Classification::ProjectCreated,
                Trigger::ProjectRework => Classification::ProjectRework,
                Trigger::AssignedToPilot => Classification::AssignedToPilot,
                // ASCII lowercasing keeps byte offsets aligned with `line`
                Trigger::StatusChanged => {
                    Classification::StatusChanged(line[at + phrase.len()..].trim())
                }
            })
        })
        .unwrap_or(Classification::Unclassified)
}

/// A fully resolved event kind, including look-ahead details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    ProjectCreated,
    AssignedToPilot { pilot: Option<String> },
    ProjectRework { reason: Option<String> },
    StatusChanged { status: String },
}

impl EventKind {
    /// Timeline description for this kind.
    pub fn description(&self) -> String {
        match self {
            Self::ProjectCreated => "Project created".to_string(),
            Self::AssignedToPilot { pilot: Some(pilot) } => format!("Assigned to Pilot ({pilot})"),
            Self::AssignedToPilot { pilot: None } => "Assigned to Pilot".to_string(),
            Self::ProjectRework {
                reason: Some(reason),
            } => format!("{REWORK_LABEL}: {reason}"),
            Self::ProjectRework { reason: None } => REWORK_LABEL.to_string(),
            Self::StatusChanged { status } if status.is_empty() => "Status changed".to_string(),
            Self::StatusChanged { status } => status.clone(),
        }
    }
}

/// Extracts the rework reason following `Title:`, if non-empty.
pub(crate) fn rework_reason(line: &str) -> Option<&str> {
    let at = line.to_ascii_lowercase().find(TITLE_PREFIX)?;
    let reason = line[at + TITLE_PREFIX.len()..].trim();
    (!reason.is_empty()).then_some(reason)
}
