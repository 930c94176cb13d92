use serde::{Deserialize, Serialize};

/// Closed set of task states every free-text status is folded onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    Completed,
    Delayed,
    InProcess,
    Cancelled,
}

impl CanonicalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Delayed => "delayed",
            Self::InProcess => "in process",
            Self::Cancelled => "cancelled",
        }
    }
}

// Checked in order; the first fragment contained in the cleaned status wins.
const STATUS_FRAGMENTS: &[(&str, CanonicalStatus)] = &[
    ("complete", CanonicalStatus::Completed),
    ("cancel", CanonicalStatus::Cancelled),
    ("delay", CanonicalStatus::Delayed),
    ("in process", CanonicalStatus::InProcess),
    ("in progress", CanonicalStatus::InProcess),
    ("pending", CanonicalStatus::InProcess),
];

/// Maps any status string onto a [`CanonicalStatus`]. Unknown or empty input is `InProcess`.
pub fn canonicalize(raw: &str) -> CanonicalStatus {
    let cleaned = raw.trim().to_lowercase().replace(['_', '-'], " ");

    STATUS_FRAGMENTS
        .iter()
        .find(|(fragment, _)| cleaned.contains(fragment))
        .map(|(_, status)| *status)
        .unwrap_or(CanonicalStatus::InProcess)
}
