use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::quality::QualityMark;
use super::status::{canonicalize, CanonicalStatus};

/// Lower-cases and trims an email so identity comparisons ignore presentation noise.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Raised when an employee record cannot be matched to any task, attendance or KPI data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("employee record carries neither an id nor an email")]
    Ambiguous,
}

/// Validated identity of an employee: at least one of id or (normalized) email is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EmployeeIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl EmployeeIdentity {
    pub fn new(id: Option<&str>, email: Option<&str>) -> Result<Self, IdentityError> {
        let id = non_empty(id).map(str::to_string);
        let email = non_empty(email).map(normalize_email);

        if id.is_none() && email.is_none() {
            return Err(IdentityError::Ambiguous);
        }

        Ok(Self { id, email })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Stable label used for ordering and display: the email when known, otherwise the id.
    pub fn display_key(&self) -> &str {
        self.email
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or_default()
    }

    /// True when either the id matches exactly or the emails match case-insensitively.
    pub fn matches(&self, id: Option<&str>, email: Option<&str>) -> bool {
        let id_match = match (self.id.as_deref(), non_empty(id)) {
            (Some(own), Some(other)) => own == other,
            _ => false,
        };

        id_match
            || match (self.email.as_deref(), non_empty(email)) {
                (Some(own), Some(other)) => own == normalize_email(other),
                _ => false,
            }
    }
}

/// Raw employee document as exposed by the user collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Employee {
    pub fn identity(&self) -> Result<EmployeeIdentity, IdentityError> {
        EmployeeIdentity::new(self.id.as_deref(), self.email.as_deref())
    }
}

/// Task as consumed by the engine. Only the fields that influence scoring are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub status: String,
    pub assigned_to_id: Option<String>,
    pub assigned_email: Option<String>,
    pub quality: QualityMark,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            assigned_to_id: None,
            assigned_email: None,
            quality: QualityMark::Unset,
            start_date: None,
            end_date: None,
        }
    }

    pub fn canonical_status(&self) -> CanonicalStatus {
        canonicalize(&self.status)
    }

    /// Date used for range filtering: the end date, falling back to the start date.
    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.end_date.or(self.start_date)
    }

    pub fn is_assigned_to(&self, identity: &EmployeeIdentity) -> bool {
        identity.matches(
            self.assigned_to_id.as_deref(),
            self.assigned_email.as_deref(),
        )
    }
}

/// Inclusive date filter. A range with neither bound is inactive and keeps every task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    /// Whether a task falls inside the range. Undated tasks only pass an inactive range.
    pub fn admits(&self, task: &Task) -> bool {
        if !self.is_active() {
            return true;
        }

        task.reference_date()
            .map_or(false, |date| self.contains(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn identity_requires_id_or_email() {
        assert_eq!(
            EmployeeIdentity::new(None, Some("   ")),
            Err(IdentityError::Ambiguous)
        );
        let identity = EmployeeIdentity::new(Some(" "), Some(" Ava@Example.COM ")).expect("email");
        assert_eq!(identity.id(), None);
        assert_eq!(identity.email(), Some("ava@example.com"));
        assert_eq!(identity.display_key(), "ava@example.com");
    }

    #[test]
    fn identity_matches_by_id_or_case_insensitive_email() {
        let identity = EmployeeIdentity::new(Some("u-1"), Some("ava@example.com")).expect("valid");
        assert!(identity.matches(Some("u-1"), None));
        assert!(identity.matches(None, Some("AVA@example.com")));
        assert!(identity.matches(Some("other"), Some("ava@example.com")));
        assert!(!identity.matches(Some("u-2"), Some("bo@example.com")));
        assert!(!identity.matches(None, None));
    }

    #[test]
    fn reference_date_prefers_end_date() {
        let mut task = Task::new("t1", "completed");
        assert_eq!(task.reference_date(), None);
        task.start_date = Some(date(2025, 6, 2));
        assert_eq!(task.reference_date(), Some(date(2025, 6, 2)));
        task.end_date = Some(date(2025, 6, 9));
        assert_eq!(task.reference_date(), Some(date(2025, 6, 9)));
    }

    #[test]
    fn range_is_inclusive_and_excludes_undated_tasks_when_active() {
        let range = DateRange::new(Some(date(2025, 6, 1)), Some(date(2025, 6, 30)));
        let mut task = Task::new("t1", "completed");
        assert!(!range.admits(&task));
        assert!(DateRange::default().admits(&task));

        task.end_date = Some(date(2025, 6, 30));
        assert!(range.admits(&task));
        task.end_date = Some(date(2025, 7, 1));
        assert!(!range.admits(&task));

        let open_ended = DateRange::new(Some(date(2025, 6, 1)), None);
        assert!(open_ended.admits(&task));
    }
}
