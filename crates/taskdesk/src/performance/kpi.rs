use chrono::Month;

use super::domain::{normalize_email, EmployeeIdentity};

/// Monthly KPI score for one employee. Scores are non-negative and uncapped.
///
/// The period only matters to the write-side ledger; scoring averages every entry,
/// so imported entries with an unreadable month or year are kept with `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiEntry {
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub month: Option<Month>,
    pub year: Option<i32>,
    pub score: f64,
}

impl KpiEntry {
    pub fn belongs_to(&self, identity: &EmployeeIdentity) -> bool {
        identity.matches(self.user_id.as_deref(), self.user_email.as_deref())
    }

    fn period(&self) -> Option<(Month, i32)> {
        Some((self.month?, self.year?))
    }

    fn same_period(&self, other: &KpiEntry) -> bool {
        matches!((self.period(), other.period()), (Some(left), Some(right)) if left == right)
    }

    fn same_employee(&self, other: &KpiEntry) -> bool {
        let ids = match (trimmed(&self.user_id), trimmed(&other.user_id)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        };
        let emails = match (trimmed(&self.user_email), trimmed(&other.user_email)) {
            (Some(left), Some(right)) => normalize_email(left) == normalize_email(right),
            _ => false,
        };
        ids || emails
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KpiLedgerError {
    #[error("a KPI entry for {month} {year} already exists for this employee")]
    Duplicate { month: &'static str, year: i32 },
    #[error("KPI score {score} must be a finite, non-negative number")]
    InvalidScore { score: f64 },
    #[error("KPI entry carries neither a user id nor an email")]
    MissingIdentity,
    #[error("KPI entry needs both a month and a year")]
    MissingPeriod,
}

/// Write-side guard keeping at most one KPI entry per employee and month.
#[derive(Debug, Clone, Default)]
pub struct KpiLedger {
    entries: Vec<KpiEntry>,
}

impl KpiLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, candidate: &KpiEntry) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.same_period(candidate) && entry.same_employee(candidate))
    }

    pub fn record(&mut self, entry: KpiEntry) -> Result<(), KpiLedgerError> {
        if !entry.score.is_finite() || entry.score < 0.0 {
            return Err(KpiLedgerError::InvalidScore { score: entry.score });
        }
        if trimmed(&entry.user_id).is_none() && trimmed(&entry.user_email).is_none() {
            return Err(KpiLedgerError::MissingIdentity);
        }
        let Some((month, year)) = entry.period() else {
            return Err(KpiLedgerError::MissingPeriod);
        };
        if self.exists(&entry) {
            return Err(KpiLedgerError::Duplicate {
                month: month.name(),
                year,
            });
        }

        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[KpiEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<KpiEntry> {
        self.entries
    }
}
