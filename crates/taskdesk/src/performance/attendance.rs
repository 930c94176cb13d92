use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::calendar::{HolidayCalendar, YearMonth};
use super::domain::{normalize_email, EmployeeIdentity};

/// Status an admin can mark for a single working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceStatus {
    Present,
    Outdoor,
    HalfDay,
    ShortLeave,
    Absent,
    Off,
}

impl AttendanceStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        let folded: String = raw
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "present" => Some(Self::Present),
            "outdoor" => Some(Self::Outdoor),
            "halfday" => Some(Self::HalfDay),
            "shortleave" => Some(Self::ShortLeave),
            "absent" => Some(Self::Absent),
            "off" | "dayoff" => Some(Self::Off),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Outdoor => "Outdoor",
            Self::HalfDay => "Half Day",
            Self::ShortLeave => "Short Leave",
            Self::Absent => "Absent",
            Self::Off => "Off",
        }
    }
}

/// One attendance mark for one employee on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Builds the lookup key `<identity>_<YYYY-MM-DD>`.
pub fn attendance_key(identity: &str, date: NaiveDate) -> String {
    format!("{}_{}", identity, date.format("%Y-%m-%d"))
}

type KeyStrategy = fn(&EmployeeIdentity) -> Option<&str>;

// Identity variants tried per day, first hit wins.
const KEY_STRATEGIES: &[KeyStrategy] = &[EmployeeIdentity::id, EmployeeIdentity::email];

/// Attendance marks indexed by identity key and ISO date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceMap {
    entries: HashMap<String, AttendanceStatus>,
}

impl AttendanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a AttendanceRecord>,
    {
        let mut map = Self::new();
        for record in records {
            map.insert_record(record);
        }
        map
    }

    pub fn insert(&mut self, key: impl Into<String>, status: AttendanceStatus) {
        self.entries.insert(key.into(), status);
    }

    /// Keys the record by id when present, otherwise by normalized email.
    /// Returns the key used, or `None` when the record has no identity at all.
    pub fn insert_record(&mut self, record: &AttendanceRecord) -> Option<String> {
        let identity = record
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| {
                record
                    .user_email
                    .as_deref()
                    .map(normalize_email)
                    .filter(|email| !email.is_empty())
            })?;

        let key = attendance_key(&identity, record.date);
        self.entries.insert(key.clone(), record.status);
        Some(key)
    }

    pub fn get(&self, key: &str) -> Option<AttendanceStatus> {
        self.entries.get(key).copied()
    }

    pub fn lookup(&self, identity: &EmployeeIdentity, date: NaiveDate) -> Option<AttendanceStatus> {
        KEY_STRATEGIES
            .iter()
            .filter_map(|strategy| strategy(identity))
            .find_map(|part| self.get(&attendance_key(part, date)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-status day counts for a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceTally {
    pub present: u32,
    pub outdoor: u32,
    pub half_day: u32,
    pub short_leave: u32,
    pub absent: u32,
    pub off: u32,
}

impl AttendanceTally {
    pub fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Outdoor => self.outdoor += 1,
            AttendanceStatus::HalfDay => self.half_day += 1,
            AttendanceStatus::ShortLeave => self.short_leave += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Off => self.off += 1,
        }
    }

    /// Credited days: short leave counts 0.8, half day 0.5.
    pub fn credited_days(&self) -> f64 {
        f64::from(self.present)
            + f64::from(self.outdoor)
            + f64::from(self.short_leave) * 0.8
            + f64::from(self.half_day) * 0.5
    }

    /// Days that count toward the denominator. Off days are excluded.
    pub fn counted_days(&self) -> u32 {
        self.present + self.outdoor + self.short_leave + self.half_day + self.absent
    }

    /// Attendance percentage, 0 when no day is counted.
    pub fn percentage(&self) -> f64 {
        let counted = self.counted_days();
        if counted == 0 {
            return 0.0;
        }
        self.credited_days() * 100.0 / f64::from(counted)
    }
}

/// Attendance summary for one employee and month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMetrics {
    pub month: YearMonth,
    #[serde(flatten)]
    pub tally: AttendanceTally,
    pub working_days: u32,
    pub unmarked_days: u32,
    pub percentage: f64,
}

/// Tallies every working day of `month` for the employee and derives the percentage.
pub fn resolve_metrics(
    identity: &EmployeeIdentity,
    month: YearMonth,
    attendance: &AttendanceMap,
    calendar: &HolidayCalendar,
) -> AttendanceMetrics {
    let mut tally = AttendanceTally::default();
    let mut working_days = 0;
    let mut unmarked_days = 0;

    for day in calendar.working_days(month) {
        working_days += 1;
        match attendance.lookup(identity, day) {
            Some(status) => tally.record(status),
            None => unmarked_days += 1,
        }
    }

    AttendanceMetrics {
        month,
        tally,
        working_days,
        unmarked_days,
        percentage: tally.percentage(),
    }
}
