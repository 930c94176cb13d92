mod fields;
mod parser;

use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use super::attendance::{AttendanceMap, AttendanceRecord};
use super::domain::Employee;
use super::evaluation::EvaluationInputs;
use super::kpi::KpiEntry;
use super::Task;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read dashboard snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot must be a JSON object of document collections")]
    NotAnObject,
    #[error("collection `{0}` must be an array of documents")]
    InvalidCollection(&'static str),
}

/// A document that was skipped, or kept with a field that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotIssue {
    pub collection: &'static str,
    pub index: usize,
    pub reason: String,
}

// Collection name followed by accepted aliases.
const USERS: &[&str] = &["users", "employees"];
const TASKS: &[&str] = &["tasks"];
const ATTENDANCE: &[&str] = &["attendance", "attendances"];
const KPIS: &[&str] = &["kpis", "kpi"];

/// Point-in-time copy of the dashboard collections, decoded into engine inputs.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub employees: Vec<Employee>,
    pub tasks: Vec<Task>,
    pub attendance_records: Vec<AttendanceRecord>,
    pub attendance: AttendanceMap,
    pub kpis: Vec<KpiEntry>,
    pub issues: Vec<SnapshotIssue>,
}

impl DashboardSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_json(&value)
    }

    /// Decodes a `{users, tasks, attendance, kpis}` object. Missing collections are empty;
    /// undecodable documents are skipped and reported in [`DashboardSnapshot::issues`].
    pub fn from_json(value: &Value) -> Result<Self, SnapshotError> {
        let root = value.as_object().ok_or(SnapshotError::NotAnObject)?;
        let mut snapshot = Self::default();

        for (_, doc) in documents(root, USERS, &mut snapshot.issues)? {
            snapshot.employees.push(parser::decode_employee(doc));
        }

        for (index, doc) in documents(root, TASKS, &mut snapshot.issues)? {
            snapshot.tasks.push(parser::decode_task(doc, index));
        }

        for (index, doc) in documents(root, ATTENDANCE, &mut snapshot.issues)? {
            match parser::decode_attendance(doc) {
                Ok(record) => {
                    snapshot.attendance.insert_record(&record);
                    snapshot.attendance_records.push(record);
                }
                Err(reason) => snapshot.skip(ATTENDANCE[0], index, reason),
            }
        }

        for (index, doc) in documents(root, KPIS, &mut snapshot.issues)? {
            match parser::decode_kpi(doc) {
                Ok(decoded) => {
                    for reason in decoded.warnings {
                        snapshot.flag(KPIS[0], index, reason);
                    }
                    snapshot.kpis.push(decoded.entry);
                }
                Err(reason) => snapshot.skip(KPIS[0], index, reason),
            }
        }

        Ok(snapshot)
    }

    pub fn inputs(&self) -> EvaluationInputs<'_> {
        EvaluationInputs {
            tasks: &self.tasks,
            attendance: &self.attendance,
            kpis: &self.kpis,
        }
    }

    fn skip(&mut self, collection: &'static str, index: usize, reason: String) {
        warn!(collection, index, %reason, "skipping snapshot document");
        self.issues.push(SnapshotIssue {
            collection,
            index,
            reason,
        });
    }

    fn flag(&mut self, collection: &'static str, index: usize, reason: String) {
        warn!(collection, index, %reason, "snapshot document kept with unreadable field");
        self.issues.push(SnapshotIssue {
            collection,
            index,
            reason,
        });
    }
}

fn documents<'a>(
    root: &'a serde_json::Map<String, Value>,
    names: &'static [&'static str],
    issues: &mut Vec<SnapshotIssue>,
) -> Result<Vec<(usize, &'a fields::Document)>, SnapshotError> {
    let Some(collection) = names.iter().find_map(|name| root.get(*name)) else {
        return Ok(Vec::new());
    };

    let items = match collection {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        _ => return Err(SnapshotError::InvalidCollection(names[0])),
    };

    let mut docs = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_object() {
            Some(doc) => docs.push((index, doc)),
            None => {
                warn!(collection = names[0], index, "skipping non-object document");
                issues.push(SnapshotIssue {
                    collection: names[0],
                    index,
                    reason: "document is not a JSON object".to_string(),
                });
            }
        }
    }

    Ok(docs)
}
