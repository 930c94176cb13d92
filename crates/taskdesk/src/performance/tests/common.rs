use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Month, NaiveDate};
use serde_json::{json, Value};

use crate::performance::attendance::{AttendanceMap, AttendanceRecord, AttendanceStatus};
use crate::performance::calendar::YearMonth;
use crate::performance::domain::{EmployeeIdentity, Task};
use crate::performance::evaluation::{EvaluationConfig, EvaluationEngine, EvaluationWindow};
use crate::performance::kpi::KpiEntry;
use crate::performance::quality::QualityMark;
use crate::performance::repository::{SnapshotStore, SnapshotStoreError};
use crate::performance::snapshot::DashboardSnapshot;
use crate::performance::{evaluation_router, EvaluationService};

pub(super) const AVA_ID: &str = "u-ava";
pub(super) const AVA_EMAIL: &str = "ava@example.com";

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn june() -> YearMonth {
    YearMonth::new(2025, 6).expect("valid month")
}

pub(super) fn june_window() -> EvaluationWindow {
    EvaluationWindow::month(june())
}

pub(super) fn ava() -> EmployeeIdentity {
    EmployeeIdentity::new(Some(AVA_ID), Some(AVA_EMAIL)).expect("valid identity")
}

pub(super) fn engine() -> EvaluationEngine {
    EvaluationEngine::new(EvaluationConfig::standard())
}

pub(super) fn task(id: &str, status: &str, mark: QualityMark, end: Option<NaiveDate>) -> Task {
    Task {
        assigned_to_id: Some(AVA_ID.to_string()),
        quality: mark,
        end_date: end,
        ..Task::new(id, status)
    }
}

/// Three completed tasks marked 80/90/100 plus one delayed task.
pub(super) fn scenario_tasks() -> Vec<Task> {
    vec![
        task("t1", "Completed", QualityMark::Locked(80.0), Some(date(2025, 6, 5))),
        task("t2", "completed", QualityMark::Locked(90.0), Some(date(2025, 6, 12))),
        task("t3", "COMPLETED", QualityMark::Locked(100.0), Some(date(2025, 6, 19))),
        task("t4", "delayed", QualityMark::Unset, Some(date(2025, 6, 26))),
    ]
}

// June 2025 working days, skipping Sundays and the Eid holidays on the 6th and 7th.
const PRESENT_DAYS: [u32; 18] = [2, 3, 4, 5, 9, 10, 11, 12, 13, 14, 16, 17, 18, 19, 20, 21, 23, 24];
const ABSENT_DAYS: [u32; 2] = [25, 26];

/// Eighteen present and two absent June days keyed by user id.
pub(super) fn scenario_attendance() -> Vec<AttendanceRecord> {
    let mark = |day: u32, status| AttendanceRecord {
        user_id: Some(AVA_ID.to_string()),
        user_email: None,
        date: date(2025, 6, day),
        status,
    };

    PRESENT_DAYS
        .iter()
        .map(|day| mark(*day, AttendanceStatus::Present))
        .chain(ABSENT_DAYS.iter().map(|day| mark(*day, AttendanceStatus::Absent)))
        .collect()
}

pub(super) fn kpi(score: f64, month: Month) -> KpiEntry {
    KpiEntry {
        user_id: Some(AVA_ID.to_string()),
        user_email: None,
        month: Some(month),
        year: Some(2025),
        score,
    }
}

pub(super) fn scenario_snapshot() -> DashboardSnapshot {
    let attendance_records = scenario_attendance();
    DashboardSnapshot {
        employees: vec![crate::performance::Employee {
            name: Some("Ava Stone".to_string()),
            id: Some(AVA_ID.to_string()),
            email: Some(AVA_EMAIL.to_string()),
        }],
        tasks: scenario_tasks(),
        attendance: AttendanceMap::from_records(&attendance_records),
        attendance_records,
        kpis: vec![kpi(85.0, Month::June)],
        issues: Vec::new(),
    }
}

/// Raw dashboard collections covering a full employee, an email-only employee and an
/// employee with no identity.
pub(super) fn raw_snapshot() -> Value {
    let mut attendance: Vec<Value> = PRESENT_DAYS
        .iter()
        .map(|day| json!({ "userId": AVA_ID, "date": format!("2025-06-{day:02}"), "status": "present" }))
        .collect();
    attendance.extend(ABSENT_DAYS.iter().map(
        |day| json!({ "userId": AVA_ID, "date": format!("2025-06-{day:02}"), "status": "absent" }),
    ));
    attendance.push(json!({ "userEmail": "Bo@Example.com", "date": "2025-06-02", "status": "halfDay" }));

    json!({
        "users": [
            { "uid": AVA_ID, "email": AVA_EMAIL, "name": "Ava Stone" },
            { "email": "bo@example.com", "name": "Bo Reyes" },
            { "name": "Ghost Account" }
        ],
        "tasks": [
            { "id": "t1", "status": "Completed", "assignedToId": AVA_ID, "qualityMark": 80, "endDate": "2025-06-05" },
            { "id": "t2", "status": "completed", "assignedToId": AVA_ID, "qualityMark": 90, "endDate": "2025-06-12" },
            { "id": "t3", "status": "COMPLETED", "assignedEmail": "AVA@example.com", "qualityMark": 100, "endDate": "2025-06-19" },
            { "id": "t4", "status": "delayed", "assignedToId": AVA_ID, "qualityDraft": 10, "endDate": "2025-06-26" },
            { "id": "t5", "status": "in_progress", "assignedEmail": "bo@example.com" }
        ],
        "attendance": attendance,
        "kpis": [
            { "userId": AVA_ID, "month": "June", "year": 2025, "score": 85 },
            { "userEmail": "bo@example.com", "month": "6", "year": 2025, "score": "not a number" }
        ]
    })
}

#[derive(Default)]
pub(super) struct MemoryStore {
    snapshot: Mutex<Option<Arc<DashboardSnapshot>>>,
}

impl MemoryStore {
    pub(super) fn seeded(snapshot: DashboardSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(Arc::new(snapshot))),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn latest(&self) -> Result<Option<Arc<DashboardSnapshot>>, SnapshotStoreError> {
        Ok(self.snapshot.lock().expect("store mutex poisoned").clone())
    }

    fn replace(&self, snapshot: DashboardSnapshot) -> Result<(), SnapshotStoreError> {
        *self.snapshot.lock().expect("store mutex poisoned") = Some(Arc::new(snapshot));
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl SnapshotStore for UnavailableStore {
    fn latest(&self) -> Result<Option<Arc<DashboardSnapshot>>, SnapshotStoreError> {
        Err(SnapshotStoreError::Unavailable("cache offline".to_string()))
    }

    fn replace(&self, _snapshot: DashboardSnapshot) -> Result<(), SnapshotStoreError> {
        Err(SnapshotStoreError::Unavailable("cache offline".to_string()))
    }
}

pub(super) fn build_service(store: MemoryStore) -> Arc<EvaluationService<MemoryStore>> {
    Arc::new(EvaluationService::new(
        Arc::new(store),
        EvaluationConfig::standard(),
    ))
}

pub(super) fn router_with_snapshot(snapshot: Option<DashboardSnapshot>) -> axum::Router {
    let store = snapshot.map_or_else(MemoryStore::default, MemoryStore::seeded);
    evaluation_router(build_service(store))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
