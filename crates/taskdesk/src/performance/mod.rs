//! Employee performance evaluation.
//!
//! Scores each employee out of 100 from four weighted components: task closing, attendance,
//! quality marks and KPI scores. Records arrive as a [`snapshot::DashboardSnapshot`] decoded
//! from the dashboard collections; the [`evaluation::EvaluationEngine`] itself is pure and never
//! writes anything back.

pub mod attendance;
pub mod calendar;
pub mod domain;
pub mod evaluation;
pub mod kpi;
pub mod quality;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod snapshot;
pub mod status;

#[cfg(test)]
mod tests;

pub use attendance::{
    AttendanceMap, AttendanceMetrics, AttendanceRecord, AttendanceStatus, AttendanceTally,
};
pub use calendar::{HolidayCalendar, YearMonth};
pub use domain::{normalize_email, DateRange, Employee, EmployeeIdentity, IdentityError, Task};
pub use evaluation::{
    AdminGrade, ComponentWeights, EvaluationConfig, EvaluationEngine, EvaluationInputs,
    EvaluationResult, EvaluationWindow, SelfViewGrade,
};
pub use kpi::{KpiEntry, KpiLedger, KpiLedgerError};
pub use quality::{QualityMark, QualityMarkError};
pub use report::{EvaluationView, TeamReport, TeamReportView};
pub use repository::{SnapshotStore, SnapshotStoreError};
pub use router::evaluation_router;
pub use service::{EvaluationService, EvaluationServiceError, SnapshotReceipt};
pub use snapshot::{DashboardSnapshot, SnapshotError, SnapshotIssue};
pub use status::CanonicalStatus;
