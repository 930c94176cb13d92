use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::calendar::YearMonth;
use super::domain::{Employee, EmployeeIdentity, IdentityError};
use super::evaluation::{weighted, EvaluationConfig, EvaluationEngine, EvaluationWindow};
use super::report::{AttendanceMetricsView, EvaluationView, TeamReport};
use super::repository::{SnapshotStore, SnapshotStoreError};
use super::snapshot::{DashboardSnapshot, SnapshotError, SnapshotIssue};

/// Counts of what a published snapshot contained after decoding.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotReceipt {
    pub employees: usize,
    pub tasks: usize,
    pub attendance_records: usize,
    pub kpi_entries: usize,
    pub issues: Vec<SnapshotIssue>,
}

impl SnapshotReceipt {
    fn of(snapshot: &DashboardSnapshot) -> Self {
        Self {
            employees: snapshot.employees.len(),
            tasks: snapshot.tasks.len(),
            attendance_records: snapshot.attendance_records.len(),
            kpi_entries: snapshot.kpis.len(),
            issues: snapshot.issues.clone(),
        }
    }
}

/// Service pairing the snapshot store with the evaluation engine.
pub struct EvaluationService<S> {
    store: Arc<S>,
    engine: Arc<EvaluationEngine>,
}

impl<S> EvaluationService<S>
where
    S: SnapshotStore + 'static,
{
    pub fn new(store: Arc<S>, config: EvaluationConfig) -> Self {
        Self {
            store,
            engine: Arc::new(EvaluationEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &EvaluationEngine {
        &self.engine
    }

    /// Decode raw collections and make them the snapshot future evaluations read.
    pub fn publish(&self, raw: &Value) -> Result<SnapshotReceipt, EvaluationServiceError> {
        self.install(DashboardSnapshot::from_json(raw)?)
    }

    /// Replaces the current snapshot with one that is already decoded.
    pub fn install(
        &self,
        snapshot: DashboardSnapshot,
    ) -> Result<SnapshotReceipt, EvaluationServiceError> {
        let receipt = SnapshotReceipt::of(&snapshot);
        self.store.replace(snapshot)?;

        info!(
            employees = receipt.employees,
            tasks = receipt.tasks,
            issues = receipt.issues.len(),
            "dashboard snapshot published"
        );
        Ok(receipt)
    }

    pub fn team_report(
        &self,
        window: EvaluationWindow,
    ) -> Result<TeamReport, EvaluationServiceError> {
        let snapshot = self.current()?;
        Ok(TeamReport::build(&self.engine, &snapshot, window))
    }

    pub fn evaluate_employee(
        &self,
        employee: &Employee,
        window: EvaluationWindow,
    ) -> Result<EvaluationView, EvaluationServiceError> {
        let identity = employee.identity()?;
        let snapshot = self.current()?;
        let name = employee
            .name
            .clone()
            .or_else(|| roster_name(&snapshot, &identity));

        let result = self.engine.evaluate(&identity, snapshot.inputs(), &window);
        Ok(EvaluationView::new(name, result))
    }

    pub fn attendance(
        &self,
        employee: &Employee,
        month: YearMonth,
    ) -> Result<AttendanceMetricsView, EvaluationServiceError> {
        let identity = employee.identity()?;
        let snapshot = self.current()?;
        let metrics = self
            .engine
            .attendance(&identity, month, &snapshot.attendance);

        Ok(AttendanceMetricsView {
            weighted: weighted(metrics.percentage, self.engine.config().weights.attendance),
            metrics,
        })
    }

    fn current(&self) -> Result<Arc<DashboardSnapshot>, EvaluationServiceError> {
        self.store
            .latest()?
            .ok_or(EvaluationServiceError::NoSnapshot)
    }
}

fn roster_name(snapshot: &DashboardSnapshot, identity: &EmployeeIdentity) -> Option<String> {
    snapshot
        .employees
        .iter()
        .find(|employee| identity.matches(employee.id.as_deref(), employee.email.as_deref()))
        .and_then(|employee| employee.name.clone())
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error("no dashboard snapshot has been published")]
    NoSnapshot,
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Store(#[from] SnapshotStoreError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
}
