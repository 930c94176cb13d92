use std::cmp::Ordering;
use tracing::warn;

use super::views::{EvaluationView, GradeDistribution, SkippedEmployeeView, TeamReportView};
use crate::performance::evaluation::{
    AdminGrade, EvaluationEngine, EvaluationResult, EvaluationWindow,
};
use crate::performance::snapshot::DashboardSnapshot;

/// Evaluation of one employee row in the team table.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeEvaluation {
    pub name: Option<String>,
    pub result: EvaluationResult,
}

/// Employee left out of the report because their identity is ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEmployee {
    pub index: usize,
    pub name: Option<String>,
    pub reason: String,
}

/// Evaluations for every identifiable employee in a snapshot.
#[derive(Debug, Clone)]
pub struct TeamReport {
    pub window: EvaluationWindow,
    pub rows: Vec<EmployeeEvaluation>,
    pub skipped: Vec<SkippedEmployee>,
    pub snapshot_issues: usize,
}

impl TeamReport {
    pub fn build(
        engine: &EvaluationEngine,
        snapshot: &DashboardSnapshot,
        window: EvaluationWindow,
    ) -> Self {
        let inputs = snapshot.inputs();
        let mut rows = Vec::with_capacity(snapshot.employees.len());
        let mut skipped = Vec::new();

        for (index, employee) in snapshot.employees.iter().enumerate() {
            match employee.identity() {
                Ok(identity) => rows.push(EmployeeEvaluation {
                    name: employee.name.clone(),
                    result: engine.evaluate(&identity, inputs, &window),
                }),
                Err(error) => {
                    warn!(index, name = ?employee.name, %error, "employee excluded from evaluation");
                    skipped.push(SkippedEmployee {
                        index,
                        name: employee.name.clone(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        rows.sort_by(compare_rows);

        Self {
            window,
            rows,
            skipped,
            snapshot_issues: snapshot.issues.len(),
        }
    }

    pub fn grade_distribution(&self) -> GradeDistribution {
        let mut distribution = GradeDistribution::default();
        for row in &self.rows {
            match row.result.grade {
                AdminGrade::A => distribution.a += 1,
                AdminGrade::B => distribution.b += 1,
                AdminGrade::C => distribution.c += 1,
            }
        }
        distribution
    }

    /// Mean of the rounded totals, 0 for an empty report.
    pub fn mean_total(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.rows.iter().map(|row| row.result.total).sum::<f64>() / self.rows.len() as f64
    }

    /// Finds a row by employee id or email.
    pub fn find(&self, key: &str) -> Option<&EmployeeEvaluation> {
        self.rows
            .iter()
            .find(|row| row.result.employee.matches(Some(key), Some(key)))
    }

    pub fn summary(&self) -> TeamReportView {
        TeamReportView {
            attendance_month: self.window.attendance_month,
            range: self.window.range,
            rows: self.rows.iter().map(EvaluationView::from_row).collect(),
            skipped: self
                .skipped
                .iter()
                .map(|skipped| SkippedEmployeeView {
                    index: skipped.index,
                    name: skipped.name.clone(),
                    reason: skipped.reason.clone(),
                })
                .collect(),
            grade_distribution: self.grade_distribution(),
            mean_total: self.mean_total(),
            snapshot_issues: self.snapshot_issues,
        }
    }
}

// Highest total first; ties fall back to the display key so output is stable.
fn compare_rows(left: &EmployeeEvaluation, right: &EmployeeEvaluation) -> Ordering {
    right
        .result
        .total
        .partial_cmp(&left.result.total)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            left.result
                .employee
                .display_key()
                .cmp(right.result.employee.display_key())
        })
}
