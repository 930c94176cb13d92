use serde::Serialize;

use super::summary::EmployeeEvaluation;
use crate::performance::attendance::AttendanceMetrics;
use crate::performance::calendar::YearMonth;
use crate::performance::domain::DateRange;
use crate::performance::evaluation::EvaluationResult;

/// Row rendered in the admin table and the employee self-view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub result: EvaluationResult,
    pub grade_label: &'static str,
    pub self_view_grade: &'static str,
}

impl EvaluationView {
    pub fn new(name: Option<String>, result: EvaluationResult) -> Self {
        Self {
            name,
            grade_label: result.grade.label(),
            self_view_grade: result.self_view_grade().label(),
            result,
        }
    }

    pub(crate) fn from_row(row: &EmployeeEvaluation) -> Self {
        Self::new(row.name.clone(), row.result.clone())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeDistribution {
    #[serde(rename = "A")]
    pub a: usize,
    #[serde(rename = "B")]
    pub b: usize,
    #[serde(rename = "C")]
    pub c: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEmployeeView {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamReportView {
    pub attendance_month: YearMonth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
    pub rows: Vec<EvaluationView>,
    pub skipped: Vec<SkippedEmployeeView>,
    pub grade_distribution: GradeDistribution,
    pub mean_total: f64,
    pub snapshot_issues: usize,
}

/// Attendance card shown on its own, without the rest of the scorecard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMetricsView {
    #[serde(flatten)]
    pub metrics: AttendanceMetrics,
    pub weighted: f64,
}
