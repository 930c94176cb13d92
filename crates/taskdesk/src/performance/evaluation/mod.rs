mod config;
mod grade;
mod rules;

pub use config::{ComponentWeights, EvaluationConfig};
pub use grade::{admin_grade, self_view_grade, AdminGrade, SelfViewGrade};
pub use rules::{completion_percentage, mean, round1, weighted};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::attendance::{resolve_metrics, AttendanceMap, AttendanceMetrics};
use super::calendar::YearMonth;
use super::domain::{DateRange, EmployeeIdentity, Task};
use super::kpi::KpiEntry;

/// Immutable view over the records an evaluation reads.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationInputs<'a> {
    pub tasks: &'a [Task],
    pub attendance: &'a AttendanceMap,
    pub kpis: &'a [KpiEntry],
}

/// Which attendance month to resolve and which task dates to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationWindow {
    pub attendance_month: YearMonth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
}

impl EvaluationWindow {
    pub fn month(attendance_month: YearMonth) -> Self {
        Self {
            attendance_month,
            range: None,
        }
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// Weighted contribution plus the raw value it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScore {
    pub weighted: f64,
    pub raw: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttendanceScore {
    pub weighted: f64,
    pub percentage: f64,
}

/// Derived scorecard for one employee. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub employee: EmployeeIdentity,
    pub task_closing: ComponentScore,
    pub attendance: AttendanceScore,
    pub quality: ComponentScore,
    pub kpi: ComponentScore,
    pub unrounded_total: f64,
    pub total: f64,
    pub grade: AdminGrade,
    pub tasks_considered: usize,
    pub attendance_detail: AttendanceMetrics,
}

impl EvaluationResult {
    pub fn self_view_grade(&self) -> SelfViewGrade {
        self_view_grade(self.total)
    }
}

/// Stateless evaluator applying the component weights to an employee's records.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    config: EvaluationConfig,
}

impl EvaluationEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn attendance(
        &self,
        employee: &EmployeeIdentity,
        month: YearMonth,
        attendance: &AttendanceMap,
    ) -> AttendanceMetrics {
        resolve_metrics(employee, month, attendance, &self.config.calendar)
    }

    pub fn evaluate(
        &self,
        employee: &EmployeeIdentity,
        inputs: EvaluationInputs<'_>,
        window: &EvaluationWindow,
    ) -> EvaluationResult {
        let weights = &self.config.weights;

        let signals = rules::collect_task_signals(inputs.tasks, employee, window.range.as_ref());
        let completion =
            completion_percentage(signals.tally.completed, signals.tally.delayed);
        let task_closing = ComponentScore {
            weighted: weighted(completion, weights.task_closing),
            raw: completion,
        };

        let quality_average = mean(&signals.quality_marks);
        let quality = ComponentScore {
            weighted: weighted(quality_average, weights.quality),
            raw: quality_average,
        };

        let attendance_detail = self.attendance(employee, window.attendance_month, inputs.attendance);
        let attendance = AttendanceScore {
            weighted: weighted(attendance_detail.percentage, weights.attendance),
            percentage: attendance_detail.percentage,
        };

        let kpi_average = mean(&rules::kpi_scores(inputs.kpis, employee));
        let kpi = ComponentScore {
            weighted: weighted(kpi_average, weights.kpi),
            raw: kpi_average,
        };

        let unrounded_total =
            task_closing.weighted + attendance.weighted + quality.weighted + kpi.weighted;
        let total = round1(unrounded_total);
        let grade = admin_grade(total);

        debug!(
            employee = employee.display_key(),
            tasks = signals.tally.considered,
            completed = signals.tally.completed,
            delayed = signals.tally.delayed,
            in_process = signals.tally.in_process,
            cancelled = signals.tally.cancelled,
            total,
            grade = grade.label(),
            "evaluation computed"
        );

        EvaluationResult {
            employee: employee.clone(),
            task_closing,
            attendance,
            quality,
            kpi,
            unrounded_total,
            total,
            grade,
            tasks_considered: signals.tally.considered,
            attendance_detail,
        }
    }
}
