mod summary;
pub mod views;

pub use summary::{EmployeeEvaluation, SkippedEmployee, TeamReport};
pub use views::{AttendanceMetricsView, EvaluationView, GradeDistribution, TeamReportView};
