use serde::Serialize;

use crate::performance::calendar::HolidayCalendar;

/// Point caps for each scoring component. Raw values are scaled as `raw / 100 * cap`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentWeights {
    pub task_closing: f64,
    pub attendance: f64,
    pub quality: f64,
    pub kpi: f64,
}

impl ComponentWeights {
    pub const STANDARD: Self = Self {
        task_closing: 50.0,
        attendance: 15.0,
        quality: 20.0,
        kpi: 15.0,
    };

    pub fn cap_total(&self) -> f64 {
        self.task_closing + self.attendance + self.quality + self.kpi
    }
}

/// Rubric configuration: component weights and the holiday table for working days.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub weights: ComponentWeights,
    pub calendar: HolidayCalendar,
}

impl EvaluationConfig {
    pub fn standard() -> Self {
        Self {
            weights: ComponentWeights::STANDARD,
            calendar: HolidayCalendar::standard(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::standard()
    }
}
