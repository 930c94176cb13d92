use crate::performance::domain::{DateRange, EmployeeIdentity, Task};
use crate::performance::kpi::KpiEntry;
use crate::performance::status::CanonicalStatus;

/// Rounds to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Share of closed tasks finished on time, 0 when nothing was closed.
pub fn completion_percentage(completed: usize, delayed: usize) -> f64 {
    let closed = completed + delayed;
    if closed == 0 {
        return 0.0;
    }
    completed as f64 * 100.0 / closed as f64
}

/// Scales a 0-100 raw value onto a component cap. Values above 100 are not clamped.
pub fn weighted(raw: f64, cap: f64) -> f64 {
    raw * cap / 100.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TaskTally {
    pub considered: usize,
    pub completed: usize,
    pub delayed: usize,
    pub in_process: usize,
    pub cancelled: usize,
}

pub(crate) struct TaskSignals {
    pub tally: TaskTally,
    pub quality_marks: Vec<f64>,
}

pub(crate) fn collect_task_signals(
    tasks: &[Task],
    identity: &EmployeeIdentity,
    range: Option<&DateRange>,
) -> TaskSignals {
    let mut tally = TaskTally::default();
    let mut quality_marks = Vec::new();

    let relevant = tasks
        .iter()
        .filter(|task| task.is_assigned_to(identity))
        .filter(|task| range.map_or(true, |range| range.admits(task)));

    for task in relevant {
        tally.considered += 1;
        match task.canonical_status() {
            CanonicalStatus::Completed => tally.completed += 1,
            CanonicalStatus::Delayed => tally.delayed += 1,
            CanonicalStatus::InProcess => tally.in_process += 1,
            CanonicalStatus::Cancelled => tally.cancelled += 1,
        }

        if let Some(mark) = task.quality.saved_value() {
            quality_marks.push(mark);
        }
    }

    TaskSignals {
        tally,
        quality_marks,
    }
}

pub(crate) fn kpi_scores(entries: &[KpiEntry], identity: &EmployeeIdentity) -> Vec<f64> {
    entries
        .iter()
        .filter(|entry| entry.belongs_to(identity))
        .map(|entry| entry.score)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_every_status_but_closes_only_two() {
        let identity = EmployeeIdentity::new(Some("u-1"), None).expect("valid");
        let assigned = |id: &str, status: &str| Task {
            assigned_to_id: Some("u-1".to_string()),
            ..Task::new(id, status)
        };
        let tasks = [
            assigned("a", "Completed"),
            assigned("b", "delayed"),
            assigned("c", "in progress"),
            assigned("d", "Cancelled"),
            Task::new("e", "Completed"),
        ];

        let signals = collect_task_signals(&tasks, &identity, None);
        assert_eq!(
            signals.tally,
            TaskTally {
                considered: 4,
                completed: 1,
                delayed: 1,
                in_process: 1,
                cancelled: 1,
            }
        );
        assert_eq!(
            completion_percentage(signals.tally.completed, signals.tally.delayed),
            50.0
        );
    }

    #[test]
    fn completion_is_zero_without_closed_tasks() {
        assert_eq!(completion_percentage(0, 0), 0.0);
        assert_eq!(weighted(completion_percentage(0, 0), 50.0), 0.0);
    }

    #[test]
    fn equal_completed_and_delayed_is_fifty_percent() {
        for count in 1..20 {
            assert_eq!(completion_percentage(count, count), 50.0);
        }
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[80.0, 120.0]), 100.0);
    }

    #[test]
    fn weighted_is_not_clamped() {
        assert_eq!(weighted(100.0, 15.0), 15.0);
        assert_eq!(weighted(120.0, 15.0), 18.0);
    }

    #[test]
    fn round1_is_idempotent() {
        let mut value = -250.0;
        while value < 250.0 {
            let once = round1(value);
            assert_eq!(round1(once), once, "round1 not idempotent for {value}");
            value += 0.037;
        }
        for value in [0.05, 81.75, 90.95, 1e9 + 0.25, f64::MIN_POSITIVE] {
            assert_eq!(round1(round1(value)), round1(value));
        }
    }

    #[test]
    fn round1_rounds_half_away_from_zero() {
        assert_eq!(round1(81.75), 81.8);
        assert_eq!(round1(90.94), 90.9);
        assert_eq!(round1(-0.25), -0.3);
    }
}
