use crate::infra::{parse_date, parse_year_month};
use chrono::{Local, Month, NaiveDate};
use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;
use taskdesk::error::AppError;
use taskdesk::performance::{
    DashboardSnapshot, DateRange, EvaluationConfig, EvaluationEngine, EvaluationView,
    EvaluationWindow, KpiEntry, KpiLedger, QualityMark, TeamReport, YearMonth,
};

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Dashboard export (JSON object of users, tasks, attendance and kpis collections)
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Attendance month (YYYY-MM). Defaults to the current month.
    #[arg(long, value_parser = parse_year_month)]
    pub(crate) month: Option<YearMonth>,
    /// Only count tasks dated on or after this day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) from: Option<NaiveDate>,
    /// Only count tasks dated on or before this day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) to: Option<NaiveDate>,
    /// Print a single employee, matched by id or email
    #[arg(long)]
    pub(crate) employee: Option<String>,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit the demo team report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        snapshot,
        month,
        from,
        to,
        employee,
        json,
    } = args;

    let snapshot = DashboardSnapshot::from_path(&snapshot)?;
    let month = month.unwrap_or_else(|| YearMonth::of(Local::now().date_naive()));
    let window = evaluation_window(month, from, to);

    let engine = EvaluationEngine::new(EvaluationConfig::standard());
    let report = TeamReport::build(&engine, &snapshot, window);

    match employee {
        Some(key) => match report.find(&key) {
            Some(row) => {
                let view = EvaluationView::new(row.name.clone(), row.result.clone());
                if json {
                    print_json(&view);
                } else {
                    render_scorecard(&view);
                }
            }
            None => println!("No evaluated employee matches '{key}'"),
        },
        None if json => print_json(&report.summary()),
        None => render_team_report(&report),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let snapshot = DashboardSnapshot::from_json(&demo_snapshot())?;
    let month = YearMonth::from_month(2025, Month::June);
    let engine = EvaluationEngine::new(EvaluationConfig::standard());
    let report = TeamReport::build(&engine, &snapshot, EvaluationWindow::month(month));

    if args.json {
        print_json(&report.summary());
        return Ok(());
    }

    println!("Performance evaluation demo");
    render_team_report(&report);

    println!("\nWrite guards");
    let mut mark = QualityMark::default();
    match mark.save(88.0).and_then(|_| mark.save(95.0)) {
        Ok(value) => println!("- Quality mark unexpectedly overwritten with {value}"),
        Err(err) => println!("- Second quality save rejected: {err}"),
    }

    let mut ledger = KpiLedger::new();
    for score in [85.0, 92.0] {
        let entry = KpiEntry {
            user_id: Some("u-ava".to_string()),
            user_email: None,
            month: Some(Month::June),
            year: Some(2025),
            score,
        };
        match ledger.record(entry) {
            Ok(()) => println!("- Recorded June KPI {score}"),
            Err(err) => println!("- KPI {score} rejected: {err}"),
        }
    }

    Ok(())
}

fn evaluation_window(
    month: YearMonth,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> EvaluationWindow {
    let range = DateRange::new(from, to);
    let window = EvaluationWindow::month(month);
    if range.is_active() {
        window.with_range(range)
    } else {
        window
    }
}

fn render_team_report(report: &TeamReport) {
    println!("Attendance month {}", report.window.attendance_month);
    if let Some(range) = report.window.range {
        println!(
            "Task window {} .. {}",
            range.start.map_or_else(|| "start".to_string(), |d| d.to_string()),
            range.end.map_or_else(|| "today".to_string(), |d| d.to_string())
        );
    }

    println!(
        "{:<28} {:>8} {:>10} {:>8} {:>6} {:>7} {:>5} {:>5}",
        "Employee", "Tasks", "Attendance", "Quality", "KPI", "Total", "Grade", "Self"
    );
    for row in &report.rows {
        let result = &row.result;
        let label = row
            .name
            .as_deref()
            .unwrap_or_else(|| result.employee.display_key());
        println!(
            "{:<28} {:>8.2} {:>10.2} {:>8.2} {:>6.2} {:>7.1} {:>5} {:>5}",
            label,
            result.task_closing.weighted,
            result.attendance.weighted,
            result.quality.weighted,
            result.kpi.weighted,
            result.total,
            result.grade.label(),
            result.self_view_grade().label()
        );
    }

    let distribution = report.grade_distribution();
    println!(
        "Grades: A={} B={} C={} | mean total {:.1}",
        distribution.a,
        distribution.b,
        distribution.c,
        report.mean_total()
    );

    for skipped in &report.skipped {
        println!(
            "Skipped employee #{} ({}): {}",
            skipped.index,
            skipped.name.as_deref().unwrap_or("unnamed"),
            skipped.reason
        );
    }
    if report.snapshot_issues > 0 {
        println!(
            "{} snapshot document(s) could not be decoded",
            report.snapshot_issues
        );
    }
}

fn render_scorecard(view: &EvaluationView) {
    let result = &view.result;
    let detail = &result.attendance_detail;
    println!(
        "{}",
        view.name
            .as_deref()
            .unwrap_or_else(|| result.employee.display_key())
    );
    println!(
        "- Task closing: {:.2} / 50 ({:.1}% of {} tasks)",
        result.task_closing.weighted, result.task_closing.raw, result.tasks_considered
    );
    println!(
        "- Attendance: {:.2} / 15 ({:.1}% over {} working days, {} unmarked)",
        result.attendance.weighted, result.attendance.percentage, detail.working_days, detail.unmarked_days
    );
    println!(
        "- Quality: {:.2} / 20 (average mark {:.1})",
        result.quality.weighted, result.quality.raw
    );
    println!(
        "- KPI: {:.2} / 15 (average score {:.1})",
        result.kpi.weighted, result.kpi.raw
    );
    println!(
        "- Total {:.1} | admin grade {} | self-view grade {}",
        result.total, view.grade_label, view.self_view_grade
    );
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("JSON output unavailable: {err}"),
    }
}

/// Two employees with a June 2025 history, plus one record the engine cannot identify.
fn demo_snapshot() -> Value {
    let present = [2, 3, 4, 5, 9, 10, 11, 12, 13, 14, 16, 17, 18, 19, 20, 21, 23, 24];
    let mut attendance: Vec<Value> = present
        .iter()
        .map(|day: &u32| json!({ "userId": "u-ava", "date": format!("2025-06-{day:02}"), "status": "present" }))
        .collect();
    for day in [25, 26] {
        attendance.push(json!({ "userId": "u-ava", "date": format!("2025-06-{day:02}"), "status": "absent" }));
    }
    for (day, status) in [(2, "present"), (3, "halfDay"), (4, "shortLeave"), (5, "outdoor"), (9, "absent")] {
        attendance.push(json!({ "userEmail": "bo@example.com", "date": format!("2025-06-{day:02}"), "status": status }));
    }

    json!({
        "users": [
            { "uid": "u-ava", "email": "ava@example.com", "name": "Ava Stone" },
            { "email": "Bo@Example.com", "name": "Bo Reyes" },
            { "name": "Unlinked Contractor" }
        ],
        "tasks": [
            { "id": "t1", "title": "Quarterly audit", "status": "Completed", "assignedToId": "u-ava", "qualityMark": 80, "endDate": "2025-06-05" },
            { "id": "t2", "title": "Vendor onboarding", "status": "completed", "assignedToId": "u-ava", "qualityMark": 90, "endDate": "2025-06-12" },
            { "id": "t3", "title": "Payroll reconciliation", "status": "COMPLETED", "assignedToId": "u-ava", "qualityMark": 100, "endDate": "2025-06-19" },
            { "id": "t4", "title": "Policy refresh", "status": "delayed", "assignedToId": "u-ava", "endDate": "2025-06-26" },
            { "id": "t5", "title": "Office move", "status": "Completed", "assignedEmail": "bo@example.com", "qualityMark": 70, "endDate": "2025-06-10" },
            { "id": "t6", "title": "Supplier review", "status": "in progress", "assignedEmail": "bo@example.com", "qualityDraft": 95 }
        ],
        "attendance": attendance,
        "kpis": [
            { "userId": "u-ava", "month": "June", "year": 2025, "score": 85 },
            { "userEmail": "bo@example.com", "month": "May", "year": 2025, "score": 110 }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_snapshot_scores_the_sample_team() {
        let snapshot = DashboardSnapshot::from_json(&demo_snapshot()).expect("demo decodes");
        assert!(snapshot.issues.is_empty());

        let engine = EvaluationEngine::new(EvaluationConfig::standard());
        let month = YearMonth::from_month(2025, Month::June);
        let report = TeamReport::build(&engine, &snapshot, EvaluationWindow::month(month));

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        let ava = report.find("u-ava").expect("ava evaluated");
        assert!((ava.result.total - 81.8).abs() < 1e-9);
    }

    #[test]
    fn evaluation_window_only_filters_when_a_bound_is_given() {
        let month = YearMonth::new(2025, 6).expect("valid month");
        assert!(evaluation_window(month, None, None).range.is_none());

        let from = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let window = evaluation_window(month, Some(from), None);
        assert_eq!(window.range.and_then(|range| range.start), Some(from));
    }
}
