use super::fields::{self, first_present, Document};
use crate::performance::attendance::{AttendanceRecord, AttendanceStatus};
use crate::performance::calendar::parse_month;
use crate::performance::domain::Employee;
use crate::performance::kpi::KpiEntry;
use crate::performance::quality::QualityMark;
use crate::performance::Task;

pub(crate) fn decode_employee(doc: &Document) -> Employee {
    Employee {
        name: first_present(doc, fields::DISPLAY_NAME),
        id: first_present(doc, fields::EMPLOYEE_ID),
        email: first_present(doc, fields::USER_EMAIL),
    }
}

pub(crate) fn decode_task(doc: &Document, index: usize) -> Task {
    let saved = first_present(doc, fields::QUALITY_SAVED);
    let draft = first_present(doc, fields::QUALITY_DRAFT);
    let quality = match (saved, draft) {
        (Some(mark), _) => QualityMark::Locked(mark),
        (None, Some(draft)) => QualityMark::Pending(draft),
        (None, None) => QualityMark::Unset,
    };

    Task {
        id: first_present(doc, fields::TASK_ID).unwrap_or_else(|| format!("task-{index}")),
        status: first_present(doc, fields::TASK_STATUS).unwrap_or_default(),
        assigned_to_id: first_present(doc, fields::ASSIGNEE_ID),
        assigned_email: first_present(doc, fields::ASSIGNEE_EMAIL),
        quality,
        start_date: first_present(doc, fields::TASK_START),
        end_date: first_present(doc, fields::TASK_END),
    }
}

pub(crate) fn decode_attendance(doc: &Document) -> Result<AttendanceRecord, String> {
    let user_id = first_present(doc, fields::OWNER_ID);
    let user_email = first_present(doc, fields::USER_EMAIL);
    if user_id.is_none() && user_email.is_none() {
        return Err("attendance record has no user id or email".to_string());
    }

    let date = first_present(doc, fields::ATTENDANCE_DATE)
        .ok_or_else(|| "attendance record has no readable date".to_string())?;

    let raw_status = first_present(doc, fields::ATTENDANCE_STATUS)
        .ok_or_else(|| "attendance record has no status".to_string())?;
    let status = AttendanceStatus::parse(&raw_status)
        .ok_or_else(|| format!("unknown attendance status '{raw_status}'"))?;

    Ok(AttendanceRecord {
        user_id,
        user_email,
        date,
        status,
    })
}

/// A decoded KPI entry plus any period problems. Those do not drop the entry, since the
/// score is averaged regardless of month and year.
pub(crate) struct DecodedKpi {
    pub entry: KpiEntry,
    pub warnings: Vec<String>,
}

pub(crate) fn decode_kpi(doc: &Document) -> Result<DecodedKpi, String> {
    let user_id = first_present(doc, fields::OWNER_ID);
    let user_email = first_present(doc, fields::USER_EMAIL);
    if user_id.is_none() && user_email.is_none() {
        return Err("KPI entry has no user id or email".to_string());
    }

    let score = first_present(doc, fields::KPI_SCORE)
        .ok_or_else(|| "KPI entry has no numeric score".to_string())?;
    if score < 0.0 {
        return Err(format!("KPI score {score} is negative"));
    }

    let mut warnings = Vec::new();
    let month = match first_present(doc, fields::KPI_MONTH) {
        Some(raw) => {
            let month = parse_month(&raw);
            if month.is_none() {
                warnings.push(format!("unknown KPI month '{raw}'"));
            }
            month
        }
        None => {
            warnings.push("KPI entry has no month".to_string());
            None
        }
    };
    let year = first_present(doc, fields::KPI_YEAR);
    if year.is_none() {
        warnings.push("KPI entry has no readable year".to_string());
    }

    Ok(DecodedKpi {
        entry: KpiEntry {
            user_id,
            user_email,
            month,
            year,
            score,
        },
        warnings,
    })
}
