use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

pub(crate) type Document = Map<String, Value>;

/// Reads one semantic value out of a raw document, or `None` if absent/blank.
pub(crate) type Accessor<T> = fn(&Document) -> Option<T>;

/// Runs accessors in priority order, stopping at the first that yields a value.
pub(crate) fn first_present<T>(doc: &Document, accessors: &[Accessor<T>]) -> Option<T> {
    accessors.iter().find_map(|read| read(doc))
}

/// Identity of a user document itself.
pub(crate) const EMPLOYEE_ID: &[Accessor<String>] = &[
    |doc: &Document| text(doc, "uid"),
    |doc: &Document| text(doc, "id"),
    |doc: &Document| text(doc, "userId"),
    |doc: &Document| text(doc, "employeeId"),
];

/// Owner of an attendance or KPI document; `id` there is the document's own key.
pub(crate) const OWNER_ID: &[Accessor<String>] = &[
    |doc: &Document| text(doc, "userId"),
    |doc: &Document| text(doc, "uid"),
    |doc: &Document| text(doc, "employeeId"),
];

pub(crate) const USER_EMAIL: &[Accessor<String>] = &[
    |doc: &Document| text(doc, "userEmail"),
    |doc: &Document| text(doc, "email"),
    |doc: &Document| text(doc, "employeeEmail"),
];

pub(crate) const DISPLAY_NAME: &[Accessor<String>] = &[
    |doc: &Document| text(doc, "name"),
    |doc: &Document| text(doc, "displayName"),
    |doc: &Document| text(doc, "fullName"),
];

pub(crate) const TASK_ID: &[Accessor<String>] = &[
    |doc: &Document| text(doc, "id"),
    |doc: &Document| text(doc, "taskId"),
];

pub(crate) const TASK_STATUS: &[Accessor<String>] = &[
    |doc: &Document| text(doc, "status"),
    |doc: &Document| text(doc, "taskStatus"),
];

pub(crate) const ASSIGNEE_ID: &[Accessor<String>] = &[
    |doc: &Document| text(doc, "assignedToId"),
    |doc: &Document| text(doc, "assignedTo"),
    |doc: &Document| text(doc, "assigneeId"),
];

pub(crate) const ASSIGNEE_EMAIL: &[Accessor<String>] = &[
    |doc: &Document| text(doc, "assignedEmail"),
    |doc: &Document| text(doc, "assignedToEmail"),
    |doc: &Document| text(doc, "assigneeEmail"),
];

pub(crate) const TASK_START: &[Accessor<NaiveDate>] = &[
    |doc: &Document| date(doc, "startDate"),
    |doc: &Document| date(doc, "createdAt"),
];

pub(crate) const TASK_END: &[Accessor<NaiveDate>] = &[
    |doc: &Document| date(doc, "endDate"),
    |doc: &Document| date(doc, "dueDate"),
    |doc: &Document| date(doc, "deadline"),
];

/// Saved marks count only when stored as JSON numbers; a quoted mark is not a save.
pub(crate) const QUALITY_SAVED: &[Accessor<f64>] = &[
    |doc: &Document| strict_number(doc, "qualityMark"),
    |doc: &Document| strict_number(doc, "quality"),
];

pub(crate) const QUALITY_DRAFT: &[Accessor<f64>] = &[
    |doc: &Document| number(doc, "qualityDraft"),
    |doc: &Document| number(doc, "pendingQualityMark"),
];

pub(crate) const ATTENDANCE_DATE: &[Accessor<NaiveDate>] = &[
    |doc: &Document| date(doc, "date"),
    |doc: &Document| date(doc, "attendanceDate"),
    |doc: &Document| date(doc, "day"),
];

pub(crate) const ATTENDANCE_STATUS: &[Accessor<String>] = &[
    |doc: &Document| text(doc, "status"),
    |doc: &Document| text(doc, "attendance"),
];

pub(crate) const KPI_MONTH: &[Accessor<String>] = &[|doc: &Document| text(doc, "month")];

pub(crate) const KPI_YEAR: &[Accessor<i32>] = &[|doc: &Document| integer(doc, "year")];

pub(crate) const KPI_SCORE: &[Accessor<f64>] = &[
    |doc: &Document| number(doc, "score"),
    |doc: &Document| number(doc, "kpiScore"),
    |doc: &Document| number(doc, "kpi"),
];

pub(crate) fn text(doc: &Document, field: &str) -> Option<String> {
    match doc.get(field)? {
        Value::String(raw) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) fn number(doc: &Document, field: &str) -> Option<f64> {
    let value = match doc.get(field)? {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

pub(crate) fn strict_number(doc: &Document, field: &str) -> Option<f64> {
    match doc.get(field)? {
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()),
        _ => None,
    }
}

/// Whole numbers only; `2025.0` and `"2025"` are accepted, `2025.5` is not.
pub(crate) fn integer(doc: &Document, field: &str) -> Option<i32> {
    let value = number(doc, field)?;
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

pub(crate) fn date(doc: &Document, field: &str) -> Option<NaiveDate> {
    parse_date_value(doc.get(field)?)
}

/// Accepts ISO dates, RFC 3339 and naive timestamps, epoch milliseconds, and
/// `{seconds, nanoseconds}` timestamp objects (with or without a leading underscore).
pub(crate) fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(raw) => parse_date_str(raw),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        Value::Object(fields) => fields
            .get("seconds")
            .or_else(|| fields.get("_seconds"))
            .and_then(Value::as_i64)
            .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}
