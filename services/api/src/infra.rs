use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use taskdesk::performance::{DashboardSnapshot, SnapshotStore, SnapshotStoreError, YearMonth};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local holder of the latest published snapshot.
#[derive(Default, Clone)]
pub(crate) struct InMemorySnapshotStore {
    snapshot: Arc<RwLock<Option<Arc<DashboardSnapshot>>>>,
}

impl SnapshotStore for InMemorySnapshotStore {
    fn latest(&self) -> Result<Option<Arc<DashboardSnapshot>>, SnapshotStoreError> {
        let guard = self
            .snapshot
            .read()
            .map_err(|_| SnapshotStoreError::Unavailable("snapshot lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn replace(&self, snapshot: DashboardSnapshot) -> Result<(), SnapshotStoreError> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| SnapshotStoreError::Unavailable("snapshot lock poisoned".to_string()))?;
        *guard = Some(Arc::new(snapshot));
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_year_month(raw: &str) -> Result<YearMonth, String> {
    raw.parse::<YearMonth>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_starts_empty_and_keeps_latest() {
        let store = InMemorySnapshotStore::default();
        assert!(store.latest().expect("readable").is_none());

        store
            .replace(DashboardSnapshot::default())
            .expect("writable");
        let first = store.latest().expect("readable").expect("snapshot present");
        assert!(first.employees.is_empty());
    }

    #[test]
    fn parses_cli_dates_and_months() {
        assert_eq!(
            parse_date(" 2025-06-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid"))
        );
        assert!(parse_date("06/01/2025").is_err());
        assert_eq!(
            parse_year_month("2025-06").map(|month| month.month()),
            Ok(6)
        );
        assert!(parse_year_month("2025-13").is_err());
    }
}
