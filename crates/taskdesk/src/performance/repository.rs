use std::sync::Arc;

use super::snapshot::DashboardSnapshot;

/// Holder of the most recent dashboard snapshot. The caller decides when to refresh it.
pub trait SnapshotStore: Send + Sync {
    fn latest(&self) -> Result<Option<Arc<DashboardSnapshot>>, SnapshotStoreError>;
    fn replace(&self, snapshot: DashboardSnapshot) -> Result<(), SnapshotStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotStoreError {
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
}
