//! Record store trait

use crate::error::StoreResult;
use async_trait::async_trait;
use zeladoria_types::Record;

/// Whole-collection access to the complaint sheet.
///
/// There is no partial update and no delete: callers read everything,
/// change it in memory, and overwrite everything. Concurrent writers race
/// and the last one wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short name of the backend, for logs
    fn backend(&self) -> &'static str;

    /// Read every record in sheet order
    async fn try_load_all(&self) -> StoreResult<Vec<Record>>;

    /// Overwrite the sheet with `records`, in the given order
    async fn save_all(&self, records: &[Record]) -> StoreResult<()>;

    /// Read every record, degrading to an empty collection on any failure
    /// so the caller can always render something.
    async fn load_all(&self) -> Vec<Record> {
        match self.try_load_all().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    backend = self.backend(),
                    error = %e,
                    "Record store unreadable, continuing with an empty collection"
                );
                Vec::new()
            }
        }
    }
}
