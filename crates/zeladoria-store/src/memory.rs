//! In-memory record store

use crate::error::{StoreError, StoreResult};
use crate::sheet::SheetGrid;
use crate::traits::RecordStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;
use zeladoria_types::Record;

/// In-memory store for tests and dry runs.
///
/// Keeps the sheet as a [`SheetGrid`], the same external form the other
/// backends persist, and can be told to fail reads or writes.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    grid: RwLock<SheetGrid>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing collection
    pub fn with_records(records: &[Record]) -> Self {
        Self {
            grid: RwLock::new(SheetGrid::from_records(records)),
            ..Self::default()
        }
    }

    /// Start with raw sheet contents
    pub fn with_grid(grid: SheetGrid) -> Self {
        Self {
            grid: RwLock::new(grid),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful overwrites so far
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current sheet contents
    pub async fn snapshot(&self) -> SheetGrid {
        self.grid.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn try_load_all(&self) -> StoreResult<Vec<Record>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read("store unreachable".into()));
        }
        self.grid.read().await.to_records()
    }

    async fn save_all(&self, records: &[Record]) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write("store rejected the update".into()));
        }
        *self.grid.write().await = SheetGrid::from_records(records);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
