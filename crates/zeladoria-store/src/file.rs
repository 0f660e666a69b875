//! CSV file record store

use crate::csv;
use crate::error::{StoreError, StoreResult};
use crate::sheet::SheetGrid;
use crate::traits::RecordStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use zeladoria_types::Record;

/// Record store backed by a local CSV file.
///
/// A missing file is an empty sheet. Overwrites go through a sibling temp
/// file and a rename, so a failed write leaves the old file intact.
#[derive(Clone, Debug)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "complaints.csv".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl RecordStore for CsvFileStore {
    fn backend(&self) -> &'static str {
        "csv"
    }

    async fn try_load_all(&self) -> StoreResult<Vec<Record>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Sheet file not found, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::Read(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let records = csv::decode(&text)?.to_records()?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "Sheet loaded");
        Ok(records)
    }

    async fn save_all(&self, records: &[Record]) -> StoreResult<()> {
        let text = csv::encode(&SheetGrid::from_records(records));
        let write_err = |e: std::io::Error| StoreError::Write(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, text.as_bytes())
            .await
            .map_err(write_err)?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(write_err(e));
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "Sheet overwritten");
        Ok(())
    }
}
