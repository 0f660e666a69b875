//! Photo storage on the local filesystem

use crate::error::{StoreError, StoreResult};
use std::path::{Path, PathBuf};
use zeladoria_types::{is_no_image, ImageKind, ProtocolId};

/// Default directory for photos, relative to the data directory
pub const DEFAULT_PHOTO_DIR: &str = "photos";

/// Stores one image per complaint under `<base>/<dir>/<file stem>.<ext>`.
///
/// References written to the sheet are relative to `base`, using `/`
/// separators, e.g. `photos/001_2026.jpg`.
#[derive(Clone, Debug)]
pub struct PhotoStore {
    base_dir: PathBuf,
    photo_dir: String,
}

impl PhotoStore {
    pub fn new(base_dir: impl Into<PathBuf>, photo_dir: impl Into<String>) -> Self {
        let photo_dir: String = photo_dir.into();
        Self {
            base_dir: base_dir.into(),
            photo_dir: photo_dir.trim_matches('/').to_string(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Save a photo for `protocol_id` and return its sheet reference.
    ///
    /// The format is taken from the bytes, not from any file name. If the
    /// name is already used (duplicate protocol ids), `-2`, `-3`, ... is
    /// appended to the stem.
    pub async fn store(&self, protocol_id: &ProtocolId, bytes: &[u8]) -> StoreResult<String> {
        let kind = ImageKind::detect(bytes).ok_or(StoreError::UnsupportedImage)?;
        let dir = self.base_dir.join(&self.photo_dir);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::Photo(format!("{}: {}", dir.display(), e)))?;

        let stem = protocol_id.file_stem();
        let mut file_name = format!("{}.{}", stem, kind.extension());
        let mut n = 2;
        while tokio::fs::try_exists(dir.join(&file_name))
            .await
            .unwrap_or(false)
        {
            file_name = format!("{}-{}.{}", stem, n, kind.extension());
            n += 1;
        }

        let path = dir.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StoreError::Photo(format!("{}: {}", path.display(), e)))?;

        let reference = if self.photo_dir.is_empty() {
            file_name
        } else {
            format!("{}/{}", self.photo_dir, file_name)
        };
        tracing::debug!(protocol_id = %protocol_id, photo = %reference, "Photo stored");
        Ok(reference)
    }

    /// Remove a stored photo. Missing files are ignored.
    pub async fn remove(&self, photo_ref: &str) -> StoreResult<()> {
        let Some(path) = self.resolve(photo_ref) else {
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Photo(format!("{}: {}", path.display(), e))),
        }
    }

    /// Local path of a sheet reference, if it names an existing file.
    ///
    /// The "no image" sentinels and blank references resolve to nothing.
    pub fn resolve(&self, photo_ref: &str) -> Option<PathBuf> {
        if is_no_image(photo_ref) {
            return None;
        }
        let path = self.base_dir.join(photo_ref.trim());
        path.is_file().then_some(path)
    }
}
