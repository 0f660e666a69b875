//! Attached photo formats

use serde::{Deserialize, Serialize};

/// Image encodings accepted as complaint photos
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Detect the encoding from the file's magic bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageKind::Jpeg)
        } else if bytes.starts_with(PNG_MAGIC) {
            Some(ImageKind::Png)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }
}
