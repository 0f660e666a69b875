//! Record store adapters for Zeladoria
//!
//! The complaint collection lives in a spreadsheet and is treated as one
//! document: it is read whole at the start of every interaction and
//! overwritten whole on every change. There is no partial update, no
//! delete and no locking; concurrent editors race and the last write wins.
//!
//! # Backends
//!
//! - [`CsvFileStore`]: a local CSV file
//! - [`SheetsHttpStore`]: a Google Sheets range over the v4 values API
//! - [`InMemoryStore`]: tests and dry runs
//!
//! All three persist the same [`SheetGrid`] layout (see [`SHEET_HEADER`]),
//! so `save_all(load_all())` reproduces the sheet exactly.
//!
//! Photos are kept apart from the sheet by [`PhotoStore`], which writes one
//! file per record and hands back the relative path stored in `PhotoPath`.

#![deny(unsafe_code)]

pub mod csv;
mod error;
mod file;
mod memory;
mod photo;
mod sheet;
mod sheets;
mod traits;

pub use error::{StoreError, StoreResult};
pub use file::CsvFileStore;
pub use memory::InMemoryStore;
pub use photo::{PhotoStore, DEFAULT_PHOTO_DIR};
pub use sheet::{SheetGrid, LEGACY_SHEET_HEADER, SHEET_HEADER};
pub use sheets::{SheetsHttpStore, SheetsSettings, DEFAULT_SHEETS_ENDPOINT};
pub use traits::RecordStore;
