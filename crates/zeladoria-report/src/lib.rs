//! PDF complaint reports for Zeladoria
//!
//! [`render`] turns one [`Record`](zeladoria_types::Record) into a single
//! page A4 document: a title, the labelled fields in a fixed order, the
//! wrapped description and, when available, the complaint photo.
//!
//! Text uses the standard Helvetica fonts with WinAnsiEncoding, so
//! Portuguese accents render without embedding a font. Rendering is
//! deterministic: no timestamps or random ids end up in the file.

#![deny(unsafe_code)]

mod errors;
mod image;
mod render;
mod text;

pub use errors::{ReportRenderError, ReportResult};
pub use render::{render, suggested_filename, REPORT_TITLE};
