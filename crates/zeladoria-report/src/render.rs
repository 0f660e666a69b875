//! Single page A4 complaint report

use crate::image::EmbeddedImage;
use crate::text::{win_ansi, wrap};
use crate::{ReportRenderError, ReportResult};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::path::Path;
use zeladoria_types::Record;

/// Heading printed at the top of every report
pub const REPORT_TITLE: &str = "Zeladoria Digital - Complaint Report";

// Page geometry in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;
const VALUE_X: i64 = 176;
const LINE_HEIGHT: i64 = 18;
const TITLE_SIZE: i64 = 16;
const BODY_SIZE: i64 = 11;
const FOOTER_SIZE: i64 = 8;
const FOOTER_Y: i64 = 32;

const VALUE_COLUMNS: usize = 64;
const DESCRIPTION_MAX_LINES: usize = 24;
const MIN_IMAGE_HEIGHT: i64 = 72;

/// Render the report for one record.
///
/// `photo` is the resolved path of the record's image. A path that does not
/// exist, or an image the report cannot carry, leaves the image section out.
/// The same record and photo always produce the same bytes.
pub fn render(record: &Record, photo: Option<&Path>) -> ReportResult<Vec<u8>> {
    let image = match photo {
        Some(path) => load_photo(path)?,
        None => None,
    };

    let mut page = PageWriter::new();
    page.text(MARGIN, "F2", TITLE_SIZE, REPORT_TITLE);
    page.advance(LINE_HEIGHT * 2);

    page.field("Protocol:", record.protocol_id.as_str());
    page.field("Ombudsman ref:", &record.ombudsman_ref);
    page.field("Date:", &record.formatted_date());
    page.field("Category:", record.category.label());
    page.field("Address:", &record.address);
    page.field("Status:", record.status.label());
    page.description(&record.description);

    let mut xobjects = Dictionary::new();
    let mut doc = Document::with_version("1.5");

    if let Some(image) = image {
        page.advance(LINE_HEIGHT / 2);
        if let Some(ops) = page.image_ops(&image) {
            let image_id = doc.add_object(image.into_stream());
            xobjects.set("Im1", image_id);
            page.ops.extend(ops);
        } else {
            tracing::warn!(
                protocol_id = %record.protocol_id,
                "No room left for the photo, omitted from report"
            );
        }
    }

    page.footer(&format!("Zeladoria Digital - protocol {}", record.protocol_id));

    let content = Content { operations: page.ops }
        .encode()
        .map_err(|e| ReportRenderError::Pdf(e.to_string()))?;

    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font("Helvetica"));
    let bold_id = doc.add_object(font("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
        "XObject" => xobjects,
    });
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(win_ansi(&format!("Complaint {}", record.protocol_id))),
        "Producer" => Object::string_literal("zeladoria-report"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ReportRenderError::Pdf(e.to_string()))?;

    tracing::debug!(protocol_id = %record.protocol_id, bytes = bytes.len(), "Report rendered");
    Ok(bytes)
}

/// File name a report for `record` should be saved under
pub fn suggested_filename(record: &Record) -> String {
    format!("report_{}.pdf", record.protocol_id.file_stem())
}

fn load_photo(path: &Path) -> ReportResult<Option<EmbeddedImage>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Photo missing, image section omitted");
            return Ok(None);
        }
        Err(source) => {
            return Err(ReportRenderError::PhotoUnreadable {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let image = EmbeddedImage::from_bytes(&bytes);
    if image.is_none() {
        tracing::warn!(path = %path.display(), "Unsupported photo encoding, omitted from report");
    }
    Ok(image)
}

fn font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

// ── Layout ───────────────────────────────────────────────────────────

/// Accumulates content operations top-down
struct PageWriter {
    ops: Vec<Operation>,
    y: i64,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn advance(&mut self, by: i64) {
        self.y -= by;
    }

    fn text(&mut self, x: i64, font: &str, size: i64, text: &str) {
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![x.into(), self.y.into()]),
            Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn field(&mut self, label: &str, value: &str) {
        self.text(MARGIN, "F2", BODY_SIZE, label);
        self.value_lines(wrap(value, VALUE_COLUMNS));
    }

    fn description(&mut self, description: &str) {
        self.text(MARGIN, "F2", BODY_SIZE, "Description:");

        let mut lines = wrap(description, VALUE_COLUMNS);
        if lines.len() > DESCRIPTION_MAX_LINES {
            lines.truncate(DESCRIPTION_MAX_LINES);
            if let Some(last) = lines.last_mut() {
                last.push_str(" \u{2026}");
            }
        }
        self.value_lines(lines);
    }

    /// Value column, one row per line; an empty value still takes a row
    fn value_lines(&mut self, lines: Vec<String>) {
        if lines.is_empty() {
            self.advance(LINE_HEIGHT);
        }
        for line in lines {
            self.text(VALUE_X, "F1", BODY_SIZE, &line);
            self.advance(LINE_HEIGHT);
        }
    }

    /// Operations drawing `image` scaled into the space left above the
    /// footer, or `None` if that space is too small.
    fn image_ops(&mut self, image: &EmbeddedImage) -> Option<Vec<Operation>> {
        let top = self.y;
        let bottom = FOOTER_Y + LINE_HEIGHT;
        let max_height = top - bottom;
        let max_width = PAGE_WIDTH - 2 * MARGIN;
        if max_height < MIN_IMAGE_HEIGHT {
            return None;
        }

        let mut width = max_width;
        let mut height = (width as f64 / image.aspect()).round() as i64;
        if height > max_height {
            height = max_height;
            width = (height as f64 * image.aspect()).round() as i64;
        }
        let (width, height) = (width.max(1), height.max(1));
        let (x, y) = (MARGIN, top - height);
        self.y = y;

        Some(vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.into(),
                    0.into(),
                    height.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec!["Im1".into()]),
            Operation::new("Q", vec![]),
        ])
    }

    fn footer(&mut self, text: &str) {
        self.y = FOOTER_Y;
        self.text(MARGIN, "F1", FOOTER_SIZE, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use zeladoria_types::{Category, NewComplaint};

    fn record(protocol: &str) -> Record {
        let new = NewComplaint::new(protocol, "Main St, 10", Category::Pothole);
        Record::from_intake(&new, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(), None).unwrap()
    }

    #[test]
    fn test_suggested_filename_uses_file_stem() {
        assert_eq!(suggested_filename(&record("001/2026")), "report_001_2026.pdf");
        assert_eq!(suggested_filename(&record("A-7")), "report_A-7.pdf");
    }

    /// Text shown by each `Tj` drawn at the value column
    fn value_texts(page: &PageWriter) -> Vec<String> {
        page.ops
            .chunks(5)
            .filter(|op| op[2].operands[0].as_i64().unwrap() == VALUE_X)
            .map(|op| match &op[3].operands[0] {
                Object::String(bytes, _) => String::from_utf8_lossy(bytes).into_owned(),
                other => panic!("unexpected operand {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_long_field_value_wraps() {
        let address = "Avenida Presidente Juscelino Kubitschek de Oliveira, 1500, \
                       bloco C, apartamento 42, Jardim Paulistano, zona sul";
        let mut page = PageWriter::new();
        let start = page.y;
        page.field("Address:", address);

        let lines = value_texts(&page);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= VALUE_COLUMNS));
        assert_eq!(lines.join(" "), address);
        assert_eq!(page.y, start - LINE_HEIGHT * lines.len() as i64);
    }

    #[test]
    fn test_short_and_empty_field_take_one_row() {
        let mut page = PageWriter::new();
        let start = page.y;
        page.field("Protocol:", "001/2026");
        page.field("Ombudsman:", "");

        assert_eq!(value_texts(&page), ["001/2026"]);
        assert_eq!(page.y, start - 2 * LINE_HEIGHT);
    }

    #[test]
    fn test_image_fits_page_width() {
        let mut page = PageWriter::new();
        page.y = 500;
        let jpeg = [
            0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0x64, 0x00, 0xC8, 0x03, 0x01, 0x11,
            0x00,
        ];
        let image = EmbeddedImage::from_bytes(&jpeg).unwrap();
        assert_eq!((image.width, image.height), (200, 100));

        let ops = page.image_ops(&image).unwrap();
        assert_eq!(ops[1].operator, "cm");
        // 483 wide, half as tall
        assert_eq!(ops[1].operands[0].as_i64().unwrap(), 483);
        assert_eq!(ops[1].operands[3].as_i64().unwrap(), 242);
        assert_eq!(page.y, 500 - 242);
    }

    #[test]
    fn test_image_skipped_without_room() {
        let mut page = PageWriter::new();
        page.y = FOOTER_Y + LINE_HEIGHT + 10;
        let jpeg = [
            0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0x10, 0x00, 0x10, 0x01, 0x01, 0x11,
            0x00,
        ];
        let image = EmbeddedImage::from_bytes(&jpeg).unwrap();
        assert!(page.image_ops(&image).is_none());
    }
}
