//! Record listing and lookup

use crate::error::{CliError, CliResult};
use crate::output::{self, DetailRow, OutputFormat};
use serde::Serialize;
use tabled::Tabled;
use zeladoria_types::{Category, ProtocolId, Record, Status};
use zeladoria_workflow::ComplaintWorkflow;

const ADDRESS_WIDTH: usize = 40;

/// Table row for record display
#[derive(Debug, Serialize, Tabled)]
struct RecordRow {
    protocol: String,
    date: String,
    category: String,
    status: String,
    address: String,
    photo: String,
}

impl From<&Record> for RecordRow {
    fn from(r: &Record) -> Self {
        Self {
            protocol: r.protocol_id.to_string(),
            date: r.formatted_date(),
            category: r.category.to_string(),
            status: r.status.to_string(),
            address: truncate(&r.address, ADDRESS_WIDTH),
            photo: if r.has_photo() { "yes" } else { "no" }.to_string(),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let mut short: String = text.chars().take(width - 1).collect();
        short.push('…');
        short
    } else {
        text.to_string()
    }
}

/// Records matching the optional filters, in sheet order
fn filter(records: Vec<Record>, status: Option<Status>, category: Option<Category>) -> Vec<Record> {
    records
        .into_iter()
        .filter(|r| status.map_or(true, |s| r.status == s))
        .filter(|r| category.map_or(true, |c| r.category == c))
        .collect()
}

/// Label/value rows for a single record
pub fn record_details(record: &Record, photo_path: Option<String>) -> Vec<DetailRow> {
    vec![
        DetailRow::new("Protocol", &record.protocol_id),
        DetailRow::new("Ombudsman ref", &record.ombudsman_ref),
        DetailRow::new("Date", record.formatted_date()),
        DetailRow::new("Category", record.category),
        DetailRow::new("Address", &record.address),
        DetailRow::new("Status", record.status),
        DetailRow::new("Description", &record.description),
        DetailRow::new("Photo", photo_path.unwrap_or_else(|| "none".into())),
    ]
}

pub fn print_record(
    record: &Record,
    workflow: &ComplaintWorkflow,
    format: OutputFormat,
) -> CliResult<()> {
    let photo = workflow
        .photos()
        .resolve(&record.photo_ref)
        .map(|p| p.display().to_string());
    output::print_single(record, || record_details(record, photo), format)
}

/// List complaints
pub async fn list(
    workflow: &ComplaintWorkflow,
    status: Option<Status>,
    category: Option<Category>,
    format: OutputFormat,
) -> CliResult<()> {
    let records = filter(workflow.list().await, status, category);
    match format {
        OutputFormat::Table => {
            output::print_output(records.iter().map(RecordRow::from).collect(), format)
        }
        _ => output::print_serialized(&records, format),
    }
}

/// Show one complaint
pub async fn show(
    workflow: &ComplaintWorkflow,
    protocol: &str,
    format: OutputFormat,
) -> CliResult<()> {
    let protocol_id = ProtocolId::new(protocol.trim());
    let record = workflow
        .find(&protocol_id)
        .await
        .ok_or_else(|| CliError::NotFound(format!("complaint {}", protocol_id)))?;
    print_record(&record, workflow, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use zeladoria_types::NewComplaint;

    fn record(protocol: &str, category: Category, status: Status) -> Record {
        let new = NewComplaint::new(protocol, "Main St, 10", category);
        let mut record =
            Record::from_intake(&new, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(), None).unwrap();
        record.status = status;
        record
    }

    #[test]
    fn test_filter_by_status_and_category() {
        let records = vec![
            record("1", Category::Pothole, Status::Unanswered),
            record("2", Category::Lighting, Status::Unanswered),
            record("3", Category::Pothole, Status::Completed),
        ];

        let ids = |rs: Vec<Record>| -> Vec<String> {
            rs.into_iter().map(|r| r.protocol_id.to_string()).collect()
        };
        assert_eq!(ids(filter(records.clone(), None, None)), ["1", "2", "3"]);
        assert_eq!(
            ids(filter(records.clone(), Some(Status::Unanswered), None)),
            ["1", "2"]
        );
        assert_eq!(
            ids(filter(records, Some(Status::Unanswered), Some(Category::Pothole))),
            ["1"]
        );
    }

    #[test]
    fn test_row_and_details() {
        let r = record("001/2026", Category::Sidewalk, Status::InProgress);
        let row = RecordRow::from(&r);
        assert_eq!(row.date, "09/03/2026");
        assert_eq!(row.status, "In Progress");
        assert_eq!(row.photo, "no");

        let details = record_details(&r, None);
        let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "Protocol",
                "Ombudsman ref",
                "Date",
                "Category",
                "Address",
                "Status",
                "Description",
                "Photo"
            ]
        );
        assert_eq!(details[1].value, "Not informed");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Avenida São João", 8), "Avenida…");
    }
}
