//! Spreadsheet layout of the record collection
//!
//! The sheet has a header row followed by one row per record, always in
//! the column order of [`SHEET_HEADER`]. Every backend converts to and from
//! a [`SheetGrid`], so the persisted layout is identical whether the cells
//! end up in a CSV file or a remote spreadsheet.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use zeladoria_types::{parse_date, ProtocolId, Record};

/// Column names, in persisted order
pub const SHEET_HEADER: [&str; 8] = [
    "Protocol",
    "Ombudsman",
    "Category",
    "Address",
    "Date",
    "Status",
    "Description",
    "PhotoPath",
];

/// Header written by the older Portuguese form, accepted on read
pub const LEGACY_SHEET_HEADER: [&str; 8] = [
    "Protocolo",
    "Ouvidoria",
    "Tipo",
    "Endereço",
    "Data",
    "Status",
    "Descrição",
    "Caminho_Foto",
];

const COLUMNS: usize = SHEET_HEADER.len();

/// Rows of string cells, header first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetGrid {
    pub rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Lay records out under the canonical header
    pub fn from_records(records: &[Record]) -> Self {
        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(SHEET_HEADER.iter().map(|h| h.to_string()).collect());
        rows.extend(records.iter().map(record_row));
        Self { rows }
    }

    /// Parse the grid back into records, preserving row order.
    ///
    /// An empty grid is an empty collection. Short rows are padded with
    /// empty cells; fully blank rows are skipped.
    pub fn to_records(&self) -> StoreResult<Vec<Record>> {
        let Some((header, body)) = self.rows.split_first() else {
            return Ok(Vec::new());
        };
        check_header(header)?;

        let mut records = Vec::with_capacity(body.len());
        for (i, row) in body.iter().enumerate() {
            // 1-based, counting the header
            let row_number = i + 2;
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            records.push(parse_row(row_number, row)?);
        }
        Ok(records)
    }
}

fn record_row(record: &Record) -> Vec<String> {
    vec![
        record.protocol_id.to_string(),
        record.ombudsman_ref.clone(),
        record.category.label().to_string(),
        record.address.clone(),
        record.formatted_date(),
        record.status.label().to_string(),
        record.description.clone(),
        record.photo_ref.clone(),
    ]
}

fn check_header(header: &[String]) -> StoreResult<()> {
    let cells: Vec<&str> = header.iter().map(|c| c.trim()).collect();
    let matches = |expected: &[&str; COLUMNS]| {
        cells.len() >= COLUMNS
            && cells[..COLUMNS] == expected[..]
            && cells[COLUMNS..].iter().all(|c| c.is_empty())
    };

    if matches(&SHEET_HEADER) || matches(&LEGACY_SHEET_HEADER) {
        Ok(())
    } else {
        Err(StoreError::malformed(
            1,
            format!("unexpected header [{}]", cells.join(", ")),
        ))
    }
}

fn parse_row(row_number: usize, row: &[String]) -> StoreResult<Record> {
    if row.len() > COLUMNS && row[COLUMNS..].iter().any(|c| !c.trim().is_empty()) {
        return Err(StoreError::malformed(
            row_number,
            format!("{} cells, expected {}", row.len(), COLUMNS),
        ));
    }
    let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

    Ok(Record {
        protocol_id: ProtocolId::new(cell(0)),
        ombudsman_ref: cell(1).to_string(),
        category: cell(2)
            .parse()
            .map_err(|e| StoreError::bad_cell(row_number, e))?,
        address: cell(3).to_string(),
        created_date: parse_date(cell(4)).map_err(|e| StoreError::bad_cell(row_number, e))?,
        status: cell(5)
            .parse()
            .map_err(|e| StoreError::bad_cell(row_number, e))?,
        description: cell(6).to_string(),
        photo_ref: cell(7).to_string(),
    })
}
