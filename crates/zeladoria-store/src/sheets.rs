//! Google Sheets record store
//!
//! Talks to the Sheets v4 values API:
//!
//! - read: `GET /v4/spreadsheets/{id}/values/{range}`
//! - overwrite: `PUT .../values/{range}?valueInputOption=RAW`, then
//!   `POST .../values/{sheet}!A{n+1}:H:clear` for rows below the new extent
//!
//! The overwrite is sent before anything is cleared, so a failed write
//! leaves the previous rows in place. The configured range names the sheet
//! (optionally with an A1 suffix); records always start at cell A1.
//!
//! Values are written RAW so protocol numbers such as `001/2026` and the
//! `dd/mm/yyyy` dates stay text instead of being reinterpreted by the
//! spreadsheet.

use crate::error::{StoreError, StoreResult};
use crate::sheet::{SheetGrid, SHEET_HEADER};
use crate::traits::RecordStore;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zeladoria_types::Record;

/// Default Sheets API endpoint
pub const DEFAULT_SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com";

/// Connection settings for [`SheetsHttpStore`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetsSettings {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Spreadsheet id, from the sheet's URL
    pub spreadsheet_id: String,
    /// A1 range or sheet name holding the records
    #[serde(default = "default_range")]
    pub range: String,
    /// OAuth bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_SHEETS_ENDPOINT.to_string()
}

fn default_range() -> String {
    "Sheet1".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl SheetsSettings {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            endpoint: default_endpoint(),
            spreadsheet_id: spreadsheet_id.into(),
            range: default_range(),
            access_token: None,
            timeout_secs: default_timeout(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Body of a values read or write
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    major_dimension: Option<String>,
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Record store backed by a Google Sheets range
#[derive(Clone, Debug)]
pub struct SheetsHttpStore {
    client: Client,
    settings: SheetsSettings,
}

impl SheetsHttpStore {
    pub fn new(settings: SheetsSettings) -> StoreResult<Self> {
        Url::parse(&settings.endpoint).map_err(|e| {
            StoreError::Config(format!("invalid endpoint '{}': {}", settings.endpoint, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| StoreError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &SheetsSettings {
        &self.settings
    }

    /// URL of the values resource, with an optional `:verb` suffix on the range
    fn values_url(&self, verb: Option<&str>) -> Result<Url, String> {
        self.range_url(&self.settings.range, verb)
    }

    fn range_url(&self, range: &str, verb: Option<&str>) -> Result<Url, String> {
        let mut url = Url::parse(&self.settings.endpoint).map_err(|e| e.to_string())?;
        let range = match verb {
            Some(verb) => format!("{}:{}", range, verb),
            None => range.to_string(),
        };
        url.path_segments_mut()
            .map_err(|_| format!("endpoint '{}' cannot be a base URL", self.settings.endpoint))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.settings.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.settings.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, String> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(format!("HTTP {}: {}", status.as_u16(), body.trim()))
        }
    }

    /// Clear the values in an A1 range
    async fn clear(&self, range: &str) -> Result<(), String> {
        let url = self.range_url(range, Some("clear"))?;
        let response = self
            .authorize(self.client.post(url))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Self::check(response).await.map(|_| ())
    }
}

/// A1 range covering every row after the first `rows` rows of the sheet
fn tail_range(range: &str, rows: usize) -> String {
    let last_column = char::from(b'A' + (SHEET_HEADER.len() - 1) as u8);
    let sheet = match range.split_once('!') {
        Some((sheet, _)) => sheet.to_string(),
        None if range.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => range.to_string(),
        None => format!("'{}'", range.replace('\'', "''")),
    };
    format!("{}!A{}:{}", sheet, rows + 1, last_column)
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RecordStore for SheetsHttpStore {
    fn backend(&self) -> &'static str {
        "sheets"
    }

    async fn try_load_all(&self) -> StoreResult<Vec<Record>> {
        let url = self.values_url(None).map_err(StoreError::Read)?;
        tracing::debug!(url = %url, "Reading sheet");

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;
        let response = Self::check(response).await.map_err(StoreError::Read)?;
        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::Read(format!("invalid values response: {}", e)))?;

        let grid = SheetGrid::new(
            body.values
                .into_iter()
                .map(|row| row.into_iter().map(cell_text).collect())
                .collect(),
        );
        grid.to_records()
    }

    async fn save_all(&self, records: &[Record]) -> StoreResult<()> {
        let grid = SheetGrid::from_records(records);
        let written_rows = grid.rows.len();

        let mut update_url = self.values_url(None).map_err(StoreError::Write)?;
        update_url
            .query_pairs_mut()
            .append_pair("valueInputOption", "RAW");
        let body = ValueRange {
            range: Some(self.settings.range.clone()),
            major_dimension: Some("ROWS".to_string()),
            values: grid
                .rows
                .into_iter()
                .map(|row| row.into_iter().map(serde_json::Value::String).collect())
                .collect(),
        };
        let response = self
            .authorize(self.client.put(update_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Self::check(response).await.map_err(StoreError::Write)?;

        // The collection is committed; leftover rows only exist if the
        // sheet was longer than the new collection.
        let tail = tail_range(&self.settings.range, written_rows);
        if let Err(e) = self.clear(&tail).await {
            tracing::warn!(range = %tail, error = %e, "Could not clear rows below the records");
        }

        tracing::debug!(
            spreadsheet = %self.settings.spreadsheet_id,
            count = records.len(),
            "Sheet overwritten"
        );
        Ok(())
    }
}
