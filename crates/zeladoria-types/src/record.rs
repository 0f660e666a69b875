//! Complaint records and intake requests

use crate::{validate, Category, RecordError, RecordResult, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ombudsman reference stored when none was given at intake
pub const OMBUDSMAN_NOT_INFORMED: &str = "Not informed";

/// Photo reference stored when no image was attached
pub const NO_IMAGE: &str = "photos/no_image.jpg";

/// "No image" reference found in rows written by older sheet versions
pub const LEGACY_NO_IMAGE: &str = "fotos/no_image.jpg";

/// Whether a photo reference means no image was attached
pub fn is_no_image(photo_ref: &str) -> bool {
    let photo_ref = photo_ref.trim();
    photo_ref.is_empty() || photo_ref == NO_IMAGE || photo_ref == LEGACY_NO_IMAGE
}

/// Date format used in the spreadsheet and in reports
pub const DATE_FORMAT: &str = "%d/%m/%Y";

// ── Protocol Identifier ──────────────────────────────────────────────

/// User-supplied protocol number, the record's primary key by convention
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolId(pub String);

impl ProtocolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem-safe form of the id, used to name photo and report files.
    ///
    /// Characters outside `[A-Za-z0-9._-]` become `_`, so `001/2026`
    /// maps to `001_2026`. Leading dots are replaced to keep the name
    /// from being hidden or relative.
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .0
            .trim()
            .chars()
            .enumerate()
            .map(|(i, c)| match c {
                '.' if i == 0 => '_',
                c if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') => c,
                _ => '_',
            })
            .collect();
        if stem.is_empty() {
            "record".to_string()
        } else {
            stem
        }
    }
}

impl std::fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProtocolId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ── Intake Request ───────────────────────────────────────────────────

/// Data collected by the intake form, before it becomes a [`Record`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComplaint {
    pub protocol_id: String,
    pub address: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ombudsman_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewComplaint {
    pub fn new(
        protocol_id: impl Into<String>,
        address: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            protocol_id: protocol_id.into(),
            address: address.into(),
            category,
            ombudsman_ref: None,
            description: None,
        }
    }

    pub fn with_ombudsman_ref(mut self, reference: impl Into<String>) -> Self {
        self.ombudsman_ref = Some(reference.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the required fields
    pub fn validate(&self) -> RecordResult<()> {
        validate(&self.protocol_id, &self.address)
    }

    /// Trimmed protocol id, as it will be stored
    pub fn protocol(&self) -> ProtocolId {
        ProtocolId::new(self.protocol_id.trim())
    }
}

// ── Record ───────────────────────────────────────────────────────────

/// One citizen complaint as persisted in the sheet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub protocol_id: ProtocolId,
    pub ombudsman_ref: String,
    pub category: Category,
    pub address: String,
    pub created_date: NaiveDate,
    pub status: Status,
    pub description: String,
    pub photo_ref: String,
}

impl Record {
    /// Build a complete record from a validated intake request.
    ///
    /// Absent optional fields receive their sentinel values and the status
    /// starts at [`Status::Unanswered`].
    pub fn from_intake(
        new: &NewComplaint,
        created_date: NaiveDate,
        photo_ref: Option<String>,
    ) -> RecordResult<Self> {
        new.validate()?;

        let ombudsman_ref = new
            .ombudsman_ref
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(OMBUDSMAN_NOT_INFORMED)
            .to_string();

        Ok(Self {
            protocol_id: new.protocol(),
            ombudsman_ref,
            category: new.category,
            address: new.address.trim().to_string(),
            created_date,
            status: Status::Unanswered,
            description: new.description.clone().unwrap_or_default(),
            photo_ref: photo_ref.unwrap_or_else(|| NO_IMAGE.to_string()),
        })
    }

    /// Creation date as written to the sheet (`dd/mm/yyyy`)
    pub fn formatted_date(&self) -> String {
        self.created_date.format(DATE_FORMAT).to_string()
    }

    pub fn has_photo(&self) -> bool {
        !is_no_image(&self.photo_ref)
    }
}

/// Parse a sheet date in `dd/mm/yyyy` form
pub fn parse_date(raw: &str) -> RecordResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| RecordError::InvalidDate(raw.to_string()))
}
