//! Intake validation
//!
//! Only presence is checked. Addresses and protocol ids are free text.

use crate::{RecordError, RecordResult};

/// Check the two required intake fields.
///
/// Both must be non-empty after trimming. `protocol_id` is checked first,
/// so a request missing both reports `protocol_id`.
pub fn validate(protocol_id: &str, address: &str) -> RecordResult<()> {
    if protocol_id.trim().is_empty() {
        return Err(RecordError::MissingRequiredField("protocol_id"));
    }
    if address.trim().is_empty() {
        return Err(RecordError::MissingRequiredField("address"));
    }
    Ok(())
}
