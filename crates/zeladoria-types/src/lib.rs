//! Complaint record model for Zeladoria
//!
//! A complaint record is one citizen-reported municipal issue (a pothole,
//! a broken street light, overgrown land) together with its resolution
//! status.
//!
//! # Key Concepts
//!
//! - **Record**: the persisted complaint, keyed by its [`ProtocolId`].
//! - **NewComplaint**: an intake request. It becomes a [`Record`] only after
//!   passing [`validate`], and is never persisted partially.
//! - **Category**: closed set of issue kinds offered at intake.
//! - **Status**: the four-state resolution lifecycle, starting at
//!   [`Status::Unanswered`].
//!
//! Labels for categories and statuses are the exact strings written to the
//! spreadsheet; see [`Category::label`] and [`Status::label`].

#![deny(unsafe_code)]

mod category;
mod errors;
mod photo;
mod record;
mod status;
mod validation;

pub use category::*;
pub use errors::*;
pub use photo::*;
pub use record::*;
pub use status::*;
pub use validation::*;

/// Lowercase and drop everything that is not a letter or digit, so that
/// "Under Review", "under_review" and "UnderReview" compare equal.
pub(crate) fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
