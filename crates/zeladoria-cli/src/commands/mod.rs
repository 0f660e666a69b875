//! CLI command implementations

pub mod dashboard;
pub mod records;
pub mod register;
pub mod report;
pub mod status;
