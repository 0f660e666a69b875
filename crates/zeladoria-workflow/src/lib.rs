//! Complaint workflow for Zeladoria
//!
//! Drives a complaint through its life: intake, status changes by the
//! operator, and the counts shown on the dashboard.
//!
//! # Architecture
//!
//! [`ComplaintWorkflow`] composes:
//!
//! - a [`RecordStore`](zeladoria_store::RecordStore), read whole at the
//!   start of every operation and overwritten whole on change
//! - a [`PhotoStore`](zeladoria_store::PhotoStore) for intake photos
//! - a [`StateMachine`] deciding which status changes are allowed
//! - a [`ProtocolIndex`] resolving protocol ids to the first matching record
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use zeladoria_store::{InMemoryStore, PhotoStore};
//! use zeladoria_types::{Category, NewComplaint, Status};
//! use zeladoria_workflow::{ComplaintWorkflow, WorkflowConfig};
//!
//! # tokio_test_block(async {
//! let workflow = ComplaintWorkflow::new(
//!     Arc::new(InMemoryStore::new()),
//!     PhotoStore::new(std::env::temp_dir(), "photos"),
//!     WorkflowConfig::default(),
//! );
//!
//! let record = workflow
//!     .intake(NewComplaint::new("001/2026", "Main St, 10", Category::Pothole), None)
//!     .await
//!     .unwrap();
//! assert_eq!(record.status, Status::Unanswered);
//!
//! let record = workflow
//!     .set_status(&record.protocol_id, Status::InProgress)
//!     .await
//!     .unwrap();
//! assert_eq!(record.status, Status::InProgress);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

#![deny(unsafe_code)]

mod engine;
mod errors;
mod index;
mod state_machine;
mod summary;

pub use engine::{ComplaintWorkflow, WorkflowConfig};
pub use errors::{WorkflowError, WorkflowResult};
pub use index::{DuplicatePolicy, ProtocolIndex};
pub use state_machine::{StateMachine, Transition};
pub use summary::DashboardSummary;
