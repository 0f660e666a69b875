//! Complaint workflow: the operations behind every user interaction
//!
//! Each operation starts from a fresh read of the sheet and, if it changes
//! anything, ends with a full overwrite. Nothing is cached between calls,
//! so two operations never share a stale collection.

use crate::{
    DashboardSummary, DuplicatePolicy, ProtocolIndex, StateMachine, Transition, WorkflowError,
    WorkflowResult,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use zeladoria_store::{PhotoStore, RecordStore};
use zeladoria_types::{NewComplaint, ProtocolId, Record, Status};

/// Workflow policy switches
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Handling of repeated protocol ids at intake
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Allow moving a completed complaint back to an open status
    #[serde(default)]
    pub allow_reopen: bool,

    /// Refuse to write when the preceding read failed, instead of
    /// overwriting the sheet with an empty collection
    #[serde(default = "default_true")]
    pub guard_degraded_writes: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::FirstMatch,
            allow_reopen: false,
            guard_degraded_writes: true,
        }
    }
}

/// Entry point for intake, lookups and status changes
#[derive(Clone)]
pub struct ComplaintWorkflow {
    store: Arc<dyn RecordStore>,
    photos: PhotoStore,
    state_machine: StateMachine,
    config: WorkflowConfig,
}

impl ComplaintWorkflow {
    pub fn new(store: Arc<dyn RecordStore>, photos: PhotoStore, config: WorkflowConfig) -> Self {
        Self {
            store,
            photos,
            state_machine: StateMachine::new(config.allow_reopen),
            config,
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn photos(&self) -> &PhotoStore {
        &self.photos
    }

    pub fn state_machine(&self) -> &StateMachine {
        &self.state_machine
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Every record in sheet order; empty if the sheet cannot be read
    pub async fn list(&self) -> Vec<Record> {
        self.store.load_all().await
    }

    /// First record with the given protocol id
    pub async fn find(&self, protocol_id: &ProtocolId) -> Option<Record> {
        let records = self.store.load_all().await;
        let index = ProtocolIndex::build(&records);
        index.position(protocol_id).map(|i| records[i].clone())
    }

    pub async fn summary(&self) -> DashboardSummary {
        DashboardSummary::from_records(&self.store.load_all().await)
    }

    // ── Intake ───────────────────────────────────────────────────────

    /// Register a complaint dated today
    pub async fn intake(
        &self,
        new: NewComplaint,
        photo: Option<&[u8]>,
    ) -> WorkflowResult<Record> {
        self.intake_on(new, photo, Local::now().date_naive()).await
    }

    /// Register a complaint with an explicit creation date.
    ///
    /// The record is built completely before anything is written. If the
    /// sheet rejects the overwrite, the photo stored for it is removed.
    pub async fn intake_on(
        &self,
        new: NewComplaint,
        photo: Option<&[u8]>,
        created_date: NaiveDate,
    ) -> WorkflowResult<Record> {
        new.validate()?;
        let protocol_id = new.protocol();

        let mut records = self.load_for_update().await?;
        if self.config.duplicate_policy == DuplicatePolicy::Reject
            && ProtocolIndex::build(&records).contains(&protocol_id)
        {
            return Err(WorkflowError::DuplicateProtocol(protocol_id));
        }

        let photo_ref = match photo {
            Some(bytes) => Some(
                self.photos
                    .store(&protocol_id, bytes)
                    .await
                    .map_err(WorkflowError::Photo)?,
            ),
            None => None,
        };

        let record = Record::from_intake(&new, created_date, photo_ref.clone())?;
        records.push(record.clone());

        if let Err(e) = self.store.save_all(&records).await {
            if let Some(photo_ref) = photo_ref {
                if let Err(cleanup) = self.photos.remove(&photo_ref).await {
                    tracing::warn!(photo = %photo_ref, error = %cleanup, "Orphaned photo left behind");
                }
            }
            return Err(WorkflowError::Write(e));
        }

        tracing::info!(
            protocol_id = %record.protocol_id,
            category = %record.category,
            total = records.len(),
            "Complaint registered"
        );
        Ok(record)
    }

    // ── Status ───────────────────────────────────────────────────────

    /// Set the status of the first record with `protocol_id`.
    ///
    /// Setting the current status again persists nothing. If the overwrite
    /// fails the change is discarded and the sheet keeps the old status.
    pub async fn set_status(
        &self,
        protocol_id: &ProtocolId,
        status: Status,
    ) -> WorkflowResult<Record> {
        let mut records = self.load_for_update().await?;
        let position = ProtocolIndex::build(&records)
            .position(protocol_id)
            .ok_or_else(|| WorkflowError::RecordNotFound(protocol_id.clone()))?;

        let from = records[position].status;
        match self.state_machine.check(from, status)? {
            Transition::Unchanged => {
                tracing::debug!(protocol_id = %protocol_id, status = %status, "Status unchanged");
                Ok(records.swap_remove(position))
            }
            Transition::Changed { from, to } => {
                records[position].status = to;
                self.store
                    .save_all(&records)
                    .await
                    .map_err(WorkflowError::Write)?;

                tracing::info!(
                    protocol_id = %protocol_id,
                    from = %from,
                    to = %to,
                    "Status changed"
                );
                Ok(records.swap_remove(position))
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn load_for_update(&self) -> WorkflowResult<Vec<Record>> {
        if !self.config.guard_degraded_writes {
            return Ok(self.store.load_all().await);
        }
        self.store.try_load_all().await.map_err(|e| {
            tracing::warn!(
                backend = self.store.backend(),
                error = %e,
                "Refusing to modify an unreadable sheet"
            );
            WorkflowError::Read(e)
        })
    }
}

impl std::fmt::Debug for ComplaintWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplaintWorkflow")
            .field("backend", &self.store.backend())
            .field("photos", &self.photos)
            .field("config", &self.config)
            .finish()
    }
}
