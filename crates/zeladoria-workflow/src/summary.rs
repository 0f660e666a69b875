//! Dashboard figures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zeladoria_types::{Category, Record, Status};

/// Counts shown on the status dashboard
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total: usize,
    /// Records still awaiting a first answer ([`Status::Unanswered`])
    pub pending: usize,
    /// Records not yet completed
    pub open: usize,
    pub completed: usize,
    pub by_status: BTreeMap<Status, usize>,
    pub by_category: BTreeMap<Category, usize>,
}

impl DashboardSummary {
    pub fn from_records(records: &[Record]) -> Self {
        let mut by_status: BTreeMap<Status, usize> =
            Status::ALL.into_iter().map(|s| (s, 0)).collect();
        let mut by_category = BTreeMap::new();

        for record in records {
            *by_status.entry(record.status).or_default() += 1;
            *by_category.entry(record.category).or_default() += 1;
        }

        let count = |s: Status| by_status.get(&s).copied().unwrap_or(0);
        let completed = count(Status::Completed);
        Self {
            total: records.len(),
            pending: count(Status::Unanswered),
            open: records.len() - completed,
            completed,
            by_status,
            by_category,
        }
    }

    pub fn count(&self, status: Status) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
