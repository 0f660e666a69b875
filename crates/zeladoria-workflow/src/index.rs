//! Lookup by protocol id

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use zeladoria_types::{ProtocolId, Record};

/// What intake does when the protocol id is already in the sheet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Accept the duplicate. Lookups resolve to the earliest record with
    /// the id, so later duplicates are reachable only through listings.
    #[default]
    FirstMatch,
    /// Refuse intake of an id that already exists
    Reject,
}

/// Position of each protocol id in a loaded collection.
///
/// Built fresh from every load; when ids repeat, the first occurrence in
/// sheet order wins.
#[derive(Clone, Debug, Default)]
pub struct ProtocolIndex {
    positions: HashMap<ProtocolId, usize>,
    duplicates: usize,
}

impl ProtocolIndex {
    pub fn build(records: &[Record]) -> Self {
        let mut positions = HashMap::with_capacity(records.len());
        let mut duplicates = 0;
        for (i, record) in records.iter().enumerate() {
            let key = ProtocolId::new(record.protocol_id.as_str().trim());
            if positions.contains_key(&key) {
                duplicates += 1;
            } else {
                positions.insert(key, i);
            }
        }
        Self {
            positions,
            duplicates,
        }
    }

    pub fn position(&self, id: &ProtocolId) -> Option<usize> {
        self.positions
            .get(&ProtocolId::new(id.as_str().trim()))
            .copied()
    }

    pub fn contains(&self, id: &ProtocolId) -> bool {
        self.position(id).is_some()
    }

    /// Number of records shadowed by an earlier record with the same id
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}
