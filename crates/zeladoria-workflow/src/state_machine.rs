//! Status transition rules
//!
//! Status changes are operator overrides, not a forward pipeline: any
//! status may be set from any other. The only restriction is that a
//! completed complaint stays completed unless reopening is enabled.

use crate::{WorkflowError, WorkflowResult};
use zeladoria_types::Status;

/// Outcome of an allowed transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Target equals the current status; nothing to persist
    Unchanged,
    Changed { from: Status, to: Status },
}

/// Decides whether a status change is allowed
#[derive(Clone, Copy, Debug, Default)]
pub struct StateMachine {
    allow_reopen: bool,
}

impl StateMachine {
    pub fn new(allow_reopen: bool) -> Self {
        Self { allow_reopen }
    }

    pub fn allows_reopen(&self) -> bool {
        self.allow_reopen
    }

    pub fn check(&self, from: Status, to: Status) -> WorkflowResult<Transition> {
        if from == to {
            return Ok(Transition::Unchanged);
        }
        if from.is_terminal() && !self.allow_reopen {
            return Err(WorkflowError::InvalidTransition { from, to });
        }
        Ok(Transition::Changed { from, to })
    }

    /// Statuses an operator may pick for a record currently in `from`
    pub fn targets(&self, from: Status) -> Vec<Status> {
        Status::ALL
            .into_iter()
            .filter(|to| self.check(from, *to).is_ok())
            .collect()
    }
}
