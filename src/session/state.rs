//! Execution state machine.

use serde::{Deserialize, Serialize};

/// Whether the debug target is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExecutionState {
    /// Target is executing (or idle) and has no call frames.
    #[default]
    Running,
    /// Target is stopped and exposes call frames.
    Paused,
}

impl ExecutionState {
    /// Check if transition to target state is valid.
    ///
    /// Valid transitions:
    /// - Running -> Paused
    /// - Paused -> Running
    pub fn can_transition_to(&self, target: ExecutionState) -> bool {
        use ExecutionState::*;
        matches!((*self, target), (Running, Paused) | (Paused, Running))
    }

    /// Attempt to transition to a new state.
    ///
    /// Returns `Ok(())` if the transition is valid, or an error otherwise.
    pub fn transition_to(&mut self, target: ExecutionState) -> crate::Result<()> {
        if self.can_transition_to(target) {
            *self = target;
            Ok(())
        } else {
            Err(crate::error::DebuggerError::InvalidStateTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Check if the target is stopped.
    pub fn is_paused(&self) -> bool {
        matches!(self, ExecutionState::Paused)
    }
}
