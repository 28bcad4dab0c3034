//! Paused/running session tracking.

use serde::{Deserialize, Serialize};

use super::{CallFrame, ExecutionState};
use crate::id::{BreakpointId, ScriptId};

/// Breakpoint placed only to implement "continue to here".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransientBreakpoint {
    pub id: BreakpointId,
    pub script_id: ScriptId,
    /// Resolved 1-based line.
    pub line: u32,
}

/// State of the debugging session.
///
/// Call frames are only held while paused. At most one transient
/// breakpoint is outstanding at any time.
#[derive(Debug, Default)]
pub struct DebugSession {
    state: ExecutionState,
    call_frames: Vec<CallFrame>,
    continue_to_line: Option<TransientBreakpoint>,
}

impl DebugSession {
    /// Create a new running session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current execution state.
    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Check if the target is stopped.
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Get the call frames of the current pause.
    pub fn call_frames(&self) -> &[CallFrame] {
        &self.call_frames
    }

    /// Get the outstanding continue-to-line breakpoint.
    pub fn continue_to_line(&self) -> Option<&TransientBreakpoint> {
        self.continue_to_line.as_ref()
    }

    /// Record a pause.
    ///
    /// A pause while already paused replaces the call frames. Returns the
    /// transient breakpoint that was outstanding; the caller must release it.
    pub fn pause(&mut self, call_frames: Vec<CallFrame>) -> Option<TransientBreakpoint> {
        if !self.state.is_paused() {
            self.state = ExecutionState::Paused;
        }
        self.call_frames = call_frames;
        self.continue_to_line.take()
    }

    /// Record a resume.
    ///
    /// Returns false without changes if the target was already running.
    pub fn resume(&mut self) -> bool {
        if self.state.transition_to(ExecutionState::Running).is_err() {
            return false;
        }
        self.call_frames.clear();
        true
    }

    /// Replace the call frames after a live edit.
    pub fn replace_call_frames(&mut self, call_frames: Vec<CallFrame>) {
        self.call_frames = call_frames;
    }

    /// Install a new continue-to-line breakpoint.
    ///
    /// Returns the one it supersedes; the caller must release it.
    pub fn set_continue_to_line(
        &mut self,
        breakpoint: TransientBreakpoint,
    ) -> Option<TransientBreakpoint> {
        self.continue_to_line.replace(breakpoint)
    }

    /// Return to the initial running state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
