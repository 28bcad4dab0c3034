//! Breakpoint value object.

use serde::{Deserialize, Serialize};

use crate::id::{BreakpointId, ScriptId};

/// A breakpoint confirmed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// Backend identifier.
    pub id: BreakpointId,
    /// Script the breakpoint belongs to.
    pub script_id: ScriptId,
    /// URL of the owning script, empty if the script is unknown.
    pub url: String,
    /// Resolved 1-based line.
    pub line: u32,
    pub enabled: bool,
    /// Condition expression, empty when unconditional.
    pub condition: String,
    /// Line originally requested, before the backend resolved it.
    pub original_line: u32,
    /// Reported by the backend from persisted state.
    pub restored: bool,
    /// Set once the breakpoint has left the store.
    pub removed: bool,
}

impl Breakpoint {
    /// Create an active breakpoint placed at its requested line.
    pub fn new(
        id: BreakpointId,
        script_id: ScriptId,
        url: impl Into<String>,
        line: u32,
        enabled: bool,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            id,
            script_id,
            url: url.into(),
            line,
            enabled,
            condition: condition.into(),
            original_line: line,
            restored: false,
            removed: false,
        }
    }

    /// Record the line that was originally requested.
    pub fn with_original_line(mut self, original_line: u32) -> Self {
        self.original_line = original_line;
        self
    }

    /// Mark the breakpoint as restored from backend state.
    pub fn with_restored(mut self, restored: bool) -> Self {
        self.restored = restored;
        self
    }

    /// Check if the breakpoint is still held by the store.
    pub fn is_active(&self) -> bool {
        !self.removed
    }

    /// Check if the backend moved the breakpoint away from the requested line.
    pub fn was_relocated(&self) -> bool {
        self.line != self.original_line
    }

    /// Check if the breakpoint has a condition.
    pub fn is_conditional(&self) -> bool {
        !self.condition.is_empty()
    }
}
