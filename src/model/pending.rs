//! Requests awaiting a backend reply.

use crate::id::ScriptId;

/// What the model does once a reply arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingRequest {
    /// Regular placement; confirmed breakpoints enter the store.
    SetBreakpoint {
        script_id: ScriptId,
        line: u32,
        condition: String,
        enabled: bool,
    },
    /// Transient placement for continue-to-line.
    ContinueToLine { script_id: ScriptId },
    EditScriptSource { script_id: ScriptId },
    ScriptSource { script_id: ScriptId },
}
