//! Backend command, reply and notification types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::{BreakpointId, RequestId, ScriptId};
use crate::script::WorldType;
use crate::session::{CallFrame, PauseDetails};

/// Command issued to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BackendCommand {
    /// Place a breakpoint. Replied with [`BackendReply::BreakpointSet`].
    SetBreakpoint {
        script_id: ScriptId,
        line: u32,
        condition: String,
        enabled: bool,
    },
    /// Release a breakpoint.
    RemoveBreakpoint { breakpoint_id: BreakpointId },
    /// Resume execution.
    Resume,
    /// Replace a script's text in the running target.
    /// Replied with [`BackendReply::ScriptSourceEdited`].
    EditScriptSource { script_id: ScriptId, text: String },
    /// Fetch a script's text. Replied with [`BackendReply::ScriptSource`].
    GetScriptSource { script_id: ScriptId },
}

/// A command together with the ID its reply will carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outbound {
    pub id: RequestId,
    pub command: BackendCommand,
}

/// Backend reply to a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BackendReply {
    /// Outcome of a placement. No ID means the backend declined.
    BreakpointSet {
        #[serde(default)]
        breakpoint_id: Option<BreakpointId>,
        actual_line: u32,
    },
    /// Plain acknowledgement.
    Ack,
    /// Outcome of a live edit. `text` is the new source on success and the
    /// error message on failure.
    ScriptSourceEdited {
        success: bool,
        text: String,
        #[serde(default)]
        call_frames: Option<Vec<CallFrame>>,
    },
    /// Text of a script.
    ScriptSource { source: String },
}

/// Notification pushed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Notification {
    Paused {
        details: PauseDetails,
    },
    Resumed,
    ScriptParsed {
        script_id: ScriptId,
        #[serde(default)]
        url: String,
        #[serde(default)]
        line_offset: u32,
        #[serde(default)]
        column_offset: u32,
        #[serde(default)]
        length: u32,
        #[serde(default)]
        world_type: WorldType,
    },
    ScriptParseFailed {
        #[serde(default)]
        url: String,
        source: String,
        #[serde(default)]
        starting_line: u32,
        error_line: u32,
        error_message: String,
    },
    /// A breakpoint was placed by the backend, either on request or from
    /// its persisted state.
    BreakpointResolved {
        breakpoint_id: BreakpointId,
        script_id: ScriptId,
        line: u32,
        #[serde(default)]
        condition: String,
        enabled: bool,
        original_line: u32,
    },
    WorkerCreated {
        #[serde(default)]
        payload: Value,
    },
    WorkerDestroyed {
        #[serde(default)]
        payload: Value,
    },
    DebuggerWasEnabled,
    DebuggerWasDisabled,
}
