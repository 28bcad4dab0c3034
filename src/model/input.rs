//! Messages consumed by the model.

use serde::{Deserialize, Serialize};

use crate::id::{BreakpointId, RequestId, ScriptId};
use crate::protocol::{BackendReply, Notification};

fn default_enabled() -> bool {
    true
}

/// Operation requested by the user through the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UserAction {
    SetBreakpoint {
        script_id: ScriptId,
        line: u32,
        #[serde(default = "default_enabled")]
        enabled: bool,
        #[serde(default)]
        condition: String,
    },
    RemoveBreakpoint {
        breakpoint_id: BreakpointId,
    },
    SetBreakpointEnabled {
        breakpoint_id: BreakpointId,
        enabled: bool,
    },
    SetBreakpointCondition {
        breakpoint_id: BreakpointId,
        condition: String,
    },
    ContinueToLine {
        script_id: ScriptId,
        line: u32,
    },
    EditScriptSource {
        script_id: ScriptId,
        text: String,
    },
    RequestScriptSource {
        script_id: ScriptId,
    },
    Resume,
    Reset,
}

/// Any message the model reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SessionInput {
    /// Backend reply to an earlier command.
    Reply { id: RequestId, reply: BackendReply },
    /// Backend push notification.
    Notification { notification: Notification },
    /// User operation.
    Action { action: UserAction },
}

impl From<Notification> for SessionInput {
    fn from(notification: Notification) -> Self {
        Self::Notification { notification }
    }
}

impl From<UserAction> for SessionInput {
    fn from(action: UserAction) -> Self {
        Self::Action { action }
    }
}
