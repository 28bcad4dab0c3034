//! Call frames and pause details reported by the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::ScriptId;

/// A single frame of the paused call stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    /// Backend identifier of the frame.
    pub id: String,
    #[serde(default)]
    pub function_name: String,
    pub script_id: ScriptId,
    /// 1-based line of the current location.
    pub line: u32,
    #[serde(default)]
    pub column: u32,
    /// Scope objects, passed through to the presentation layer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope_chain: Vec<Value>,
}

/// Why the target stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PauseReason {
    /// Explicit pause or a step.
    #[default]
    JavaScriptPause,
    /// A script breakpoint was hit.
    JavaScriptBreakpoint,
    /// A DOM, XHR or event listener breakpoint was hit.
    NativeBreakpoint,
}

/// Payload of a pause notification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseDetails {
    pub call_frames: Vec<CallFrame>,
    #[serde(default)]
    pub reason: PauseReason,
    /// Reason-specific data, not interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl PauseDetails {
    pub fn new(call_frames: Vec<CallFrame>) -> Self {
        Self {
            call_frames,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_details_defaults() {
        let details: PauseDetails = serde_json::from_str(
            r#"{"callFrames":[{"id":"f0","scriptId":"3","line":12}]}"#,
        )
        .unwrap();

        assert_eq!(details.reason, PauseReason::JavaScriptPause);
        assert_eq!(details.call_frames.len(), 1);
        assert_eq!(details.call_frames[0].script_id, ScriptId::from("3"));
        assert_eq!(details.call_frames[0].function_name, "");
        assert!(details.data.is_none());
    }

    #[test]
    fn test_pause_reason_wire_format() {
        let json = serde_json::to_string(&PauseReason::NativeBreakpoint).unwrap();
        assert_eq!(json, "\"nativeBreakpoint\"");
    }
}
