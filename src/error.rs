//! Error types for script-debugger.

use thiserror::Error;

use crate::id::{BreakpointId, ScriptId};

/// Main error type for debugger model operations.
///
/// Only local validation failures surface here. Failures reported by the
/// backend are absorbed by the model and never turn into an `Err`.
#[derive(Error, Debug)]
pub enum DebuggerError {
    /// Script with the given ID was not found.
    #[error("script not found: {0}")]
    ScriptNotFound(ScriptId),

    /// Script with the given ID is already registered.
    #[error("script already registered: {0}")]
    ScriptExists(ScriptId),

    /// A script without an identifier cannot be registered.
    #[error("script has no identifier (url: {0:?})")]
    MissingScriptId(String),

    /// Breakpoint with the given ID is already stored.
    #[error("breakpoint already exists: {0}")]
    BreakpointExists(BreakpointId),

    /// Another breakpoint already occupies the location.
    #[error("breakpoint location {script_id}:{line} is already taken")]
    LocationTaken { script_id: ScriptId, line: u32 },

    /// Requested line lies outside the script.
    #[error("line {line} is out of range for script {script_id} ({line_count} lines)")]
    LineOutOfRange {
        script_id: ScriptId,
        line: u32,
        line_count: usize,
    },

    /// A source edit for the script is still awaiting its reply.
    #[error("source edit already in progress for script {0}")]
    EditInProgress(ScriptId),

    /// Invalid execution state transition attempted.
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidStateTransition {
        from: crate::session::ExecutionState,
        to: crate::session::ExecutionState,
    },

    /// Transcript line could not be decoded.
    #[error("transcript line {line}: {source}")]
    Transcript {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel receive error.
    #[error("channel closed")]
    ChannelClosed,
}

/// Convenience Result type for debugger operations.
pub type Result<T> = std::result::Result<T, DebuggerError>;
