//! # script-debugger
//!
//! Client-side model of a script debugging session.
//!
//! The model tracks the scripts a debuggee has parsed, the breakpoints set in
//! them, and whether execution is running or paused. It talks to a debug
//! backend through request/reply commands and consumes the backend's
//! asynchronous notifications.
//!
//! ## Features
//!
//! - **Script registry**: scripts keyed by id, with lazily loaded source
//! - **Breakpoint store**: at most one breakpoint per `(script, line)`
//! - **Continue to line**: transient breakpoints removed on the next pause
//! - **Edit-aware breakpoints**: line diff remaps breakpoints on live edit
//! - **Replay**: drive a model from a JSON-lines transcript
//!
//! ## Quick Start
//!
//! ```
//! use script_debugger::protocol::{BackendCommand, Notification, RecordingBackend};
//! use script_debugger::{DebuggerModel, ScriptId, WorldType};
//!
//! let mut model = DebuggerModel::new(RecordingBackend::new());
//! model.handle_notification(Notification::ScriptParsed {
//!     script_id: ScriptId::from("7"),
//!     url: "main.js".into(),
//!     line_offset: 0,
//!     column_offset: 0,
//!     length: 120,
//!     world_type: WorldType::MainWorld,
//! });
//!
//! model.set_breakpoint(&ScriptId::from("7"), 10, true, "").unwrap();
//! let sent = model.backend().last().unwrap();
//! assert!(matches!(sent.command, BackendCommand::SetBreakpoint { line: 10, .. }));
//! ```

pub mod breakpoint;
pub mod cli;
pub mod config;
pub mod diff;
pub mod driver;
pub mod error;
pub mod events;
pub mod id;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod replay;
pub mod script;
pub mod session;

// Re-export commonly used types
pub use breakpoint::{Breakpoint, BreakpointStore};
pub use error::{DebuggerError, Result};
pub use events::{BreakpointEvent, DebuggerEvent, ListenerId, MessageLevel};
pub use id::{BreakpointId, RequestId, ScriptId};
pub use model::{DebuggerModel, DebuggerOptions, SessionInput, UserAction};
pub use script::{Script, ScriptRegistry, WorldType};
pub use session::{CallFrame, ExecutionState, PauseDetails, PauseReason};
