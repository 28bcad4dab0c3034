//! Session state tracking.
//!
//! This module tracks whether the debug target is paused, the call frames
//! of the current pause, and the outstanding continue-to-line breakpoint.

mod frames;
mod machine;
mod state;

pub use frames::{CallFrame, PauseDetails, PauseReason};
pub use machine::{DebugSession, TransientBreakpoint};
pub use state::ExecutionState;
