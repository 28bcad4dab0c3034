//! Debugger model.
//!
//! [`DebuggerModel`] owns the script registry, the breakpoint store and the
//! session state. It is the only component that sends commands to the
//! backend and the only one that consumes its replies and notifications.
//!
//! # Example
//!
//! ```
//! use script_debugger::protocol::{BackendReply, Notification, RecordingBackend};
//! use script_debugger::{DebuggerModel, ScriptId, WorldType};
//!
//! let mut model = DebuggerModel::new(RecordingBackend::new());
//! model.handle_notification(Notification::ScriptParsed {
//!     script_id: ScriptId::from("1"),
//!     url: "app.js".into(),
//!     line_offset: 0,
//!     column_offset: 0,
//!     length: 64,
//!     world_type: WorldType::MainWorld,
//! });
//!
//! let request = model.set_breakpoint(&ScriptId::from("1"), 3, true, "").unwrap();
//! model.handle_reply(request, BackendReply::BreakpointSet {
//!     breakpoint_id: Some("1:3".into()),
//!     actual_line: 3,
//! });
//!
//! assert!(model.find_breakpoint(&ScriptId::from("1"), 3).is_some());
//! ```

mod handlers;
mod input;
mod pending;

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::breakpoint::{Breakpoint, BreakpointStore};
use crate::diff::{LineDiff, MyersDiff};
use crate::error::DebuggerError;
use crate::events::{BreakpointEvent, DebuggerEvent, EventDispatcher, ListenerId};
use crate::id::{BreakpointId, RequestId, RequestIdGenerator, ScriptId};
use crate::protocol::{Backend, BackendCommand};
use crate::script::{Script, ScriptRegistry};
use crate::session::{CallFrame, DebugSession, TransientBreakpoint};
use crate::Result;

pub use input::{SessionInput, UserAction};
use pending::PendingRequest;

/// Local validation policy of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebuggerOptions {
    /// Reject breakpoint lines that are 0 or past the end of a loaded script.
    pub reject_out_of_range_lines: bool,
    /// Allow a new edit of a script while an earlier one awaits its reply.
    pub allow_concurrent_edits: bool,
}

impl Default for DebuggerOptions {
    fn default() -> Self {
        Self {
            reject_out_of_range_lines: true,
            allow_concurrent_edits: false,
        }
    }
}

/// Client-side model of a debugging session.
pub struct DebuggerModel<B: Backend> {
    backend: B,
    options: DebuggerOptions,
    scripts: ScriptRegistry,
    breakpoints: BreakpointStore,
    session: DebugSession,
    events: EventDispatcher,
    diff: Box<dyn LineDiff + Send>,
    pending: HashMap<RequestId, PendingRequest>,
    request_ids: RequestIdGenerator,
    /// Most recent continue-to-line placement; replies to older ones are stale.
    continue_to_line_request: Option<RequestId>,
}

impl<B: Backend> DebuggerModel<B> {
    /// Create a model with default options.
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, DebuggerOptions::default())
    }

    /// Create a model with the given options.
    pub fn with_options(backend: B, options: DebuggerOptions) -> Self {
        Self {
            backend,
            options,
            scripts: ScriptRegistry::new(),
            breakpoints: BreakpointStore::new(),
            session: DebugSession::new(),
            events: EventDispatcher::new(),
            diff: Box::new(MyersDiff),
            pending: HashMap::new(),
            request_ids: RequestIdGenerator::new(),
            continue_to_line_request: None,
        }
    }

    /// Replace the line diff provider used for source edits.
    pub fn with_diff(mut self, diff: impl LineDiff + Send + 'static) -> Self {
        self.diff = Box::new(diff);
        self
    }

    // ------------------------------------------------------------------
    // User operations
    // ------------------------------------------------------------------

    /// Ask the backend to place a breakpoint.
    ///
    /// Nothing is recorded until the backend confirms the placement; the
    /// confirmed breakpoint is announced with [`DebuggerEvent::BreakpointAdded`].
    pub fn set_breakpoint(
        &mut self,
        script_id: &ScriptId,
        line: u32,
        enabled: bool,
        condition: impl Into<String>,
    ) -> Result<RequestId> {
        self.validate_line(script_id, line)?;
        let condition = condition.into();

        let command = BackendCommand::SetBreakpoint {
            script_id: script_id.clone(),
            line,
            condition: condition.clone(),
            enabled,
        };
        let pending = PendingRequest::SetBreakpoint {
            script_id: script_id.clone(),
            line,
            condition,
            enabled,
        };
        Ok(self.request(command, pending))
    }

    /// Remove a breakpoint and release it on the backend.
    ///
    /// Unknown IDs are ignored.
    pub fn remove_breakpoint(&mut self, id: &BreakpointId) -> Option<Breakpoint> {
        let Some(breakpoint) = self.breakpoints.remove(id) else {
            debug!(breakpoint = %id, "remove of unknown breakpoint ignored");
            return None;
        };
        self.discard(&breakpoint);
        Some(breakpoint)
    }

    /// Enable or disable a breakpoint by placing it again.
    ///
    /// Returns `Ok(None)` for unknown IDs and unchanged values.
    pub fn set_breakpoint_enabled(
        &mut self,
        id: &BreakpointId,
        enabled: bool,
    ) -> Result<Option<RequestId>> {
        match self.breakpoints.get(id) {
            Some(bp) if bp.enabled != enabled => {
                let (script_id, line) = (bp.script_id.clone(), bp.line);
                let condition = bp.condition.clone();
                self.replace_breakpoint(id, script_id, line, enabled, condition)
                    .map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Change the condition of a breakpoint by placing it again.
    ///
    /// Returns `Ok(None)` for unknown IDs and unchanged values.
    pub fn set_breakpoint_condition(
        &mut self,
        id: &BreakpointId,
        condition: impl Into<String>,
    ) -> Result<Option<RequestId>> {
        let condition = condition.into();
        match self.breakpoints.get(id) {
            Some(bp) if bp.condition != condition => {
                let (script_id, line, enabled) = (bp.script_id.clone(), bp.line, bp.enabled);
                self.replace_breakpoint(id, script_id, line, enabled, condition)
                    .map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Run until the given line is reached.
    ///
    /// Places a transient breakpoint and resumes the target if it is paused.
    pub fn continue_to_line(&mut self, script_id: &ScriptId, line: u32) -> Result<RequestId> {
        self.validate_line(script_id, line)?;

        let command = BackendCommand::SetBreakpoint {
            script_id: script_id.clone(),
            line,
            condition: String::new(),
            enabled: true,
        };
        let id = self.request(
            command,
            PendingRequest::ContinueToLine {
                script_id: script_id.clone(),
            },
        );
        self.continue_to_line_request = Some(id);

        if self.session.is_paused() {
            self.issue(BackendCommand::Resume);
        }
        Ok(id)
    }

    /// Resume the target if it is paused.
    pub fn resume(&mut self) -> Option<RequestId> {
        if !self.session.is_paused() {
            debug!("resume requested while running");
            return None;
        }
        Some(self.issue(BackendCommand::Resume))
    }

    /// Ask the backend to replace a script's source.
    ///
    /// On success the breakpoints of the script are carried over to the new
    /// text and [`DebuggerEvent::ScriptSourceChanged`] is emitted. A rejected
    /// edit is reported as a warning [`DebuggerEvent::ConsoleMessage`].
    pub fn edit_script_source(
        &mut self,
        script_id: &ScriptId,
        text: impl Into<String>,
    ) -> Result<RequestId> {
        if !self.scripts.contains(script_id) {
            return Err(DebuggerError::ScriptNotFound(script_id.clone()));
        }
        if !self.options.allow_concurrent_edits && self.edit_pending(script_id) {
            warn!(script = %script_id, "edit rejected, previous edit still pending");
            return Err(DebuggerError::EditInProgress(script_id.clone()));
        }

        let command = BackendCommand::EditScriptSource {
            script_id: script_id.clone(),
            text: text.into(),
        };
        Ok(self.request(
            command,
            PendingRequest::EditScriptSource {
                script_id: script_id.clone(),
            },
        ))
    }

    /// Fetch the source text of a script from the backend.
    pub fn request_script_source(&mut self, script_id: &ScriptId) -> Result<RequestId> {
        if !self.scripts.contains(script_id) {
            return Err(DebuggerError::ScriptNotFound(script_id.clone()));
        }
        let command = BackendCommand::GetScriptSource {
            script_id: script_id.clone(),
        };
        Ok(self.request(
            command,
            PendingRequest::ScriptSource {
                script_id: script_id.clone(),
            },
        ))
    }

    /// Forget all session state, scripts and breakpoints.
    ///
    /// Used when the backend has torn down its side; nothing is released on
    /// the backend and no events are emitted. Replies to requests issued
    /// before the reset are ignored.
    pub fn reset(&mut self) {
        info!(
            scripts = self.scripts.len(),
            breakpoints = self.breakpoints.len(),
            "resetting debugger model"
        );
        self.session.reset();
        self.breakpoints.clear();
        self.scripts.clear();
        self.pending.clear();
        self.continue_to_line_request = None;
        self.events.clear_breakpoint_observers();
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Register a listener for model events.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&DebuggerEvent) + Send + 'static,
    {
        self.events.add_listener(listener)
    }

    /// Unregister a listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove_listener(id)
    }

    /// Observe the removal of one breakpoint.
    ///
    /// Returns false without registering if the breakpoint is unknown.
    pub fn observe_breakpoint<F>(&mut self, id: &BreakpointId, observer: F) -> bool
    where
        F: FnMut(&BreakpointEvent) + Send + 'static,
    {
        if self.breakpoints.get(id).is_none() {
            return false;
        }
        self.events.observe_breakpoint(id.clone(), observer);
        true
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Get a stored breakpoint by ID.
    pub fn breakpoint_for_id(&self, id: &BreakpointId) -> Option<&Breakpoint> {
        self.breakpoints.get(id)
    }

    /// Get the breakpoint at a (script, line) location.
    pub fn find_breakpoint(&self, script_id: &ScriptId, line: u32) -> Option<&Breakpoint> {
        self.breakpoints.find(script_id, line)
    }

    /// Iterate over the stored breakpoints matching a predicate.
    pub fn query_breakpoints<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Breakpoint> + 'a
    where
        P: FnMut(&Breakpoint) -> bool + 'a,
    {
        self.breakpoints.query(predicate)
    }

    /// Get a registered script by ID.
    pub fn script_for_id(&self, id: &ScriptId) -> Option<&Script> {
        self.scripts.get(id)
    }

    /// Iterate over the registered scripts matching a predicate.
    pub fn query_scripts<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Script> + 'a
    where
        P: FnMut(&Script) -> bool + 'a,
    {
        self.scripts.find(predicate)
    }

    /// Iterate over the scripts loaded from a URL.
    pub fn scripts_for_url<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a Script> + 'a {
        self.scripts.for_url(url)
    }

    /// Check if the target is stopped.
    pub fn is_paused(&self) -> bool {
        self.session.is_paused()
    }

    /// Get the call frames of the current pause, empty while running.
    pub fn call_frames(&self) -> &[CallFrame] {
        self.session.call_frames()
    }

    /// Get the outstanding continue-to-line breakpoint.
    pub fn continue_to_line_target(&self) -> Option<&TransientBreakpoint> {
        self.session.continue_to_line()
    }

    /// Number of requests still awaiting a reply.
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    /// Get the validation policy.
    pub fn options(&self) -> DebuggerOptions {
        self.options
    }

    /// Get the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get the backend mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Send a command whose reply needs no handling.
    fn issue(&mut self, command: BackendCommand) -> RequestId {
        let id = self.request_ids.next_id();
        debug!(%id, ?command, "sending command");
        self.backend.send(id, command);
        id
    }

    /// Send a command and remember what to do with its reply.
    fn request(&mut self, command: BackendCommand, pending: PendingRequest) -> RequestId {
        let id = self.issue(command);
        self.pending.insert(id, pending);
        id
    }

    fn release(&mut self, id: BreakpointId) {
        self.issue(BackendCommand::RemoveBreakpoint { breakpoint_id: id });
    }

    /// Release a breakpoint that already left the store and announce it.
    fn discard(&mut self, breakpoint: &Breakpoint) {
        self.release(breakpoint.id.clone());
        self.events.emit(DebuggerEvent::BreakpointRemoved {
            breakpoint_id: breakpoint.id.clone(),
        });
        self.events.breakpoint_removed(breakpoint);
    }

    /// Remove a breakpoint and place it again with new attributes.
    fn replace_breakpoint(
        &mut self,
        id: &BreakpointId,
        script_id: ScriptId,
        line: u32,
        enabled: bool,
        condition: String,
    ) -> Result<RequestId> {
        self.validate_line(&script_id, line)?;
        self.remove_breakpoint(id);
        self.set_breakpoint(&script_id, line, enabled, condition)
    }

    fn validate_line(&self, script_id: &ScriptId, line: u32) -> Result<()> {
        let script = self
            .scripts
            .get(script_id)
            .ok_or_else(|| DebuggerError::ScriptNotFound(script_id.clone()))?;

        if !self.options.reject_out_of_range_lines {
            return Ok(());
        }

        let line_count = script.line_count();
        if line == 0 || line_count.is_some_and(|count| line as usize > count) {
            return Err(DebuggerError::LineOutOfRange {
                script_id: script_id.clone(),
                line,
                line_count: line_count.unwrap_or(0),
            });
        }
        Ok(())
    }

    fn edit_pending(&self, script_id: &ScriptId) -> bool {
        self.pending.values().any(|pending| {
            matches!(pending, PendingRequest::EditScriptSource { script_id: id } if id == script_id)
        })
    }
}
