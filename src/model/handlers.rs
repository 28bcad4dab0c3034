//! Reactions to backend replies and notifications.

use tracing::{debug, trace, warn};

use super::{DebuggerModel, PendingRequest, SessionInput, UserAction};
use crate::breakpoint::Breakpoint;
use crate::diff::{remap_line, split_lines};
use crate::error::DebuggerError;
use crate::events::{DebuggerEvent, MessageLevel};
use crate::id::{BreakpointId, RequestId, ScriptId};
use crate::protocol::{Backend, BackendReply, Notification};
use crate::script::Script;
use crate::session::{CallFrame, PauseDetails, TransientBreakpoint};
use crate::Result;

impl<B: Backend> DebuggerModel<B> {
    /// Process one inbound message to completion.
    ///
    /// Only user actions can fail; backend messages are always absorbed.
    pub fn apply(&mut self, input: SessionInput) -> Result<()> {
        match input {
            SessionInput::Reply { id, reply } => self.handle_reply(id, reply),
            SessionInput::Notification { notification } => self.handle_notification(notification),
            SessionInput::Action { action } => return self.perform(action),
        }
        Ok(())
    }

    /// Run a user action.
    pub fn perform(&mut self, action: UserAction) -> Result<()> {
        match action {
            UserAction::SetBreakpoint {
                script_id,
                line,
                enabled,
                condition,
            } => {
                self.set_breakpoint(&script_id, line, enabled, condition)?;
            }
            UserAction::RemoveBreakpoint { breakpoint_id } => {
                self.remove_breakpoint(&breakpoint_id);
            }
            UserAction::SetBreakpointEnabled {
                breakpoint_id,
                enabled,
            } => {
                self.set_breakpoint_enabled(&breakpoint_id, enabled)?;
            }
            UserAction::SetBreakpointCondition {
                breakpoint_id,
                condition,
            } => {
                self.set_breakpoint_condition(&breakpoint_id, condition)?;
            }
            UserAction::ContinueToLine { script_id, line } => {
                self.continue_to_line(&script_id, line)?;
            }
            UserAction::EditScriptSource { script_id, text } => {
                self.edit_script_source(&script_id, text)?;
            }
            UserAction::RequestScriptSource { script_id } => {
                self.request_script_source(&script_id)?;
            }
            UserAction::Resume => {
                self.resume();
            }
            UserAction::Reset => self.reset(),
        }
        Ok(())
    }

    /// Handle a push notification from the backend.
    pub fn handle_notification(&mut self, notification: Notification) {
        match notification {
            Notification::Paused { details } => self.on_paused(details),
            Notification::Resumed => self.on_resumed(),
            Notification::ScriptParsed {
                script_id,
                url,
                line_offset,
                column_offset,
                length,
                world_type,
            } => self.on_script_parsed(Script::parsed(
                script_id,
                url,
                line_offset,
                column_offset,
                length,
                world_type,
            )),
            Notification::ScriptParseFailed {
                url,
                source,
                starting_line,
                error_line,
                error_message,
            } => self.on_script_parse_failed(Script::failed(
                url,
                source,
                starting_line,
                error_line,
                error_message,
            )),
            Notification::BreakpointResolved {
                breakpoint_id,
                script_id,
                line,
                condition,
                enabled,
                original_line,
            } => self.on_breakpoint_resolved(
                breakpoint_id,
                script_id,
                line,
                condition,
                enabled,
                original_line,
            ),
            Notification::WorkerCreated { payload } => {
                self.events.emit(DebuggerEvent::WorkerCreated { payload })
            }
            Notification::WorkerDestroyed { payload } => {
                self.events.emit(DebuggerEvent::WorkerDestroyed { payload })
            }
            Notification::DebuggerWasEnabled => self.events.emit(DebuggerEvent::DebuggerWasEnabled),
            Notification::DebuggerWasDisabled => {
                self.events.emit(DebuggerEvent::DebuggerWasDisabled)
            }
        }
    }

    /// The target stopped.
    ///
    /// An outstanding continue-to-line breakpoint has served its purpose and
    /// is released.
    pub fn on_paused(&mut self, details: PauseDetails) {
        if let Some(transient) = self.session.pause(details.call_frames.clone()) {
            debug!(breakpoint = %transient.id, "releasing continue-to-line breakpoint");
            self.release(transient.id);
        }
        self.events.emit(DebuggerEvent::DebuggerPaused { details });
    }

    /// The target resumed. Ignored while already running.
    pub fn on_resumed(&mut self) {
        if self.session.resume() {
            self.events.emit(DebuggerEvent::DebuggerResumed);
        } else {
            debug!("resumed notification while running ignored");
        }
    }

    pub fn on_script_parsed(&mut self, script: Script) {
        let Some(script_id) = script.id.clone() else {
            warn!(url = %script.url, "parsed script without identifier ignored");
            return;
        };

        match self.scripts.register(script) {
            Ok(()) => self
                .events
                .emit(DebuggerEvent::ParsedScriptSource { script_id }),
            Err(e) => warn!(error = %e, "script announcement ignored"),
        }
    }

    /// A script failed to parse. It is announced but never registered.
    pub fn on_script_parse_failed(&mut self, script: Script) {
        debug!(url = %script.url, "script failed to parse");
        self.events
            .emit(DebuggerEvent::FailedToParseScriptSource { script });
    }

    /// The backend placed a breakpoint from its persisted state.
    pub fn on_breakpoint_resolved(
        &mut self,
        breakpoint_id: BreakpointId,
        script_id: ScriptId,
        line: u32,
        condition: String,
        enabled: bool,
        original_line: u32,
    ) {
        let breakpoint = Breakpoint::new(breakpoint_id, script_id, "", line, enabled, condition)
            .with_original_line(original_line)
            .with_restored(true);
        self.insert_breakpoint(breakpoint);
    }

    /// Handle the backend reply to an earlier command.
    pub fn handle_reply(&mut self, id: RequestId, reply: BackendReply) {
        let Some(pending) = self.pending.remove(&id) else {
            if reply != BackendReply::Ack {
                debug!(%id, "reply to unknown request ignored");
            }
            return;
        };

        match (pending, reply) {
            (
                PendingRequest::SetBreakpoint {
                    script_id,
                    line,
                    condition,
                    enabled,
                },
                BackendReply::BreakpointSet {
                    breakpoint_id,
                    actual_line,
                },
            ) => match breakpoint_id {
                Some(breakpoint_id) => {
                    let breakpoint = Breakpoint::new(
                        breakpoint_id,
                        script_id,
                        "",
                        actual_line,
                        enabled,
                        condition,
                    )
                    .with_original_line(line);
                    self.insert_breakpoint(breakpoint);
                }
                None => debug!(script = %script_id, line, "backend declined breakpoint"),
            },
            (
                PendingRequest::ContinueToLine { script_id },
                BackendReply::BreakpointSet {
                    breakpoint_id,
                    actual_line,
                },
            ) => self.continue_to_line_placed(id, script_id, breakpoint_id, actual_line),
            (
                PendingRequest::EditScriptSource { script_id },
                BackendReply::ScriptSourceEdited {
                    success,
                    text,
                    call_frames,
                },
            ) => {
                if success {
                    self.script_source_edited(script_id, text, call_frames);
                } else {
                    self.script_edit_failed(script_id, text);
                }
            }
            (PendingRequest::ScriptSource { script_id }, BackendReply::ScriptSource { source }) => {
                self.script_source_loaded(script_id, source)
            }
            (pending, reply) => warn!(%id, ?pending, ?reply, "mismatched reply ignored"),
        }
    }

    /// Store a confirmed breakpoint, or release it if its location is taken.
    fn insert_breakpoint(&mut self, mut breakpoint: Breakpoint) {
        if let Some(script) = self.scripts.get(&breakpoint.script_id) {
            breakpoint.url = script.url.clone();
        }

        match self.breakpoints.add(breakpoint.clone()) {
            Ok(()) => {
                debug!(breakpoint = %breakpoint.id, line = breakpoint.line, "breakpoint added");
                self.events
                    .emit(DebuggerEvent::BreakpointAdded { breakpoint });
            }
            Err(DebuggerError::BreakpointExists(id)) => {
                trace!(breakpoint = %id, "breakpoint already known");
            }
            Err(e) => {
                debug!(error = %e, "releasing duplicate breakpoint");
                self.release(breakpoint.id);
            }
        }
    }

    fn continue_to_line_placed(
        &mut self,
        request: RequestId,
        script_id: ScriptId,
        breakpoint_id: Option<BreakpointId>,
        line: u32,
    ) {
        let Some(id) = breakpoint_id else {
            debug!(script = %script_id, "backend declined continue-to-line breakpoint");
            return;
        };

        if self.continue_to_line_request != Some(request) {
            debug!(breakpoint = %id, %request, "releasing superseded continue-to-line breakpoint");
            self.release(id);
            return;
        }

        if self.breakpoints.find(&script_id, line).is_some() {
            // The existing breakpoint already stops there.
            self.release(id);
            return;
        }

        let transient = TransientBreakpoint {
            id,
            script_id,
            line,
        };
        if let Some(previous) = self.session.set_continue_to_line(transient) {
            self.release(previous.id);
        }
    }

    fn script_source_edited(
        &mut self,
        script_id: ScriptId,
        text: String,
        call_frames: Option<Vec<CallFrame>>,
    ) {
        if !self.scripts.contains(&script_id) {
            debug!(script = %script_id, "edit reply for forgotten script ignored");
            return;
        }

        if let Some(frames) = call_frames.filter(|frames| !frames.is_empty()) {
            self.session.replace_call_frames(frames);
        }

        let old_source = match self.scripts.update_source(&script_id, text.as_str()) {
            Ok(old_source) => old_source,
            Err(e) => {
                debug!(error = %e, "edit reply ignored");
                return;
            }
        };

        let alignment = self
            .diff
            .align(&split_lines(&old_source), &split_lines(&text));

        let removed = self.breakpoints.remove_all_for_script(&script_id);
        for breakpoint in &removed {
            self.discard(breakpoint);
        }

        for breakpoint in removed {
            let old_index = (breakpoint.line as usize).saturating_sub(1);
            let Some(new_index) = remap_line(&alignment, old_index) else {
                debug!(
                    breakpoint = %breakpoint.id,
                    line = breakpoint.line,
                    "breakpoint dropped by edit"
                );
                continue;
            };

            let line = new_index as u32 + 1;
            if let Err(e) =
                self.set_breakpoint(&script_id, line, breakpoint.enabled, breakpoint.condition)
            {
                debug!(error = %e, "breakpoint not restored after edit");
            }
        }

        self.events.emit(DebuggerEvent::ScriptSourceChanged {
            script_id,
            old_source,
        });
    }

    fn script_edit_failed(&mut self, script_id: ScriptId, message: String) {
        warn!(script = %script_id, %message, "script edit rejected");
        self.events.emit(DebuggerEvent::ConsoleMessage {
            level: MessageLevel::Warning,
            text: message,
        });
    }

    fn script_source_loaded(&mut self, script_id: ScriptId, source: String) {
        match self.scripts.load_source(&script_id, source) {
            Ok(true) => self
                .events
                .emit(DebuggerEvent::ScriptSourceLoaded { script_id }),
            Ok(false) => trace!(script = %script_id, "source already loaded"),
            Err(e) => debug!(error = %e, "source reply ignored"),
        }
    }
}
