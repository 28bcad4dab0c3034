//! Events emitted by the debugger model.
//!
//! Listeners are called synchronously, in registration order, with a shared
//! reference to the event. They cannot reach back into the model while it is
//! dispatching.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::breakpoint::Breakpoint;
use crate::id::{BreakpointId, ScriptId};
use crate::script::Script;
use crate::session::PauseDetails;

/// Severity of a user-visible console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageLevel {
    Log,
    Warning,
    Error,
}

/// Model-level event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DebuggerEvent {
    DebuggerPaused { details: PauseDetails },
    DebuggerResumed,
    ParsedScriptSource { script_id: ScriptId },
    FailedToParseScriptSource { script: Script },
    /// A live edit replaced the text of a script.
    ScriptSourceChanged { script_id: ScriptId, old_source: String },
    /// The text of a script was fetched for the first time.
    ScriptSourceLoaded { script_id: ScriptId },
    BreakpointAdded { breakpoint: Breakpoint },
    BreakpointRemoved { breakpoint_id: BreakpointId },
    /// Message for the user-visible console.
    ConsoleMessage { level: MessageLevel, text: String },
    WorkerCreated { payload: Value },
    WorkerDestroyed { payload: Value },
    DebuggerWasEnabled,
    DebuggerWasDisabled,
}

/// Event delivered to the observers of one breakpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakpointEvent {
    /// The breakpoint left the store.
    Removed(Breakpoint),
}

/// Handle for unregistering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&DebuggerEvent) + Send>;
type BreakpointObserver = Box<dyn FnMut(&BreakpointEvent) + Send>;

/// Synchronous event fan-out.
#[derive(Default)]
pub struct EventDispatcher {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
    breakpoint_observers: HashMap<BreakpointId, Vec<BreakpointObserver>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every model event.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&DebuggerEvent) + Send + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        before != self.listeners.len()
    }

    /// Register an observer for a single breakpoint.
    ///
    /// Observers are dropped once the breakpoint is removed.
    pub fn observe_breakpoint<F>(&mut self, id: BreakpointId, observer: F)
    where
        F: FnMut(&BreakpointEvent) + Send + 'static,
    {
        self.breakpoint_observers
            .entry(id)
            .or_default()
            .push(Box::new(observer));
    }

    /// Deliver an event to every listener.
    pub fn emit(&mut self, event: DebuggerEvent) {
        tracing::trace!(?event, "emitting");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Notify and drop the observers of a removed breakpoint.
    pub fn breakpoint_removed(&mut self, breakpoint: &Breakpoint) {
        if let Some(mut observers) = self.breakpoint_observers.remove(&breakpoint.id) {
            let event = BreakpointEvent::Removed(breakpoint.clone());
            for observer in observers.iter_mut() {
                observer(&event);
            }
        }
    }

    /// Drop every breakpoint observer without notifying it.
    pub fn clear_breakpoint_observers(&mut self) {
        self.breakpoint_observers.clear();
    }

    /// Get the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .field("breakpoint_observers", &self.breakpoint_observers.len())
            .finish()
    }
}
