//! Async message loop around the model.
//!
//! Replies, notifications and user actions all arrive on one channel and are
//! applied one at a time, each to completion, before the next is taken.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::model::{DebuggerModel, SessionInput};
use crate::protocol::Backend;

/// Default capacity of the input channel created by [`spawn_session`].
pub const DEFAULT_INPUT_CAPACITY: usize = 64;

/// Apply inputs until every sender is dropped, then hand the model back.
pub async fn run_session<B: Backend>(
    mut model: DebuggerModel<B>,
    mut inputs: mpsc::Receiver<SessionInput>,
) -> DebuggerModel<B> {
    info!("debugger session started");
    let mut processed = 0u64;

    while let Some(input) = inputs.recv().await {
        if let Err(e) = model.apply(input) {
            warn!(error = %e, "action rejected");
        }
        processed += 1;
    }

    info!(processed, "debugger session input closed");
    model
}

/// Run a session on the tokio runtime.
///
/// Returns the input sender and a handle resolving to the model once the
/// sender (and all its clones) are dropped.
pub fn spawn_session<B>(
    model: DebuggerModel<B>,
) -> (mpsc::Sender<SessionInput>, JoinHandle<DebuggerModel<B>>)
where
    B: Backend + Send + 'static,
{
    let (tx, rx) = mpsc::channel(DEFAULT_INPUT_CAPACITY);
    let handle = tokio::spawn(run_session(model, rx));
    (tx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserAction;
    use crate::protocol::{BackendCommand, BackendReply, ChannelBackend, Notification};
    use crate::{ScriptId, WorldType};

    fn parsed(id: &str) -> SessionInput {
        SessionInput::from(Notification::ScriptParsed {
            script_id: ScriptId::from(id),
            url: format!("{id}.js"),
            line_offset: 0,
            column_offset: 0,
            length: 10,
            world_type: WorldType::MainWorld,
        })
    }

    #[tokio::test]
    async fn test_round_trip_through_channels() {
        let (backend, mut outbound) = ChannelBackend::channel();
        let (tx, handle) = spawn_session(DebuggerModel::new(backend));

        tx.send(parsed("1")).await.unwrap();
        tx.send(SessionInput::from(UserAction::SetBreakpoint {
            script_id: ScriptId::from("1"),
            line: 2,
            enabled: true,
            condition: String::new(),
        }))
        .await
        .unwrap();

        let request = outbound.recv().await.unwrap();
        assert!(matches!(
            request.command,
            BackendCommand::SetBreakpoint { line: 2, .. }
        ));

        tx.send(SessionInput::Reply {
            id: request.id,
            reply: BackendReply::BreakpointSet {
                breakpoint_id: Some("1:2".into()),
                actual_line: 2,
            },
        })
        .await
        .unwrap();
        drop(tx);

        let model = handle.await.unwrap();
        assert!(model.find_breakpoint(&ScriptId::from("1"), 2).is_some());
        assert_eq!(model.pending_requests(), 0);
    }

    #[tokio::test]
    async fn test_rejected_action_does_not_stop_loop() {
        let (backend, _outbound) = ChannelBackend::channel();
        let (tx, rx) = mpsc::channel(8);

        // Unknown script: rejected locally
        tx.send(SessionInput::from(UserAction::ContinueToLine {
            script_id: ScriptId::from("missing"),
            line: 1,
        }))
        .await
        .unwrap();
        tx.send(parsed("2")).await.unwrap();
        drop(tx);

        let model = run_session(DebuggerModel::new(backend), rx).await;
        assert!(model.script_for_id(&ScriptId::from("2")).is_some());
        assert_eq!(model.pending_requests(), 0);
    }
}
