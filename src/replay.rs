//! Session transcript replay.
//!
//! A transcript is a JSON-lines file of [`SessionInput`] messages. Blank
//! lines and lines starting with `#` are skipped. Replaying feeds every input
//! through [`run_session`] and records each backend command and model event
//! in the order they happened.

use std::io::BufRead;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::driver::run_session;
use crate::error::DebuggerError;
use crate::events::DebuggerEvent;
use crate::id::RequestId;
use crate::model::{DebuggerModel, DebuggerOptions, SessionInput};
use crate::protocol::{Backend, BackendCommand};
use crate::Result;

/// One observable effect of the replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TraceLine {
    /// Command sent to the backend.
    Command { id: RequestId, command: BackendCommand },
    /// Event emitted to listeners.
    Event(DebuggerEvent),
}

/// Backend that writes commands into the trace.
struct TraceBackend {
    tx: mpsc::UnboundedSender<TraceLine>,
}

impl Backend for TraceBackend {
    fn send(&mut self, id: RequestId, command: BackendCommand) {
        let _ = self.tx.send(TraceLine::Command { id, command });
    }
}

/// Decode a transcript.
pub fn parse_transcript<R: BufRead>(reader: R) -> Result<Vec<SessionInput>> {
    let mut inputs = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let input = serde_json::from_str(trimmed).map_err(|source| DebuggerError::Transcript {
            line: index + 1,
            source,
        })?;
        inputs.push(input);
    }

    Ok(inputs)
}

/// Replay a transcript and return the resulting trace.
pub async fn replay<R: BufRead>(reader: R, options: DebuggerOptions) -> Result<Vec<TraceLine>> {
    let inputs = parse_transcript(reader)?;
    tracing::info!(inputs = inputs.len(), "replaying transcript");

    let (trace_tx, mut trace_rx) = mpsc::unbounded_channel();
    let mut model = DebuggerModel::with_options(
        TraceBackend {
            tx: trace_tx.clone(),
        },
        options,
    );
    model.add_listener(move |event| {
        let _ = trace_tx.send(TraceLine::Event(event.clone()));
    });

    let (input_tx, input_rx) = mpsc::channel(inputs.len().max(1));
    for input in inputs {
        input_tx
            .send(input)
            .await
            .map_err(|_| DebuggerError::ChannelClosed)?;
    }
    drop(input_tx);

    drop(run_session(model, input_rx).await);

    let mut trace = Vec::new();
    while let Ok(line) = trace_rx.try_recv() {
        trace.push(line);
    }
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let transcript = "# comment\n\n{\"kind\":\"notification\",\"notification\":{\"method\":\"resumed\"}}\n";
        let inputs = parse_transcript(transcript.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 1);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let transcript = "\n{\"kind\":\"bogus\"}\n";
        let err = parse_transcript(transcript.as_bytes()).unwrap_err();
        assert!(matches!(err, DebuggerError::Transcript { line: 2, .. }));
    }

    #[tokio::test]
    async fn test_replay_empty_transcript() {
        let trace = replay("".as_bytes(), DebuggerOptions::default())
            .await
            .unwrap();
        assert!(trace.is_empty());
    }
}
