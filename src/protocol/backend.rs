//! Backend command sinks.

use tokio::sync::mpsc;

use super::{BackendCommand, Outbound};
use crate::id::RequestId;

/// Destination for commands issued by the model.
///
/// Sending is fire-and-forget: the reply, if any, is delivered later through
/// [`DebuggerModel::handle_reply`](crate::DebuggerModel::handle_reply).
pub trait Backend {
    fn send(&mut self, id: RequestId, command: BackendCommand);
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn send(&mut self, id: RequestId, command: BackendCommand) {
        (**self).send(id, command)
    }
}

/// Backend that forwards commands over a tokio channel to a transport task.
#[derive(Debug, Clone)]
pub struct ChannelBackend {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelBackend {
    pub fn new(tx: mpsc::UnboundedSender<Outbound>) -> Self {
        Self { tx }
    }

    /// Create a backend together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Backend for ChannelBackend {
    fn send(&mut self, id: RequestId, command: BackendCommand) {
        if self.tx.send(Outbound { id, command }).is_err() {
            tracing::warn!(%id, "transport closed, command dropped");
        }
    }
}

/// Backend that keeps every command in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    sent: Vec<Outbound>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get every command sent so far.
    pub fn sent(&self) -> &[Outbound] {
        &self.sent
    }

    /// Get the most recent command.
    pub fn last(&self) -> Option<&Outbound> {
        self.sent.last()
    }

    /// Remove and return every recorded command.
    pub fn take(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.sent)
    }
}

impl Backend for RecordingBackend {
    fn send(&mut self, id: RequestId, command: BackendCommand) {
        self.sent.push(Outbound { id, command });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_backend() {
        let mut backend = RecordingBackend::new();
        backend.send(RequestId::from_raw(1), BackendCommand::Resume);

        assert_eq!(backend.sent().len(), 1);
        assert_eq!(backend.last().unwrap().command, BackendCommand::Resume);
        assert_eq!(backend.take().len(), 1);
        assert!(backend.sent().is_empty());
    }

    #[test]
    fn test_channel_backend_forwards() {
        let (mut backend, mut rx) = ChannelBackend::channel();
        backend.send(RequestId::from_raw(3), BackendCommand::Resume);

        let outbound = rx.try_recv().unwrap();
        assert_eq!(outbound.id, RequestId::from_raw(3));
        assert_eq!(outbound.command, BackendCommand::Resume);
    }

    #[test]
    fn test_channel_backend_closed_transport() {
        let (mut backend, rx) = ChannelBackend::channel();
        drop(rx);
        // Must not panic
        backend.send(RequestId::from_raw(1), BackendCommand::Resume);
    }
}
