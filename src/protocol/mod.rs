//! Backend protocol.
//!
//! Commands flow to the backend tagged with a [`RequestId`](crate::RequestId);
//! replies come back carrying the same ID. Notifications are pushed by the
//! backend at any time and expect no reply.
//!
//! # Wire format
//!
//! ```
//! use script_debugger::protocol::{BackendCommand, Notification};
//!
//! let command = BackendCommand::Resume;
//! assert_eq!(serde_json::to_string(&command).unwrap(), r#"{"method":"resume"}"#);
//!
//! let notification: Notification = serde_json::from_str(r#"{"method":"resumed"}"#).unwrap();
//! assert_eq!(notification, Notification::Resumed);
//! ```

mod backend;
mod types;

pub use backend::{Backend, ChannelBackend, RecordingBackend};
pub use types::{BackendCommand, BackendReply, Notification, Outbound};
