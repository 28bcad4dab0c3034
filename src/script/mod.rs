//! Script tracking.
//!
//! Scripts are announced by the backend when they are parsed. The registry
//! keeps their metadata and, once loaded or edited, their source text.

mod registry;
mod source;

pub use registry::ScriptRegistry;
pub use source::{ParseError, Script, WorldType};
