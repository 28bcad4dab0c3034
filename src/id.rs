//! Identifier types.
//!
//! Script and breakpoint identifiers are assigned by the backend and are
//! treated as opaque strings. Request identifiers are assigned locally and
//! correlate backend replies with the command that caused them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Backend-assigned identifier of a parsed script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptId(String);

impl ScriptId {
    /// Get the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScriptId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ScriptId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backend-assigned identifier of a placed breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointId(String);

impl BreakpointId {
    /// Get the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BreakpointId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BreakpointId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for BreakpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Locally assigned identifier of an outstanding backend request.
///
/// Displayed as `req-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    /// Get the raw u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Create a RequestId from a raw u64 value.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("req-").unwrap_or(s).parse().map(RequestId)
    }
}

/// Sequential request ID source, owned by one model.
///
/// Numbering starts at 1 so replayed transcripts stay deterministic.
#[derive(Debug, Clone)]
pub struct RequestIdGenerator {
    next: u64,
}

impl RequestIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next request ID.
    pub fn next_id(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next += 1;
        id
    }
}

impl Default for RequestIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
