//! Script metadata.

use serde::{Deserialize, Serialize};

use crate::id::ScriptId;

/// Execution world a script was compiled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorldType {
    /// The page's own world.
    #[default]
    MainWorld,
    /// An isolated extension world.
    ExtensionsWorld,
}

/// Location and message of a syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    /// Line reported by the parser.
    pub line: u32,
    /// Parser message.
    pub message: String,
}

/// A script known to the debugger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    /// Backend identifier. Absent when the script failed to parse.
    pub id: Option<ScriptId>,
    /// Source URL, empty for anonymous scripts.
    pub url: String,
    /// Source text, `None` until it has been loaded.
    pub source: Option<String>,
    /// Line offset inside the containing resource.
    pub line_offset: u32,
    /// Column offset inside the containing resource.
    pub column_offset: u32,
    /// Length of the script in characters.
    pub length: u32,
    pub world_type: WorldType,
    /// Set when the script failed to parse.
    pub parse_error: Option<ParseError>,
}

impl Script {
    /// Create a successfully parsed script whose source is not loaded yet.
    pub fn parsed(
        id: ScriptId,
        url: impl Into<String>,
        line_offset: u32,
        column_offset: u32,
        length: u32,
        world_type: WorldType,
    ) -> Self {
        Self {
            id: Some(id),
            url: url.into(),
            source: None,
            line_offset,
            column_offset,
            length,
            world_type,
            parse_error: None,
        }
    }

    /// Create a script that the backend failed to parse.
    pub fn failed(
        url: impl Into<String>,
        source: impl Into<String>,
        starting_line: u32,
        error_line: u32,
        error_message: impl Into<String>,
    ) -> Self {
        let source = source.into();
        Self {
            id: None,
            url: url.into(),
            length: source.chars().count() as u32,
            source: Some(source),
            line_offset: starting_line,
            column_offset: 0,
            world_type: WorldType::MainWorld,
            parse_error: Some(ParseError {
                line: error_line,
                message: error_message.into(),
            }),
        }
    }

    /// Check if the source text is available.
    pub fn is_source_loaded(&self) -> bool {
        self.source.is_some()
    }

    /// Number of lines in the loaded source, split on `'\n'`.
    pub fn line_count(&self) -> Option<usize> {
        self.source.as_ref().map(|s| s.split('\n').count())
    }

    /// Check if the script failed to parse.
    pub fn has_parse_error(&self) -> bool {
        self.parse_error.is_some()
    }
}
