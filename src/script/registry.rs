//! Script storage keyed by backend identifier.

use std::collections::BTreeMap;

use super::Script;
use crate::error::DebuggerError;
use crate::id::ScriptId;
use crate::Result;

/// Storage for parsed scripts.
///
/// Identifiers are assigned once by the backend, so registering the same
/// identifier twice is rejected instead of overwriting.
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    scripts: BTreeMap<ScriptId, Script>,
}

impl ScriptRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a script under its identifier.
    pub fn register(&mut self, script: Script) -> Result<()> {
        let id = script
            .id
            .clone()
            .ok_or_else(|| DebuggerError::MissingScriptId(script.url.clone()))?;

        if self.scripts.contains_key(&id) {
            return Err(DebuggerError::ScriptExists(id));
        }

        self.scripts.insert(id, script);
        Ok(())
    }

    /// Get the script with the given ID.
    pub fn get(&self, id: &ScriptId) -> Option<&Script> {
        self.scripts.get(id)
    }

    /// Check if a script is registered.
    pub fn contains(&self, id: &ScriptId) -> bool {
        self.scripts.contains_key(id)
    }

    /// Iterate over the scripts matching a predicate.
    ///
    /// The iterator borrows the current contents; call again to restart.
    pub fn find<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a Script> + 'a
    where
        P: FnMut(&Script) -> bool + 'a,
    {
        self.scripts.values().filter(move |s| predicate(s))
    }

    /// Iterate over the scripts loaded from a URL.
    pub fn for_url<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a Script> + 'a {
        self.find(move |s| s.url == url)
    }

    /// Replace the source text of a script.
    ///
    /// Returns the previous text, empty if it was never loaded.
    pub fn update_source(&mut self, id: &ScriptId, text: impl Into<String>) -> Result<String> {
        let script = self
            .scripts
            .get_mut(id)
            .ok_or_else(|| DebuggerError::ScriptNotFound(id.clone()))?;

        Ok(script.source.replace(text.into()).unwrap_or_default())
    }

    /// Fill in the source text of a script that has none yet.
    ///
    /// Returns `Ok(false)` if the source was already loaded and was left as is.
    pub fn load_source(&mut self, id: &ScriptId, text: impl Into<String>) -> Result<bool> {
        let script = self
            .scripts
            .get_mut(id)
            .ok_or_else(|| DebuggerError::ScriptNotFound(id.clone()))?;

        if script.source.is_some() {
            return Ok(false);
        }
        script.source = Some(text.into());
        Ok(true)
    }

    /// Get the number of registered scripts.
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Drop every script.
    pub fn clear(&mut self) {
        self.scripts.clear();
    }
}
