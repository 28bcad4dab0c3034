//! Breakpoint storage and the (script, line) index.

use std::collections::BTreeMap;

use super::Breakpoint;
use crate::error::DebuggerError;
use crate::id::{BreakpointId, ScriptId};
use crate::Result;

/// Storage for confirmed breakpoints.
///
/// The primary map and the location index are always updated within the same
/// call, so the index never refers to a missing breakpoint and no location is
/// held by two breakpoints.
#[derive(Debug, Default)]
pub struct BreakpointStore {
    breakpoints: BTreeMap<BreakpointId, Breakpoint>,
    locations: BTreeMap<(ScriptId, u32), BreakpointId>,
}

impl BreakpointStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a breakpoint.
    ///
    /// Fails if its ID or its location is already taken. The store is left
    /// untouched in that case and the caller owns the backend cleanup.
    pub fn add(&mut self, breakpoint: Breakpoint) -> Result<()> {
        if self.breakpoints.contains_key(&breakpoint.id) {
            return Err(DebuggerError::BreakpointExists(breakpoint.id));
        }
        let location = (breakpoint.script_id.clone(), breakpoint.line);
        if self.locations.contains_key(&location) {
            return Err(DebuggerError::LocationTaken {
                script_id: location.0,
                line: location.1,
            });
        }

        self.locations.insert(location, breakpoint.id.clone());
        self.breakpoints.insert(breakpoint.id.clone(), breakpoint);
        Ok(())
    }

    /// Remove a breakpoint from the store.
    ///
    /// Returns the removed breakpoint marked as removed, or None if it didn't exist.
    pub fn remove(&mut self, id: &BreakpointId) -> Option<Breakpoint> {
        let mut breakpoint = self.breakpoints.remove(id)?;
        self.unindex(&breakpoint);
        breakpoint.removed = true;
        Some(breakpoint)
    }

    /// Remove every breakpoint of a script.
    ///
    /// Returns the removed breakpoints in ID order.
    pub fn remove_all_for_script(&mut self, script_id: &ScriptId) -> Vec<Breakpoint> {
        let ids: Vec<BreakpointId> = self
            .breakpoints
            .values()
            .filter(|bp| &bp.script_id == script_id)
            .map(|bp| bp.id.clone())
            .collect();

        ids.iter().filter_map(|id| self.remove(id)).collect()
    }

    /// Get the breakpoint with the given ID.
    pub fn get(&self, id: &BreakpointId) -> Option<&Breakpoint> {
        self.breakpoints.get(id)
    }

    /// Get the breakpoint occupying a location.
    pub fn find(&self, script_id: &ScriptId, line: u32) -> Option<&Breakpoint> {
        self.locations
            .get(&(script_id.clone(), line))
            .and_then(|id| self.breakpoints.get(id))
    }

    /// Iterate over the breakpoints matching a predicate.
    ///
    /// The iterator borrows the current contents; call again to restart.
    pub fn query<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a Breakpoint> + 'a
    where
        P: FnMut(&Breakpoint) -> bool + 'a,
    {
        self.breakpoints.values().filter(move |bp| predicate(bp))
    }

    /// Get the number of stored breakpoints.
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Drop every breakpoint without marking or returning them.
    pub fn clear(&mut self) {
        self.breakpoints.clear();
        self.locations.clear();
    }

    fn unindex(&mut self, breakpoint: &Breakpoint) {
        let location = (breakpoint.script_id.clone(), breakpoint.line);
        if self.locations.get(&location) == Some(&breakpoint.id) {
            self.locations.remove(&location);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(id: &str, script: &str, line: u32) -> Breakpoint {
        Breakpoint::new(BreakpointId::from(id), ScriptId::from(script), "a.js", line, true, "")
    }

    #[test]
    fn test_add_and_find() {
        let mut store = BreakpointStore::new();
        store.add(bp("b1", "1", 4)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&BreakpointId::from("b1")).unwrap().line, 4);
        assert_eq!(store.find(&ScriptId::from("1"), 4).unwrap().id.as_str(), "b1");
        assert!(store.find(&ScriptId::from("1"), 5).is_none());
        assert!(store.find(&ScriptId::from("2"), 4).is_none());
    }

    #[test]
    fn test_add_rejects_taken_location() {
        let mut store = BreakpointStore::new();
        store.add(bp("b1", "1", 4)).unwrap();

        let result = store.add(bp("b2", "1", 4));
        assert!(matches!(result, Err(DebuggerError::LocationTaken { line: 4, .. })));
        assert_eq!(store.len(), 1);
        assert!(store.get(&BreakpointId::from("b2")).is_none());
        assert_eq!(store.find(&ScriptId::from("1"), 4).unwrap().id.as_str(), "b1");
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut store = BreakpointStore::new();
        store.add(bp("b1", "1", 4)).unwrap();

        let result = store.add(bp("b1", "1", 9));
        assert!(matches!(result, Err(DebuggerError::BreakpointExists(_))));
        assert!(store.find(&ScriptId::from("1"), 9).is_none());
    }

    #[test]
    fn test_same_line_in_different_scripts() {
        let mut store = BreakpointStore::new();
        store.add(bp("b1", "1", 4)).unwrap();
        store.add(bp("b2", "2", 4)).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_marks_removed_and_unindexes() {
        let mut store = BreakpointStore::new();
        store.add(bp("b1", "1", 4)).unwrap();

        let removed = store.remove(&BreakpointId::from("b1")).unwrap();
        assert!(removed.removed);
        assert!(!removed.is_active());
        assert!(store.is_empty());
        assert!(store.find(&ScriptId::from("1"), 4).is_none());

        // The location can be reused afterwards
        store.add(bp("b2", "1", 4)).unwrap();
        assert_eq!(store.find(&ScriptId::from("1"), 4).unwrap().id.as_str(), "b2");
    }

    #[test]
    fn test_remove_unknown() {
        let mut store = BreakpointStore::new();
        assert!(store.remove(&BreakpointId::from("nope")).is_none());
    }

    #[test]
    fn test_remove_all_for_script() {
        let mut store = BreakpointStore::new();
        store.add(bp("b1", "1", 4)).unwrap();
        store.add(bp("b2", "1", 8)).unwrap();
        store.add(bp("b3", "2", 4)).unwrap();

        let removed = store.remove_all_for_script(&ScriptId::from("1"));
        assert_eq!(removed.len(), 2);
        assert!(removed.iter().all(|bp| bp.removed));
        assert_eq!(store.len(), 1);
        assert!(store.find(&ScriptId::from("1"), 4).is_none());
        assert!(store.find(&ScriptId::from("1"), 8).is_none());
        assert!(store.find(&ScriptId::from("2"), 4).is_some());
    }

    #[test]
    fn test_query() {
        let mut store = BreakpointStore::new();
        store.add(bp("b1", "1", 4)).unwrap();
        store.add(bp("b2", "1", 8)).unwrap();
        store.add(bp("b3", "2", 4)).unwrap();

        let script_one = ScriptId::from("1");
        assert_eq!(store.query(|bp| bp.script_id == script_one).count(), 2);
        assert_eq!(store.query(|bp| bp.line == 4).count(), 2);
        assert_eq!(store.query(|_| false).count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut store = BreakpointStore::new();
        store.add(bp("b1", "1", 4)).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert!(store.find(&ScriptId::from("1"), 4).is_none());
    }
}
