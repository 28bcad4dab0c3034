//! Line alignment between two texts.

use similar::{capture_diff_slices, Algorithm, DiffOp};

/// Line-level alignment of an old and a new text.
///
/// Each old line maps to the index of the identical new line it survived as,
/// or `None` if it was deleted or changed. The reverse direction is symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAlignment {
    old_to_new: Vec<Option<usize>>,
    new_to_old: Vec<Option<usize>>,
}

impl LineAlignment {
    /// Build an alignment from explicit per-line mappings.
    pub fn new(old_to_new: Vec<Option<usize>>, new_to_old: Vec<Option<usize>>) -> Self {
        Self {
            old_to_new,
            new_to_old,
        }
    }

    /// Create an alignment where no line matches.
    pub fn unmatched(old_len: usize, new_len: usize) -> Self {
        Self::new(vec![None; old_len], vec![None; new_len])
    }

    /// Record that `old` survived unchanged as `new`.
    pub fn link(&mut self, old: usize, new: usize) {
        self.old_to_new[old] = Some(new);
        self.new_to_old[new] = Some(old);
    }

    /// Get the new index of an old line. Out-of-range indices are unmatched.
    pub fn old_to_new(&self, old: usize) -> Option<usize> {
        self.old_to_new.get(old).copied().flatten()
    }

    /// Get the old index of a new line. Out-of-range indices are unmatched.
    pub fn new_to_old(&self, new: usize) -> Option<usize> {
        self.new_to_old.get(new).copied().flatten()
    }

    /// Number of lines in the old text.
    pub fn old_len(&self) -> usize {
        self.old_to_new.len()
    }

    /// Number of lines in the new text.
    pub fn new_len(&self) -> usize {
        self.new_to_old.len()
    }
}

/// Computes a line alignment between two texts.
pub trait LineDiff {
    fn align(&self, old: &[&str], new: &[&str]) -> LineAlignment;
}

/// Myers diff from the `similar` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MyersDiff;

impl LineDiff for MyersDiff {
    fn align(&self, old: &[&str], new: &[&str]) -> LineAlignment {
        let mut alignment = LineAlignment::unmatched(old.len(), new.len());

        for op in capture_diff_slices(Algorithm::Myers, old, new) {
            if let DiffOp::Equal {
                old_index,
                new_index,
                len,
            } = op
            {
                for offset in 0..len {
                    alignment.link(old_index + offset, new_index + offset);
                }
            }
        }

        alignment
    }
}
