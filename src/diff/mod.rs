//! Line alignment and breakpoint line remapping.
//!
//! A [`LineDiff`] provider aligns the lines of two texts. [`remap_line`]
//! uses that alignment to carry a breakpoint line across a source edit.

mod alignment;
mod remap;

pub use alignment::{LineAlignment, LineDiff, MyersDiff};
pub use remap::remap_line;

/// Split source text into lines the way breakpoint lines are counted.
///
/// Splits on `'\n'` only, so a trailing newline yields a final empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}
