//! Breakpoint line remapping across a source edit.

use super::LineAlignment;

/// Find the new 0-based index of an old 0-based line.
///
/// A line that survived unchanged maps directly. Otherwise the nearest
/// preceding surviving line anchors a single candidate at the same distance
/// in the new text. The candidate is taken only if it exists and is either
/// a pure insertion or maps back to `old`. Returns `None` when the line
/// cannot be carried over.
pub fn remap_line(alignment: &LineAlignment, old: usize) -> Option<usize> {
    if let Some(new) = alignment.old_to_new(old) {
        return Some(new);
    }

    // Lines past the old text are never matched.
    let (anchor_old, anchor_new) = (0..old.min(alignment.old_len()))
        .rev()
        .find_map(|i| alignment.old_to_new(i).map(|new| (i, new)))?;

    let candidate = anchor_new.checked_add(old - anchor_old)?;
    if candidate >= alignment.new_len() {
        return None;
    }

    match alignment.new_to_old(candidate) {
        None => Some(candidate),
        Some(back) if back == old => Some(candidate),
        Some(_) => None,
    }
}
