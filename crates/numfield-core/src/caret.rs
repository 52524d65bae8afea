//! Caret position engine.
//!
//! When a field's text is rewritten (separators inserted or removed, a
//! compact suffix expanded), the caret offset that was valid in the old text
//! must be relocated into the new text. The engine maps positions through
//! their meaningful-digit index: the count of characters before a position
//! that are neither the grouping separator nor the decimal separator. That
//! count is stable across reformatting, so placing the caret after the same
//! number of meaningful digits keeps it visually anchored.
//!
//! [`compute_caret`] is state-free and total: it never fails, and every
//! branch returns a position within `[0, new_text.len()]` (rune-indexed).

use crate::notation;

/// The span of pre-edit text replaced by one edit.
///
/// `is_delete` distinguishes a forward-Delete (caret holds its ground) from
/// a Backspace or selection-replace (caret collapses to `start`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeRange {
    /// First affected rune index in the pre-edit text.
    pub start: usize,
    /// One past the last affected rune index.
    pub end: usize,
    /// Number of runes removed from the span.
    pub deleted_length: usize,
    /// `true` for a forward-Delete, `false` for Backspace or replace.
    pub is_delete: bool,
}

/// Caret/selection state captured at key-press time, before the text
/// mutates.
///
/// `end_offset = Some(1)` signals a forward-Delete; its absence combined
/// with a shrinking text length signals Backspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaretPositionInfo {
    /// Selection start (equals `selection_end` for a plain caret).
    pub selection_start: usize,
    /// Selection end.
    pub selection_end: usize,
    /// Forward extent of a Delete-key press, when known.
    pub end_offset: Option<usize>,
}

impl CaretPositionInfo {
    /// A collapsed caret at `position`.
    pub fn collapsed(position: usize) -> Self {
        CaretPositionInfo {
            selection_start: position,
            selection_end: position,
            end_offset: None,
        }
    }

    /// A collapsed caret about to forward-Delete one character.
    pub fn forward_delete(position: usize) -> Self {
        CaretPositionInfo {
            selection_start: position,
            selection_end: position,
            end_offset: Some(1),
        }
    }

    /// A selection from `start` to `end`.
    pub fn selection(start: usize, end: usize) -> Self {
        CaretPositionInfo {
            selection_start: start.min(end),
            selection_end: start.max(end),
            end_offset: None,
        }
    }
}

/// Preferred search direction when snapping to a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapDirection {
    Left,
    Right,
}

/// The set of caret offsets considered editable for one rendered text.
///
/// One entry per position (text length + 1). Positions sitting on a
/// grouping separator, or inside a fixed prefix/suffix, are not editable.
/// Regenerated whenever the formatted text changes; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretBoundary {
    allowed: Vec<bool>,
}

impl CaretBoundary {
    /// Boundary for a plain formatted text: every position is editable
    /// except those sitting on the grouping separator.
    pub fn for_text(text: &str, separator: char) -> Self {
        Self::with_affixes(text, separator, 0, 0)
    }

    /// Boundary with fixed prefix/suffix widths (rune counts) that the
    /// caret must stay out of.
    pub fn with_affixes(text: &str, separator: char, prefix_len: usize, suffix_len: usize) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut allowed = Vec::with_capacity(len + 1);
        for pos in 0..=len {
            let on_separator = pos < len && chars[pos] == separator;
            let in_prefix = pos < prefix_len;
            let in_suffix = len - pos < suffix_len;
            allowed.push(!on_separator && !in_prefix && !in_suffix);
        }
        CaretBoundary { allowed }
    }

    /// Number of positions covered (text length + 1).
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Whether the caret may rest at `position`.
    pub fn is_allowed(&self, position: usize) -> bool {
        self.allowed.get(position).copied().unwrap_or(false)
    }

    /// Snap `position` to the nearest editable position.
    ///
    /// Searches outward symmetrically (left candidate first on ties), or
    /// directionally when a preferred direction is given with the opposite
    /// side as fallback. If no position is editable at all, the text is
    /// treated as fully editable and `position` is returned clamped.
    pub fn snap(&self, position: usize, direction: Option<SnapDirection>) -> usize {
        let max = self.allowed.len().saturating_sub(1);
        let position = position.min(max);
        if self.is_allowed(position) {
            return position;
        }
        if !self.allowed.iter().any(|&a| a) {
            return position;
        }
        match direction {
            Some(SnapDirection::Left) => self
                .scan(position, SnapDirection::Left)
                .or_else(|| self.scan(position, SnapDirection::Right)),
            Some(SnapDirection::Right) => self
                .scan(position, SnapDirection::Right)
                .or_else(|| self.scan(position, SnapDirection::Left)),
            None => {
                let mut offset = 1;
                loop {
                    let left = position.checked_sub(offset).filter(|&p| self.is_allowed(p));
                    let right = Some(position + offset)
                        .filter(|&p| p <= max && self.is_allowed(p));
                    match (left, right) {
                        (Some(p), _) => break Some(p),
                        (None, Some(p)) => break Some(p),
                        (None, None) if position >= offset || position + offset <= max => {
                            offset += 1;
                        }
                        (None, None) => break None,
                    }
                }
            }
        }
        .unwrap_or(position)
    }

    fn scan(&self, from: usize, direction: SnapDirection) -> Option<usize> {
        match direction {
            SnapDirection::Left => (0..from).rev().find(|&p| self.is_allowed(p)),
            SnapDirection::Right => {
                ((from + 1)..self.allowed.len()).find(|&p| self.is_allowed(p))
            }
        }
    }
}

/// Optional inputs to [`compute_caret`].
#[derive(Clone, Copy, Default)]
pub struct CaretContext<'a> {
    /// The edit's change range in pre-edit coordinates, when captured.
    pub change: Option<ChangeRange>,
    /// Editable-position mask for the new text.
    pub boundary: Option<&'a CaretBoundary>,
    /// Character equivalence for separator-normalization edits; when
    /// supplied and the texts differ, this path overrides digit counting.
    pub equivalence: Option<&'a dyn Fn(char, char) -> bool>,
}

/// Map `old_caret` in `old_text` to the matching offset in `new_text`.
///
/// All offsets are rune indices. The function never fails: when no
/// confident position can be derived it falls back to the end of the new
/// text, and the result is always within `[0, new_text.len()]`.
///
/// # Examples
///
/// ```
/// use numfield_core::caret::{compute_caret, CaretContext};
///
/// // "1000" became "1,000"; a caret at the end stays at the end
/// let caret = compute_caret("1000", "1,000", 4, ',', '.', &CaretContext::default());
/// assert_eq!(caret, 5);
/// ```
pub fn compute_caret(
    old_text: &str,
    new_text: &str,
    old_caret: usize,
    separator: char,
    decimal: char,
    ctx: &CaretContext<'_>,
) -> usize {
    let old: Vec<char> = old_text.chars().collect();
    let new: Vec<char> = new_text.chars().collect();
    let old_len = old.len();
    let new_len = new.len();

    // guard rules, short-circuit
    if old_caret > old_len || old_len == 0 || new_len == 0 {
        return new_len;
    }

    // a compact literal was just expanded with the caret at its tail
    if old_caret + 1 >= old_len
        && notation::is_compact_literal(old_text, decimal)
        && !notation::is_compact_literal(new_text, decimal)
    {
        return finish(new_len, new_len, ctx);
    }

    // separator-normalization edits map through character equivalence
    if let Some(equivalence) = ctx.equivalence {
        if old != new {
            let pos = equivalence_position(&old, &new, old_caret, equivalence);
            return finish(pos, new_len, ctx);
        }
    }

    let pos = if new_len > old_len {
        insertion_position(&old, &new, old_caret, separator, decimal, ctx.change)
    } else if new_len < old_len {
        deletion_position(&old, &new, old_caret, separator, decimal, ctx.change)
    } else if old == new {
        old_caret
    } else {
        // equal-length rewrite: plain digit-count mapping
        let index = digit_index(&old, separator, decimal);
        position_after_digits(&new, separator, decimal, index[old_caret])
    };
    finish(pos, new_len, ctx)
}

/// Clamp and boundary-snap the chosen position.
fn finish(pos: usize, new_len: usize, ctx: &CaretContext<'_>) -> usize {
    let pos = pos.min(new_len);
    match ctx.boundary {
        Some(boundary) => boundary.snap(pos, None).min(new_len),
        None => pos,
    }
}

/// Meaningful-digit prefix counts: `index[p]` is the number of characters
/// before `p` that are neither separator. Local arena, never escapes.
fn digit_index(chars: &[char], separator: char, decimal: char) -> Vec<usize> {
    let mut index = Vec::with_capacity(chars.len() + 1);
    let mut count = 0;
    index.push(0);
    for &c in chars {
        if c != separator && c != decimal {
            count += 1;
        }
        index.push(count);
    }
    index
}

/// Position in `chars` just after the `target`-th meaningful character.
fn position_after_digits(chars: &[char], separator: char, decimal: char, target: usize) -> usize {
    if target == 0 {
        return 0;
    }
    let mut count = 0;
    for (i, &c) in chars.iter().enumerate() {
        if c != separator && c != decimal {
            count += 1;
            if count == target {
                return i + 1;
            }
        }
    }
    chars.len()
}

fn insertion_position(
    old: &[char],
    new: &[char],
    old_caret: usize,
    separator: char,
    decimal: char,
    change: Option<ChangeRange>,
) -> usize {
    if old_caret == old.len() {
        return new.len();
    }
    // caret at or past the last digit also maps to the end
    let after_last_digit = (0..old.len())
        .rev()
        .find(|&i| old[i] != separator && old[i] != decimal)
        .map(|i| i + 1)
        .unwrap_or(0);
    if old_caret >= after_last_digit {
        return new.len();
    }

    let old_index = digit_index(old, separator, decimal);
    let new_index = digit_index(new, separator, decimal);
    let old_total = old_index[old.len()];
    let new_total = new_index[new.len()];

    // the caret moves past inserted digits only when the insertion landed
    // at or before it; digits appearing further right (a suffix expansion,
    // a paste after the caret) must not drag it along
    let added_before_caret = match change {
        Some(change) => change.start <= old_caret,
        None => diff_range(old, new).start <= old_caret,
    };
    let mut target = old_index[old_caret];
    if new_total > old_total && added_before_caret {
        target += new_total - old_total;
    }
    let mut pos = position_after_digits(new, separator, decimal, target);
    // a caret that was resting on a separator should keep doing so
    if old[old_caret] == separator && pos > 0 && pos < new.len() && new[pos] != separator {
        pos -= 1;
    }
    pos
}

fn deletion_position(
    old: &[char],
    new: &[char],
    old_caret: usize,
    separator: char,
    decimal: char,
    change: Option<ChangeRange>,
) -> usize {
    let old_index = digit_index(old, separator, decimal);
    let new_index = digit_index(new, separator, decimal);
    let range = change.unwrap_or_else(|| diff_range(old, new));

    // a caret sitting on a separator re-anchors one position past it, so it
    // lands after the digit group instead of straddling the separator
    let base = if old_caret < old.len() && old[old_caret] == separator {
        old_caret + 1
    } else {
        range.start
    };
    let target = old_index[base.min(old.len())];
    let mut pos = position_after_digits(new, separator, decimal, target);

    let digit_removed = old_index[old.len()] > new_index[new.len()];
    if digit_removed && pos < new.len() && new[pos] == separator {
        // rest before the next digit, not before the separator
        pos += 1;
    }
    pos
}

/// Longest-common-prefix / longest-common-suffix reconstruction of the
/// change range when none was captured.
fn diff_range(old: &[char], new: &[char]) -> ChangeRange {
    let mut prefix = 0;
    while prefix < old.len() && prefix < new.len() && old[prefix] == new[prefix] {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < old.len() - prefix
        && suffix < new.len() - prefix
        && old[old.len() - 1 - suffix] == new[new.len() - 1 - suffix]
    {
        suffix += 1;
    }
    let end = old.len() - suffix;
    ChangeRange {
        start: prefix,
        end,
        deleted_length: end - prefix,
        is_delete: false,
    }
}

/// Best-effort old-to-new index map: each old character claims the first
/// unused equivalent new character, scanning left to right. The caret then
/// follows whichever neighboring mapped position is closer.
fn equivalence_position(
    old: &[char],
    new: &[char],
    old_caret: usize,
    equivalence: &dyn Fn(char, char) -> bool,
) -> usize {
    let mut used = vec![false; new.len()];
    let mut map: Vec<Option<usize>> = vec![None; old.len()];
    for (i, &oc) in old.iter().enumerate() {
        for (j, &nc) in new.iter().enumerate() {
            if !used[j] && equivalence(oc, nc) {
                used[j] = true;
                map[i] = Some(j);
                break;
            }
        }
    }

    let left = (0..old_caret.min(old.len()))
        .rev()
        .find_map(|i| map[i].map(|j| (i, j)));
    let right = (old_caret..old.len()).find_map(|i| map[i].map(|j| (i, j)));
    match (left, right) {
        (Some((li, lj)), Some((ri, rj))) => {
            let left_distance = old_caret - (li + 1);
            let right_distance = ri - old_caret;
            if left_distance <= right_distance {
                lj + 1
            } else {
                rj
            }
        }
        (Some((_, lj)), None) => lj + 1,
        (None, Some((_, rj))) => rj,
        (None, None) => new.len(),
    }
}
