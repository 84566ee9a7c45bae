//! Batched text edits.
//!
//! Every editing operation in this crate is computed against an immutable text snapshot and
//! returned as an [`EditPlan`]: an ordered list of non-overlapping replacements plus the
//! selection the host should show afterwards. The host applies the whole plan as one undoable
//! change.
//!
//! All offsets are **character offsets** (Unicode scalar values).

use ropey::Rope;

use crate::line_ending::LineEnding;

/// Half-open character range `location..location + length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct CharRange {
    /// Start character offset.
    pub location: usize,
    /// Length in characters.
    pub length: usize,
}

impl CharRange {
    /// Create a range from a start offset and a length.
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// An empty range (caret) at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self::new(offset, 0)
    }

    /// Create a range spanning two offsets given in any order.
    pub fn from_bounds(a: usize, b: usize) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self::new(start, end - start)
    }

    /// Inclusive start offset.
    pub const fn start(&self) -> usize {
        self.location
    }

    /// Exclusive end offset, saturating at `usize::MAX`.
    pub const fn end(&self) -> usize {
        self.location.saturating_add(self.length)
    }

    /// Returns `true` for a caret.
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Clamp the range into `0..=len`.
    pub fn clamp_to(&self, len: usize) -> Self {
        let start = self.start().min(len);
        let end = self.end().min(len);
        Self::new(start, end - start)
    }
}

impl From<std::ops::Range<usize>> for CharRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::from_bounds(range.start, range.end)
    }
}

/// Which side of an edit an offset sticks to when the edit touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    /// Stay before text inserted at the offset.
    Before,
    /// Move past text inserted at the offset.
    After,
}

/// Where a caret ends up once an [`EditPlan`] is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretLanding {
    /// A pre-edit selection carried through the plan with [`EditPlan::map_selections`].
    Mapped(CharRange),
    /// A caret inside the replacement of one pushed edit.
    InEdit {
        /// Index of the edit in the plan.
        edit: usize,
        /// Characters into the replacement.
        within: usize,
    },
}

/// A single replacement: the characters in `range` become `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Replaced range in the pre-edit snapshot.
    pub range: CharRange,
    /// Replacement text (may be empty).
    pub text: String,
}

impl TextEdit {
    /// Create a replacement.
    pub fn new(range: CharRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Length of the replacement in characters.
    pub fn inserted_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A batch of edits plus the selection to show once they are applied.
///
/// Invariants:
/// - `edits` are sorted by ascending start offset and never overlap.
/// - every range refers to the snapshot the plan was computed from.
/// - `selections` refer to the text **after** the edits are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPlan {
    /// Ordered, non-overlapping replacements.
    pub edits: Vec<TextEdit>,
    /// Selected ranges after the edits.
    pub selections: Vec<CharRange>,
}

impl EditPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// A plan that only changes the selection.
    pub fn select(selections: Vec<CharRange>) -> Self {
        Self {
            edits: Vec::new(),
            selections,
        }
    }

    /// Returns `true` if the plan contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Append an edit.
    ///
    /// Edits must be pushed in ascending order; an edit that starts before the end of the
    /// previously pushed edit is dropped and `false` is returned. Edits that replace nothing
    /// with nothing are dropped as well.
    pub fn push(&mut self, edit: TextEdit) -> bool {
        if edit.range.is_empty() && edit.text.is_empty() {
            return false;
        }
        if let Some(last) = self.edits.last()
            && edit.range.start() < last.range.end()
        {
            return false;
        }
        self.edits.push(edit);
        true
    }

    /// Append an edit and report where a caret `within` characters into its replacement lands.
    ///
    /// If the edit is dropped (see [`EditPlan::push`]), `fallback` is carried through the plan
    /// instead, so no selection goes missing.
    pub fn push_landing(
        &mut self,
        edit: TextEdit,
        within: usize,
        fallback: CharRange,
    ) -> CaretLanding {
        let index = self.edits.len();
        if self.push(edit) {
            CaretLanding::InEdit {
                edit: index,
                within,
            }
        } else {
            CaretLanding::Mapped(fallback)
        }
    }

    /// Resolve caret landings into post-edit selections.
    pub fn resolve_landings(&self, landings: &[CaretLanding]) -> Vec<CharRange> {
        let after = self.ranges_after();
        landings
            .iter()
            .map(|landing| match *landing {
                CaretLanding::InEdit { edit, within } => {
                    let range = after.get(edit).copied().unwrap_or_default();
                    CharRange::caret(range.start() + within.min(range.length))
                }
                CaretLanding::Mapped(sel) => self.map_selection(sel),
            })
            .collect()
    }

    /// Map a pre-edit offset to the corresponding post-edit offset.
    ///
    /// Offsets strictly inside a replaced range collapse onto the start ([`Bias::Before`]) or the
    /// end ([`Bias::After`]) of the replacement.
    pub fn map_offset(&self, offset: usize, bias: Bias) -> usize {
        let mut added = 0usize;
        let mut removed = 0usize;

        for edit in &self.edits {
            let start = edit.range.start();
            let end = edit.range.end();

            if offset < start || (offset == start && bias == Bias::Before) {
                break;
            }
            if offset < end {
                let base = (start + added) - removed;
                return match bias {
                    Bias::Before => base,
                    Bias::After => base + edit.inserted_len(),
                };
            }

            added += edit.inserted_len();
            removed += edit.range.length;
        }

        (offset + added) - removed
    }

    /// Map pre-edit selections into the post-edit text.
    ///
    /// Carets follow inserted text; ranges keep inserted text at their start outside and
    /// inserted text at their end inside.
    pub fn map_selections(&self, selections: &[CharRange]) -> Vec<CharRange> {
        selections.iter().map(|sel| self.map_selection(*sel)).collect()
    }

    fn map_selection(&self, sel: CharRange) -> CharRange {
        if sel.is_empty() {
            CharRange::caret(self.map_offset(sel.start(), Bias::After))
        } else {
            let start = self.map_offset(sel.start(), Bias::Before);
            let end = self.map_offset(sel.end(), Bias::After);
            CharRange::from_bounds(start, end)
        }
    }

    /// Ranges occupied by each replacement in the post-edit text.
    pub fn ranges_after(&self) -> Vec<CharRange> {
        let mut added = 0usize;
        let mut removed = 0usize;
        self.edits
            .iter()
            .map(|edit| {
                let start = (edit.range.start() + added) - removed;
                added += edit.inserted_len();
                removed += edit.range.length;
                CharRange::new(start, edit.inserted_len())
            })
            .collect()
    }

    /// Returns `true` if applying the plan changes where lines begin and end.
    ///
    /// An edit between a CR and an LF counts as well: it splits or joins a CRLF pair.
    pub fn changes_line_structure(&self, text: &Rope) -> bool {
        let len = text.len_chars();
        self.edits.iter().any(|edit| {
            let range = edit.range.clamp_to(len);
            let after_cr = range.start() > 0 && text.char(range.start() - 1) == '\r';
            let before_lf = range.end() < len && text.char(range.end()) == '\n';
            (after_cr && before_lf)
                || edit.text.chars().any(LineEnding::is_terminator_char)
                || text
                    .slice(range.start()..range.end())
                    .chars()
                    .any(LineEnding::is_terminator_char)
        })
    }

    /// Apply the edits to a rope, back to front so earlier offsets stay valid.
    pub fn apply_to_rope(&self, rope: &mut Rope) {
        for edit in self.edits.iter().rev() {
            let range = edit.range.clamp_to(rope.len_chars());
            if !range.is_empty() {
                rope.remove(range.start()..range.end());
            }
            if !edit.text.is_empty() {
                rope.insert(range.start(), &edit.text);
            }
        }
    }
}

/// Clamp, sort and merge selected ranges.
///
/// Overlapping ranges are merged into their union; exact duplicates are dropped. Ranges that
/// merely touch are kept apart.
pub fn normalize_ranges(mut ranges: Vec<CharRange>, len: usize) -> Vec<CharRange> {
    for range in &mut ranges {
        *range = range.clamp_to(len);
    }
    ranges.sort();

    let mut merged: Vec<CharRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start() < last.end() => {
                let end = last.end().max(range.end());
                *last = CharRange::from_bounds(last.start(), end);
            }
            Some(last) if *last == range => {}
            _ => merged.push(range),
        }
    }
    merged
}
