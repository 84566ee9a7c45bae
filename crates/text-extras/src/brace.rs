//! Brace Matcher
//!
//! Finds the counterpart of a delimiter character by scanning away from it while tracking the
//! delimiters opened in between. Only characters in the [`DelimiterTable`] take part in the
//! scan; everything else is skipped.
//!
//! A closing delimiter that does not close the innermost open delimiter is a nesting mismatch,
//! and the scan gives up.

use ropey::Rope;
use tracing::{trace, warn};

use crate::edit::CharRange;

/// Whether a delimiter opens or closes a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterRole {
    /// `(`, `{`, `[`, ...
    Opening,
    /// `)`, `}`, `]`, ...
    Closing,
}

/// A delimiter's pair index and role within a [`DelimiterTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    /// Index of the pair the delimiter belongs to.
    pub class: usize,
    /// Opening or closing.
    pub role: DelimiterRole,
}

/// Bijection between opening and closing delimiter characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterTable {
    pairs: Vec<(char, char)>,
}

impl Default for DelimiterTable {
    fn default() -> Self {
        Self {
            pairs: vec![('(', ')'), ('{', '}'), ('[', ']')],
        }
    }
}

impl DelimiterTable {
    /// The standard `()`, `{}`, `[]` table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair.
    ///
    /// Pairs whose characters are equal, or already appear in the table, would break the
    /// bijection and are ignored.
    pub fn with_pair(mut self, open: char, close: char) -> Self {
        if open == close || self.classify(open).is_some() || self.classify(close).is_some() {
            warn!(%open, %close, "ignoring delimiter pair that conflicts with the table");
            return self;
        }
        self.pairs.push((open, close));
        self
    }

    /// The `(open, close)` pairs in the table.
    pub fn pairs(&self) -> &[(char, char)] {
        &self.pairs
    }

    /// Look up `ch` in the table.
    pub fn classify(&self, ch: char) -> Option<Delimiter> {
        self.pairs.iter().enumerate().find_map(|(class, &(open, close))| {
            if ch == open {
                Some(Delimiter {
                    class,
                    role: DelimiterRole::Opening,
                })
            } else if ch == close {
                Some(Delimiter {
                    class,
                    role: DelimiterRole::Closing,
                })
            } else {
                None
            }
        })
    }
}

/// Offset of the delimiter matching the one at `index`.
///
/// Returns `None` if the character at `index` is not a delimiter, if the text ends before the
/// delimiter is closed, or if nesting is mismatched on the way.
pub fn find_matching_delimiter(text: &Rope, index: usize, table: &DelimiterTable) -> Option<usize> {
    if index >= text.len_chars() {
        return None;
    }
    let origin = table.classify(text.char(index))?;

    // Classes opened (in scan direction) but not yet closed; the origin sits at the bottom.
    let mut open_classes = vec![origin.class];

    match origin.role {
        DelimiterRole::Opening => {
            let mut pos = index + 1;
            for ch in text.chars_at(index + 1) {
                if let Some(delimiter) = table.classify(ch)
                    && step(&mut open_classes, delimiter, DelimiterRole::Opening)?
                {
                    return Some(pos);
                }
                pos += 1;
            }
        }
        DelimiterRole::Closing => {
            let mut pos = index;
            let mut chars = text.chars_at(index);
            while let Some(ch) = chars.prev() {
                pos -= 1;
                if let Some(delimiter) = table.classify(ch)
                    && step(&mut open_classes, delimiter, DelimiterRole::Closing)?
                {
                    return Some(pos);
                }
            }
        }
    }

    trace!(index, "delimiter has no counterpart");
    None
}

/// Advance the nesting state by one delimiter.
///
/// `Some(true)` when the origin got closed, `Some(false)` to keep scanning, `None` on mismatch.
fn step(open_classes: &mut Vec<usize>, delimiter: Delimiter, nesting: DelimiterRole) -> Option<bool> {
    if delimiter.role == nesting {
        open_classes.push(delimiter.class);
        return Some(false);
    }

    if open_classes.last() != Some(&delimiter.class) {
        trace!(class = delimiter.class, "mismatched delimiter nesting");
        return None;
    }
    open_classes.pop();
    Some(open_classes.is_empty())
}

/// Range spanning the delimiter at `index` and its counterpart, both inclusive.
pub fn matching_range(text: &Rope, index: usize, table: &DelimiterTable) -> Option<CharRange> {
    let other = find_matching_delimiter(text, index, table)?;
    let (low, high) = (index.min(other), index.max(other));
    Some(CharRange::from_bounds(low, high + 1))
}

/// Extend a one-character selection on a delimiter to include its counterpart.
///
/// Any other selection, an unmatched delimiter and a nesting mismatch all leave `proposed`
/// unchanged.
pub fn select_to_matching_brace(
    text: &Rope,
    proposed: CharRange,
    table: &DelimiterTable,
) -> CharRange {
    if proposed.length != 1 {
        return proposed;
    }
    matching_range(text, proposed.start(), table).unwrap_or(proposed)
}
