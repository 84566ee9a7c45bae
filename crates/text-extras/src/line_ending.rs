//! Line ending helpers.
//!
//! Five terminators end a logical line: LF, CR, CRLF, U+2028 LINE SEPARATOR and
//! U+2029 PARAGRAPH SEPARATOR. CRLF always counts as a single terminator.

use ropey::Rope;

use crate::edit::{CharRange, EditPlan, TextEdit};
use crate::line_index::{Lines, editing_selections};

/// A line terminator sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// Line feed, `U+000A`.
    Lf,
    /// Bare carriage return, `U+000D`.
    Cr,
    /// Carriage return followed by line feed.
    Crlf,
    /// U+2028 LINE SEPARATOR.
    LineSeparator,
    /// U+2029 PARAGRAPH SEPARATOR.
    ParagraphSeparator,
}

impl LineEnding {
    /// The terminator as text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::Crlf => "\r\n",
            Self::LineSeparator => "\u{2028}",
            Self::ParagraphSeparator => "\u{2029}",
        }
    }

    /// Length of the terminator in characters.
    pub const fn len_chars(self) -> usize {
        match self {
            Self::Crlf => 2,
            _ => 1,
        }
    }

    /// Single-character terminator for `ch`.
    ///
    /// `'\r'` maps to [`LineEnding::Cr`]; callers that can look ahead must check for a
    /// following `'\n'` themselves.
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\n' => Some(Self::Lf),
            '\r' => Some(Self::Cr),
            '\u{2028}' => Some(Self::LineSeparator),
            '\u{2029}' => Some(Self::ParagraphSeparator),
            _ => None,
        }
    }

    /// Returns `true` if `ch` is (part of) a line terminator.
    pub const fn is_terminator_char(ch: char) -> bool {
        Self::from_char(ch).is_some()
    }

    /// Detect the line ending of a document: the first terminator found wins.
    pub fn detect(text: &Rope) -> Option<Self> {
        Lines::new(text).find_map(|line| line.terminator)
    }

    /// Detect the line ending of a string: the first terminator found wins.
    pub fn detect_in_text(text: &str) -> Option<Self> {
        Self::detect(&Rope::from_str(text))
    }
}

/// Rewrite every terminator in `text` as `ending`.
pub fn standardized_string(text: &str, ending: LineEnding) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' && chars.peek() == Some(&'\n') {
            chars.next();
        }
        if LineEnding::is_terminator_char(ch) {
            out.push_str(ending.as_str());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Edits that rewrite every terminator whose kind differs from `ending`.
///
/// The returned selections are `selections` carried through the rewrite.
pub fn standardize(text: &Rope, selections: &[CharRange], ending: LineEnding) -> EditPlan {
    let mut plan = EditPlan::new();
    for line in Lines::new(text) {
        let Some(terminator) = line.terminator else {
            continue;
        };
        if terminator != ending {
            plan.push(TextEdit::new(
                CharRange::new(line.end, terminator.len_chars()),
                ending.as_str(),
            ));
        }
    }
    plan.selections = plan.map_selections(selections);
    plan
}

/// Replace every selection with a bare `ending`, leaving a caret after it.
pub fn insert_line_ending(text: &Rope, selections: &[CharRange], ending: LineEnding) -> EditPlan {
    let selections = editing_selections(text, selections);
    let mut plan = EditPlan::new();
    let landings: Vec<_> = selections
        .iter()
        .map(|sel| {
            plan.push_landing(TextEdit::new(*sel, ending.as_str()), ending.len_chars(), *sel)
        })
        .collect();
    plan.selections = plan.resolve_landings(&landings);
    plan
}
