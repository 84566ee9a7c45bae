//! Outline Navigator
//!
//! Treats leading-whitespace width as an outline level: from a starting line, walk to the next
//! (or previous) line whose leading whitespace is no wider than the starting line's.

use ropey::Rope;

use crate::config::ExtrasConfig;
use crate::edit::CharRange;
use crate::line_index::{Line, leading_whitespace_width, line_at, next_line, previous_line};

/// Scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end of the text.
    Forward,
    /// Towards the start of the text.
    Backward,
}

/// The nearest line in `direction` whose indent is at most `from`'s indent.
pub fn line_with_indent_at_most(
    text: &Rope,
    from: &Line,
    direction: Direction,
    tab_width: usize,
) -> Option<Line> {
    let limit = leading_whitespace_width(text, from, tab_width);
    let step = |line: &Line| match direction {
        Direction::Forward => next_line(text, line),
        Direction::Backward => previous_line(text, line),
    };

    let mut current = step(from);
    while let Some(line) = current {
        if leading_whitespace_width(text, &line, tab_width) <= limit {
            return Some(line);
        }
        current = step(&line);
    }
    None
}

/// Start of the next line with the same or smaller indent, or the end of the text.
pub fn next_line_with_indent_at_most(text: &Rope, from: &Line, config: &ExtrasConfig) -> usize {
    line_with_indent_at_most(text, from, Direction::Forward, config.tab_width)
        .map_or(text.len_chars(), |line| line.start)
}

/// Start of the previous line with the same or smaller indent, or the start of the text.
pub fn previous_line_with_indent_at_most(
    text: &Rope,
    from: &Line,
    config: &ExtrasConfig,
) -> usize {
    line_with_indent_at_most(text, from, Direction::Backward, config.tab_width)
        .map_or(0, |line| line.start)
}

/// Caret at the start of the next line with the same or smaller indent.
///
/// The scan starts from the line holding the selection's end.
pub fn select_next_line_with_same_or_smaller_indent(
    text: &Rope,
    selection: CharRange,
    config: &ExtrasConfig,
) -> CharRange {
    let from = line_at(text, selection.end());
    CharRange::caret(next_line_with_indent_at_most(text, &from, config))
}

/// Extend the selection forward to the start of the next line with the same or smaller indent.
///
/// The selection's start stays where it is.
pub fn select_to_next_line_with_same_or_smaller_indent(
    text: &Rope,
    selection: CharRange,
    config: &ExtrasConfig,
) -> CharRange {
    let from = line_at(text, selection.end());
    let target = next_line_with_indent_at_most(text, &from, config);
    CharRange::from_bounds(selection.start(), target.max(selection.end()))
}

/// Caret at the start of the previous line with the same or smaller indent.
///
/// The scan starts from the line holding the selection's start.
pub fn select_previous_line_with_same_or_smaller_indent(
    text: &Rope,
    selection: CharRange,
    config: &ExtrasConfig,
) -> CharRange {
    let from = line_at(text, selection.start());
    CharRange::caret(previous_line_with_indent_at_most(text, &from, config))
}

/// Extend the selection backward to the start of the previous line with the same or smaller
/// indent. The selection's end stays where it is.
pub fn select_to_previous_line_with_same_or_smaller_indent(
    text: &Rope,
    selection: CharRange,
    config: &ExtrasConfig,
) -> CharRange {
    let from = line_at(text, selection.start());
    let target = previous_line_with_indent_at_most(text, &from, config);
    CharRange::from_bounds(target.min(selection.start()), selection.end())
}
