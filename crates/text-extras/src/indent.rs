//! Indent Engine
//!
//! Indentation edits that keep leading whitespace in its minimal encoding: as many tabs as fit
//! for the configured `TabWidth`, padded with spaces. Leading whitespace is `' '` and `'\t'`
//! only.
//!
//! Every operation reads an immutable [`Rope`] snapshot plus the current selections and returns
//! an [`EditPlan`]. Out-of-range selections are clamped; operations with nothing to do return an
//! empty plan.

use std::collections::BTreeMap;

use ropey::Rope;

use crate::config::ExtrasConfig;
use crate::edit::{CaretLanding, CharRange, EditPlan, TextEdit, normalize_ranges};
use crate::line_ending::LineEnding;
use crate::line_index::{
    Line, editing_selections, leading_whitespace, line_at, lines_intersecting, width_of_range,
};
use crate::whitespace::{encode, next_indent_stop, offset_at_column};

/// Add one indent level to every line touched by `selections`.
///
/// An empty text has no line to shift and yields an empty plan.
pub fn indent_right(text: &Rope, selections: &[CharRange], config: &ExtrasConfig) -> EditPlan {
    let indent_width = config.indent_width;
    shift_lines(text, selections, config, |width| Some(width + indent_width))
}

/// Remove one indent level (or whatever is left of it) from every line touched by `selections`.
///
/// Lines without leading whitespace are left alone.
pub fn indent_left(text: &Rope, selections: &[CharRange], config: &ExtrasConfig) -> EditPlan {
    let indent_width = config.indent_width;
    shift_lines(text, selections, config, |width| {
        (width > 0).then(|| width.saturating_sub(indent_width))
    })
}

fn shift_lines<F>(
    text: &Rope,
    selections: &[CharRange],
    config: &ExtrasConfig,
    shift: F,
) -> EditPlan
where
    F: Fn(usize) -> Option<usize>,
{
    let selections = normalize_ranges(selections.to_vec(), text.len_chars());
    if text.len_chars() == 0 {
        return EditPlan::select(selections);
    }

    // Several selections may touch the same line; each line is shifted once.
    let mut lines: BTreeMap<usize, Line> = BTreeMap::new();
    for sel in &selections {
        for line in lines_intersecting(text, *sel) {
            lines.entry(line.start).or_insert(line);
        }
    }

    let mut plan = EditPlan::new();
    for line in lines.values() {
        let span = leading_whitespace(text, line);
        let width = width_of_range(text, span, config.tab_width);
        let Some(new_width) = shift(width) else {
            continue;
        };

        let replacement = encode(new_width, config.tab_width);
        if same_text(text, span, &replacement) {
            continue;
        }
        plan.push(TextEdit::new(span, replacement));
    }

    plan.selections = plan.map_selections(&selections);
    plan
}

/// Insert `ending` at each selection, followed by whitespace matching the current line.
///
/// The whitespace has the visual width of the leading whitespace that precedes the insertion
/// point on its line, re-encoded minimally. Characters after the insertion point move to the
/// new line unchanged.
pub fn insert_newline_and_indent(
    text: &Rope,
    selections: &[CharRange],
    ending: LineEnding,
    config: &ExtrasConfig,
) -> EditPlan {
    let selections = editing_selections(text, selections);
    let mut plan = EditPlan::new();
    let mut landings = Vec::with_capacity(selections.len());

    for sel in &selections {
        let line = line_at(text, sel.start());
        let span = leading_whitespace(text, &line);
        let indent_end = span.end().min(sel.start());
        let width = width_of_range(
            text,
            CharRange::from_bounds(line.start, indent_end),
            config.tab_width,
        );

        let mut insertion = String::from(ending.as_str());
        insertion.push_str(&encode(width, config.tab_width));
        let within = insertion.chars().count();
        landings.push(plan.push_landing(TextEdit::new(*sel, insertion), within, *sel));
    }

    plan.selections = plan.resolve_landings(&landings);
    plan
}

/// Backspace that removes one indent level when the caret sits in leading whitespace.
///
/// - A non-empty selection is deleted.
/// - A caret inside (or at the end of) a line's leading whitespace, past the line start,
///   narrows that whitespace by up to `IndentWidth` columns (never more than the caret's
///   column). The whole run is re-encoded minimally and the caret moves left by the same
///   number of columns.
/// - Otherwise one character is deleted (a CRLF pair counts as one character).
pub fn indent_friendly_delete_backward(
    text: &Rope,
    selections: &[CharRange],
    config: &ExtrasConfig,
) -> EditPlan {
    let selections = editing_selections(text, selections);
    let mut plan = EditPlan::new();
    let mut landings = Vec::with_capacity(selections.len());

    for sel in &selections {
        let edit = if !sel.is_empty() {
            Some((TextEdit::new(*sel, ""), 0))
        } else {
            let caret = sel.start();
            let line = line_at(text, caret);
            let span = leading_whitespace(text, &line);

            if caret > line.start && caret <= span.end() {
                let column = width_of_range(
                    text,
                    CharRange::from_bounds(line.start, caret),
                    config.tab_width,
                );
                let removed = column.min(config.indent_width);
                Some(reencode_span(text, span, column, column - removed, config))
            } else {
                previous_char_range(text, caret).map(|range| (TextEdit::new(range, ""), 0))
            }
        };

        landings.push(match edit {
            Some((edit, within)) => plan.push_landing(edit, within, *sel),
            None => CaretLanding::Mapped(*sel),
        });
    }

    plan.selections = plan.resolve_landings(&landings);
    plan
}

/// Tab that indents to the next indent stop when the caret sits in leading whitespace.
///
/// - A caret inside (or at the end of) a line's leading whitespace moves to the next multiple
///   of `IndentWidth` (always at least one column further). The whole run widens by the same
///   amount and is re-encoded minimally.
/// - Otherwise the selection is replaced by a literal `'\t'`.
pub fn indent_friendly_insert_tab(
    text: &Rope,
    selections: &[CharRange],
    config: &ExtrasConfig,
) -> EditPlan {
    let selections = editing_selections(text, selections);
    let mut plan = EditPlan::new();
    let mut landings = Vec::with_capacity(selections.len());

    for sel in &selections {
        let caret = sel.start();
        let line = line_at(text, caret);
        let span = leading_whitespace(text, &line);

        let (edit, within) = if sel.is_empty() && caret <= span.end() {
            let column = width_of_range(
                text,
                CharRange::from_bounds(line.start, caret),
                config.tab_width,
            );
            let target = next_indent_stop(column, config.indent_width);
            reencode_span(text, span, column, target, config)
        } else {
            (TextEdit::new(*sel, "\t"), 1)
        };

        landings.push(plan.push_landing(edit, within, *sel));
    }

    plan.selections = plan.resolve_landings(&landings);
    plan
}

/// Re-encode the leading whitespace `span` after moving the caret from `column` to
/// `new_column`; the run changes width by the same amount.
///
/// Returns the replacement and the caret offset within it.
fn reencode_span(
    text: &Rope,
    span: CharRange,
    column: usize,
    new_column: usize,
    config: &ExtrasConfig,
) -> (TextEdit, usize) {
    let width = width_of_range(text, span, config.tab_width);
    let new_width = (width + new_column).saturating_sub(column);
    let replacement = encode(new_width, config.tab_width);
    let within = offset_at_column(&replacement, new_column, config.tab_width);
    (TextEdit::new(span, replacement), within)
}

fn previous_char_range(text: &Rope, caret: usize) -> Option<CharRange> {
    if caret == 0 {
        return None;
    }
    let width = if caret >= 2 && text.char(caret - 1) == '\n' && text.char(caret - 2) == '\r' {
        2
    } else {
        1
    };
    Some(CharRange::new(caret - width, width))
}

fn same_text(text: &Rope, range: CharRange, replacement: &str) -> bool {
    text.slice(range.start()..range.end())
        .chars()
        .eq(replacement.chars())
}
