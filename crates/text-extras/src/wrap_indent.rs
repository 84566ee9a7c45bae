//! Wrapped Line Indenter
//!
//! Display-only indentation for wrapped continuation fragments. No characters are inserted:
//! each logical line (paragraph) gets a [`ParagraphIndent`] that the host attaches as a
//! paragraph-level attribute.
//!
//! For a line whose leading whitespace is `w` columns wide, the first fragment starts its content
//! at column `w` (the whitespace itself occupies those columns) and every continuation fragment
//! starts at `w + WrappedLineIndentWidth`.
//!
//! For example, with `TabWidth = 8` a line starting with a tab and four spaces wraps its
//! continuation fragments at column `8 + 4 + 2 = 14`.

use std::ops::Range;

use ropey::Rope;

use crate::config::ExtrasConfig;
use crate::edit::CharRange;
use crate::line_index::{Line, Lines, leading_whitespace_width, line_number_at, lines_intersecting};
use crate::whitespace::cell_width_at;

/// Identity of a paragraph: the zero-based index of its logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParagraphId(pub usize);

/// Indentation of a paragraph's fragments, in columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParagraphIndent {
    /// Column where the content of the first fragment starts.
    pub first_line_head_indent: usize,
    /// Column where every continuation fragment starts.
    pub head_indent: usize,
}

/// Properties of the text container that decide whether wrapped-line indentation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerTraits {
    /// The container holds attributed (rich) text.
    pub rich_text: bool,
    /// The user can edit the text.
    pub editable: bool,
    /// The container is a single-field editor.
    pub field_editor: bool,
    /// The container lays text out on fixed-size pages.
    pub paginated: bool,
}

impl Default for ContainerTraits {
    /// A plain-text, editable, non-paginated document view.
    fn default() -> Self {
        Self {
            rich_text: false,
            editable: true,
            field_editor: false,
            paginated: false,
        }
    }
}

impl ContainerTraits {
    /// Wrapped-line indentation only applies to editable, non-paginated plain-text documents.
    pub fn supports_wrapped_line_indent(&self) -> bool {
        !self.rich_text && self.editable && !self.field_editor && !self.paginated
    }
}

/// Indentation for `line`.
pub fn paragraph_indent(text: &Rope, line: &Line, config: &ExtrasConfig) -> ParagraphIndent {
    let width = leading_whitespace_width(text, line, config.tab_width);
    ParagraphIndent {
        first_line_head_indent: width,
        head_indent: width + config.wrapped_line_indent_width,
    }
}

/// Indentation for every paragraph of the text.
pub fn paragraph_indents(text: &Rope, config: &ExtrasConfig) -> Vec<(ParagraphId, ParagraphIndent)> {
    Lines::new(text)
        .enumerate()
        .map(|(index, line)| (ParagraphId(index), paragraph_indent(text, &line, config)))
        .collect()
}

/// Indentation for the paragraphs intersecting `range`.
pub fn paragraph_indents_in_range(
    text: &Rope,
    range: CharRange,
    config: &ExtrasConfig,
) -> Vec<(ParagraphId, ParagraphIndent)> {
    let first = line_number_at(text, range.start());
    lines_intersecting(text, range)
        .iter()
        .enumerate()
        .map(|(i, line)| (ParagraphId(first + i), paragraph_indent(text, line, config)))
        .collect()
}

/// Split a logical line into visual fragments for a viewport `viewport_width` cells wide.
///
/// Returns character ranges within `line_text`. The first fragment starts at column 0;
/// continuation fragments start at `indent.head_indent`, clamped so at least one cell stays
/// usable. Tabs expand against logical-line columns. A zero-width viewport disables wrapping.
pub fn wrap_fragments(
    line_text: &str,
    viewport_width: usize,
    tab_width: usize,
    indent: ParagraphIndent,
) -> Vec<Range<usize>> {
    let char_count = line_text.chars().count();
    if viewport_width == 0 || char_count == 0 {
        return vec![0..char_count];
    }

    let continuation_indent = indent.head_indent.min(viewport_width - 1);
    let mut fragments = Vec::new();
    let mut fragment_start = 0usize;
    let mut x_in_fragment = 0usize;
    let mut x_in_line = 0usize;

    for (char_index, ch) in line_text.chars().enumerate() {
        let ch_width = cell_width_at(ch, x_in_line, tab_width);

        // A character wider than the remaining space moves to the next fragment intact.
        if x_in_fragment + ch_width > viewport_width && char_index > fragment_start {
            fragments.push(fragment_start..char_index);
            fragment_start = char_index;
            x_in_fragment = continuation_indent;
        }

        x_in_fragment = x_in_fragment.saturating_add(ch_width);
        x_in_line = x_in_line.saturating_add(ch_width);
    }

    fragments.push(fragment_start..char_count);
    fragments
}
