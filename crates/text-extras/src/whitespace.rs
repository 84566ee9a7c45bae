//! Whitespace Model
//!
//! Converts between a run of leading whitespace and its visual width in columns, and produces
//! the minimal tab + space encoding of a given width.
//!
//! Widths are measured from the start of the logical line. A `'\t'` advances to the next
//! multiple of the tab width; every other character uses its UAX #11 cell width, so a `' '`
//! always contributes exactly one column.

use unicode_width::UnicodeWidthChar;

/// Default number of columns between tab stops.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Default number of columns in one indent level.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Returns `true` for the characters that make up leading whitespace (`' '` and `'\t'` only).
pub fn is_indent_char(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Terminal cell width of a character per UAX #11.
///
/// Control characters have no UAX #11 width and are counted as a single cell.
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Cells occupied by `ch` when it starts at `column`; a tab runs to the next tab stop.
pub fn cell_width_at(ch: char, column: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        tab_width - column % tab_width
    } else {
        char_width(ch)
    }
}

/// Visual width of a character sequence that starts at column 0.
pub fn width_of_chars<I>(chars: I, tab_width: usize) -> usize
where
    I: IntoIterator<Item = char>,
{
    chars.into_iter().fold(0usize, |column, ch| {
        column.saturating_add(cell_width_at(ch, column, tab_width))
    })
}

/// Visual width of a whitespace run that starts at column 0.
///
/// ```rust
/// use text_extras::whitespace::width_of;
///
/// assert_eq!(width_of("\t  ", 8), 10);
/// assert_eq!(width_of("  \t", 8), 8);
/// ```
pub fn width_of(run: &str, tab_width: usize) -> usize {
    width_of_chars(run.chars(), tab_width)
}

/// Minimal whitespace string whose visual width is exactly `columns`.
///
/// Uses as many full tabs as fit (`columns / tab_width`) and pads the remainder with spaces.
///
/// ```rust
/// use text_extras::whitespace::encode;
///
/// assert_eq!(encode(16, 8), "\t\t");
/// assert_eq!(encode(13, 8), "\t     ");
/// assert_eq!(encode(3, 8), "   ");
/// ```
pub fn encode(columns: usize, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let tabs = columns / tab_width;
    let spaces = columns % tab_width;

    let mut out = String::with_capacity(tabs + spaces);
    out.extend(std::iter::repeat_n('\t', tabs));
    out.extend(std::iter::repeat_n(' ', spaces));
    out
}

/// The leading `' '`/`'\t'` prefix of a single line of text.
pub fn leading_whitespace_prefix(line: &str) -> &str {
    let end = line
        .bytes()
        .position(|b| b != b' ' && b != b'\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Round `column` up to the next indent stop strictly after it.
pub fn next_indent_stop(column: usize, indent_width: usize) -> usize {
    let indent_width = indent_width.max(1);
    (column / indent_width + 1) * indent_width
}

/// Number of leading characters of `run` that end at or before `column`.
///
/// A tab straddling `column` is not counted, so the offset never lands past the column.
pub fn offset_at_column(run: &str, column: usize, tab_width: usize) -> usize {
    let mut width = 0usize;
    run.chars()
        .take_while(|&ch| {
            width = width.saturating_add(cell_width_at(ch, width, tab_width));
            width <= column
        })
        .count()
}
