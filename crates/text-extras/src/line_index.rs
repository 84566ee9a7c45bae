//! Logical Line Index
//!
//! Derives logical lines from a [`Rope`] snapshot on demand. Lines are ephemeral views: they are
//! never cached, and any mutation of the text invalidates every [`Line`] computed before it.
//!
//! Line boundaries follow [`LineEnding`] (LF, CR, CRLF, U+2028, U+2029) rather than Ropey's own
//! line breaking, so the result does not depend on Ropey's feature flags.

use ropey::Rope;

use crate::edit::{CharRange, normalize_ranges};
use crate::line_ending::LineEnding;
use crate::whitespace::{is_indent_char, width_of_chars};

/// A logical line: `start..end` excludes the terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    /// Character offset of the first character of the line.
    pub start: usize,
    /// Character offset just past the line content (where the terminator begins).
    pub end: usize,
    /// Terminator ending the line, `None` for the last line of the text.
    pub terminator: Option<LineEnding>,
}

impl Line {
    /// Range of the line content without its terminator.
    pub fn content_range(&self) -> CharRange {
        CharRange::from_bounds(self.start, self.end)
    }

    /// Range of the line content including its terminator.
    pub fn full_range(&self) -> CharRange {
        CharRange::from_bounds(self.start, self.next_start())
    }

    /// Offset where the following line starts (end of text for the last line).
    pub fn next_start(&self) -> usize {
        self.end + self.terminator.map_or(0, LineEnding::len_chars)
    }

    /// Number of characters in the line content.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the line has no content.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Offset of the first character of the line containing `offset`.
///
/// `offset` is clamped to the text length. An offset that points at the `'\n'` of a CRLF pair
/// belongs to the line that the pair terminates.
pub fn line_start_at(text: &Rope, offset: usize) -> usize {
    let offset = snap_out_of_crlf(text, offset);
    let mut start = offset;
    let mut chars = text.chars_at(offset);
    while let Some(ch) = chars.prev() {
        if LineEnding::is_terminator_char(ch) {
            break;
        }
        start -= 1;
    }
    start
}

/// Move an offset that sits between the CR and LF of a CRLF pair back onto the CR.
///
/// Other offsets are returned clamped to the text length.
pub fn snap_out_of_crlf(text: &Rope, offset: usize) -> usize {
    let len = text.len_chars();
    let offset = offset.min(len);
    if offset > 0 && offset < len && text.char(offset) == '\n' && text.char(offset - 1) == '\r' {
        offset - 1
    } else {
        offset
    }
}

/// Clamp, sort and merge `selections`, moving carets out of CRLF pairs first.
pub(crate) fn editing_selections(text: &Rope, selections: &[CharRange]) -> Vec<CharRange> {
    let snapped = selections
        .iter()
        .map(|sel| {
            if sel.is_empty() {
                CharRange::caret(snap_out_of_crlf(text, sel.start()))
            } else {
                *sel
            }
        })
        .collect();
    normalize_ranges(snapped, text.len_chars())
}

/// Build the line beginning at `start`, which must be a line start.
fn line_from_start(text: &Rope, start: usize) -> Line {
    let mut end = start;
    let mut chars = text.chars_at(start);
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            let terminator = if chars.next() == Some('\n') {
                LineEnding::Crlf
            } else {
                LineEnding::Cr
            };
            return Line {
                start,
                end,
                terminator: Some(terminator),
            };
        }
        if let Some(terminator) = LineEnding::from_char(ch) {
            return Line {
                start,
                end,
                terminator: Some(terminator),
            };
        }
        end += 1;
    }

    Line {
        start,
        end,
        terminator: None,
    }
}

/// The line containing `offset` (clamped to the text length).
pub fn line_at(text: &Rope, offset: usize) -> Line {
    line_from_start(text, line_start_at(text, offset))
}

/// The line following `line`, if any.
pub fn next_line(text: &Rope, line: &Line) -> Option<Line> {
    line.terminator
        .map(|_| line_from_start(text, line.next_start()))
}

/// The line preceding `line`, if any.
pub fn previous_line(text: &Rope, line: &Line) -> Option<Line> {
    (line.start > 0).then(|| line_at(text, line.start - 1))
}

/// Iterator over every logical line of a snapshot, in order.
pub struct Lines<'a> {
    text: &'a Rope,
    next: Option<Line>,
}

impl<'a> Lines<'a> {
    /// Iterate all lines of `text`.
    pub fn new(text: &'a Rope) -> Self {
        Self::starting_at(text, 0)
    }

    /// Iterate lines starting with the one containing `offset`.
    pub fn starting_at(text: &'a Rope, offset: usize) -> Self {
        Self {
            text,
            next: Some(line_at(text, offset)),
        }
    }
}

impl Iterator for Lines<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        let line = self.next.take()?;
        self.next = next_line(self.text, &line);
        Some(line)
    }
}

/// Lines intersecting `range`, in ascending order.
///
/// A line counts if any of its characters (terminator included) falls inside `range`. A caret
/// yields exactly the line containing it. The range is clamped to the text.
pub fn lines_intersecting(text: &Rope, range: CharRange) -> Vec<Line> {
    let range = range.clamp_to(text.len_chars());
    let mut lines = Lines::starting_at(text, range.start());
    let Some(first) = lines.next() else {
        return Vec::new();
    };

    let mut out = vec![first];
    if range.is_empty() {
        return out;
    }
    out.extend(lines.take_while(|line| line.start < range.end()));
    out
}

/// Zero-based index of the line containing `offset`.
pub fn line_number_at(text: &Rope, offset: usize) -> usize {
    let start = line_start_at(text, offset);
    Lines::new(text)
        .take_while(|line| line.start < start)
        .count()
}

/// Leading-whitespace span of `line`: the run of `' '`/`'\t'` starting at the line start.
///
/// For an all-whitespace line this is the whole line content.
pub fn leading_whitespace(text: &Rope, line: &Line) -> CharRange {
    let count = text
        .slice(line.start..line.end)
        .chars()
        .take_while(|&ch| is_indent_char(ch))
        .count();
    CharRange::new(line.start, count)
}

/// Visual width in columns of the characters in `range`, measured from column 0.
pub fn width_of_range(text: &Rope, range: CharRange, tab_width: usize) -> usize {
    let range = range.clamp_to(text.len_chars());
    width_of_chars(text.slice(range.start()..range.end()).chars(), tab_width)
}

/// Visual width of the leading whitespace of `line`.
pub fn leading_whitespace_width(text: &Rope, line: &Line, tab_width: usize) -> usize {
    width_of_range(text, leading_whitespace(text, line), tab_width)
}

/// A goto request, as typed into a goto field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GotoTarget {
    /// One-based line number.
    Line(usize),
    /// Zero-based character offset.
    Character(usize),
}

impl GotoTarget {
    /// Parse `"42"` as a line and `"c42"` / `"#42"` as a character offset.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (number, is_char) = match input.strip_prefix(['c', 'C', '#']) {
            Some(rest) => (rest.trim_start(), true),
            None => (input, false),
        };
        let value = number.parse::<usize>().ok()?;
        Some(if is_char {
            Self::Character(value)
        } else {
            Self::Line(value)
        })
    }

    /// The range to select for this target.
    ///
    /// Lines select their full range including the terminator; line 0 is treated as line 1 and
    /// lines past the end clamp to the last line. Character offsets become a caret clamped to
    /// the text length.
    pub fn resolve(self, text: &Rope) -> CharRange {
        match self {
            Self::Line(number) => {
                let index = number.saturating_sub(1);
                let mut last = None;
                for (i, line) in Lines::new(text).enumerate() {
                    if i == index {
                        return line.full_range();
                    }
                    last = Some(line);
                }
                last.map_or(CharRange::caret(0), |line| line.full_range())
            }
            Self::Character(offset) => CharRange::caret(offset.min(text.len_chars())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rope(text: &str) -> Rope {
        Rope::from_str(text)
    }

    #[test]
    fn test_line_at_mixed_terminators() {
        let text = rope("ab\r\ncd\ref\u{2028}gh\u{2029}ij\n");
        let lines: Vec<Line> = Lines::new(&text).collect();
        let terminators: Vec<Option<LineEnding>> = lines.iter().map(|l| l.terminator).collect();
        assert_eq!(
            terminators,
            vec![
                Some(LineEnding::Crlf),
                Some(LineEnding::Cr),
                Some(LineEnding::LineSeparator),
                Some(LineEnding::ParagraphSeparator),
                Some(LineEnding::Lf),
                None,
            ]
        );
        assert_eq!(lines[1].start, 4);
        assert_eq!(lines[1].end, 6);
        assert!(lines[5].is_empty());
    }

    #[test]
    fn test_offset_inside_crlf_belongs_to_terminated_line() {
        let text = rope("ab\r\ncd");
        assert_eq!(line_at(&text, 3).start, 0);
        assert_eq!(line_at(&text, 2).start, 0);
        assert_eq!(line_at(&text, 4).start, 4);

        assert_eq!(snap_out_of_crlf(&text, 3), 2);
        assert_eq!(snap_out_of_crlf(&text, 4), 4);
        assert_eq!(snap_out_of_crlf(&text, 99), 6);
    }

    #[test]
    fn test_line_at_end_of_text() {
        let text = rope("ab\n");
        let line = line_at(&text, 3);
        assert_eq!((line.start, line.end, line.terminator), (3, 3, None));
        assert_eq!(line_at(&text, 100).start, 3);
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let text = rope("");
        assert_eq!(Lines::new(&text).count(), 1);
        assert_eq!(lines_intersecting(&text, CharRange::new(0, 5)).len(), 1);
    }

    #[test]
    fn test_lines_intersecting() {
        let text = rope("one\ntwo\nthree\n");
        let starts = |range: CharRange| -> Vec<usize> {
            lines_intersecting(&text, range)
                .iter()
                .map(|l| l.start)
                .collect()
        };

        assert_eq!(starts(CharRange::caret(5)), vec![4]);
        assert_eq!(starts(CharRange::caret(4)), vec![4]);
        // Partially covered lines count.
        assert_eq!(starts(CharRange::from_bounds(2, 5)), vec![0, 4]);
        // A range ending at a line start does not include that line.
        assert_eq!(starts(CharRange::from_bounds(0, 8)), vec![0, 4]);
        assert_eq!(starts(CharRange::from_bounds(0, 9)), vec![0, 4, 8]);
        // Covering only a terminator still counts its line.
        assert_eq!(starts(CharRange::new(3, 1)), vec![0]);
    }

    #[test]
    fn test_previous_and_next_line() {
        let text = rope("a\r\nb\nc");
        let middle = line_at(&text, 3);
        assert_eq!(previous_line(&text, &middle).map(|l| l.start), Some(0));
        assert_eq!(next_line(&text, &middle).map(|l| l.start), Some(5));
        assert_eq!(previous_line(&text, &line_at(&text, 0)), None);
        assert_eq!(next_line(&text, &line_at(&text, 5)), None);
    }

    #[test]
    fn test_leading_whitespace() {
        let text = rope("\t  foo\n   \nbar");
        let lines: Vec<Line> = Lines::new(&text).collect();

        assert_eq!(leading_whitespace(&text, &lines[0]), CharRange::new(0, 3));
        // All-whitespace line: the whole content, terminator excluded.
        assert_eq!(leading_whitespace(&text, &lines[1]), CharRange::new(7, 3));
        assert_eq!(leading_whitespace(&text, &lines[2]), CharRange::new(11, 0));

        assert_eq!(leading_whitespace_width(&text, &lines[0], 8), 10);
        assert_eq!(leading_whitespace_width(&text, &lines[0], 4), 6);
    }

    #[test]
    fn test_line_number_at() {
        let text = rope("a\nb\r\nc");
        assert_eq!(line_number_at(&text, 0), 0);
        assert_eq!(line_number_at(&text, 2), 1);
        assert_eq!(line_number_at(&text, 4), 1);
        assert_eq!(line_number_at(&text, 5), 2);
    }

    #[test]
    fn test_goto_parse() {
        assert_eq!(GotoTarget::parse(" 12 "), Some(GotoTarget::Line(12)));
        assert_eq!(GotoTarget::parse("c7"), Some(GotoTarget::Character(7)));
        assert_eq!(GotoTarget::parse("# 7"), Some(GotoTarget::Character(7)));
        assert_eq!(GotoTarget::parse("x7"), None);
        assert_eq!(GotoTarget::parse(""), None);
    }

    #[test]
    fn test_goto_resolve() {
        let text = rope("one\ntwo\nthree");
        assert_eq!(GotoTarget::Line(2).resolve(&text), CharRange::new(4, 4));
        assert_eq!(GotoTarget::Line(0).resolve(&text), CharRange::new(0, 4));
        assert_eq!(GotoTarget::Line(99).resolve(&text), CharRange::new(8, 5));
        assert_eq!(
            GotoTarget::Character(99).resolve(&text),
            CharRange::caret(13)
        );
    }
}
