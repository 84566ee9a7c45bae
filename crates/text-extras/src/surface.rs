//! Host text surface.
//!
//! [`TextSurface`] is the narrow interface the [`TextExtras`](crate::TextExtras) facade drives:
//! read the text and selection, replace characters, and attach display-only paragraph
//! attributes. A UI toolkit implements it over its own text view; [`TextBuffer`] is the
//! rope-backed implementation used headlessly and in tests.

use std::collections::BTreeMap;

use ropey::Rope;

use crate::edit::{CharRange, normalize_ranges};
use crate::wrap_indent::{ContainerTraits, ParagraphId, ParagraphIndent};

/// An editable text view, as seen by the editing operations.
pub trait TextSurface {
    /// Current text. Treated as an immutable snapshot for the duration of one command.
    fn text(&self) -> &Rope;

    /// Selected ranges, in ascending order.
    fn selected_ranges(&self) -> Vec<CharRange>;

    /// Replace the selection.
    fn set_selected_ranges(&mut self, ranges: Vec<CharRange>);

    /// Replace the characters in `range` with `text`.
    fn replace_characters(&mut self, range: CharRange, text: &str);

    /// Attach (or with `None`, remove) the wrapped-line indent of one paragraph.
    fn set_paragraph_indent(&mut self, paragraph: ParagraphId, indent: Option<ParagraphIndent>);

    /// Remove every paragraph indent attribute.
    fn clear_paragraph_indents(&mut self);

    /// Properties of the container showing the text.
    fn container_traits(&self) -> ContainerTraits {
        ContainerTraits::default()
    }

    /// Start grouping replacements into one undoable change.
    fn begin_undo_group(&mut self) {}

    /// Close the group opened by [`TextSurface::begin_undo_group`].
    fn end_undo_group(&mut self) {}
}

/// A rope-backed [`TextSurface`].
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: Rope,
    selections: Vec<CharRange>,
    paragraph_indents: BTreeMap<ParagraphId, ParagraphIndent>,
    traits: ContainerTraits,
    open_groups: usize,
    undo_groups: usize,
}

impl TextBuffer {
    /// Create a buffer with a caret at the start of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: Rope::from_str(text),
            selections: vec![CharRange::caret(0)],
            paragraph_indents: BTreeMap::new(),
            traits: ContainerTraits::default(),
            open_groups: 0,
            undo_groups: 0,
        }
    }

    /// Builder-style selection setter.
    pub fn with_selection(mut self, ranges: Vec<CharRange>) -> Self {
        self.set_selected_ranges(ranges);
        self
    }

    /// Builder-style container traits setter.
    pub fn with_container_traits(mut self, traits: ContainerTraits) -> Self {
        self.traits = traits;
        self
    }

    /// Change the container traits.
    pub fn set_container_traits(&mut self, traits: ContainerTraits) {
        self.traits = traits;
    }

    /// The text as a `String`.
    pub fn contents(&self) -> String {
        self.text.to_string()
    }

    /// Wrapped-line indent attached to `paragraph`, if any.
    pub fn paragraph_indent(&self, paragraph: ParagraphId) -> Option<ParagraphIndent> {
        self.paragraph_indents.get(&paragraph).copied()
    }

    /// All attached paragraph indents, by paragraph.
    pub fn paragraph_indents(&self) -> impl Iterator<Item = (ParagraphId, ParagraphIndent)> + '_ {
        self.paragraph_indents.iter().map(|(id, indent)| (*id, *indent))
    }

    /// Number of closed undo groups.
    pub fn undo_group_count(&self) -> usize {
        self.undo_groups
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextSurface for TextBuffer {
    fn text(&self) -> &Rope {
        &self.text
    }

    fn selected_ranges(&self) -> Vec<CharRange> {
        self.selections.clone()
    }

    fn set_selected_ranges(&mut self, ranges: Vec<CharRange>) {
        let ranges = normalize_ranges(ranges, self.text.len_chars());
        self.selections = if ranges.is_empty() {
            vec![CharRange::caret(0)]
        } else {
            ranges
        };
    }

    fn replace_characters(&mut self, range: CharRange, text: &str) {
        let len = self.text.len_chars();
        let range = range.clamp_to(len);
        if !range.is_empty() {
            self.text.remove(range.start()..range.end());
        }
        if !text.is_empty() {
            self.text.insert(range.start(), text);
        }

        // Keep the selection inside the text until the caller sets a new one.
        let len = self.text.len_chars();
        for sel in &mut self.selections {
            *sel = sel.clamp_to(len);
        }

        if self.open_groups == 0 {
            self.undo_groups += 1;
        }
    }

    fn set_paragraph_indent(&mut self, paragraph: ParagraphId, indent: Option<ParagraphIndent>) {
        match indent {
            Some(indent) => {
                self.paragraph_indents.insert(paragraph, indent);
            }
            None => {
                self.paragraph_indents.remove(&paragraph);
            }
        }
    }

    fn clear_paragraph_indents(&mut self) {
        self.paragraph_indents.clear();
    }

    fn container_traits(&self) -> ContainerTraits {
        self.traits
    }

    fn begin_undo_group(&mut self) {
        self.open_groups += 1;
    }

    fn end_undo_group(&mut self) {
        if self.open_groups == 0 {
            return;
        }
        self.open_groups -= 1;
        if self.open_groups == 0 {
            self.undo_groups += 1;
        }
    }
}
