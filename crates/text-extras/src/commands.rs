//! Command interface.
//!
//! [`TextExtras`] is the entry point a host wires its menu items and key bindings to. Each
//! [`ExtrasCommand`] is executed against the current state of a [`TextSurface`]:
//!
//! 1. configuration is re-read from the [`ConfigSource`] and validated;
//! 2. the command computes an [`EditPlan`] from an immutable snapshot;
//! 3. the plan is applied back to front inside one undo group, then the selection is updated;
//! 4. wrapped-line indent attributes are refreshed for the edited paragraphs.
//!
//! Commands never fail. Anything they cannot act on leaves the surface untouched and reports
//! [`CommandResult::Unchanged`].

use std::ops::Range;

use ropey::Rope;
use tracing::{debug, trace, warn};

use crate::brace::{self, DelimiterTable};
use crate::completion::complete;
use crate::config::{ConfigSource, ExtrasConfig};
use crate::edit::{CharRange, EditPlan, normalize_ranges};
use crate::indent::{
    indent_friendly_delete_backward, indent_friendly_insert_tab, indent_left, indent_right,
    insert_newline_and_indent,
};
use crate::line_ending::{LineEnding, insert_line_ending, standardize};
use crate::line_index::{GotoTarget, Lines};
use crate::outline::{
    select_next_line_with_same_or_smaller_indent,
    select_previous_line_with_same_or_smaller_indent,
    select_to_next_line_with_same_or_smaller_indent,
    select_to_previous_line_with_same_or_smaller_indent,
};
use crate::surface::TextSurface;
use crate::wrap_indent::{
    ParagraphId, ParagraphIndent, paragraph_indent, paragraph_indents, paragraph_indents_in_range,
    wrap_fragments,
};

/// Editing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtrasCommand {
    /// Add one indent level to the selected lines.
    IndentRight,
    /// Remove one indent level from the selected lines.
    IndentLeft,
    /// Break the line and carry the current indentation over.
    InsertNewlineAndIndent {
        /// Terminator to insert.
        ending: LineEnding,
    },
    /// Replace the selection with a bare terminator.
    InsertLineEnding {
        /// Terminator to insert.
        ending: LineEnding,
    },
    /// Backspace that removes a whole indent level inside leading whitespace.
    IndentFriendlyDeleteBackward,
    /// Tab that advances to the next indent stop inside leading whitespace.
    IndentFriendlyInsertTab,
    /// Recompute every wrapped-line indent attribute.
    ReindentWrappedLines,
    /// Move to the next line indented the same or less.
    SelectNextLineWithSameOrSmallerIndent,
    /// Extend the selection to the next line indented the same or less.
    SelectToNextLineWithSameOrSmallerIndent,
    /// Move to the previous line indented the same or less.
    SelectPreviousLineWithSameOrSmallerIndent,
    /// Extend the selection to the previous line indented the same or less.
    SelectToPreviousLineWithSameOrSmallerIndent,
    /// Select a proposed single-character range, grown to the matching delimiter.
    SelectToMatchingBrace {
        /// Range proposed by the host (usually a double-click).
        proposed: CharRange,
    },
    /// Complete the word before the caret from the words of the text.
    Complete,
    /// Rewrite every line terminator as `ending`.
    StandardizeEndOfLine {
        /// Terminator to standardize on.
        ending: LineEnding,
    },
    /// Select a line or place the caret at a character offset.
    Goto {
        /// Where to go.
        target: GotoTarget,
    },
}

/// Outcome of [`TextExtras::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// The text was edited.
    Edited {
        /// Number of replacements applied.
        edits: usize,
    },
    /// Only the selection changed.
    SelectionChanged,
    /// Paragraph attributes were recomputed without touching the text.
    ParagraphsUpdated {
        /// Number of paragraphs that received an attribute.
        paragraphs: usize,
    },
    /// Nothing to do.
    Unchanged,
}

/// Settings the attached wrapped-line indents were computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WrapSettings {
    tab_width: usize,
    wrapped_line_indent_width: usize,
}

impl WrapSettings {
    fn from_config(config: &ExtrasConfig) -> Self {
        Self {
            tab_width: config.tab_width,
            wrapped_line_indent_width: config.wrapped_line_indent_width,
        }
    }
}

/// Executes [`ExtrasCommand`]s against a [`TextSurface`].
pub struct TextExtras<S, C = ExtrasConfig> {
    surface: S,
    config_source: C,
    /// Last configuration that passed validation.
    config: ExtrasConfig,
    delimiters: DelimiterTable,
    /// `Some` while wrapped-line indentation is active.
    wrap_settings: Option<WrapSettings>,
    command_history: Vec<ExtrasCommand>,
}

impl<S: TextSurface> TextExtras<S> {
    /// Create a facade with a fixed configuration.
    pub fn new(surface: S, config: ExtrasConfig) -> Self {
        Self::with_config_source(surface, config)
    }
}

impl<S: TextSurface, C: ConfigSource> TextExtras<S, C> {
    /// Create a facade that re-reads its configuration from `config_source` on every call.
    pub fn with_config_source(surface: S, config_source: C) -> Self {
        let mut extras = Self {
            surface,
            config_source,
            config: ExtrasConfig::default(),
            delimiters: DelimiterTable::default(),
            wrap_settings: None,
            command_history: Vec::new(),
        };
        extras.refresh();
        extras
    }

    /// Execute one command.
    pub fn execute(&mut self, command: ExtrasCommand) -> CommandResult {
        self.refresh();
        self.command_history.push(command);

        let result = match command {
            ExtrasCommand::IndentRight => self.edit_with(indent_right),
            ExtrasCommand::IndentLeft => self.edit_with(indent_left),
            ExtrasCommand::InsertNewlineAndIndent { ending } => {
                self.edit_with(|text, selections, config| {
                    insert_newline_and_indent(text, selections, ending, config)
                })
            }
            ExtrasCommand::InsertLineEnding { ending } => {
                self.edit_with(|text, selections, _| insert_line_ending(text, selections, ending))
            }
            ExtrasCommand::IndentFriendlyDeleteBackward => {
                self.edit_with(indent_friendly_delete_backward)
            }
            ExtrasCommand::IndentFriendlyInsertTab => self.edit_with(indent_friendly_insert_tab),
            ExtrasCommand::ReindentWrappedLines => self.reindent_wrapped_lines(),
            ExtrasCommand::SelectNextLineWithSameOrSmallerIndent => {
                self.move_selections(select_next_line_with_same_or_smaller_indent)
            }
            ExtrasCommand::SelectToNextLineWithSameOrSmallerIndent => {
                self.move_selections(select_to_next_line_with_same_or_smaller_indent)
            }
            ExtrasCommand::SelectPreviousLineWithSameOrSmallerIndent => {
                self.move_selections(select_previous_line_with_same_or_smaller_indent)
            }
            ExtrasCommand::SelectToPreviousLineWithSameOrSmallerIndent => {
                self.move_selections(select_to_previous_line_with_same_or_smaller_indent)
            }
            ExtrasCommand::SelectToMatchingBrace { proposed } => {
                let range = self.selection_range_for_proposed_range(proposed);
                self.set_selections(vec![range])
            }
            ExtrasCommand::Complete => {
                self.edit_with(|text, selections, _| complete(text, selections))
            }
            ExtrasCommand::StandardizeEndOfLine { ending } => {
                self.edit_with(|text, selections, _| standardize(text, selections, ending))
            }
            ExtrasCommand::Goto { target } => {
                let range = target.resolve(self.surface.text());
                self.set_selections(vec![range])
            }
        };

        debug!(?command, ?result, "executed command");
        result
    }

    /// Execute commands in order.
    pub fn execute_batch(
        &mut self,
        commands: impl IntoIterator<Item = ExtrasCommand>,
    ) -> Vec<CommandResult> {
        commands
            .into_iter()
            .map(|command| self.execute(command))
            .collect()
    }

    /// The range a double-click on `proposed` should select.
    ///
    /// With `SelectToMatchingBrace` on, a single delimiter character grows to include its
    /// counterpart; everything else comes back unchanged.
    pub fn selection_range_for_proposed_range(&self, proposed: CharRange) -> CharRange {
        let text = self.surface.text();
        let proposed = proposed.clamp_to(text.len_chars());
        if !self.config.select_to_matching_brace {
            return proposed;
        }
        brace::select_to_matching_brace(text, proposed, &self.delimiters)
    }

    /// Tell the facade about an edit made outside of it, e.g. typing.
    ///
    /// `edited` is the range of the new text; `structural` is true when line terminators were
    /// inserted or removed. Returns the number of paragraph attributes refreshed.
    pub fn text_did_change(&mut self, edited: CharRange, structural: bool) -> usize {
        self.refresh();
        self.update_wrapped_line_indents(&[edited], structural)
    }

    /// Re-read the configuration and bring wrapped-line indentation in line with it.
    pub fn refresh(&mut self) {
        self.refresh_config();
        self.sync_wrapped_line_indents();
    }

    /// Visual fragments of one paragraph in a viewport `viewport_width` cells wide.
    ///
    /// Continuation fragments honor the wrapped-line indent while the feature is active.
    /// Returns an empty list for a paragraph past the end of the text.
    pub fn wrap_paragraph(&self, paragraph: ParagraphId, viewport_width: usize) -> Vec<Range<usize>> {
        let text = self.surface.text();
        let Some(line) = Lines::new(text).nth(paragraph.0) else {
            return Vec::new();
        };
        let indent = if self.wrap_settings.is_some() {
            paragraph_indent(text, &line, &self.config)
        } else {
            ParagraphIndent::default()
        };
        let content = line.content_range();
        let line_text = text.slice(content.start()..content.end()).to_string();
        wrap_fragments(&line_text, viewport_width, self.config.tab_width, indent)
    }

    /// Returns `true` while wrapped-line indent attributes are being maintained.
    pub fn wrapped_line_indent_active(&self) -> bool {
        self.wrap_settings.is_some()
    }

    /// The configuration in effect (the last one that passed validation).
    pub fn config(&self) -> &ExtrasConfig {
        &self.config
    }

    /// Delimiters used by brace matching.
    pub fn delimiter_table(&self) -> &DelimiterTable {
        &self.delimiters
    }

    /// Replace the delimiters used by brace matching.
    pub fn set_delimiter_table(&mut self, table: DelimiterTable) {
        self.delimiters = table;
    }

    /// Commands executed so far.
    pub fn command_history(&self) -> &[ExtrasCommand] {
        &self.command_history
    }

    /// The surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface, mutably. Report text changes made through it with
    /// [`TextExtras::text_did_change`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the facade and return the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn refresh_config(&mut self) {
        let config = self.config_source.config();
        match config.validate() {
            Ok(()) => self.config = config,
            Err(err) => warn!(%err, "ignoring invalid configuration"),
        }
    }

    fn current_selections(&self) -> Vec<CharRange> {
        let len = self.surface.text().len_chars();
        let selections = normalize_ranges(self.surface.selected_ranges(), len);
        if selections.is_empty() {
            vec![CharRange::caret(0)]
        } else {
            selections
        }
    }

    fn edit_with<F>(&mut self, plan: F) -> CommandResult
    where
        F: FnOnce(&Rope, &[CharRange], &ExtrasConfig) -> EditPlan,
    {
        let selections = self.current_selections();
        let plan = plan(self.surface.text(), &selections, &self.config);
        self.apply_plan(plan)
    }

    fn apply_plan(&mut self, plan: EditPlan) -> CommandResult {
        if plan.is_empty() {
            trace!("plan has no edits");
            return self.set_selections(plan.selections);
        }

        let structural = plan.changes_line_structure(self.surface.text());

        self.surface.begin_undo_group();
        for edit in plan.edits.iter().rev() {
            self.surface.replace_characters(edit.range, &edit.text);
        }
        self.surface.end_undo_group();
        self.surface.set_selected_ranges(plan.selections.clone());

        self.update_wrapped_line_indents(&plan.ranges_after(), structural);
        CommandResult::Edited {
            edits: plan.edits.len(),
        }
    }

    fn move_selections<F>(&mut self, target: F) -> CommandResult
    where
        F: Fn(&Rope, CharRange, &ExtrasConfig) -> CharRange,
    {
        let text = self.surface.text();
        let moved = self
            .current_selections()
            .into_iter()
            .map(|sel| target(text, sel, &self.config))
            .collect();
        self.set_selections(moved)
    }

    fn set_selections(&mut self, selections: Vec<CharRange>) -> CommandResult {
        let len = self.surface.text().len_chars();
        let selections = normalize_ranges(selections, len);
        if selections.is_empty() || selections == self.current_selections() {
            trace!("selection unchanged");
            return CommandResult::Unchanged;
        }
        self.surface.set_selected_ranges(selections);
        CommandResult::SelectionChanged
    }

    fn reindent_wrapped_lines(&mut self) -> CommandResult {
        if self.wrap_settings.is_none() {
            trace!("wrapped-line indentation is inactive");
            return CommandResult::Unchanged;
        }
        CommandResult::ParagraphsUpdated {
            paragraphs: self.derive_all_wrapped_line_indents(),
        }
    }

    fn sync_wrapped_line_indents(&mut self) {
        let active = self.config.indent_wrapped_lines
            && self.surface.container_traits().supports_wrapped_line_indent();
        let wanted = active.then(|| WrapSettings::from_config(&self.config));
        if wanted == self.wrap_settings {
            return;
        }

        self.wrap_settings = wanted;
        if wanted.is_some() {
            let paragraphs = self.derive_all_wrapped_line_indents();
            debug!(paragraphs, "wrapped-line indentation applied");
        } else {
            self.surface.clear_paragraph_indents();
            debug!("wrapped-line indentation removed");
        }
    }

    fn derive_all_wrapped_line_indents(&mut self) -> usize {
        let indents = paragraph_indents(self.surface.text(), &self.config);
        self.surface.clear_paragraph_indents();
        let count = indents.len();
        for (paragraph, indent) in indents {
            self.surface.set_paragraph_indent(paragraph, Some(indent));
        }
        count
    }

    fn update_wrapped_line_indents(&mut self, edited: &[CharRange], structural: bool) -> usize {
        if self.wrap_settings.is_none() {
            return 0;
        }
        // Paragraph identities shift when lines are added or removed.
        if structural {
            return self.derive_all_wrapped_line_indents();
        }

        let len = self.surface.text().len_chars();
        let updates: Vec<_> = edited
            .iter()
            .flat_map(|range| {
                paragraph_indents_in_range(self.surface.text(), range.clamp_to(len), &self.config)
            })
            .collect();
        let count = updates.len();
        for (paragraph, indent) in updates {
            self.surface.set_paragraph_indent(paragraph, Some(indent));
        }
        count
    }
}
