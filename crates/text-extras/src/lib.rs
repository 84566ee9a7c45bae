#![warn(missing_docs)]
//! Text Extras - Headless Indentation and Line-Structure Kernel
//!
//! # Overview
//!
//! `text-extras` adds programmer-oriented editing behaviors to a plain-text view: indentation
//! management, line-ending normalization, brace-matching selection, wrapped-line indentation,
//! outline navigation by indent level and word completion.
//!
//! It does no rendering and owns no undo stack. The host exposes its text view through the
//! [`TextSurface`] trait; every operation reads an immutable snapshot and produces a batch of
//! replacements that the host applies as one undoable change.
//!
//! # Core Features
//!
//! - **Minimal whitespace encoding**: indentation is always re-encoded as tabs plus spaces
//! - **Rope snapshots**: line scans over `ropey` without materializing strings
//! - **All line terminators**: LF, CR, CRLF, U+2028 and U+2029
//! - **Wrapped-line indentation**: display-only continuation indents per paragraph
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface (TextExtras)             │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  TextSurface (host adapter)                 │  ← Host Boundary
//! ├─────────────────────────────────────────────┤
//! │  Indent / Brace / Wrap / Outline / Complete │  ← Editing Operations
//! ├─────────────────────────────────────────────┤
//! │  EditPlan (batched replacements)            │  ← Edit Format
//! ├─────────────────────────────────────────────┤
//! │  Line Index + Line Endings                  │  ← Line Access
//! ├─────────────────────────────────────────────┤
//! │  Whitespace Model                           │  ← Column Metrics
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use text_extras::{
//!     CharRange, ExtrasCommand, ExtrasConfig, LineEnding, TextBuffer, TextExtras, TextSurface,
//! };
//!
//! let buffer = TextBuffer::new("\t\tfoo").with_selection(vec![CharRange::caret(5)]);
//! let mut extras = TextExtras::new(buffer, ExtrasConfig::default());
//!
//! extras.execute(ExtrasCommand::InsertNewlineAndIndent {
//!     ending: LineEnding::Lf,
//! });
//!
//! assert_eq!(extras.surface().contents(), "\t\tfoo\n\t\t");
//! assert_eq!(extras.surface().selected_ranges(), vec![CharRange::caret(8)]);
//! ```
//!
//! # Module Description
//!
//! - [`whitespace`] - column widths and minimal tab/space encoding
//! - [`line_ending`] - terminator detection and standardization
//! - [`line_index`] - logical lines over a rope snapshot, goto targets
//! - [`edit`] - character ranges and batched edit plans
//! - [`indent`] - indentation edits
//! - [`brace`] - delimiter matching
//! - [`wrap_indent`] - wrapped-line indentation and fragment computation
//! - [`outline`] - navigation by indent level
//! - [`completion`] - word completion from the words of the text
//! - [`surface`] - host text surface interface
//! - [`commands`] - unified command interface
//! - [`config`] - configuration options and validation
//!
//! # Offsets
//!
//! All offsets and lengths are in characters (Unicode scalar values). Column widths count
//! terminal-style cells: tabs expand to the next tab stop and wide characters take two cells.

pub mod brace;
pub mod commands;
pub mod completion;
pub mod config;
pub mod edit;
pub mod indent;
pub mod line_ending;
pub mod line_index;
pub mod outline;
pub mod surface;
pub mod whitespace;
pub mod wrap_indent;

pub use brace::{DelimiterTable, find_matching_delimiter};
pub use commands::{CommandResult, ExtrasCommand, TextExtras};
pub use config::{ConfigError, ConfigSource, ExtrasConfig};
pub use edit::{Bias, CaretLanding, CharRange, EditPlan, TextEdit};
pub use line_ending::LineEnding;
pub use line_index::{GotoTarget, Line, Lines};
pub use surface::{TextBuffer, TextSurface};
pub use wrap_indent::{ContainerTraits, ParagraphId, ParagraphIndent};
