//! Configuration.
//!
//! The host owns persistence of these options; this crate only parses and validates them.
//! Keys use the preference names (`TabWidth`, `IndentWidth`, ...), so a JSON preference blob can
//! be fed to [`ExtrasConfig::from_json_str`] directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::whitespace::{DEFAULT_INDENT_WIDTH, DEFAULT_TAB_WIDTH};

/// Default extra indent (in columns) for wrapped continuation fragments.
pub const DEFAULT_WRAPPED_LINE_INDENT_WIDTH: usize = 2;

/// Errors produced when validating or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TabWidth must be at least 1 (got {0})")]
    /// `TabWidth` was zero.
    InvalidTabWidth(usize),

    #[error("IndentWidth must be at least 1 (got {0})")]
    /// `IndentWidth` was zero.
    InvalidIndentWidth(usize),

    #[error("failed to parse configuration: {0}")]
    /// The configuration document was not valid JSON or had mistyped values.
    Parse(#[from] serde_json::Error),
}

/// Editing options read by every operation at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ExtrasConfig {
    /// Columns between tab stops.
    pub tab_width: usize,
    /// Columns per indent level.
    pub indent_width: usize,
    /// Extra columns added to wrapped continuation fragments.
    pub wrapped_line_indent_width: usize,
    /// Extend a double-click on a delimiter to its matching counterpart.
    pub select_to_matching_brace: bool,
    /// Indent wrapped continuation fragments past the line's leading whitespace.
    pub indent_wrapped_lines: bool,
}

impl Default for ExtrasConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            indent_width: DEFAULT_INDENT_WIDTH,
            wrapped_line_indent_width: DEFAULT_WRAPPED_LINE_INDENT_WIDTH,
            select_to_matching_brace: true,
            indent_wrapped_lines: false,
        }
    }
}

impl ExtrasConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `TabWidth`.
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Set `IndentWidth`.
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Set `WrappedLineIndentWidth`.
    pub fn with_wrapped_line_indent_width(mut self, width: usize) -> Self {
        self.wrapped_line_indent_width = width;
        self
    }

    /// Set `SelectToMatchingBrace`.
    pub fn with_select_to_matching_brace(mut self, enabled: bool) -> Self {
        self.select_to_matching_brace = enabled;
        self
    }

    /// Set `IndentWrappedLines`.
    pub fn with_indent_wrapped_lines(mut self, enabled: bool) -> Self {
        self.indent_wrapped_lines = enabled;
        self
    }

    /// Reject values the editing operations cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width == 0 {
            return Err(ConfigError::InvalidTabWidth(self.tab_width));
        }
        if self.indent_width == 0 {
            return Err(ConfigError::InvalidIndentWidth(self.indent_width));
        }
        Ok(())
    }

    /// Parse a JSON preference document and validate it. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Where [`TextExtras`](crate::TextExtras) reads its configuration from on every call.
pub trait ConfigSource {
    /// The current configuration. It is validated by the caller before use.
    fn config(&self) -> ExtrasConfig;
}

impl ConfigSource for ExtrasConfig {
    fn config(&self) -> ExtrasConfig {
        self.clone()
    }
}

impl<F> ConfigSource for F
where
    F: Fn() -> ExtrasConfig,
{
    fn config(&self) -> ExtrasConfig {
        self()
    }
}
