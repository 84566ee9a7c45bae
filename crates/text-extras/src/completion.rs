//! Word Completion
//!
//! Completes the word before the caret from the other words of the same text. Candidates are
//! the distinct words that extend the partial word, in order of appearance.
//!
//! - A first completion extends the partial word to the longest prefix all candidates share.
//! - When the candidates share nothing beyond the partial word, the first candidate is inserted
//!   and its added part is left selected.
//! - Completing again with that selection in place replaces it with the next candidate, wrapping
//!   around at the end of the list.

use std::collections::HashSet;

use regex::Regex;
use ropey::Rope;
use tracing::{trace, warn};

use crate::edit::{CharRange, EditPlan, TextEdit};

/// Word characters: alphanumerics and `'_'`.
pub fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// Longest prefix shared by every string, compared character by character.
///
/// ```rust
/// use text_extras::completion::longest_common_prefix;
///
/// assert_eq!(longest_common_prefix(["format", "formula", "form"]), "form");
/// assert_eq!(longest_common_prefix(["abc", "xyz"]), "");
/// assert_eq!(longest_common_prefix(Vec::<String>::new()), "");
/// ```
pub fn longest_common_prefix<I, S>(strings: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut strings = strings.into_iter();
    let Some(first) = strings.next() else {
        return String::new();
    };

    let mut prefix = first.as_ref().to_owned();
    for other in strings {
        let shared = prefix
            .char_indices()
            .zip(other.as_ref().chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((index, ch), _)| index + ch.len_utf8());
        prefix.truncate(shared);
        if prefix.is_empty() {
            break;
        }
    }
    prefix
}

/// The run of word characters that ends at `caret`.
pub fn word_range_before(text: &Rope, caret: usize) -> CharRange {
    let caret = caret.min(text.len_chars());
    let mut start = caret;
    let mut chars = text.chars_at(caret);
    while let Some(ch) = chars.prev() {
        if !is_word_char(ch) {
            break;
        }
        start -= 1;
    }
    CharRange::from_bounds(start, caret)
}

/// Distinct words of `text` that extend the word in `partial`, in order of appearance.
///
/// The occurrence being completed (the word starting at `partial`) is not a candidate.
pub fn completion_candidates(text: &Rope, partial: CharRange) -> Vec<String> {
    let partial = partial.clamp_to(text.len_chars());
    if partial.is_empty() {
        return Vec::new();
    }

    let prefix = text.slice(partial.start()..partial.end()).to_string();
    let pattern = format!(r"\b{}\w+", regex::escape(&prefix));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            warn!(%err, "cannot build completion pattern");
            return Vec::new();
        }
    };

    let haystack = text.to_string();
    let mut seen = HashSet::new();
    re.find_iter(&haystack)
        .filter(|m| text.byte_to_char(m.start()) != partial.start())
        .map(|m| m.as_str())
        .filter(|word| seen.insert(*word))
        .map(str::to_owned)
        .collect()
}

/// Range occupied by `completion` once it replaces the characters in `range`.
pub fn replacement_range_after(range: CharRange, completion: &str) -> CharRange {
    CharRange::new(range.start(), completion.chars().count())
}

/// Complete the word before the first selection.
///
/// Returns a plan that only keeps `selections` when there is nothing to complete.
pub fn complete(text: &Rope, selections: &[CharRange]) -> EditPlan {
    let len = text.len_chars();
    let Some(selection) = selections.first().map(|sel| sel.clamp_to(len)) else {
        return EditPlan::new();
    };

    let partial = word_range_before(text, selection.start());
    let candidates = completion_candidates(text, partial);
    let Some(first) = candidates.first() else {
        trace!(?partial, "no completion candidates");
        return EditPlan::select(selections.to_vec());
    };

    let typed = partial.length;
    let added = |word: &str| word.chars().skip(typed).collect::<String>();

    let (insertion, keep_selected) = if selection.is_empty() {
        let shared = longest_common_prefix(&candidates);
        if shared.chars().count() > typed {
            (added(shared.as_str()), false)
        } else {
            (added(first.as_str()), true)
        }
    } else {
        let current: String = text
            .slice(partial.start()..selection.end())
            .chars()
            .collect();
        let Some(index) = candidates.iter().position(|word| *word == current) else {
            trace!(%current, "selection is not a completion");
            return EditPlan::select(selections.to_vec());
        };
        let next = &candidates[(index + 1) % candidates.len()];
        (added(next.as_str()), true)
    };

    let inserted = replacement_range_after(selection, &insertion);
    let mut plan = EditPlan::new();
    plan.push(TextEdit::new(selection, insertion));
    plan.selections = vec![if keep_selected {
        inserted
    } else {
        CharRange::caret(inserted.end())
    }];
    plan
}
