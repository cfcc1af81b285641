//! Free-text command interpretation.
//!
//! Turns a user command like `"hide sports"` or `"show top 10 tech"` into a
//! [`Filter`] with its query vector attached. Unrecognized input is a normal
//! no-op outcome, not a fault.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::CommandError;

use regex::Regex;
use tracing::debug;

use crate::constants::{DEFAULT_HIDE_THRESHOLD, DEFAULT_SHOW_TOP_K};
use crate::embedding::Vectorizer;
use crate::filter::{Filter, FilterMode};

const TOP_COUNT_PATTERN: &str = r"\btop\s+(\d+)\b";

/// Parses free-text filter commands.
///
/// Matching operates on the trimmed, lower-cased command text, so stored query
/// text is lower-case (tokenization lower-cases anyway, leaving the vector
/// rebuild invariant untouched).
#[derive(Debug, Clone)]
pub struct CommandParser {
    vectorizer: Vectorizer,
    top_count: Regex,
    hide_threshold: f32,
    show_top_k: usize,
}

impl CommandParser {
    pub fn new(vectorizer: Vectorizer, hide_threshold: f32, show_top_k: usize) -> Self {
        Self {
            vectorizer,
            // The pattern is a literal; compilation cannot fail at runtime.
            top_count: Regex::new(TOP_COUNT_PATTERN).expect("top-count pattern is valid"),
            hide_threshold,
            show_top_k,
        }
    }

    /// Interprets a command, returning `Ok(None)` for empty or unrecognized
    /// input.
    ///
    /// Grammar, in match order:
    /// - `hide <query>` / `remove <query>`: hide-mode at the default threshold;
    /// - `only show <query>` as a substring anywhere in the text: show-mode with
    ///   the text after the first occurrence as the query. The whole-text scan
    ///   (so `"do not only show cats"` enters show-mode) matches the behavior
    ///   this grammar was lifted from and is kept deliberately;
    /// - `show <query>` / `only <query>`: show-mode; a `top <integer>` anywhere
    ///   in the remainder sets the retain count and is removed from the query.
    pub fn parse(&self, command: &str) -> Result<Option<Filter>, CommandError> {
        let text = command.trim().to_lowercase();
        if text.is_empty() {
            return Ok(None);
        }

        if let Some(query) = strip_any_prefix(&text, &["hide ", "remove "]) {
            let filter = Filter::new(
                query,
                FilterMode::Hide,
                self.show_top_k,
                self.hide_threshold,
                &self.vectorizer,
            );
            debug!(query = %filter.query, threshold = filter.threshold, "Parsed hide command");
            return Ok(Some(filter));
        }

        if let Some(at) = text.find("only show ") {
            let query = text[at + "only show ".len()..].trim().to_string();
            let filter = Filter::new(
                query,
                FilterMode::Show,
                self.show_top_k,
                self.hide_threshold,
                &self.vectorizer,
            );
            debug!(query = %filter.query, top_k = filter.top_k, "Parsed only-show command");
            return Ok(Some(filter));
        }

        if let Some(remainder) = strip_any_prefix(&text, &["show ", "only "]) {
            let (query, top_k) = self.extract_top_count(remainder)?;
            let filter = Filter::new(
                query,
                FilterMode::Show,
                top_k,
                self.hide_threshold,
                &self.vectorizer,
            );
            debug!(query = %filter.query, top_k = filter.top_k, "Parsed show command");
            return Ok(Some(filter));
        }

        debug!(command = %text, "Unrecognized command, no filter produced");
        Ok(None)
    }

    /// Pulls an optional `top <integer>` out of the query text.
    ///
    /// Returns the query with the matched substring removed (whitespace
    /// re-normalized) and the retain count. `top 0` is accepted and means an
    /// empty retain-set; only an unconvertible integer is a fault.
    fn extract_top_count(&self, remainder: &str) -> Result<(String, usize), CommandError> {
        let Some(captures) = self.top_count.captures(remainder) else {
            return Ok((remainder.trim().to_string(), self.show_top_k));
        };

        let digits = &captures[1];
        let top_k: usize = digits
            .parse()
            .map_err(|source| CommandError::InvalidTopCount {
                value: digits.to_string(),
                source,
            })?;

        let whole = captures.get(0).expect("capture 0 always present");
        let mut query = String::with_capacity(remainder.len());
        query.push_str(&remainder[..whole.start()]);
        query.push(' ');
        query.push_str(&remainder[whole.end()..]);
        let query = query.split_whitespace().collect::<Vec<_>>().join(" ");

        Ok((query, top_k))
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(Vectorizer::new(), DEFAULT_HIDE_THRESHOLD, DEFAULT_SHOW_TOP_K)
    }
}

fn strip_any_prefix<'a>(text: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .map(str::trim)
}
