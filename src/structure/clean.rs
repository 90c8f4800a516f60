//! Text normalization for heading and title candidates.

use regex::Regex;
use std::sync::OnceLock;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn non_word_edges() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\W+|\W+$").unwrap())
}

/// Normalize candidate text.
///
/// Removes control characters (U+0000..U+001F), collapses whitespace runs to
/// a single space and strips leading/trailing non-word characters.
/// `clean_text(&clean_text(x)) == clean_text(x)` for every input.
pub fn clean_text(text: &str) -> String {
    // Whitespace controls (tab, newline, ...) survive until the collapse step.
    let visible: String = text
        .chars()
        .filter(|c| !matches!(*c, '\u{0}'..='\u{1f}') || c.is_whitespace())
        .collect();

    let collapsed = whitespace_run().replace_all(&visible, " ");
    let stripped = non_word_edges().replace_all(&collapsed, "");
    stripped.trim().to_string()
}

/// Patterns that disqualify a cleaned block from being a heading.
#[derive(Debug, Clone)]
pub(crate) struct NoisePatterns {
    date: Regex,
    digits: Regex,
}

impl NoisePatterns {
    pub(crate) fn new() -> Self {
        Self {
            date: Regex::new(r"^\d{1,2}[-/–]\d{1,2}[-/–]\d{2,4}$").unwrap(),
            digits: Regex::new(r"^\d+$").unwrap(),
        }
    }

    /// Dates like `12/05/2024` or `3-4-24`.
    pub(crate) fn is_date(&self, text: &str) -> bool {
        self.date.is_match(text)
    }

    /// Bare numbers, typically page numbers.
    pub(crate) fn is_page_number(&self, text: &str) -> bool {
        self.digits.is_match(text)
    }
}

impl Default for NoisePatterns {
    fn default() -> Self {
        Self::new()
    }
}
