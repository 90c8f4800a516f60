//! Inferred document outline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level, from most (`H1`) to least (`H4`) prominent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// Nesting depth, 1 for `H1` through 4 for `H4`.
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }

    /// Label used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// Heading level
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl HeadingRecord {
    /// Create a new heading record.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and headings of one document, in reading order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Document title, empty if none was detected
    pub title: String,
    /// Headings in page order, then block order
    pub outline: Vec<HeadingRecord>,
}

impl DocumentStructure {
    /// Create a structure.
    pub fn new(title: impl Into<String>, outline: Vec<HeadingRecord>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Check if neither a title nor any heading was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }
}
