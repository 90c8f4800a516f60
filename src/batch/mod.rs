//! Batch drivers: run a pipeline over many documents and write JSON results.
//!
//! Each document is processed independently. A document that is missing or
//! fails to parse is logged and skipped; it never aborts its siblings.

mod outline;
mod relevance;

pub use outline::{list_pdfs, outline_directory, outline_directory_with, outline_file};
pub use relevance::{load_request, rank_collection, run_relevance, timestamp};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::parser::ParseOptions;
use crate::relevance::RankOptions;
use crate::render::{to_json, JsonFormat};
use crate::structure::StructureOptions;

/// Options shared by the batch drivers.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Layout parsing options
    pub parse: ParseOptions,

    /// Outline inference thresholds
    pub structure: StructureOptions,

    /// Relevance ranking options
    pub rank: RankOptions,

    /// Process documents on the rayon thread pool
    pub parallel: bool,

    /// Output JSON format
    pub json_format: JsonFormat,
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set structure options.
    pub fn with_structure_options(mut self, options: StructureOptions) -> Self {
        self.structure = options;
        self
    }

    /// Set rank options.
    pub fn with_rank_options(mut self, options: RankOptions) -> Self {
        self.rank = options;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set output JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            structure: StructureOptions::default(),
            rank: RankOptions::default(),
            parallel: true,
            json_format: JsonFormat::Pretty,
        }
    }
}

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    /// Result written to `output`
    Written { input: PathBuf, output: PathBuf },
    /// Processing failed; the batch continued
    Failed { input: PathBuf, error: String },
}

impl DocumentOutcome {
    /// Input document path.
    pub fn input(&self) -> &Path {
        match self {
            DocumentOutcome::Written { input, .. } | DocumentOutcome::Failed { input, .. } => input,
        }
    }

    /// Check if the document was processed successfully.
    pub fn is_ok(&self) -> bool {
        matches!(self, DocumentOutcome::Written { .. })
    }
}

/// Summary of a batch run, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Number of documents written.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Failed documents with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            DocumentOutcome::Failed { input, error } => Some((input.as_path(), error.as_str())),
            DocumentOutcome::Written { .. } => None,
        })
    }

    /// Total number of documents attempted.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if no documents were attempted.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Serialize a value and write it to `path`, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, format: JsonFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_json(value, format)?)?;
    Ok(())
}
