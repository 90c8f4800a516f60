//! # pdfsift
//!
//! Document outline inference and task relevance ranking for PDF collections.
//!
//! The library reads positioned text spans from PDF content streams, groups
//! them into lines and blocks, and offers two analyses on top of that layout:
//!
//! - **Outline**: a document title and an H1-H4 heading list inferred from
//!   font-size statistics, bold weight and centering.
//! - **Relevance**: blocks from several documents scored against the
//!   keywords of a task description, with the top five ranked.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsift::{extract_outline, render};
//!
//! fn main() -> pdfsift::Result<()> {
//!     let structure = extract_outline("report.pdf")?;
//!     println!("{}", render::to_json(&structure, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Batch processing
//!
//! ```no_run
//! use pdfsift::batch::{outline_directory, BatchOptions};
//!
//! let report = outline_directory("input", "output", &BatchOptions::default()).unwrap();
//! println!("{} of {} documents written", report.succeeded(), report.len());
//! ```

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod relevance;
pub mod render;
pub mod structure;

// Re-export commonly used types
pub use batch::{BatchOptions, BatchReport, DocumentOutcome};
pub use detect::{is_pdf, sniff_version};
pub use error::{Error, Result};
pub use model::{
    BBox, Block, DocumentLayout, DocumentStructure, HeadingLevel, HeadingRecord, Line, PageLayout,
    RelevanceOutput, RelevanceRequest, ScoredSection, Span, StyleFlags, TextBlock,
};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use relevance::{
    extract_keywords, extract_relevant_sections, rank_sections, RankOptions, RelevanceRanker,
};
pub use render::JsonFormat;
pub use structure::{clean_text, extract_structure, StructureExtractor, StructureOptions};

use std::io::Read;
use std::path::Path;

/// Parse a PDF file into its page layout.
///
/// # Example
///
/// ```no_run
/// use pdfsift::parse_file;
///
/// let layout = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", layout.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocumentLayout> {
    PdfParser::open(path)?.layout()
}

/// Parse a PDF file with custom options.
///
/// ```no_run
/// use pdfsift::{parse_file_with_options, ParseOptions};
///
/// let layout = parse_file_with_options("document.pdf", ParseOptions::new().lenient()).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<DocumentLayout> {
    PdfParser::open_with_options(path, options)?.layout()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<DocumentLayout> {
    PdfParser::from_bytes(data)?.layout()
}

/// Parse a PDF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<DocumentLayout> {
    PdfParser::from_bytes_with_options(data, options)?.layout()
}

/// Parse a PDF from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<DocumentLayout> {
    PdfParser::from_reader(reader)?.layout()
}

/// Infer the title and heading outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfsift::extract_outline;
///
/// let structure = extract_outline("document.pdf").unwrap();
/// for heading in &structure.outline {
///     println!("{} {} (page {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentStructure> {
    let layout = parse_file(path)?;
    Ok(extract_structure(&layout))
}

/// Infer the outline of a PDF file with custom options.
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    parse: ParseOptions,
    structure: StructureOptions,
) -> Result<DocumentStructure> {
    let layout = parse_file_with_options(path, parse)?;
    Ok(StructureExtractor::with_options(structure).extract(&layout))
}
