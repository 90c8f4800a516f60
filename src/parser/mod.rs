//! PDF parsing module: positioned spans, lines and blocks.

mod content;
mod grouping;
mod options;
mod pdf_parser;

pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
