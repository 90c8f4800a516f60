//! Outline inference: document title and heading levels from font statistics.
//!
//! Embedded bookmarks are ignored. The extractor works in two passes: a
//! statistics pass collecting the median and spread of every span's font
//! size, then a classification pass that measures each block against it.

mod clean;
mod extractor;
mod options;
mod stats;

pub use clean::clean_text;
pub use extractor::{extract_structure, BlockFeatures, StructureExtractor};
pub use options::StructureOptions;
pub use stats::FontStatistics;
