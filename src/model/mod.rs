//! Document model types.
//!
//! `layout` holds the positioned text produced by the parser; `outline` and
//! `relevance` hold what the two analysis pipelines produce from it.

mod layout;
mod outline;
mod relevance;

pub use layout::{BBox, Block, DocumentLayout, Line, PageLayout, Span, StyleFlags, TextBlock};
pub use outline::{DocumentStructure, HeadingLevel, HeadingRecord};
pub use relevance::{
    DocumentRef, ExtractedSection, JobToBeDone, Persona, RankedSections, RelevanceMetadata,
    RelevanceOutput, RelevanceRequest, ScoredSection, SubsectionAnalysis,
};

pub(crate) use layout::is_spaceless_script_char;
