//! Relevance request and result types.

use serde::{Deserialize, Serialize};

/// Persona the analysis is performed for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
}

/// Task the persona wants to accomplish.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobToBeDone {
    pub task: String,
}

/// A document referenced by a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentRef {
    pub filename: String,
}

/// Input of a relevance run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelevanceRequest {
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
    pub documents: Vec<DocumentRef>,
}

impl RelevanceRequest {
    /// Create a request.
    pub fn new(role: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            persona: Persona { role: role.into() },
            job_to_be_done: JobToBeDone { task: task.into() },
            documents: Vec::new(),
        }
    }

    /// Add a document by filename.
    pub fn with_document(mut self, filename: impl Into<String>) -> Self {
        self.documents.push(DocumentRef {
            filename: filename.into(),
        });
        self
    }

    /// Filenames of all referenced documents, in request order.
    pub fn filenames(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }
}

/// A block that matched at least one keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSection {
    /// Source document basename
    pub document: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// First line of the block, truncated
    pub section_title: String,
    /// Full block text
    pub refined_text: String,
    /// Number of distinct keywords found in the block
    pub importance_score: usize,
}

/// Ranked section without its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: usize,
    pub page_number: u32,
}

/// Ranked section text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// Top-ranked sections in two parallel projections, indexed by rank.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedSections {
    pub extracted: Vec<ExtractedSection>,
    pub analysis: Vec<SubsectionAnalysis>,
}

impl RankedSections {
    /// Number of ranked sections.
    pub fn len(&self) -> usize {
        self.extracted.len()
    }

    /// Check if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.extracted.is_empty()
    }
}

/// Metadata block of a relevance result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceMetadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub timestamp: String,
}

/// Output of a relevance run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceOutput {
    pub metadata: RelevanceMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}
