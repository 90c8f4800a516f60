//! Rank sections of a document collection against a persona's task.

use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{RelevanceMetadata, RelevanceOutput, RelevanceRequest, ScoredSection};
use crate::relevance::{document_name, RelevanceRanker};

use super::{write_json, BatchOptions};

/// Read a relevance request from a JSON file.
///
/// Fields other than `persona.role`, `job_to_be_done.task` and
/// `documents[].filename` are ignored.
pub fn load_request<P: AsRef<Path>>(path: P) -> Result<RelevanceRequest> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }

    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))
}

/// Local wall-clock time as a naive ISO-8601 string with microseconds.
pub fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Score every requested document found in `pdf_dir` and rank the pooled
/// sections.
///
/// Documents are visited in request order, so score ties resolve to the
/// earlier document. Missing or unparsable documents are logged and skipped;
/// they still appear in `metadata.input_documents`.
pub fn rank_collection<P: AsRef<Path>>(
    request: &RelevanceRequest,
    pdf_dir: P,
    options: &BatchOptions,
) -> RelevanceOutput {
    let pdf_dir = pdf_dir.as_ref();
    let ranker = RelevanceRanker::with_options(options.rank.clone());
    let keywords = ranker.keywords(&request.job_to_be_done.task);
    log::info!(
        "Ranking {} document(s) against {} keyword(s)",
        request.documents.len(),
        keywords.len()
    );

    let score_one = |filename: &String| -> Vec<ScoredSection> {
        let path = pdf_dir.join(filename);
        match score_document(&path, &ranker, &keywords, options) {
            Ok(sections) => sections,
            Err(e @ Error::MissingInput(_)) => {
                log::warn!("Skipping {}: {}", filename, e);
                Vec::new()
            }
            Err(e) => {
                log::error!("Failed to score {}: {}", filename, e);
                Vec::new()
            }
        }
    };

    let filenames = request.filenames();
    let per_document: Vec<Vec<ScoredSection>> = if options.parallel {
        filenames.par_iter().map(score_one).collect()
    } else {
        filenames.iter().map(score_one).collect()
    };

    let ranked = ranker.rank_sections(per_document.into_iter().flatten().collect());

    RelevanceOutput {
        metadata: RelevanceMetadata {
            input_documents: filenames,
            persona: request.persona.role.clone(),
            job_to_be_done: request.job_to_be_done.task.clone(),
            timestamp: timestamp(),
        },
        extracted_sections: ranked.extracted,
        subsection_analysis: ranked.analysis,
    }
}

fn score_document(
    path: &Path,
    ranker: &RelevanceRanker,
    keywords: &[String],
    options: &BatchOptions,
) -> Result<Vec<ScoredSection>> {
    if !path.is_file() {
        return Err(Error::MissingInput(path.to_path_buf()));
    }

    let layout = crate::parse_file_with_options(path, options.parse.clone())?;
    Ok(ranker.extract_relevant_sections(&layout, &document_name(path), keywords))
}

/// Load a request, rank its collection and write the result to `output_json`.
pub fn run_relevance<P, Q, R>(
    input_json: P,
    pdf_dir: Q,
    output_json: R,
    options: &BatchOptions,
) -> Result<RelevanceOutput>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let request = load_request(input_json)?;
    let output = rank_collection(&request, pdf_dir, options);
    write_json(output_json.as_ref(), &output, options.json_format)?;
    log::info!(
        "Wrote {} ranked section(s) to {}",
        output.extracted_sections.len(),
        output_json.as_ref().display()
    );
    Ok(output)
}
