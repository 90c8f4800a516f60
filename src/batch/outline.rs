//! Outline every PDF in a directory.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::model::DocumentStructure;
use crate::parser::ParseOptions;
use crate::structure::StructureExtractor;

use super::{write_json, BatchOptions, BatchReport, DocumentOutcome};

/// List the `.pdf` files of a directory (extension matched case-insensitively),
/// sorted by file name.
pub fn list_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();

    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }

    pdfs.sort();
    Ok(pdfs)
}

/// Parse one PDF and infer its outline.
pub fn outline_file(
    path: &Path,
    parse: &ParseOptions,
    extractor: &StructureExtractor,
) -> Result<DocumentStructure> {
    let layout = crate::parse_file_with_options(path, parse.clone())?;
    Ok(extractor.extract(&layout))
}

/// Outline every PDF in `input_dir`, writing `<stem>.json` into `output_dir`.
///
/// The output directory is created if needed. Per-document failures are
/// logged and recorded in the report; only directory-level I/O errors abort.
pub fn outline_directory<P, Q>(input_dir: P, output_dir: Q, options: &BatchOptions) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    outline_directory_with(input_dir, output_dir, options, |_| {})
}

/// Like [`outline_directory`], calling `on_done` after each document.
pub fn outline_directory_with<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    on_done: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&DocumentOutcome) + Sync,
{
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let pdfs = list_pdfs(input_dir.as_ref())?;
    log::info!(
        "Outlining {} PDF(s) from {}",
        pdfs.len(),
        input_dir.as_ref().display()
    );

    let extractor = StructureExtractor::with_options(options.structure.clone());
    let process = |path: &PathBuf| {
        let outcome = outline_one(path, output_dir, options, &extractor);
        on_done(&outcome);
        outcome
    };

    let outcomes: Vec<DocumentOutcome> = if options.parallel {
        pdfs.par_iter().map(process).collect()
    } else {
        pdfs.iter().map(process).collect()
    };

    Ok(BatchReport { outcomes })
}

fn outline_one(
    input: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    extractor: &StructureExtractor,
) -> DocumentOutcome {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output = output_dir.join(format!("{}.json", stem));

    let result = outline_file(input, &options.parse, extractor)
        .and_then(|structure| write_json(&output, &structure, options.json_format));

    match result {
        Ok(()) => {
            log::info!("{} -> {}", input.display(), output.display());
            DocumentOutcome::Written {
                input: input.to_path_buf(),
                output,
            }
        }
        Err(e) => {
            log::error!("Failed to outline {}: {}", input.display(), e);
            DocumentOutcome::Failed {
                input: input.to_path_buf(),
                error: e.to_string(),
            }
        }
    }
}
