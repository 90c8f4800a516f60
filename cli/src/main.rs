//! pdfsift CLI - PDF outline extraction and section ranking tool

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsift::batch::{list_pdfs, outline_directory_with, run_relevance, DocumentOutcome};
use pdfsift::{
    extract_outline_with_options, BatchOptions, JsonFormat, ParseOptions, RankOptions,
    StructureOptions,
};

#[derive(Parser)]
#[command(name = "pdfsift")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer PDF outlines and rank sections for a persona's task", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a title/outline JSON for every PDF in a directory
    Outline {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR", env = "PDFSIFT_INPUT_DIR", default_value = "/app/input")]
        input: PathBuf,

        /// Directory receiving one JSON file per PDF
        #[arg(value_name = "OUTPUT_DIR", env = "PDFSIFT_OUTPUT_DIR", default_value = "/app/output")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Rank sections of a document collection against a task
    Rank {
        /// Request JSON (persona, job_to_be_done, documents)
        #[arg(
            short,
            long,
            value_name = "FILE",
            default_value = "/app/input/challenge1b_input.json"
        )]
        input: PathBuf,

        /// Directory holding the requested PDFs (default: <input dir>/PDFs)
        #[arg(long, value_name = "DIR")]
        pdf_dir: Option<PathBuf>,

        /// Result JSON
        #[arg(
            short,
            long,
            value_name = "FILE",
            default_value = "/app/output/challenge1b_output.json"
        )]
        output: PathBuf,

        /// Number of sections to keep
        #[arg(long, default_value = "5")]
        top_k: usize,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the title and outline of one PDF
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            compact,
            sequential,
        } => cmd_outline(&input, &output, compact, sequential),
        Commands::Rank {
            input,
            pdf_dir,
            output,
            top_k,
            compact,
        } => cmd_rank(&input, pdf_dir.as_deref(), &output, top_k, compact),
        Commands::Inspect { input, json } => cmd_inspect(&input, json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_outline(
    input: &Path,
    output: &Path,
    compact: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let total = list_pdfs(input)?.len();
    if total == 0 {
        println!("{} {}", "No PDF files found in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let options = BatchOptions::new()
        .with_parse_options(ParseOptions::new().lenient())
        .with_parallel(!sequential)
        .with_json_format(json_format(compact));

    let report = outline_directory_with(input, output, &options, |outcome| {
        if let Some(name) = outcome.input().file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} document(s) -> {}",
        "Outlined".green().bold(),
        report.succeeded(),
        report.len(),
        output.display()
    );
    for outcome in &report.outcomes {
        match outcome {
            DocumentOutcome::Written { output, .. } => {
                println!("  {} {}", "├─".dimmed(), output.display());
            }
            DocumentOutcome::Failed { input, error } => {
                println!("  {} {} {}", "├─".dimmed(), input.display(), error.red());
            }
        }
    }

    Ok(())
}

fn cmd_rank(
    input: &Path,
    pdf_dir: Option<&Path>,
    output: &Path,
    top_k: usize,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pdf_dir = pdf_dir.map(Path::to_path_buf).unwrap_or_else(|| {
        input
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("PDFs")
    });
    log::debug!("Request {}, PDFs from {}", input.display(), pdf_dir.display());

    let options = BatchOptions::new()
        .with_parse_options(ParseOptions::new().lenient())
        .with_rank_options(RankOptions::new().with_top_k(top_k))
        .with_json_format(json_format(compact));

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Ranking sections from {}", pdf_dir.display()));
    let result = run_relevance(input, &pdf_dir, output, &options)?;
    spinner.finish_and_clear();

    println!(
        "{} {} section(s) from {} document(s)",
        "Ranked".green().bold(),
        result.extracted_sections.len(),
        result.metadata.input_documents.len()
    );
    for section in &result.extracted_sections {
        println!(
            "  {} #{} {} (p{}) {}",
            "├─".dimmed(),
            section.importance_rank,
            section.document.cyan(),
            section.page_number,
            section.section_title
        );
    }
    println!("{} {}", "Saved to".green(), output.display());

    Ok(())
}

fn cmd_inspect(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let structure = extract_outline_with_options(
        input,
        ParseOptions::new().lenient(),
        StructureOptions::default(),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&structure)?);
        return Ok(());
    }

    println!("{}", "Document Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());

    if structure.title.is_empty() {
        println!("{}: {}", "Title".bold(), "(none)".dimmed());
    } else {
        println!("{}: {}", "Title".bold(), structure.title);
    }

    if structure.outline.is_empty() {
        println!("{}", "No headings detected".yellow());
        return Ok(());
    }

    println!();
    for heading in &structure.outline {
        let indent = "  ".repeat(heading.level.depth() as usize - 1);
        println!(
            "{}{} {} {}",
            indent,
            heading.level.as_str().bold(),
            heading.text,
            format!("(p{})", heading.page).dimmed()
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and section ranking tool");
    println!();
    println!("License: MIT");
}
