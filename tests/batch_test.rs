//! Integration tests for directory outlining.

mod common;

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{run, sample_report, write_pdf, BOLD};
use pdfsift::batch::{outline_directory, outline_directory_with};
use pdfsift::{BatchOptions, DocumentStructure, HeadingLevel, JsonFormat};

#[test]
fn test_outline_directory_writes_one_json_per_pdf() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_pdf(&input.path().join("report.pdf"), &sample_report());
    write_pdf(&input.path().join("blank.PDF"), &[vec![]]);
    fs::write(input.path().join("readme.txt"), "not a pdf").unwrap();

    let report = outline_directory(input.path(), output.path(), &BatchOptions::default()).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.succeeded(), 2);

    // Sorted by file name.
    let inputs: Vec<_> = report
        .outcomes
        .iter()
        .map(|o| o.input().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(inputs, vec!["blank.PDF", "report.pdf"]);

    let structure: DocumentStructure =
        serde_json::from_str(&fs::read_to_string(output.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(structure.title, "Annual Report 2024");
    assert_eq!(structure.outline.len(), 3);
    assert_eq!(structure.outline[0].level, HeadingLevel::H3);

    let blank = fs::read_to_string(output.path().join("blank.json")).unwrap();
    let blank: DocumentStructure = serde_json::from_str(&blank).unwrap();
    assert!(blank.is_empty());
    assert!(!output.path().join("readme.json").exists());
}

#[test]
fn test_failures_are_isolated() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_pdf(
        &input.path().join("a.pdf"),
        &[vec![run(BOLD, 24, 72, 740, "Project Charter")]],
    );
    fs::write(input.path().join("b.pdf"), b"this is not a pdf").unwrap();
    write_pdf(&input.path().join("c.pdf"), &sample_report());

    let report =
        outline_directory(input.path(), output.path(), &BatchOptions::new().sequential()).unwrap();
    assert_eq!(report.len(), 3);
    assert_eq!(report.succeeded(), 2);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].0.ends_with("b.pdf"));

    assert!(output.path().join("a.json").exists());
    assert!(!output.path().join("b.json").exists());
    assert!(output.path().join("c.json").exists());
}

#[test]
fn test_compact_output_and_progress_callback() {
    let input = tempfile::tempdir().unwrap();
    let output = input.path().join("nested").join("out");

    write_pdf(&input.path().join("one.pdf"), &[vec![]]);
    write_pdf(&input.path().join("two.pdf"), &[vec![]]);

    let seen = AtomicUsize::new(0);
    let options = BatchOptions::new().with_json_format(JsonFormat::Compact);
    let report = outline_directory_with(input.path(), &output, &options, |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(seen.load(Ordering::SeqCst), 2);
    assert_eq!(
        fs::read_to_string(output.join("one.json")).unwrap(),
        r#"{"title":"","outline":[]}"#
    );
}

#[test]
fn test_parallel_matches_sequential() {
    let input = tempfile::tempdir().unwrap();
    let parallel_out = tempfile::tempdir().unwrap();
    let sequential_out = tempfile::tempdir().unwrap();

    for i in 0..4 {
        write_pdf(&input.path().join(format!("doc{}.pdf", i)), &sample_report());
    }

    let parallel = outline_directory(input.path(), parallel_out.path(), &BatchOptions::default())
        .unwrap();
    let sequential = outline_directory(
        input.path(),
        sequential_out.path(),
        &BatchOptions::new().sequential(),
    )
    .unwrap();

    let names = |r: &pdfsift::BatchReport| -> Vec<_> {
        r.outcomes.iter().map(|o| o.input().to_path_buf()).collect()
    };
    assert_eq!(names(&parallel), names(&sequential));

    for i in 0..4 {
        let name = format!("doc{}.json", i);
        assert_eq!(
            fs::read_to_string(parallel_out.path().join(&name)).unwrap(),
            fs::read_to_string(sequential_out.path().join(&name)).unwrap()
        );
    }
}
