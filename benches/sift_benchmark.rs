//! Benchmarks for outline inference and section ranking.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfsift::model::{BBox, Block, DocumentLayout, Line, PageLayout, Span};
use pdfsift::{extract_keywords, RelevanceRanker, StructureExtractor};

const BODY: &str = "Budget forecasts for quarterly revenue review and regional planning";

fn line(text: &str, size: f32, font: &str, top: f32) -> Line {
    let width = text.chars().count() as f32 * size * 0.5;
    Line::new(vec![Span::new(
        text,
        BBox::new(72.0, top, 72.0 + width, top + size),
        size,
        font,
    )])
}

/// A layout with one bold heading and a few body paragraphs per page.
fn synthetic_layout(page_count: u32) -> DocumentLayout {
    let pages = (1..=page_count)
        .map(|n| {
            let mut page = PageLayout::letter(n).with_block(Block::new(vec![line(
                &format!("Section {} Overview", n),
                18.0,
                "Helvetica-Bold",
                100.0,
            )]));
            for p in 0..4 {
                let top = 150.0 + p as f32 * 120.0;
                let lines = (0..6)
                    .map(|i| line(BODY, 11.0, "Helvetica", top + i as f32 * 14.0))
                    .collect();
                page = page.with_block(Block::new(lines));
            }
            page
        })
        .collect();
    DocumentLayout::new(pages)
}

/// A minimal PDF with one text line per page.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut content = String::from("%PDF-1.4\n");
    content.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", i * 2 + 4)).collect();
    content.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        page_count
    ));
    content.push_str(
        "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>\nendobj\n",
    );

    let mut next_obj = 4;
    for i in 0..page_count {
        let page_obj = next_obj;
        let content_obj = next_obj + 1;
        next_obj += 2;

        content.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>\nendobj\n",
            page_obj, content_obj
        ));

        let text = format!("BT /F1 14 Tf 72 600 Td (Section {} budget review) Tj ET", i + 1);
        content.push_str(&format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content_obj,
            text.len(),
            text
        ));
    }

    let xref_offset = content.len();
    content.push_str(&format!("xref\n0 {}\n", next_obj));
    content.push_str("0000000000 65535 f \n");
    for _ in 1..next_obj {
        content.push_str("0000000000 00000 n \n");
    }
    content.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        next_obj, xref_offset
    ));

    content.into_bytes()
}

fn bench_header_sniff(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);

    c.bench_function("version_from_header", |b| {
        b.iter(|| pdfsift::detect::version_from_header(black_box(&pdf_data)).unwrap());
    });
}

fn bench_pdf_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_parsing");

    for page_count in [1, 5, 10].iter() {
        let data = create_test_pdf(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                // Placeholder xref offsets; lenient mode tolerates the rebuild
                let options = pdfsift::ParseOptions::new().lenient();
                let _ = pdfsift::parse_bytes_with_options(black_box(&data), options);
            });
        });
    }

    group.finish();
}

fn bench_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure");
    let extractor = StructureExtractor::new();

    for page_count in [1, 10, 50].iter() {
        let layout = synthetic_layout(*page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extractor.extract(black_box(&layout)));
        });
    }

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let ranker = RelevanceRanker::new();
    let keywords = extract_keywords("Prepare a budget forecast review for the regional team");
    let layout = synthetic_layout(50);

    c.bench_function("extract_and_rank_50_pages", |b| {
        b.iter(|| {
            let sections =
                ranker.extract_relevant_sections(black_box(&layout), "synthetic.pdf", &keywords);
            ranker.rank_sections(sections)
        });
    });
}

criterion_group!(
    benches,
    bench_header_sniff,
    bench_pdf_parsing,
    bench_structure,
    bench_ranking,
);
criterion_main!(benches);
