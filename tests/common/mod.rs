//! Shared helpers: build small text PDFs in memory with lopdf.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Regular-weight font resource.
pub const REGULAR: &str = "F1";
/// Bold font resource.
pub const BOLD: &str = "F2";

/// One line of text placed at a baseline position (PDF user space).
#[derive(Debug, Clone)]
pub struct TextRun {
    pub font: &'static str,
    pub size: i64,
    pub x: i64,
    pub y: i64,
    pub text: String,
    /// Show the text as two `Tj` operators split at this character index.
    pub split_at: Option<usize>,
    /// Draw inside `q ... Q` with a vertical `cm` translation of this many
    /// points. The baseline still lands at `y`.
    pub shift: i64,
}

pub fn run(font: &'static str, size: i64, x: i64, y: i64, text: &str) -> TextRun {
    TextRun {
        font,
        size,
        x,
        y,
        text: text.to_string(),
        split_at: None,
        shift: 0,
    }
}

impl TextRun {
    pub fn split(mut self, at: usize) -> Self {
        self.split_at = Some(at);
        self
    }

    pub fn shifted(mut self, dy: i64) -> Self {
        self.shift = dy;
        self
    }

    fn pieces(&self) -> Vec<String> {
        match self.split_at {
            Some(at) => {
                let head: String = self.text.chars().take(at).collect();
                let tail: String = self.text.chars().skip(at).collect();
                vec![head, tail]
            }
            None => vec![self.text.clone()],
        }
    }
}

fn operations(runs: &[TextRun]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for r in runs {
        if r.shift != 0 {
            ops.push(Operation::new("q", vec![]));
            ops.push(Operation::new(
                "cm",
                vec![1.into(), 0.into(), 0.into(), 1.into(), 0.into(), Object::Integer(r.shift)],
            ));
        }
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(r.font.as_bytes().to_vec()), Object::Integer(r.size)],
        ));
        ops.push(Operation::new(
            "Td",
            vec![Object::Integer(r.x), Object::Integer(r.y - r.shift)],
        ));
        for piece in r.pieces() {
            ops.push(Operation::new("Tj", vec![Object::string_literal(piece)]));
        }
        ops.push(Operation::new("ET", vec![]));
        if r.shift != 0 {
            ops.push(Operation::new("Q", vec![]));
        }
    }
    ops
}

/// Build a US Letter PDF with one page per entry.
pub fn build_pdf(pages: &[Vec<TextRun>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    let mut kids: Vec<Object> = Vec::new();
    for runs in pages {
        let content = Content {
            operations: operations(runs),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { REGULAR => regular_id, BOLD => bold_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Build a PDF and write it to `path`.
pub fn write_pdf(path: &Path, pages: &[Vec<TextRun>]) {
    fs::write(path, build_pdf(pages)).unwrap();
}

/// Two-page report: a title, bold headings, body paragraphs and page numbers.
pub fn sample_report() -> Vec<Vec<TextRun>> {
    let mut page1 = vec![
        run(BOLD, 24, 198, 740, "Annual Report 2024"),
        run(BOLD, 18, 72, 600, "Executive Summary"),
    ];
    for (i, line) in [
        "Revenue grew steadily across every region this year",
        "while operating costs remained close to the plan set",
        "at the start of the period. The board approved a new",
        "budget forecast covering the next three fiscal years",
        "and asked management to report on progress quarterly",
        "with particular attention to international expansion",
    ]
    .iter()
    .enumerate()
    {
        page1.push(run(REGULAR, 12, 72, 560 - 14 * i as i64, line));
    }
    page1.push(run(REGULAR, 10, 300, 30, "1"));

    let mut page2 = vec![
        run(BOLD, 18, 72, 650, "Financial Results"),
        run(BOLD, 14, 72, 600, "Revenue Growth"),
    ];
    for (i, line) in [
        "Quarterly revenue exceeded the budget in three of four",
        "quarters, driven by subscription renewals and upsells",
        "in the enterprise segment and new partner channels",
        "that opened during the second half of the year",
    ]
    .iter()
    .enumerate()
    {
        page2.push(run(REGULAR, 12, 72, 560 - 14 * i as i64, line));
    }
    page2.push(run(REGULAR, 10, 300, 30, "2"));

    vec![page1, page2]
}
