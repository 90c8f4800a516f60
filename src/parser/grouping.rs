//! Grouping of positioned spans into lines and blocks.

use std::cmp::Ordering;

use crate::model::{Block, Line, Span};

/// Line measurements used to decide block breaks.
#[derive(Debug, Clone, Copy)]
struct LineMetrics {
    /// Bottom edge (top-down coordinates)
    y: f32,
    /// Left edge
    x: f32,
    /// Dominant font size, weighted by text length
    font_size: f32,
}

impl LineMetrics {
    fn of(line: &Line) -> Self {
        let total_chars: usize = line.spans.iter().map(|s| s.text.chars().count()).sum();
        let weighted: f32 = line
            .spans
            .iter()
            .map(|s| s.font_size * s.text.chars().count() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted / total_chars as f32
        } else {
            line.spans.first().map(|s| s.font_size).unwrap_or(0.0)
        };

        let bbox = line.bbox().unwrap_or_default();
        Self {
            y: bbox.y1,
            x: bbox.x0,
            font_size,
        }
    }
}

/// Group spans sharing a baseline into lines, top to bottom.
pub(crate) fn group_spans_into_lines(mut spans: Vec<Span>, tolerance: f32) -> Vec<Line> {
    spans.sort_by(|a, b| match a.bbox.y1.partial_cmp(&b.bbox.y1) {
        Some(Ordering::Equal) | None => a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal),
        Some(ord) => ord,
    });

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let y_tolerance = span.font_size * tolerance;

        match current_y {
            Some(y) if (span.bbox.y1 - y).abs() <= y_tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(finish_line(std::mem::take(&mut current)));
                }
                current_y = Some(span.bbox.y1);
                current.push(span);
            }
        }
    }

    if !current.is_empty() {
        lines.push(finish_line(current));
    }

    lines
}

fn finish_line(mut spans: Vec<Span>) -> Line {
    spans.sort_by(|a, b| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal));
    Line::new(spans)
}

/// Group consecutive lines into blocks based on spacing, size and indentation.
pub(crate) fn group_lines_into_blocks(lines: Vec<Line>, gap_ratio: f32) -> Vec<Block> {
    if lines.is_empty() {
        return vec![];
    }

    let metrics: Vec<LineMetrics> = lines.iter().map(LineMetrics::of).collect();
    let avg_spacing = average_line_spacing(&metrics);
    log::debug!(
        "Grouping {} lines, average spacing {:.1}pt",
        lines.len(),
        avg_spacing
    );

    let mut blocks = Vec::new();
    let mut current: Vec<Line> = Vec::new();

    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 && should_break_block(&metrics[i - 1], &metrics[i], avg_spacing, gap_ratio) {
            blocks.push(Block::new(std::mem::take(&mut current)));
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(Block::new(current));
    }

    blocks
}

fn average_line_spacing(metrics: &[LineMetrics]) -> f32 {
    let spacings: Vec<f32> = metrics
        .windows(2)
        .map(|w| (w[1].y - w[0].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }

    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn should_break_block(prev: &LineMetrics, curr: &LineMetrics, avg_spacing: f32, gap_ratio: f32) -> bool {
    // Large spacing indicates new paragraph
    if (curr.y - prev.y).abs() > avg_spacing * gap_ratio {
        return true;
    }

    // Significant font size change
    if (prev.font_size - curr.font_size).abs() > 1.0 {
        return true;
    }

    // Indentation change
    (prev.x - curr.x).abs() > 20.0
}
