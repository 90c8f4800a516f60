//! Title and heading inference from layout statistics.

use crate::model::{Block, DocumentLayout, DocumentStructure, HeadingLevel, HeadingRecord, PageLayout};

use super::clean::{clean_text, NoisePatterns};
use super::options::StructureOptions;
use super::stats::FontStatistics;

/// Formatting and size features of one block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockFeatures {
    /// Cleaned block text
    pub text: String,
    /// Mean size of the block's non-blank spans
    pub mean_size: Option<f64>,
    /// Any non-blank span is bold
    pub is_bold: bool,
    /// Any line with text is horizontally centered on the page
    pub is_centered: bool,
    /// Number of lines in the block
    pub line_count: usize,
}

impl BlockFeatures {
    /// Measure a block on a page of the given width.
    ///
    /// Span texts are trimmed and space-joined; blank spans contribute
    /// neither text nor size.
    pub fn of(block: &Block, page_width: f32, center_tolerance: f32) -> Self {
        let mut text = String::new();
        let mut sizes: Vec<f64> = Vec::new();
        let mut is_bold = false;
        let mut is_centered = false;

        for line in &block.lines {
            let mut line_text = String::new();

            for span in &line.spans {
                let t = span.text.trim();
                if t.is_empty() {
                    continue;
                }
                line_text.push_str(t);
                line_text.push(' ');
                sizes.push(f64::from(span.font_size));
                is_bold |= span.is_bold();
            }

            if line_text.is_empty() {
                continue;
            }

            if let Some(center) = line.center_x() {
                is_centered |= (center - page_width / 2.0).abs() < page_width * center_tolerance;
            }
            text.push_str(&line_text);
        }

        let mean_size = if sizes.is_empty() {
            None
        } else {
            Some(sizes.iter().sum::<f64>() / sizes.len() as f64)
        };

        Self {
            text: clean_text(&text),
            mean_size,
            is_bold,
            is_centered,
            line_count: block.line_count(),
        }
    }
}

/// Infers a document's title and heading outline.
#[derive(Debug, Clone, Default)]
pub struct StructureExtractor {
    options: StructureOptions,
    noise: NoisePatterns,
}

impl StructureExtractor {
    /// Create an extractor with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom thresholds.
    pub fn with_options(options: StructureOptions) -> Self {
        Self {
            options,
            noise: NoisePatterns::new(),
        }
    }

    /// Get the extractor options.
    pub fn options(&self) -> &StructureOptions {
        &self.options
    }

    /// Extract title and outline.
    ///
    /// Runs a statistics pass over the whole document, then classifies
    /// blocks against it. A document without text yields an empty result.
    pub fn extract(&self, layout: &DocumentLayout) -> DocumentStructure {
        let Some(stats) = FontStatistics::collect(layout, self.options.fallback_std) else {
            log::debug!("No text spans found; empty outline");
            return DocumentStructure::default();
        };

        log::debug!(
            "Font statistics: median {:.2}pt, std {:.2}pt over {} spans",
            stats.median,
            stats.std_dev,
            stats.samples
        );

        let title = self.detect_title(layout, &stats);
        let outline = self.detect_headings(layout, &stats, &title);
        DocumentStructure::new(title, outline)
    }

    /// Pick the largest-font block in the title zone of the first page.
    ///
    /// Earlier blocks win ties. Returns an empty string if nothing qualifies.
    pub fn detect_title(&self, layout: &DocumentLayout, stats: &FontStatistics) -> String {
        let Some(page) = layout.pages.first() else {
            return String::new();
        };

        let zone_bottom = page.height * self.options.title_zone_ratio;
        let mut best: Option<(String, f64)> = None;

        for block in page.blocks.iter().filter(|b| b.bbox.y0 < zone_bottom) {
            let features = BlockFeatures::of(block, page.width, self.options.center_tolerance_ratio);
            let Some(mean) = features.mean_size else {
                continue;
            };

            if mean <= stats.title_threshold()
                || features.text.chars().count() <= self.options.min_title_chars
            {
                continue;
            }

            if best.as_ref().map_or(true, |(_, size)| mean > *size) {
                best = Some((features.text, mean));
            }
        }

        best.map(|(text, _)| text).unwrap_or_default()
    }

    /// Collect headings from every page in reading order.
    pub fn detect_headings(
        &self,
        layout: &DocumentLayout,
        stats: &FontStatistics,
        title: &str,
    ) -> Vec<HeadingRecord> {
        let mut headings = Vec::new();

        for page in &layout.pages {
            for block in &page.blocks {
                if self.in_margin(block, page) {
                    continue;
                }

                let features =
                    BlockFeatures::of(block, page.width, self.options.center_tolerance_ratio);
                if let Some(level) = self.heading_level(&features, stats, title) {
                    headings.push(HeadingRecord::new(level, features.text, page.number));
                }
            }
        }

        log::debug!("Detected {} headings", headings.len());
        headings
    }

    /// Decide whether a block is a heading, and at which level.
    pub fn heading_level(
        &self,
        features: &BlockFeatures,
        stats: &FontStatistics,
        title: &str,
    ) -> Option<HeadingLevel> {
        let text = features.text.as_str();
        if text.is_empty() || text == title {
            return None;
        }

        let rejected = text.chars().count() < self.options.min_heading_chars
            || text.split_whitespace().count() > self.options.max_heading_words
            || self.noise.is_date(text)
            || self.noise.is_page_number(text)
            || self.options.is_noise(text)
            || !(features.is_bold || features.is_centered)
            || features.line_count > self.options.max_heading_lines;
        if rejected {
            return None;
        }

        stats.classify(features.mean_size?)
    }

    /// Header/footer zone check on the block's top and bottom edges.
    fn in_margin(&self, block: &Block, page: &PageLayout) -> bool {
        let margin = page.height * self.options.margin_ratio;
        block.bbox.y0 < margin || block.bbox.y1 > page.height - margin
    }
}

/// Extract title and outline with default thresholds.
pub fn extract_structure(layout: &DocumentLayout) -> DocumentStructure {
    StructureExtractor::new().extract(layout)
}
