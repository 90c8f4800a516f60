//! Section scoring and top-k ranking.

use std::path::Path;

use crate::model::{
    DocumentLayout, ExtractedSection, RankedSections, ScoredSection, SubsectionAnalysis,
};

use super::keywords::keyword_score;

/// Options for relevance ranking.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Number of sections kept after ranking
    pub top_k: usize,

    /// Keywords must be longer than this (characters)
    pub min_keyword_chars: usize,

    /// Maximum length of a section title (characters)
    pub max_title_chars: usize,
}

impl RankOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sections kept.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the section title length limit.
    pub fn with_max_title_chars(mut self, chars: usize) -> Self {
        self.max_title_chars = chars;
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_keyword_chars: 3,
            max_title_chars: 80,
        }
    }
}

/// Scores document blocks against task keywords and ranks them.
#[derive(Debug, Clone, Default)]
pub struct RelevanceRanker {
    options: RankOptions,
}

impl RelevanceRanker {
    /// Create a ranker with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ranker with custom options.
    pub fn with_options(options: RankOptions) -> Self {
        Self { options }
    }

    /// Get the ranker options.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Keywords of a task description under these options.
    pub fn keywords(&self, task: &str) -> Vec<String> {
        super::keywords::extract_keywords_with_min(task, self.options.min_keyword_chars)
    }

    /// Score every block of a document and keep those matching a keyword.
    ///
    /// Sections come out in page order, then block order.
    pub fn extract_relevant_sections(
        &self,
        layout: &DocumentLayout,
        document: &str,
        keywords: &[String],
    ) -> Vec<ScoredSection> {
        let mut sections = Vec::new();

        for page in &layout.pages {
            for block in page.text_blocks() {
                let text = block.text.trim();
                if text.is_empty() {
                    continue;
                }

                let score = keyword_score(text, keywords);
                if score == 0 {
                    continue;
                }

                let section_title: String = text
                    .split('\n')
                    .next()
                    .unwrap_or_default()
                    .chars()
                    .take(self.options.max_title_chars)
                    .collect();

                sections.push(ScoredSection {
                    document: document.to_string(),
                    page: page.number,
                    section_title,
                    refined_text: text.to_string(),
                    importance_score: score,
                });
            }
        }

        log::debug!("{}: {} matching sections", document, sections.len());
        sections
    }

    /// Rank pooled sections by score and keep the top `top_k`.
    ///
    /// The sort is stable: equal scores keep the order sections were
    /// produced in.
    pub fn rank_sections(&self, mut sections: Vec<ScoredSection>) -> RankedSections {
        sections.sort_by(|a, b| b.importance_score.cmp(&a.importance_score));
        sections.truncate(self.options.top_k);

        let mut ranked = RankedSections::default();
        for (i, section) in sections.into_iter().enumerate() {
            ranked.extracted.push(ExtractedSection {
                document: section.document.clone(),
                section_title: section.section_title,
                importance_rank: i + 1,
                page_number: section.page,
            });
            ranked.analysis.push(SubsectionAnalysis {
                document: section.document,
                refined_text: section.refined_text,
                page_number: section.page,
            });
        }

        ranked
    }
}

/// Score a document's blocks with default options.
pub fn extract_relevant_sections(
    layout: &DocumentLayout,
    document: &str,
    keywords: &[String],
) -> Vec<ScoredSection> {
    RelevanceRanker::new().extract_relevant_sections(layout, document, keywords)
}

/// Rank sections with default options (top 5).
pub fn rank_sections(sections: Vec<ScoredSection>) -> RankedSections {
    RelevanceRanker::new().rank_sections(sections)
}

/// Basename of a document path, as reported in results.
pub fn document_name<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Block, Line, PageLayout, Span};

    fn text_block(lines: &[&str], y0: f32) -> Block {
        Block::new(
            lines
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    let top = y0 + i as f32 * 14.0;
                    Line::new(vec![Span::new(
                        *text,
                        BBox::new(72.0, top, 400.0, top + 12.0),
                        12.0,
                        "Helvetica",
                    )])
                })
                .collect(),
        )
    }

    fn section(document: &str, page: u32, score: usize) -> ScoredSection {
        ScoredSection {
            document: document.to_string(),
            page,
            section_title: format!("{} p{}", document, page),
            refined_text: format!("text of {} p{}", document, page),
            importance_score: score,
        }
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_extract_relevant_sections() {
        let layout = DocumentLayout::new(vec![
            PageLayout::letter(1)
                .with_block(text_block(&["Q3 Budget Forecast Summary", "Details follow"], 100.0))
                .with_block(text_block(&["Unrelated prose"], 200.0)),
            PageLayout::letter(2).with_block(text_block(&["Budget notes"], 100.0)),
        ]);

        let sections =
            extract_relevant_sections(&layout, "report.pdf", &keywords(&["budget", "forecast"]));
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].importance_score, 2);
        assert_eq!(sections[0].page, 1);
        assert_eq!(sections[0].section_title, "Q3 Budget Forecast Summary");
        assert_eq!(
            sections[0].refined_text,
            "Q3 Budget Forecast Summary\nDetails follow"
        );
        assert_eq!(sections[1].importance_score, 1);
        assert_eq!(sections[1].page, 2);
        assert_eq!(sections[1].document, "report.pdf");
    }

    #[test]
    fn test_section_title_truncated() {
        let long = "budget ".repeat(30);
        let layout =
            DocumentLayout::new(vec![PageLayout::letter(1).with_block(text_block(&[long.as_str()], 100.0))]);
        let sections = extract_relevant_sections(&layout, "a.pdf", &keywords(&["budget"]));
        assert_eq!(sections[0].section_title.chars().count(), 80);
    }

    #[test]
    fn test_rank_stable_and_limited() {
        let sections = vec![
            section("a.pdf", 1, 1),
            section("a.pdf", 2, 3),
            section("a.pdf", 3, 1),
            section("b.pdf", 1, 3),
            section("b.pdf", 2, 2),
            section("c.pdf", 1, 1),
            section("c.pdf", 2, 2),
        ];

        let ranked = rank_sections(sections);
        assert_eq!(ranked.len(), 5);

        let order: Vec<(&str, u32)> = ranked
            .extracted
            .iter()
            .map(|s| (s.document.as_str(), s.page_number))
            .collect();
        assert_eq!(
            order,
            vec![("a.pdf", 2), ("b.pdf", 1), ("b.pdf", 2), ("c.pdf", 2), ("a.pdf", 1)]
        );

        for (i, s) in ranked.extracted.iter().enumerate() {
            assert_eq!(s.importance_rank, i + 1);
        }
        assert_eq!(ranked.analysis[0].refined_text, "text of a.pdf p2");
        assert_eq!(ranked.analysis[4].page_number, 1);
    }

    #[test]
    fn test_rank_fewer_than_top_k() {
        let ranked = rank_sections(vec![section("a.pdf", 1, 1), section("a.pdf", 2, 2)]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked.extracted[0].page_number, 2);
        assert!(rank_sections(vec![]).is_empty());
    }

    #[test]
    fn test_custom_top_k() {
        let ranker = RelevanceRanker::with_options(RankOptions::new().with_top_k(1));
        let ranked = ranker.rank_sections(vec![section("a.pdf", 1, 1), section("b.pdf", 1, 4)]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked.extracted[0].document, "b.pdf");
    }

    #[test]
    fn test_document_name() {
        assert_eq!(document_name("/app/input/PDFs/report.pdf"), "report.pdf");
        assert_eq!(document_name("report.pdf"), "report.pdf");
    }
}
