//! Thresholds for title and heading detection.

/// Options controlling outline inference.
///
/// Ratios are fractions of the page width or height.
#[derive(Debug, Clone)]
pub struct StructureOptions {
    /// Top fraction of page 1 searched for the title
    pub title_zone_ratio: f32,

    /// Top and bottom fraction of every page treated as header/footer
    pub margin_ratio: f32,

    /// Maximum offset of a line center from the page center, relative to page width
    pub center_tolerance_ratio: f32,

    /// Titles must be longer than this (characters)
    pub min_title_chars: usize,

    /// Headings must be at least this long (characters)
    pub min_heading_chars: usize,

    /// Headings may have at most this many words
    pub max_heading_words: usize,

    /// Headings may span at most this many lines
    pub max_heading_lines: usize,

    /// Standard deviation used when a document has fewer than two sizes
    pub fallback_std: f64,

    /// Block texts never reported as headings (compared case-insensitively)
    pub noise_strings: Vec<String>,
}

impl StructureOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title zone ratio.
    pub fn with_title_zone(mut self, ratio: f32) -> Self {
        self.title_zone_ratio = ratio;
        self
    }

    /// Set the header/footer margin ratio.
    pub fn with_margin(mut self, ratio: f32) -> Self {
        self.margin_ratio = ratio;
        self
    }

    /// Set the centering tolerance ratio.
    pub fn with_center_tolerance(mut self, ratio: f32) -> Self {
        self.center_tolerance_ratio = ratio;
        self
    }

    /// Set the maximum number of words in a heading.
    pub fn with_max_heading_words(mut self, words: usize) -> Self {
        self.max_heading_words = words;
        self
    }

    /// Add a noise string.
    pub fn with_noise_string(mut self, text: impl Into<String>) -> Self {
        self.noise_strings.push(text.into().to_lowercase());
        self
    }

    pub(crate) fn is_noise(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.noise_strings.iter().any(|n| *n == lower)
    }
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            title_zone_ratio: 0.25,
            margin_ratio: 0.1,
            center_tolerance_ratio: 0.2,
            min_title_chars: 5,
            min_heading_chars: 3,
            max_heading_words: 15,
            max_heading_lines: 3,
            fallback_std: 2.0,
            noise_strings: ["confidential", "draft", "internal use"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
