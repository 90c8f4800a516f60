//! Document-wide font size statistics.

use crate::model::{DocumentLayout, HeadingLevel};

/// Median and spread of span font sizes across a whole document.
///
/// This is the reference frame for heading classification: a block's level
/// depends on how many standard deviations its mean size sits above the median.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStatistics {
    /// Median font size
    pub median: f64,
    /// Population standard deviation of font sizes
    pub std_dev: f64,
    /// Number of sizes observed
    pub samples: usize,
}

impl FontStatistics {
    /// Collect statistics over every non-blank span of a document.
    ///
    /// Returns `None` when the document has no text at all.
    pub fn collect(layout: &DocumentLayout, fallback_std: f64) -> Option<Self> {
        let sizes: Vec<f64> = layout
            .spans()
            .filter(|s| !s.is_blank())
            .map(|s| f64::from(s.font_size))
            .collect();
        Self::from_sizes(&sizes, fallback_std)
    }

    /// Compute statistics from raw sizes.
    ///
    /// With fewer than two samples the spread is `fallback_std`.
    pub fn from_sizes(sizes: &[f64], fallback_std: f64) -> Option<Self> {
        if sizes.is_empty() {
            return None;
        }

        let mut sorted = sizes.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let std_dev = if sizes.len() < 2 {
            fallback_std
        } else {
            let n = sizes.len() as f64;
            let mean = sizes.iter().sum::<f64>() / n;
            (sizes.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n).sqrt()
        };

        Some(Self {
            median,
            std_dev,
            samples: sizes.len(),
        })
    }

    /// Size above which a page-1 block may be a title.
    pub fn title_threshold(&self) -> f64 {
        self.median + self.std_dev
    }

    /// Map a block's mean font size to a heading level.
    ///
    /// Thresholds are checked from the largest down; blocks within half a
    /// standard deviation of the median are prose.
    pub fn classify(&self, mean_size: f64) -> Option<HeadingLevel> {
        let diff = mean_size - self.median;
        let sigma = self.std_dev;

        if diff > 3.0 * sigma {
            Some(HeadingLevel::H1)
        } else if diff > 2.0 * sigma {
            Some(HeadingLevel::H2)
        } else if diff > sigma {
            Some(HeadingLevel::H3)
        } else if diff > 0.5 * sigma {
            Some(HeadingLevel::H4)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_and_std() {
        let stats = FontStatistics::from_sizes(&[10.0, 12.0, 12.0, 14.0], 2.0).unwrap();
        assert!((stats.median - 12.0).abs() < 1e-9);
        assert!((stats.std_dev - 2.0_f64.sqrt()).abs() < 1e-9);
        assert_eq!(stats.samples, 4);
    }

    #[test]
    fn test_even_median_averages_middle() {
        let stats = FontStatistics::from_sizes(&[10.0, 11.0, 13.0, 20.0], 2.0).unwrap();
        assert!((stats.median - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample_uses_fallback() {
        let stats = FontStatistics::from_sizes(&[11.0], 2.0).unwrap();
        assert!((stats.median - 11.0).abs() < 1e-9);
        assert!((stats.std_dev - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_sizes() {
        assert!(FontStatistics::from_sizes(&[], 2.0).is_none());
        assert!(FontStatistics::collect(&DocumentLayout::default(), 2.0).is_none());
    }

    #[test]
    fn test_classify_thresholds() {
        let stats = FontStatistics {
            median: 12.0,
            std_dev: 2.0,
            samples: 100,
        };
        assert_eq!(stats.classify(18.5), Some(HeadingLevel::H1));
        assert_eq!(stats.classify(18.0), Some(HeadingLevel::H2));
        assert_eq!(stats.classify(16.5), Some(HeadingLevel::H2));
        assert_eq!(stats.classify(14.5), Some(HeadingLevel::H3));
        assert_eq!(stats.classify(13.5), Some(HeadingLevel::H4));
        assert_eq!(stats.classify(13.0), None);
        assert_eq!(stats.classify(12.0), None);
        assert_eq!(stats.classify(9.0), None);
    }

    #[test]
    fn test_classify_monotonic() {
        let stats = FontStatistics {
            median: 11.0,
            std_dev: 1.7,
            samples: 50,
        };
        let mut previous_depth = u8::MAX;
        let mut size = 11.0;
        while size < 30.0 {
            if let Some(level) = stats.classify(size) {
                assert!(level.depth() <= previous_depth, "size {}", size);
                previous_depth = level.depth();
            }
            size += 0.1;
        }
        assert_eq!(previous_depth, 1);
    }
}
