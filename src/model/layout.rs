//! Positioned text layout: spans, lines, blocks and pages.
//!
//! Coordinates use a top-down page space: `y0` is the top edge of a box and
//! grows towards the bottom of the page, as in most layout extractors.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Smallest box containing every box in the iterator.
    pub fn enclosing<'a>(boxes: impl IntoIterator<Item = &'a BBox>) -> Option<BBox> {
        boxes.into_iter().fold(None, |acc, b| match acc {
            None => Some(*b),
            Some(a) => Some(a.union(b)),
        })
    }
}

/// Style flag bitfield carried by a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleFlags(pub u32);

impl StyleFlags {
    /// Superscript glyphs
    pub const SUPERSCRIPT: u32 = 1 << 0;
    /// Italic or oblique face
    pub const ITALIC: u32 = 1 << 1;
    /// Serif face
    pub const SERIF: u32 = 1 << 2;
    /// Fixed-pitch face
    pub const MONOSPACE: u32 = 1 << 3;
    /// Bold face
    pub const BOLD: u32 = 1 << 4;

    /// Check whether a flag bit is set.
    pub fn contains(&self, bit: u32) -> bool {
        self.0 & bit != 0
    }

    /// Set a flag bit.
    pub fn with(self, bit: u32) -> Self {
        Self(self.0 | bit)
    }

    /// Check the bold bit.
    pub fn is_bold(&self) -> bool {
        self.contains(Self::BOLD)
    }
}

/// Smallest run of text sharing one font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Bounding box on the page
    pub bbox: BBox,
    /// Font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Style flags
    pub flags: StyleFlags,
}

impl Span {
    /// Create a new span without style flags.
    pub fn new(
        text: impl Into<String>,
        bbox: BBox,
        font_size: f32,
        font_name: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            bbox,
            font_size,
            font_name: font_name.into(),
            flags: StyleFlags::default(),
        }
    }

    /// Set style flags.
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Bold by flag bit or by font name.
    pub fn is_bold(&self) -> bool {
        self.flags.is_bold() || self.font_name.to_lowercase().contains("bold")
    }

    /// Whether the span carries any visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Spans sharing a visual baseline, in left-to-right order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    /// The spans in this line
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Horizontal center of the line: midpoint of the leftmost and rightmost edges.
    pub fn center_x(&self) -> Option<f32> {
        let x0 = self.spans.iter().map(|s| s.bbox.x0).reduce(f32::min)?;
        let x1 = self.spans.iter().map(|s| s.bbox.x1).reduce(f32::max)?;
        Some((x0 + x1) / 2.0)
    }

    /// Bounding box of all spans.
    pub fn bbox(&self) -> Option<BBox> {
        BBox::enclosing(self.spans.iter().map(|s| &s.bbox))
    }

    /// Combined text of the spans.
    ///
    /// A space is inserted between spans separated by a visible gap, except
    /// between characters of scripts that do not use word spaces.
    pub fn text(&self) -> String {
        let mut result = String::new();

        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 {
                let prev = &self.spans[i - 1];
                let gap = span.bbox.x0 - prev.bbox.x1;
                let char_count = span.text.chars().count();
                let avg_char_width = if char_count > 0 && span.bbox.width() > 0.0 {
                    span.bbox.width() / char_count as f32
                } else {
                    span.font_size * 0.5
                };

                let spaceless = matches!(
                    (prev.text.chars().last(), span.text.chars().next()),
                    (Some(a), Some(b)) if is_spaceless_script_char(a) && is_spaceless_script_char(b)
                );
                let has_space = prev.text.ends_with([' ', '\u{00A0}'])
                    || span.text.starts_with([' ', '\u{00A0}']);

                if gap > avg_char_width * 0.2 && !spaceless && !has_space {
                    result.push(' ');
                }
            }
            result.push_str(&span.text);
        }

        result
    }
}

/// Layout-level group of lines: a paragraph, heading or caption.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Bounding box of the block
    pub bbox: BBox,
    /// Lines in reading order
    pub lines: Vec<Line>,
}

impl Block {
    /// Create a block whose bounding box encloses its lines.
    pub fn new(lines: Vec<Line>) -> Self {
        let bbox = lines
            .iter()
            .filter_map(Line::bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();
        Self { bbox, lines }
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterate over every span of every line.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines.iter().flat_map(|l| l.spans.iter())
    }

    /// Raw text with lines separated by newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Coarse block view: position and raw text, no font detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Bounding box of the block
    pub bbox: BBox,
    /// Raw text, lines joined by `\n`
    pub text: String,
}

/// A single page of positioned blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Blocks in reading order
    pub blocks: Vec<Block>,
}

impl PageLayout {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create an empty US Letter page (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Add a block.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Coarse text blocks of the page.
    pub fn text_blocks(&self) -> Vec<TextBlock> {
        self.blocks
            .iter()
            .map(|b| TextBlock {
                bbox: b.bbox,
                text: b.text(),
            })
            .collect()
    }
}

/// Positioned layout of a whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Pages in document order
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    /// Create a layout from pages.
    pub fn new(pages: Vec<PageLayout>) -> Self {
        Self { pages }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Iterate over every span in the document.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.pages
            .iter()
            .flat_map(|p| p.blocks.iter())
            .flat_map(|b| b.spans())
    }
}

/// Check if a character belongs to a script written without word spaces.
///
/// Chinese and Japanese don't use spaces between words, but Korean does.
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF      // CJK Unified Ideographs
        | 0x3400..=0x4DBF    // Extension A
        | 0x20000..=0x2EBEF  // Extensions B-F
        | 0x3040..=0x309F    // Hiragana
        | 0x30A0..=0x30FF    // Katakana
        | 0x3000..=0x303F    // CJK Symbols and Punctuation
    )
}
