//! PDF document parser using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::{sniff_version, version_from_header};
use crate::error::{Error, Result};
use crate::model::{DocumentLayout, PageLayout};

use super::content::ContentInterpreter;
use super::grouping::{group_lines_into_blocks, group_spans_into_lines};
use super::options::{ErrorMode, ParseOptions};

/// Letter size, used when a page has no usable MediaBox.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// PDF document parser producing positioned layout.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    ///
    /// The file is read completely before this returns; no handle outlives the call.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        sniff_version(path)?;

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        version_from_header(data)?;

        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc, options)
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument, options: ParseOptions) -> Result<Self> {
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may not decode");
        }
        Ok(Self { doc, options })
    }

    /// Build the positioned layout of every page.
    pub fn layout(&self) -> Result<DocumentLayout> {
        let mut pages = Vec::new();

        for page_num in self.doc.get_pages().into_keys() {
            match self.page_layout(page_num) {
                Ok(page) => pages.push(page),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to read layout of page {}: {}", page_num, e);
                    let (width, height) = self.page_dimensions(page_num)?;
                    pages.push(PageLayout::new(page_num, width, height));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(DocumentLayout::new(pages))
    }

    /// Build the positioned layout of a single page.
    pub fn page_layout(&self, page_num: u32) -> Result<PageLayout> {
        let page_id = self.page_id(page_num)?;
        let (width, height) = self.page_dimensions(page_num)?;

        let fonts = self.doc.get_page_fonts(page_id)?;
        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))?;

        let interpreter =
            ContentInterpreter::new(&self.doc, fonts, height, self.options.normalize_unicode);
        let spans = interpreter.spans(&content)?;
        log::debug!("Page {}: {} spans", page_num, spans.len());

        let lines = group_spans_into_lines(spans, self.options.line_tolerance);
        let blocks = group_lines_into_blocks(lines, self.options.block_gap_ratio);

        let mut page = PageLayout::new(page_num, width, height);
        page.blocks = blocks;
        Ok(page)
    }

    fn page_id(&self, page_num: u32) -> Result<ObjectId> {
        let pages = self.doc.get_pages();
        pages
            .get(&page_num)
            .copied()
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))
    }

    /// Page width and height, from the nearest MediaBox up the page tree.
    fn page_dimensions(&self, page_num: u32) -> Result<(f32, f32)> {
        let mut node = Some(self.page_id(page_num)?);

        while let Some(id) = node {
            let Ok(dict) = self.doc.get_dictionary(id) else {
                break;
            };

            if let Ok(array) = dict.get(b"MediaBox").and_then(Object::as_array) {
                let coords: Vec<f32> = array.iter().filter_map(|o| o.as_float().ok()).collect();
                if coords.len() >= 4 {
                    return Ok(((coords[2] - coords[0]).abs(), (coords[3] - coords[1]).abs()));
                }
            }

            node = dict.get(b"Parent").and_then(Object::as_reference).ok();
        }

        Ok(DEFAULT_PAGE_SIZE)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }
}
