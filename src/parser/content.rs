//! Content stream interpretation: text-showing operators to positioned spans.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Dictionary, Document as LopdfDocument, Object};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{is_spaceless_script_char, BBox, Span, StyleFlags};

/// TJ adjustment (thousandths of text space) treated as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Resolved font name and style of a page font resource.
#[derive(Debug, Clone)]
struct FontInfo {
    name: String,
    flags: StyleFlags,
}

/// Turns one page's content stream into spans.
pub(crate) struct ContentInterpreter<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
    info: HashMap<Vec<u8>, FontInfo>,
    page_height: f32,
    normalize_unicode: bool,
}

impl<'a> ContentInterpreter<'a> {
    pub(crate) fn new(
        doc: &'a LopdfDocument,
        fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
        page_height: f32,
        normalize_unicode: bool,
    ) -> Self {
        let info = fonts
            .iter()
            .map(|(key, font)| (key.clone(), font_info(doc, font)))
            .collect();

        Self {
            doc,
            fonts,
            info,
            page_height,
            normalize_unicode,
        }
    }

    /// Decode a content stream and collect every non-blank text span.
    ///
    /// Consecutive shows in the same font with no pen move in between are
    /// one font run and become a single span.
    pub(crate) fn spans(&self, content: &[u8]) -> Result<Vec<Span>> {
        let content = lopdf::content::Content::decode(content)
            .map_err(|e| Error::Corrupted(format!("content stream: {}", e)))?;

        let mut state = TextState::default();
        let mut saved: Vec<TextState> = Vec::new();
        let mut spans = Vec::new();

        for op in &content.operations {
            match op.operator.as_str() {
                "q" => saved.push(state.clone()),
                "Q" => {
                    // The text matrix is not part of the graphics state.
                    if let Some(previous) = saved.pop() {
                        let matrix = state.matrix.clone();
                        state = previous;
                        state.matrix = matrix;
                    }
                    state.end_run();
                }
                "cm" => {
                    let m: Vec<f32> = op.operands.iter().filter_map(get_number).collect();
                    if let Some(m) = Matrix::from_operands(&m) {
                        state.ctm = m.then(&state.ctm);
                    }
                    state.end_run();
                }
                "BT" => {
                    state.matrix = TextMatrix::default();
                    state.end_run();
                }
                "ET" => state.end_run(),
                "Tf" => {
                    if let (Some(Object::Name(name)), Some(size)) =
                        (op.operands.first(), op.operands.get(1).and_then(get_number))
                    {
                        state.font_key = name.clone();
                        state.font_size = size;
                    }
                    state.end_run();
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let (Some(tx), Some(ty)) = (
                        op.operands.first().and_then(get_number),
                        op.operands.get(1).and_then(get_number),
                    ) {
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.matrix.translate(tx, ty);
                    }
                    state.end_run();
                }
                "Tm" => {
                    let m: Vec<f32> = op.operands.iter().filter_map(get_number).collect();
                    if let Some(m) = Matrix::from_operands(&m) {
                        state.matrix.set(m);
                    }
                    state.end_run();
                }
                "T*" => {
                    state.matrix.next_line(state.leading);
                    state.end_run();
                }
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        let text = self.decode(&state.font_key, bytes);
                        self.push_span(&mut spans, &mut state, text);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        let text = self.decode_array(&state.font_key, items);
                        self.push_span(&mut spans, &mut state, text);
                    }
                }
                "'" | "\"" => {
                    state.matrix.next_line(state.leading);
                    state.end_run();
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let text = self.decode(&state.font_key, bytes);
                        self.push_span(&mut spans, &mut state, text);
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    fn push_span(&self, spans: &mut Vec<Span>, state: &mut TextState, text: String) {
        let chars = text.chars().count() as f32;
        // Advance in unscaled text space, before Tm and CTM apply.
        let advance = chars * state.font_size * 0.5;

        if text.trim().is_empty() {
            state.matrix.advance(advance);
            if state.run_open {
                state.pending_space = true;
            }
            return;
        }

        let rendering = state.matrix.current().then(&state.ctm);
        let (x, y) = rendering.apply(0.0, 0.0);
        let size = state.font_size * rendering.vertical_scale();
        let width = chars * size * 0.5;
        state.matrix.advance(advance);

        if state.run_open {
            if let Some(last) = spans.last_mut() {
                if state.pending_space {
                    last.text.push(' ');
                }
                last.text.push_str(&text);
                last.bbox.x1 = last.bbox.x1.max(x + width);
                state.pending_space = false;
                return;
            }
        }

        // PDF space is bottom-up; flip into top-down page coordinates.
        let bbox = BBox::new(
            x,
            self.page_height - (y + size * 0.8),
            x + width,
            self.page_height - (y - size * 0.2),
        );

        let (font_name, flags) = match self.info.get(&state.font_key) {
            Some(info) => (info.name.clone(), info.flags),
            None => (
                String::from_utf8_lossy(&state.font_key).into_owned(),
                StyleFlags::default(),
            ),
        };

        spans.push(Span::new(text, bbox, size, font_name).with_flags(flags));
        state.run_open = true;
        state.pending_space = false;
    }

    fn decode(&self, font_key: &[u8], bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(font_key)
            .and_then(|f| f.get_font_encoding(self.doc).ok());

        let text = match encoding {
            Some(ref enc) => LopdfDocument::decode_text(enc, bytes).unwrap_or_default(),
            None => decode_text_simple(bytes),
        };

        if self.normalize_unicode {
            text.nfkc().collect()
        } else {
            text
        }
    }

    /// TJ arrays mix strings with kerning adjustments; large negative
    /// adjustments mark word breaks.
    fn decode_array(&self, font_key: &[u8], items: &[Object]) -> String {
        let mut combined = String::new();

        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(font_key, bytes)),
                other => {
                    let Some(adjustment) = get_number(other).map(|n| -n) else {
                        continue;
                    };
                    let breaks_word = combined
                        .chars()
                        .last()
                        .is_some_and(|c| c != ' ' && c != '\u{00A0}' && !is_spaceless_script_char(c));
                    if adjustment > TJ_SPACE_THRESHOLD && breaks_word {
                        combined.push(' ');
                    }
                }
            }
        }

        combined
    }
}

/// Graphics and text state tracked while walking the stream.
#[derive(Debug, Clone)]
struct TextState {
    matrix: TextMatrix,
    /// Current transformation matrix
    ctm: Matrix,
    font_key: Vec<u8>,
    font_size: f32,
    leading: f32,
    /// The last span may still be extended by the next show.
    run_open: bool,
    /// A blank show was seen since the last span was extended.
    pending_space: bool,
}

impl TextState {
    fn end_run(&mut self) {
        self.run_open = false;
        self.pending_space = false;
    }
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            ctm: Matrix::IDENTITY,
            font_key: Vec::new(),
            font_size: 12.0,
            leading: 12.0,
            run_open: false,
            pending_space: false,
        }
    }
}

/// Affine matrix `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_operands(m: &[f32]) -> Option<Self> {
        match *m {
            [a, b, c, d, e, f, ..] => Some(Self { a, b, c, d, e, f }),
            _ => None,
        }
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// `self × other`: apply `self`, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Length of the transformed text-space vertical unit.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text matrix and text line matrix.
#[derive(Debug, Clone)]
struct TextMatrix {
    current: Matrix,
    // Start of the current line; Td and T* are relative to it.
    line: Matrix,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            current: Matrix::IDENTITY,
            line: Matrix::IDENTITY,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: Matrix) {
        self.current = m;
        self.line = m;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.line = Matrix::translation(tx, ty).then(&self.line);
        self.current = self.line;
    }

    fn next_line(&mut self, leading: f32) {
        self.translate(0.0, -leading);
    }

    /// Move the pen past shown text (text-space width).
    fn advance(&mut self, width: f32) {
        self.current = Matrix::translation(width, 0.0).then(&self.current);
    }

    fn current(&self) -> Matrix {
        self.current
    }
}

/// Resolve a font's base name and style flags from its dictionary and descriptor.
fn font_info(doc: &LopdfDocument, font: &Dictionary) -> FontInfo {
    let name = font
        .get(b"BaseFont")
        .ok()
        .and_then(|o| o.as_name().ok())
        .map(|n| String::from_utf8_lossy(n).into_owned())
        .unwrap_or_else(|| "Unknown".to_string());

    let mut flags = StyleFlags::default();

    let descriptor = match font.get(b"FontDescriptor") {
        Ok(Object::Reference(r)) => doc.get_dictionary(*r).ok(),
        Ok(Object::Dictionary(d)) => Some(d),
        _ => None,
    };

    if let Some(desc) = descriptor {
        let pdf_flags = desc
            .get(b"Flags")
            .ok()
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);
        if pdf_flags & (1 << 0) != 0 {
            flags = flags.with(StyleFlags::MONOSPACE);
        }
        if pdf_flags & (1 << 1) != 0 {
            flags = flags.with(StyleFlags::SERIF);
        }
        if pdf_flags & (1 << 6) != 0 {
            flags = flags.with(StyleFlags::ITALIC);
        }
        // ForceBold
        if pdf_flags & (1 << 18) != 0 {
            flags = flags.with(StyleFlags::BOLD);
        }

        let weight = desc.get(b"FontWeight").ok().and_then(get_number);
        if weight.is_some_and(|w| w >= 700.0) {
            flags = flags.with(StyleFlags::BOLD);
        }
    }

    let lower = name.to_lowercase();
    if ["bold", "black", "heavy"].iter().any(|w| lower.contains(w)) {
        flags = flags.with(StyleFlags::BOLD);
    }
    if lower.contains("italic") || lower.contains("oblique") {
        flags = flags.with(StyleFlags::ITALIC);
    }

    FontInfo { name, flags }
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Fallback text decoding when a font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = body
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
