//! # Text Measurement
//!
//! The breaker never looks at fonts. It asks a [`TextMeasurer`] to fill in one
//! advance per character for each styled run and works from those numbers.
//!
//! Two measurers ship with the crate: [`FixedAdvance`] for monospace-like
//! grids and tests, and [`FontMeasurer`] for real TrueType/OpenType faces.

use crate::error::{BreakError, Result};
use crate::text::shaping;
use std::collections::HashMap;

/// Fills per-character advance widths for a run of text.
pub trait TextMeasurer {
    /// Opaque per-run style understood by this measurer.
    type Style;

    /// Measure `text[start..start + count]` in `style`.
    ///
    /// Writes exactly `count` advances into `widths[write_at..]` and returns
    /// the run's total width. The total is informational: kerning or
    /// ligatures may make it differ from the sum of the written advances.
    fn measure(
        &self,
        text: &[char],
        start: usize,
        count: usize,
        style: &Self::Style,
        widths: &mut [f64],
        write_at: usize,
    ) -> f64;
}

/// Every character advances by the style's width, except tabs and invisible
/// format characters, which measure zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAdvance;

impl FixedAdvance {
    fn is_zero_width(ch: char) -> bool {
        matches!(
            ch,
            '\t' | '\u{00AD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'
        )
    }
}

impl TextMeasurer for FixedAdvance {
    /// Advance of one character, in points.
    type Style = f64;

    fn measure(
        &self,
        text: &[char],
        start: usize,
        count: usize,
        style: &f64,
        widths: &mut [f64],
        write_at: usize,
    ) -> f64 {
        let mut total = 0.0;
        for (slot, &ch) in widths[write_at..write_at + count]
            .iter_mut()
            .zip(&text[start..start + count])
        {
            *slot = if Self::is_zero_width(ch) { 0.0 } else { *style };
            total += *slot;
        }
        total
    }
}

/// Size and tracking for a run measured with a [`FontMeasurer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStyle {
    pub font_size: f64,
    /// Extra space added after every glyph, in points.
    pub letter_spacing: f64,
}

impl RunStyle {
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            letter_spacing: 0.0,
        }
    }
}

/// Per-character advances parsed from a font via ttf-parser.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
}

impl FontMetrics {
    /// Get the advance width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }

    /// Parse metrics from font data using ttf-parser.
    pub fn from_font_data(data: &[u8]) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, 0).ok()?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        // Walk the BMP to build the width map
        for code in 32u32..=0xFFFF {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Some(FontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
        })
    }
}

/// Resolve a font source string to raw font bytes.
///
/// Supported `src` formats:
/// - `data:font/...;base64,...` (any `data:` URI with base64 payload)
/// - File path starting with `/`, `./` or `../`
/// - Raw base64-encoded font data
pub fn load_font_source(src: &str) -> Result<Vec<u8>> {
    if src.starts_with("data:") {
        let comma_pos = src
            .find(',')
            .ok_or_else(|| BreakError::Font("Invalid data URI: missing comma".to_string()))?;
        return base64_decode(&src[comma_pos + 1..]);
    }

    // Only explicit path prefixes, since base64 may contain '/'
    if src.starts_with('/') || src.starts_with("./") || src.starts_with("../") {
        return Ok(std::fs::read(src)?);
    }

    base64_decode(src)
}

fn base64_decode(input: &str) -> Result<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(input)
        .map_err(|e| BreakError::Font(format!("Base64 decode error: {}", e)))
}

/// Measures runs by shaping them with a real font.
pub struct FontMeasurer {
    data: Vec<u8>,
    metrics: FontMetrics,
}

impl FontMeasurer {
    pub fn from_font_data(data: Vec<u8>) -> Result<Self> {
        let metrics = FontMetrics::from_font_data(&data)
            .ok_or_else(|| BreakError::Font("unable to parse font data".to_string()))?;
        Ok(Self { data, metrics })
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }
}

impl TextMeasurer for FontMeasurer {
    type Style = RunStyle;

    fn measure(
        &self,
        text: &[char],
        start: usize,
        count: usize,
        style: &RunStyle,
        widths: &mut [f64],
        write_at: usize,
    ) -> f64 {
        let chars = &text[start..start + count];
        let out = &mut widths[write_at..write_at + count];
        let run: String = chars.iter().collect();

        let shaped = shaping::shape_text(&run, &self.data)
            .filter(|glyphs| !glyphs.is_empty())
            .map(|glyphs| {
                shaping::char_widths(
                    &run,
                    &glyphs,
                    self.metrics.units_per_em,
                    style.font_size,
                    style.letter_spacing,
                )
            });

        match shaped {
            Some(advances) => out.copy_from_slice(&advances),
            None => {
                for (slot, &ch) in out.iter_mut().zip(chars) {
                    *slot = self.metrics.char_width(ch, style.font_size) + style.letter_spacing;
                }
            }
        }
        out.iter().sum()
    }
}
