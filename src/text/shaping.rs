//! # OpenType Shaping
//!
//! Wraps rustybuzz to shape a run of text and spread the resulting glyph
//! advances back over the characters they came from. Ligatures put their whole
//! advance on the first character of the cluster; the rest measure zero.

/// A single glyph produced by OpenType shaping.
#[derive(Debug, Clone)]
pub struct ShapedGlyph {
    pub glyph_id: u16,
    /// Byte offset in the shaped text of the first character this glyph
    /// belongs to. Several glyphs may share a cluster, and one glyph may cover
    /// several characters.
    pub cluster: u32,
    /// Horizontal advance in font units.
    pub x_advance: i32,
}

/// Shape text using the given font data.
///
/// Returns `None` if the font data can't be parsed.
pub fn shape_text(text: &str, font_data: &[u8]) -> Option<Vec<ShapedGlyph>> {
    let face = rustybuzz::Face::from_slice(font_data, 0)?;
    let mut buffer = rustybuzz::UnicodeBuffer::new();
    buffer.push_str(text);

    let output = rustybuzz::shape(&face, &[], buffer);

    let glyphs = output
        .glyph_infos()
        .iter()
        .zip(output.glyph_positions().iter())
        .map(|(info, pos)| ShapedGlyph {
            glyph_id: info.glyph_id as u16,
            cluster: info.cluster,
            x_advance: pos.x_advance,
        })
        .collect();

    Some(glyphs)
}

/// Per-character widths in points from shaped glyphs.
///
/// Index `i` of the result is the width of the `i`th char of `text`. Chars
/// that do not start a cluster (the tail of a ligature) get zero.
pub fn char_widths(
    text: &str,
    glyphs: &[ShapedGlyph],
    units_per_em: u16,
    font_size: f64,
    letter_spacing: f64,
) -> Vec<f64> {
    let scale = font_size / units_per_em as f64;

    let mut byte_to_char = vec![usize::MAX; text.len() + 1];
    let mut num_chars = 0;
    for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
        byte_to_char[byte_idx] = char_idx;
        num_chars = char_idx + 1;
    }

    let mut widths = vec![0.0_f64; num_chars];
    for glyph in glyphs {
        let char_idx = byte_to_char
            .get(glyph.cluster as usize)
            .copied()
            .unwrap_or(usize::MAX);
        if char_idx < num_chars {
            widths[char_idx] += glyph.x_advance as f64 * scale + letter_spacing;
        }
    }
    widths
}
