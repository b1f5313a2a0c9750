//! # Paragraph Model
//!
//! The JSON contract of the breaker: a paragraph of text, the line width to
//! fit it into, and the styled runs that tile it. The result pairs each
//! committed break with its line width and the line's text.

use serde::{Deserialize, Serialize};

/// A paragraph ready for line breaking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphInput {
    pub text: String,

    /// Maximum line width in points. Must be positive.
    pub line_width: f64,

    /// Explicit tab stop positions, consulted before the uniform width.
    #[serde(default)]
    pub tab_stops: Vec<f64>,

    #[serde(default = "default_tab_width")]
    pub tab_width: f64,

    /// Font for `Font` runs: a data URI, a file path, or raw base64.
    #[serde(default)]
    pub font: Option<String>,

    /// Runs covering the text left to right, char offsets. When empty the
    /// whole text is one `Fixed` run with an advance of 1.
    #[serde(default)]
    pub runs: Vec<RunInput>,
}

fn default_tab_width() -> f64 {
    crate::text::DEFAULT_TAB_WIDTH
}

/// One styled sub-range `[start, end)` of the paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInput {
    pub start: usize,
    pub end: usize,
    /// `None` feeds the run unmeasured: every char counts as zero width.
    #[serde(default)]
    pub style: Option<RunKind>,
}

/// How a run is measured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunKind {
    /// Every char advances by the same amount.
    Fixed { advance: f64 },
    /// Shaped with the paragraph's font.
    #[serde(rename_all = "camelCase")]
    Font {
        font_size: f64,
        #[serde(default)]
        letter_spacing: f64,
    },
    /// An opaque object of the given width, never broken inside.
    Replacement { width: f64 },
}

/// The committed breaks for a paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokenParagraph {
    pub breaks: Vec<usize>,
    pub widths: Vec<f64>,
    pub lines: Vec<BrokenLine>,
}

/// One line of output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokenLine {
    pub start: usize,
    pub end: usize,
    pub width: f64,
    pub text: String,
}
