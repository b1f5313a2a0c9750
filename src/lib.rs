//! # Linebreaker
//!
//! Greedy paragraph line breaking over pre-measured text.
//!
//! A paragraph arrives as text plus a sequence of style runs. Each run is
//! measured into per-character advances, word boundaries become break
//! candidates, and a line is committed at the best candidate as soon as the
//! text since the last break stops fitting. Words wider than the line are
//! broken by force between characters, so every paragraph can be broken.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    — Paragraph text, line width, styled runs
//!       ↓
//!   [font]     — Per-character advances for each run
//!       ↓
//!   [text]     — Word boundaries, candidates, greedy breaking
//!       ↓
//!   Breaks + line widths
//! ```

pub mod error;
pub mod font;
pub mod model;
pub mod text;

pub use error::{BreakError, Result};
pub use text::{LineBreaker, TabStops};

use font::{FixedAdvance, FontMeasurer, RunStyle};
use log::debug;
use model::{BrokenLine, BrokenParagraph, ParagraphInput, RunKind};

/// Break a paragraph described by `input`.
///
/// This is the primary entry point. Runs are fed in order; an input with no
/// runs is measured as a single run where every char is one point wide.
pub fn break_paragraph(input: &ParagraphInput) -> Result<BrokenParagraph> {
    let chars: Vec<char> = input.text.chars().collect();

    let font = match &input.font {
        Some(src) => Some(FontMeasurer::from_font_data(font::load_font_source(src)?)?),
        None => None,
    };

    let mut breaker = LineBreaker::new();
    breaker.set_line_width(input.line_width)?;
    breaker.set_tab_stops(&input.tab_stops, input.tab_width)?;
    breaker.set_text(&chars, 0, chars.len())?;

    if input.runs.is_empty() {
        breaker.add_style_run(&FixedAdvance, &1.0, 0, chars.len())?;
    }
    for run in &input.runs {
        match &run.style {
            Some(RunKind::Fixed { advance }) => {
                breaker.add_style_run(&FixedAdvance, advance, run.start, run.end)?;
            }
            Some(RunKind::Font {
                font_size,
                letter_spacing,
            }) => {
                let measurer = font.as_ref().ok_or_else(|| {
                    BreakError::Font("Font run given but the paragraph has no font".to_string())
                })?;
                let style = RunStyle {
                    font_size: *font_size,
                    letter_spacing: *letter_spacing,
                };
                breaker.add_style_run(measurer, &style, run.start, run.end)?;
            }
            Some(RunKind::Replacement { width }) => {
                breaker.add_replacement(run.start, run.end, *width)?;
            }
            None => breaker.add_unmeasured_run(run.start, run.end)?,
        }
    }

    let count = breaker.compute_breaks()?;
    debug!("{} chars broken into {} lines", chars.len(), count);

    let lines = breaker
        .lines()
        .map(|line| BrokenLine {
            start: line.start,
            end: line.end,
            width: line.width,
            text: chars[line.start..line.end].iter().collect(),
        })
        .collect();
    let result = BrokenParagraph {
        breaks: breaker.breaks().to_vec(),
        widths: breaker.widths().to_vec(),
        lines,
    };
    breaker.finish();
    Ok(result)
}

/// Break a paragraph described as JSON.
pub fn break_json(json: &str) -> Result<BrokenParagraph> {
    let input: ParagraphInput = serde_json::from_str(json)?;
    break_paragraph(&input)
}
