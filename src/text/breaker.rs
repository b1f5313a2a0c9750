//! # Greedy Line Breaker
//!
//! Consumes a paragraph one style run at a time and commits line breaks as
//! soon as the text since the last break no longer fits.
//!
//! Every word boundary becomes a [`Candidate`]. The breaker keeps admitting
//! candidates and remembering the best (lowest penalty, later wins ties) one
//! seen since the last break. When a candidate overflows the line, the break
//! is committed at that best candidate rather than at the one that caused the
//! overflow.
//!
//! A word wider than the whole line gets a forced candidate before each of
//! its visible characters, penalized with [`SCORE_DESPERATE`] so they only win
//! when nothing else fits.
//!
//! ```text
//! set_text ─→ add_style_run × N ─→ compute_breaks ─→ breaks / widths ─→ finish
//! ```

use super::candidate::{Candidate, SCORE_DESPERATE};
use super::tab_stops::TabStops;
use super::words::{LineBreakWords, WordBoundaries};
use super::{is_line_end_space, is_word_space};
use crate::error::{BreakError, Result};
use crate::font::TextMeasurer;
use log::{debug, trace, warn};

/// Settings that outlive a single paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakerConfig {
    /// Maximum line width. `f64::INFINITY` never wraps.
    pub line_width: f64,
    pub tab_stops: TabStops,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            line_width: f64::INFINITY,
            tab_stops: TabStops::default(),
        }
    }
}

/// One committed line: chars `[start, end)` of the paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
    /// Width excluding trailing whitespace.
    pub width: f64,
}

/// Committed breaks. `breaks` and `widths` are always the same length.
#[derive(Debug, Default)]
struct Output {
    breaks: Vec<usize>,
    widths: Vec<f64>,
}

impl Output {
    fn push(&mut self, offset: usize, width: f64) {
        self.breaks.push(offset);
        self.widths.push(width);
    }

    fn clear(&mut self) {
        self.breaks.clear();
        self.widths.clear();
    }
}

/// What candidate admission needs besides the paragraph itself.
struct BreakContext<'a> {
    line_width: f64,
    char_widths: &'a [f64],
    out: &'a mut Output,
}

/// Running state of the paragraph between `set_text` and `finish`.
///
/// All widths are measured from the start of the paragraph.
#[derive(Debug)]
struct Paragraph {
    text: Vec<char>,
    /// Always starts with the zero-width sentinel.
    candidates: Vec<Candidate>,
    /// Width up to the scan position, trailing whitespace included.
    width: f64,
    /// Width up to the last char that is not a line-end space.
    post_break: f64,
    space_count: usize,
    post_space_count: usize,
    /// Where the current line starts, i.e. `pre_break` of the last commit.
    pre_break: f64,
    last_break: usize,
    best_break: Option<usize>,
    first_tab_index: Option<usize>,
    next_run_start: usize,
}

impl Paragraph {
    fn new(text: &[char]) -> Self {
        Self {
            text: text.to_vec(),
            candidates: vec![Candidate::sentinel()],
            width: 0.0,
            post_break: 0.0,
            space_count: 0,
            post_space_count: 0,
            pre_break: 0.0,
            last_break: 0,
            best_break: None,
            first_tab_index: None,
            next_run_start: 0,
        }
    }

    fn last_candidate(&self) -> Candidate {
        self.candidates[self.candidates.len() - 1]
    }

    /// Admit a word-boundary candidate, preceded by forced candidates inside
    /// the word if the word alone is wider than the line.
    fn add_word_break(&mut self, ctx: &mut BreakContext<'_>, word: Candidate) {
        let last = self.last_candidate();
        if word.post_break - last.pre_break > ctx.line_width {
            debug!(
                "word [{}, {}) is {:.2} wide, forcing breaks",
                last.offset,
                word.offset,
                word.post_break - last.pre_break
            );
            let mut width = last.pre_break + ctx.char_widths[last.offset];
            for offset in (last.offset + 1)..word.offset {
                let w = ctx.char_widths[offset];
                if w > 0.0 {
                    self.add_candidate(
                        ctx,
                        Candidate {
                            offset,
                            pre_break: width,
                            post_break: width,
                            penalty: SCORE_DESPERATE,
                            pre_space_count: word.post_space_count,
                            post_space_count: word.post_space_count,
                        },
                    );
                    width += w;
                }
            }
        }
        self.add_candidate(ctx, word);
    }

    fn add_candidate(&mut self, ctx: &mut BreakContext<'_>, cand: Candidate) {
        let index = self.candidates.len();
        self.candidates.push(cand);
        trace!(
            "candidate #{} at {} pre={:.2} post={:.2} penalty={}",
            index,
            cand.offset,
            cand.pre_break,
            cand.post_break,
            cand.penalty
        );

        if cand.post_break - self.pre_break > ctx.line_width {
            self.push_greedy_break(ctx);
        }

        let is_best = match self.best_break {
            Some(best) => cand.penalty <= self.candidates[best].penalty,
            None => true,
        };
        if is_best {
            self.best_break = Some(index);
        }
    }

    fn push_greedy_break(&mut self, ctx: &mut BreakContext<'_>) {
        // Nothing admitted since the last commit: the overflowing candidate
        // becomes the best and is committed on the next overflow.
        let Some(index) = self.best_break.take() else {
            return;
        };
        let best = self.candidates[index];
        let width = best.post_break - self.pre_break;
        if width > ctx.line_width {
            warn!(
                "line ending at {} is {:.2} wide, exceeds {:.2}",
                best.offset, width, ctx.line_width
            );
        }
        trace!("break at {} width={:.2}", best.offset, width);
        ctx.out.push(best.offset, width);
        self.last_break = index;
        self.pre_break = best.pre_break;
    }

    /// Commit the trailing partial line, if any.
    fn flush(&mut self, out: &mut Output) {
        let n = self.candidates.len();
        if n > 1 && self.last_break != n - 1 {
            let last = self.candidates[n - 1];
            let width = last.post_break - self.pre_break;
            debug!("flush at {} width={:.2}", last.offset, width);
            out.push(last.offset, width);
            self.last_break = n - 1;
            self.best_break = None;
            self.pre_break = last.pre_break;
        }
    }
}

/// Greedy line breaker, reusable across paragraphs.
pub struct LineBreaker<W = LineBreakWords> {
    config: BreakerConfig,
    words: W,
    char_widths: Vec<f64>,
    paragraph: Option<Paragraph>,
    output: Output,
}

impl Default for LineBreaker<LineBreakWords> {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBreaker<LineBreakWords> {
    pub fn new() -> Self {
        Self::with_words(LineBreakWords::new())
    }
}

impl<W: WordBoundaries> LineBreaker<W> {
    /// A breaker that takes its break opportunities from `words`.
    pub fn with_words(words: W) -> Self {
        Self {
            config: BreakerConfig::default(),
            words,
            char_widths: Vec::new(),
            paragraph: None,
            output: Output::default(),
        }
    }

    pub fn config(&self) -> &BreakerConfig {
        &self.config
    }

    pub fn set_line_width(&mut self, line_width: f64) -> Result<()> {
        if line_width.is_nan() || line_width <= 0.0 {
            return Err(BreakError::InvalidLineWidth(line_width));
        }
        self.config.line_width = line_width;
        Ok(())
    }

    pub fn set_tab_stops(&mut self, stops: &[f64], tab_width: f64) -> Result<()> {
        self.config.tab_stops.set(stops, tab_width)
    }

    /// Make sure char widths can be addressed up to `size - 1`. Never shrinks.
    pub fn resize(&mut self, size: usize) {
        if self.char_widths.len() < size {
            self.char_widths.resize(size, 0.0);
        }
    }

    /// Start a new paragraph over `text[offset..offset + length]`.
    ///
    /// Discards any previous paragraph state and committed breaks. All
    /// offsets passed in or reported afterwards are relative to `offset`.
    pub fn set_text(&mut self, text: &[char], offset: usize, length: usize) -> Result<()> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= text.len())
            .ok_or(BreakError::TextRange {
                offset,
                length,
                text_len: text.len(),
            })?;

        self.words.set_text(text, offset, length);
        self.words.next();
        self.output.clear();
        self.resize(length);
        self.char_widths[..length].fill(0.0);
        self.paragraph = Some(Paragraph::new(&text[offset..end]));
        Ok(())
    }

    /// Start a new paragraph over the whole of `text`.
    pub fn set_str(&mut self, text: &str) -> Result<()> {
        let chars: Vec<char> = text.chars().collect();
        self.set_text(&chars, 0, chars.len())
    }

    /// Measure `[start, end)` in `style` and feed it to the breaker.
    ///
    /// Runs must be added left to right, each starting where the previous
    /// one ended. Returns the run width reported by the measurer.
    pub fn add_style_run<M: TextMeasurer + ?Sized>(
        &mut self,
        measurer: &M,
        style: &M::Style,
        start: usize,
        end: usize,
    ) -> Result<f64> {
        self.check_run(start, end)?;
        let Some(paragraph) = self.paragraph.as_ref() else {
            return Err(BreakError::NoText);
        };
        let width = measurer.measure(
            &paragraph.text,
            start,
            end - start,
            style,
            &mut self.char_widths,
            start,
        );
        self.scan_run(true, start, end);
        Ok(width)
    }

    /// Feed `[start, end)` using whatever widths are already stored for it.
    ///
    /// Boundaries inside the run that sit on a zero-width char are skipped,
    /// so a placeholder is never split.
    pub fn add_unmeasured_run(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_run(start, end)?;
        self.scan_run(false, start, end);
        Ok(())
    }

    /// Feed `[start, end)` as one opaque object `width` wide.
    pub fn add_replacement(&mut self, start: usize, end: usize, width: f64) -> Result<f64> {
        self.check_run(start, end)?;
        if start < end {
            self.char_widths[start] = width;
            self.char_widths[start + 1..end].fill(0.0);
        }
        self.scan_run(false, start, end);
        Ok(width)
    }

    /// Commit the trailing line and return the number of breaks.
    ///
    /// Fails unless the runs added so far reach the end of the paragraph.
    pub fn compute_breaks(&mut self) -> Result<usize> {
        let paragraph = self.paragraph.as_mut().ok_or(BreakError::NoText)?;
        if paragraph.next_run_start != paragraph.text.len() {
            return Err(BreakError::RunsIncomplete {
                covered: paragraph.next_run_start,
                length: paragraph.text.len(),
            });
        }
        paragraph.flush(&mut self.output);
        Ok(self.output.breaks.len())
    }

    /// Committed break offsets, strictly increasing.
    pub fn breaks(&self) -> &[usize] {
        &self.output.breaks
    }

    /// Width of the line ending at the matching entry of [`breaks`](Self::breaks).
    pub fn widths(&self) -> &[f64] {
        &self.output.widths
    }

    pub fn lines(&self) -> impl Iterator<Item = LineSpan> + '_ {
        let starts = std::iter::once(0).chain(self.output.breaks.iter().copied());
        starts
            .zip(self.output.breaks.iter().zip(&self.output.widths))
            .map(|(start, (&end, &width))| LineSpan { start, end, width })
    }

    /// Every candidate admitted so far, starting with the sentinel.
    pub fn candidates(&self) -> &[Candidate] {
        self.paragraph
            .as_ref()
            .map(|p| p.candidates.as_slice())
            .unwrap_or(&[])
    }

    /// First tab in the paragraph, if any run contained one.
    pub fn first_tab_index(&self) -> Option<usize> {
        self.paragraph.as_ref().and_then(|p| p.first_tab_index)
    }

    /// Release the paragraph. The breaker is ready for the next `set_text`.
    pub fn finish(&mut self) {
        self.words.finish();
        self.paragraph = None;
        self.output.clear();
    }

    fn check_run(&self, start: usize, end: usize) -> Result<()> {
        let paragraph = self.paragraph.as_ref().ok_or(BreakError::NoText)?;
        let length = paragraph.text.len();
        if start > end || end > length {
            return Err(BreakError::RunOutOfBounds { start, end, length });
        }
        if start != paragraph.next_run_start {
            return Err(BreakError::RunOutOfOrder {
                start,
                expected: paragraph.next_run_start,
            });
        }
        Ok(())
    }

    fn scan_run(&mut self, measured: bool, start: usize, end: usize) {
        let Some(paragraph) = self.paragraph.as_mut() else {
            return;
        };
        let tab_stops = &self.config.tab_stops;
        let mut ctx = BreakContext {
            line_width: self.config.line_width,
            char_widths: &self.char_widths,
            out: &mut self.output,
        };

        let mut current = self.words.current();
        for i in start..end {
            let c = paragraph.text[i];
            if c == '\t' {
                paragraph.width = paragraph.pre_break
                    + tab_stops.next_tab(paragraph.width - paragraph.pre_break);
                if paragraph.first_tab_index.is_none() {
                    paragraph.first_tab_index = Some(i);
                }
            } else {
                if is_word_space(c) {
                    paragraph.space_count += 1;
                }
                paragraph.width += ctx.char_widths[i];
                if !is_line_end_space(c) {
                    paragraph.post_break = paragraph.width;
                    paragraph.post_space_count = paragraph.space_count;
                }
            }

            if current == Some(i + 1) {
                let offset = i + 1;
                if measured || offset == end || ctx.char_widths[offset] > 0.0 {
                    trace!(
                        "word [{}, {}) ends at {}",
                        self.words.word_start(),
                        self.words.word_end(),
                        offset
                    );
                    let word = Candidate {
                        offset,
                        pre_break: paragraph.width,
                        post_break: paragraph.post_break,
                        penalty: 0.0,
                        pre_space_count: paragraph.space_count,
                        post_space_count: paragraph.post_space_count,
                    };
                    paragraph.add_word_break(&mut ctx, word);
                }
                current = self.words.next();
            }
        }
        paragraph.next_run_start = end;
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::font::FixedAdvance;
    use proptest::prelude::*;

    fn break_text(
        breaker: &mut LineBreaker,
        text: &[char],
        advance: f64,
        line_width: f64,
        cuts: &[usize],
    ) {
        breaker.set_line_width(line_width).unwrap();
        breaker.set_text(text, 0, text.len()).unwrap();
        let mut bounds: Vec<usize> = cuts.iter().map(|&c| c % (text.len() + 1)).collect();
        bounds.push(0);
        bounds.push(text.len());
        bounds.sort_unstable();
        bounds.dedup();
        let mut start = 0;
        for &end in bounds.iter().filter(|&&b| b > 0) {
            breaker
                .add_style_run(&FixedAdvance, &advance, start, end)
                .unwrap();
            start = end;
        }
        breaker.compute_breaks().unwrap();
    }

    fn paragraph() -> impl Strategy<Value = Vec<char>> {
        proptest::collection::vec(prop::sample::select(vec!['a', 'b', 'c', ' ', '-']), 0..80)
    }

    proptest! {
        #[test]
        fn lines_cover_paragraph(
            text in paragraph(),
            advance in 1u32..4,
            line_width in 1u32..30,
        ) {
            let mut breaker = LineBreaker::new();
            break_text(&mut breaker, &text, advance as f64, line_width as f64, &[]);

            let breaks = breaker.breaks();
            prop_assert_eq!(breaks.len(), breaker.widths().len());
            prop_assert!(breaks.windows(2).all(|w| w[0] < w[1]), "breaks={:?}", breaks);
            if text.is_empty() {
                prop_assert!(breaks.is_empty());
            } else {
                prop_assert_eq!(breaks.last().copied(), Some(text.len()));
                prop_assert!(breaks[0] > 0);
            }
        }

        #[test]
        fn lines_fit_unless_one_char_is_wider(
            text in paragraph(),
            advance in 1u32..4,
            line_width in 1u32..30,
        ) {
            let mut breaker = LineBreaker::new();
            break_text(&mut breaker, &text, advance as f64, line_width as f64, &[]);
            for line in breaker.lines() {
                if advance <= line_width {
                    prop_assert!(line.width <= line_width as f64, "line {:?} exceeds {}", line, line_width);
                } else {
                    prop_assert!(line.width <= advance as f64, "line {:?} exceeds one char", line);
                }
            }
        }

        #[test]
        fn chunking_does_not_change_breaks(
            text in paragraph(),
            line_width in 1u32..30,
            cuts in proptest::collection::vec(0usize..100, 0..6),
        ) {
            let mut whole = LineBreaker::new();
            break_text(&mut whole, &text, 1.0, line_width as f64, &[]);
            let mut chunked = LineBreaker::new();
            break_text(&mut chunked, &text, 1.0, line_width as f64, &cuts);
            prop_assert_eq!(whole.breaks(), chunked.breaks());
            prop_assert_eq!(whole.widths(), chunked.widths());
        }

        #[test]
        fn reuse_matches_fresh(
            first in paragraph(),
            second in paragraph(),
            line_width in 1u32..30,
        ) {
            let mut reused = LineBreaker::new();
            break_text(&mut reused, &first, 2.0, line_width as f64, &[]);
            reused.finish();
            break_text(&mut reused, &second, 1.0, line_width as f64, &[]);

            let mut fresh = LineBreaker::new();
            break_text(&mut fresh, &second, 1.0, line_width as f64, &[]);
            prop_assert_eq!(reused.breaks(), fresh.breaks());
            prop_assert_eq!(reused.widths(), fresh.widths());
        }
    }
}
