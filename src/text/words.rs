//! # Word Boundaries
//!
//! The breaker only ever asks "where is the next place a line may end?".
//! [`WordBoundaries`] is that question as a trait; [`LineBreakWords`] answers
//! it with UAX#14 break opportunities from `unicode-linebreak`.

use super::is_line_end_space;
use unicode_linebreak::linebreaks;

/// A producer of successive break boundaries over one paragraph.
///
/// Boundaries are char offsets relative to the `offset` passed to
/// [`set_text`](WordBoundaries::set_text). They are strictly increasing and
/// lie in `(0, length]`.
pub trait WordBoundaries {
    /// Point the producer at `text[offset..offset + length]`. The cursor sits
    /// at 0 until the first call to [`next`](WordBoundaries::next).
    fn set_text(&mut self, text: &[char], offset: usize, length: usize);

    /// Advance to the next boundary. `None` once the paragraph is exhausted.
    fn next(&mut self) -> Option<usize>;

    /// The boundary the cursor sits on, `None` past the end.
    fn current(&self) -> Option<usize>;

    /// Start of the word that ends at the current boundary.
    fn word_start(&self) -> usize;

    /// End of the word that ends at the current boundary, excluding any
    /// trailing whitespace.
    fn word_end(&self) -> usize;

    /// Release the text.
    fn finish(&mut self);
}

/// UAX#14 word boundaries.
///
/// Both allowed and mandatory opportunities become boundaries; the end of the
/// paragraph is always the last one.
#[derive(Debug, Default)]
pub struct LineBreakWords {
    chars: Vec<char>,
    boundaries: Vec<usize>,
    /// Index into `boundaries` of the next boundary `next` will return.
    cursor: usize,
    last: usize,
    current: Option<usize>,
}

impl LineBreakWords {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordBoundaries for LineBreakWords {
    fn set_text(&mut self, text: &[char], offset: usize, length: usize) {
        self.chars.clear();
        self.chars.extend_from_slice(&text[offset..offset + length]);
        self.boundaries = compute_boundaries(&self.chars);
        self.cursor = 0;
        self.last = 0;
        self.current = Some(0);
    }

    fn next(&mut self) -> Option<usize> {
        self.last = self.current.unwrap_or(self.chars.len());
        self.current = self.boundaries.get(self.cursor).copied();
        if self.current.is_some() {
            self.cursor += 1;
        }
        self.current
    }

    fn current(&self) -> Option<usize> {
        self.current
    }

    fn word_start(&self) -> usize {
        let end = self.current.unwrap_or(self.chars.len());
        let mut start = self.last;
        while start < end && self.chars[start].is_whitespace() {
            start += 1;
        }
        start
    }

    fn word_end(&self) -> usize {
        let start = self.word_start();
        let mut end = self.current.unwrap_or(self.chars.len());
        while end > start {
            let c = self.chars[end - 1];
            if !(is_line_end_space(c) || c.is_whitespace()) {
                break;
            }
            end -= 1;
        }
        end
    }

    fn finish(&mut self) {
        self.chars.clear();
        self.boundaries.clear();
        self.cursor = 0;
        self.last = 0;
        self.current = None;
    }
}

/// Break opportunities as char offsets in `(0, chars.len()]`.
fn compute_boundaries(chars: &[char]) -> Vec<usize> {
    let text: String = chars.iter().collect();

    // linebreaks() yields the byte offset AFTER each break; map those back to
    // char indices.
    let byte_to_char: Vec<usize> = {
        let mut map = vec![0usize; text.len() + 1];
        for (char_idx, (byte_idx, _)) in text.char_indices().enumerate() {
            map[byte_idx] = char_idx;
        }
        map[text.len()] = chars.len();
        map
    };

    let mut boundaries: Vec<usize> = linebreaks(&text)
        .map(|(byte_offset, _)| byte_to_char[byte_offset])
        .filter(|&offset| offset > 0)
        .collect();
    boundaries.dedup();
    if !chars.is_empty() && boundaries.last() != Some(&chars.len()) {
        boundaries.push(chars.len());
    }
    boundaries
}
