//! # Text Breaking
//!
//! Greedy paragraph line breaking over pre-measured text.
//!
//! The paragraph is fed to a [`LineBreaker`] one style run at a time. Break
//! candidates come from a [`WordBoundaries`] producer; widths come from a
//! [`TextMeasurer`](crate::font::TextMeasurer). Words wider than the line get
//! forced per-character candidates so every paragraph can be broken.

pub mod breaker;
pub mod candidate;
pub mod shaping;
pub mod tab_stops;
pub mod words;

pub use breaker::{BreakerConfig, LineBreaker, LineSpan};
pub use candidate::{Candidate, SCORE_DESPERATE};
pub use tab_stops::{TabStops, DEFAULT_TAB_WIDTH};
pub use words::{LineBreakWords, WordBoundaries};

/// Spaces that separate words and are counted for justification.
pub fn is_word_space(c: char) -> bool {
    c == ' ' || c == '\u{00A0}'
}

/// Whitespace that may hang past the end of a line without counting toward
/// its width.
pub fn is_line_end_space(c: char) -> bool {
    c == '\n'
        || c == ' '
        || c == '\u{1680}'
        || (('\u{2000}'..='\u{200A}').contains(&c) && c != '\u{2007}')
        || c == '\u{205F}'
        || c == '\u{3000}'
}
