//! Break candidates.

/// Penalty of a forced break inside a word that is wider than the line.
pub const SCORE_DESPERATE: f64 = 1e10;

/// One place where the paragraph may legally be broken.
///
/// Widths are measured from the start of the paragraph; the breaker converts
/// them to line-relative widths by subtracting the `pre_break` of the last
/// committed candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Candidate {
    /// Char offset of the break, relative to the paragraph start.
    pub offset: usize,
    /// Width up to the break including trailing whitespace. The next line
    /// starts here if this candidate is committed.
    pub pre_break: f64,
    /// Width up to the last non-whitespace char before the break. This is
    /// what the line measures if it ends here.
    pub post_break: f64,
    /// Lower is better.
    pub penalty: f64,
    /// Word spaces seen up to the break, trailing spaces included.
    pub pre_space_count: usize,
    /// Word spaces seen up to the last non-whitespace char before the break.
    pub post_space_count: usize,
}

impl Candidate {
    /// The zero-width candidate every paragraph starts with.
    pub fn sentinel() -> Self {
        Self::default()
    }

    pub fn is_desperate(&self) -> bool {
        self.penalty >= SCORE_DESPERATE
    }

    /// Trailing word spaces that hang past the end of a line broken here.
    pub fn trailing_spaces(&self) -> usize {
        self.pre_space_count.saturating_sub(self.post_space_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_zero() {
        let c = Candidate::sentinel();
        assert_eq!(c.offset, 0);
        assert_eq!(c.pre_break, 0.0);
        assert_eq!(c.post_break, 0.0);
        assert!(!c.is_desperate());
    }

    #[test]
    fn test_trailing_spaces() {
        let c = Candidate {
            offset: 7,
            pre_break: 7.0,
            post_break: 5.0,
            penalty: 0.0,
            pre_space_count: 3,
            post_space_count: 1,
        };
        assert_eq!(c.trailing_spaces(), 2);
    }
}
