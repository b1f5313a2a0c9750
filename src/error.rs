//! Structured error types for the line breaker.
//!
//! Every variant is a caller-contract violation or an input failure. The
//! breaking algorithm itself is deterministic and never fails on valid input.

/// The unified error type returned by all public linebreaker API functions.
#[derive(Debug, thiserror::Error)]
pub enum BreakError {
    /// Line width was zero, negative, or NaN.
    #[error("Invalid line width {0}: must be positive")]
    InvalidLineWidth(f64),

    /// Uniform tab width was zero, negative, or NaN.
    #[error("Invalid tab width {0}: must be positive")]
    InvalidTabWidth(f64),

    /// A run was added (or breaks computed) with no paragraph text set.
    #[error("No paragraph text: call set_text before adding runs")]
    NoText,

    /// `set_text` was given a sub-range outside the buffer.
    #[error("Paragraph range {offset}+{length} exceeds text of {text_len} chars")]
    TextRange {
        offset: usize,
        length: usize,
        text_len: usize,
    },

    /// A run's bounds are inverted or extend past the paragraph.
    #[error("Run [{start}, {end}) is outside the paragraph of {length} chars")]
    RunOutOfBounds {
        start: usize,
        end: usize,
        length: usize,
    },

    /// Runs must tile the paragraph left to right without gaps or overlap.
    #[error("Run starts at {start} but the previous run ended at {expected}")]
    RunOutOfOrder { start: usize, expected: usize },

    /// Breaks were requested before the runs reached the end of the paragraph.
    #[error("Runs cover only {covered} of {length} chars")]
    RunsIncomplete { covered: usize, length: usize },

    /// JSON input failed to parse as a paragraph description.
    #[error("Failed to parse paragraph: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// Font data could not be parsed.
    #[error("Font error: {0}")]
    Font(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BreakError>;

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for BreakError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the paragraph schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        BreakError::Parse { source: e, hint }
    }
}
