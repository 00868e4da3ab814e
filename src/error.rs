use std::num::ParseFloatError;

use thiserror::Error;

use crate::lines::line_bounds;

/// Source location: line and column (both 1-indexed, column counted in bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

impl Span {
    #[must_use]
    pub fn new(line: usize, col: usize) -> Self {
        Span { line, col }
    }

    /// Locate a byte offset using the same line boundaries as the splitter.
    /// Offsets past the end of `source` land on the last line.
    #[must_use]
    pub fn locate(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut start = 0;
        while start < source.len() {
            let (end, next) = line_bounds(source, start);
            if offset <= end || next >= source.len() {
                break;
            }
            line += 1;
            start = next;
        }
        Span::new(line, offset.saturating_sub(start) + 1)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Everything the scanner and renderer can fail with.
#[derive(Debug, Error)]
pub enum Error {
    /// A byte outside whitespace, punctuators, word and number starts.
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    /// A digit-started run that `f64::from_str` rejects.
    #[error("invalid number {literal:?} at offset {offset}: {source}")]
    NumericParseFailure {
        literal: String,
        offset: usize,
        #[source]
        source: ParseFloatError,
    },

    /// A token offset that does not fit the 16-bit offset width.
    #[error("offset {offset} exceeds the maximum source offset {}", crate::lexer::MAX_OFFSET)]
    OffsetOverflow { offset: usize },

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Byte offset into the source the error points at, if it has one.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::UnexpectedCharacter { offset, .. }
            | Error::NumericParseFailure { offset, .. }
            | Error::OffsetOverflow { offset } => Some(*offset),
            Error::Io(_) => None,
        }
    }

    /// True for errors caused by the source text rather than the output sink.
    #[must_use]
    pub fn is_lexical(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
