//! Lexer error types.
//!
//! Errors carry WHERE (line, column and byte offset into the whole source)
//! and WHAT (`kind`). The byte offset lets callers build diagnostic spans
//! without re-scanning the text.

use thiserror::Error;

/// A lexer error with enough position data for diagnostic rendering.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct LexError {
    /// 1-based line number.
    pub line: usize,
    /// 1-based character column.
    pub column: usize,
    /// Byte offset of the offending character in the full source.
    pub offset: usize,
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    /// A string literal reached the end of its line without the closing quote.
    #[error("unterminated string literal (missing closing {quote})")]
    UnterminatedString { quote: char },
}

impl LexError {
    #[cold]
    pub(crate) fn unterminated_string(
        line: usize,
        column: usize,
        offset: usize,
        quote: char,
    ) -> Self {
        LexError {
            line,
            column,
            offset,
            kind: LexErrorKind::UnterminatedString { quote },
        }
    }

    /// Byte range covering the offending character.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + 1
    }
}
