//! Parse error types.

use il_lexer::LexError;
use thiserror::Error;

/// Why a document failed to parse. Parsing never yields a partial tree.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A line dedented to a column that no enclosing line uses.
    #[error("indentation not consistent at line {line}, column {column}")]
    InconsistentIndentation {
        line: usize,
        column: usize,
        offset: usize,
    },

    /// A custom rule raised a `Return` signal nobody caught.
    #[error("custom rule leaked a `Return` signal while classifying `{word}` at line {line}")]
    EscapedReturn { line: usize, word: String },
}

impl ParseError {
    #[cold]
    pub(crate) fn inconsistent_indentation(line: usize, indent: usize, offset: usize) -> Self {
        ParseError::InconsistentIndentation {
            line,
            column: indent + 1,
            offset: offset + indent,
        }
    }

    /// Line the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.line,
            ParseError::InconsistentIndentation { line, .. } | ParseError::EscapedReturn { line, .. } => {
                *line
            }
        }
    }

    /// Byte offset into the source, when the error points at a character.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Lex(err) => Some(err.offset),
            ParseError::InconsistentIndentation { offset, .. } => Some(*offset),
            ParseError::EscapedReturn { .. } => None,
        }
    }
}
