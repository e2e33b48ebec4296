//! Line-oriented scanner for il source text.
//!
//! il is indentation-delimited: a document is a sequence of lines, each
//! line carries an indentation column, and the words of a line may be
//! grouped with parentheses. This crate only splits text into that shape.
//! It does not classify words (integers, strings, attributes, ...); the
//! parser owns the literal-rule pipeline because custom rules need the
//! evaluator.
//!
//! # Layers
//!
//! - [`lines`] walks the source one physical line at a time, skipping blank
//!   lines and comment lines, and measures indentation.
//! - [`scan_line`] splits the body of one line into [`Token`]s: opening and
//!   closing parentheses and words. String literals (`"..."` or `'...'`) are
//!   kept intact inside the word they belong to, including whitespace and
//!   parentheses, so `@href="a b"` is a single word.
//!
//! A `#` outside a string literal ends the line.

mod lex_error;
mod line;
mod scanner;

pub use lex_error::{LexError, LexErrorKind};
pub use line::{lines, Lines, SourceLine};
pub use scanner::{scan_line, Token, TokenKind};
