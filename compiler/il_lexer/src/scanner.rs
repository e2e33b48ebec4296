//! Word and parenthesis scanner for a single line body.
//!
//! All delimiters are ASCII, so the scanner walks bytes and slices the body
//! at delimiter positions; every produced word is a valid `&str` borrow of
//! the input.

use crate::LexError;

/// What a token is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// `(` opens a nested list.
    Open,
    /// `)` closes the innermost nested list.
    Close,
    /// A maximal run of non-delimiter characters, string literals included.
    Word(&'a str),
}

/// A token and the 1-based character column it starts at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub column: usize,
}

struct Scanner<'a> {
    body: &'a str,
    line: usize,
    indent: usize,
    offset: usize,
    tokens: Vec<Token<'a>>,
    word_start: Option<usize>,
}

impl<'a> Scanner<'a> {
    fn column(&self, pos: usize) -> usize {
        self.indent + self.body[..pos].chars().count() + 1
    }

    fn push(&mut self, kind: TokenKind<'a>, pos: usize) {
        let column = self.column(pos);
        self.tokens.push(Token { kind, column });
    }

    fn end_word(&mut self, end: usize) {
        if let Some(start) = self.word_start.take() {
            self.push(TokenKind::Word(&self.body[start..end]), start);
        }
    }

    /// Skip the string literal opened at `open`, returning the position just
    /// past its closing quote.
    fn skip_string(&self, open: usize) -> Result<usize, LexError> {
        let bytes = self.body.as_bytes();
        let quote = bytes[open];
        let mut pos = open + 1;
        while let Some(found) = memchr::memchr2(quote, b'\\', &bytes[pos..]) {
            let at = pos + found;
            if bytes[at] == quote {
                return Ok(at + 1);
            }
            // Backslash: the escaped character never closes the literal.
            pos = at + 2;
            if pos > bytes.len() {
                break;
            }
        }
        Err(LexError::unterminated_string(
            self.line,
            self.column(open),
            self.offset + open,
            char::from(quote),
        ))
    }

    fn run(mut self) -> Result<Vec<Token<'a>>, LexError> {
        let bytes = self.body.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() {
            match bytes[pos] {
                b' ' | b'\t' => {
                    self.end_word(pos);
                    pos += 1;
                }
                b'(' => {
                    self.end_word(pos);
                    self.push(TokenKind::Open, pos);
                    pos += 1;
                }
                b')' => {
                    self.end_word(pos);
                    self.push(TokenKind::Close, pos);
                    pos += 1;
                }
                b'#' => {
                    self.end_word(pos);
                    return Ok(self.tokens);
                }
                b'"' | b'\'' => {
                    self.word_start.get_or_insert(pos);
                    pos = self.skip_string(pos)?;
                }
                _ => {
                    self.word_start.get_or_insert(pos);
                    pos += 1;
                }
            }
        }
        self.end_word(bytes.len());
        Ok(self.tokens)
    }
}

/// Split one line body (indentation already removed) into tokens.
///
/// `indent` is the number of indentation characters stripped from the line
/// and `offset` is the byte offset of `body` in the full source; both only
/// feed positions. Fails when a string literal is not closed on this line.
pub fn scan_line(
    body: &str,
    line: usize,
    indent: usize,
    offset: usize,
) -> Result<Vec<Token<'_>>, LexError> {
    Scanner {
        body,
        line,
        indent,
        offset,
        tokens: Vec::new(),
        word_start: None,
    }
    .run()
}

#[cfg(test)]
mod tests;
