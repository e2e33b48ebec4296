//! Physical line iteration with indentation measurement.

use crate::scanner::{scan_line, Token};
use crate::LexError;

/// One significant source line: its indentation and its tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Byte offset of the first character of the line in the full source.
    pub offset: usize,
    /// Number of leading space or tab characters.
    pub indent: usize,
    pub tokens: Vec<Token<'a>>,
}

/// Iterator over the significant lines of a source text.
///
/// Blank lines, whitespace-only lines and lines whose first non-blank
/// character is `#` are skipped. A line ending in `\r\n` is treated like one
/// ending in `\n`.
#[derive(Clone, Debug)]
pub struct Lines<'a> {
    rest: &'a str,
    offset: usize,
    number: usize,
}

/// Walk the significant lines of `source`.
pub fn lines(source: &str) -> Lines<'_> {
    Lines {
        rest: source,
        offset: 0,
        number: 0,
    }
}

impl<'a> Lines<'a> {
    /// Split off the next physical line, returning it with its byte offset.
    fn next_physical(&mut self) -> Option<(&'a str, usize)> {
        if self.rest.is_empty() {
            return None;
        }
        let (line, consumed) = match memchr::memchr(b'\n', self.rest.as_bytes()) {
            Some(end) => (&self.rest[..end], end + 1),
            None => (self.rest, self.rest.len()),
        };
        let start = self.offset;
        self.rest = &self.rest[consumed..];
        self.offset += consumed;
        self.number += 1;
        Some((line.strip_suffix('\r').unwrap_or(line), start))
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Result<SourceLine<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (text, offset) = self.next_physical()?;
            let indent = text
                .bytes()
                .take_while(|&b| b == b' ' || b == b'\t')
                .count();
            let body = &text[indent..];
            if body.is_empty() || body.starts_with('#') {
                continue;
            }
            let number = self.number;
            return Some(
                scan_line(body, number, indent, offset + indent).map(|tokens| SourceLine {
                    number,
                    offset,
                    indent,
                    tokens,
                }),
            );
        }
    }
}
