#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::{scan_line, Token, TokenKind};
use crate::LexErrorKind;

fn kinds(body: &str) -> Vec<TokenKind<'_>> {
    scan_line(body, 1, 0, 0)
        .unwrap_or_else(|err| panic!("scan failed: {err}"))
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

// === Words ===

#[test]
fn splits_on_whitespace() {
    assert_eq!(
        kinds("a  bb\tccc"),
        vec![
            TokenKind::Word("a"),
            TokenKind::Word("bb"),
            TokenKind::Word("ccc")
        ]
    );
}

#[test]
fn parentheses_are_tokens_and_delimiters() {
    assert_eq!(
        kinds("f(x (y))"),
        vec![
            TokenKind::Word("f"),
            TokenKind::Open,
            TokenKind::Word("x"),
            TokenKind::Open,
            TokenKind::Word("y"),
            TokenKind::Close,
            TokenKind::Close,
        ]
    );
}

// === String literals ===

#[test]
fn string_literal_keeps_whitespace_and_parens() {
    assert_eq!(
        kinds(r#"p "a (b) c" x"#),
        vec![
            TokenKind::Word("p"),
            TokenKind::Word(r#""a (b) c""#),
            TokenKind::Word("x"),
        ]
    );
}

#[test]
fn string_literal_glued_to_word() {
    assert_eq!(
        kinds(r#"@href="a b" br"#),
        vec![TokenKind::Word(r#"@href="a b""#), TokenKind::Word("br")]
    );
}

#[test]
fn escaped_quote_does_not_close() {
    assert_eq!(
        kinds(r#""say \"hi\"" end"#),
        vec![TokenKind::Word(r#""say \"hi\"""#), TokenKind::Word("end")]
    );
}

#[test]
fn single_quotes_hide_double_quotes() {
    assert_eq!(kinds(r#"'a " b'"#), vec![TokenKind::Word(r#"'a " b'"#)]);
}

#[test]
fn hash_inside_string_is_text() {
    assert_eq!(
        kinds(r##""#1" x"##),
        vec![TokenKind::Word(r##""#1""##), TokenKind::Word("x")]
    );
}

// === Comments ===

#[test]
fn hash_ends_line() {
    assert_eq!(
        kinds("a b # c d"),
        vec![TokenKind::Word("a"), TokenKind::Word("b")]
    );
}

#[test]
fn hash_glued_to_word_ends_line() {
    assert_eq!(kinds("a#b c"), vec![TokenKind::Word("a")]);
}

// === Positions ===

#[test]
fn columns_count_indent_and_characters() {
    let tokens = scan_line("é (b)", 3, 4, 10).unwrap_or_default();
    assert_eq!(
        tokens,
        vec![
            Token { kind: TokenKind::Word("é"), column: 5 },
            Token { kind: TokenKind::Open, column: 7 },
            Token { kind: TokenKind::Word("b"), column: 8 },
            Token { kind: TokenKind::Close, column: 9 },
        ]
    );
}

// === Errors ===

#[test]
fn unterminated_string_reports_opening_quote() {
    let err = scan_line(r#"a "open"#, 7, 2, 40).err();
    let err = err.unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.line, 7);
    assert_eq!(err.column, 5);
    assert_eq!(err.offset, 42);
    assert_eq!(err.kind, LexErrorKind::UnterminatedString { quote: '"' });
}

#[test]
fn trailing_backslash_is_unterminated() {
    assert!(scan_line(r"'abc\", 1, 0, 0).is_err());
}
