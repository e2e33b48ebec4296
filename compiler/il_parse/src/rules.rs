//! Built-in literal rules, tried in order before any custom rule.

use il_eval::{List, Object, Unwind};

use crate::{Grammar, ATTRIBUTE_CATEGORY, LIST_NAME, SET_NAME};

/// A literal rule: `Some(node)` claims the word.
type WordRule = fn(&Grammar, &str) -> Result<Option<Object>, Unwind>;

pub(crate) const NATIVE_RULES: [WordRule; 9] = [
    parse_true,
    parse_false,
    parse_none,
    parse_attribute,
    parse_compound,
    parse_double_quoted,
    parse_single_quoted,
    parse_integer,
    parse_float,
];

fn parse_true(_: &Grammar, word: &str) -> Result<Option<Object>, Unwind> {
    Ok((word == "true").then_some(Object::Boolean(true)))
}

fn parse_false(_: &Grammar, word: &str) -> Result<Option<Object>, Unwind> {
    Ok((word == "false").then_some(Object::Boolean(false)))
}

fn parse_none(_: &Grammar, word: &str) -> Result<Option<Object>, Unwind> {
    Ok((word == "None").then_some(Object::None))
}

/// `@name` or `@name=value`: the list `("name" value)` tagged `attribute`,
/// the value classified like any word.
fn parse_attribute(grammar: &Grammar, word: &str) -> Result<Option<Object>, Unwind> {
    let Some(rest) = word.strip_prefix('@') else {
        return Ok(None);
    };
    let (name, value) = match rest.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (rest, None),
    };
    let attribute = List::from_vec(vec![Object::string(name)]);
    attribute.add_category(ATTRIBUTE_CATEGORY);
    if let Some(value) = value {
        handle_part(grammar, value, &attribute)?;
    }
    Ok(Some(Object::List(attribute)))
}

/// `a:b:c`: the call `(List a b c)`. Colons inside string literals do not
/// split and empty parts are `None`.
fn parse_compound(grammar: &Grammar, word: &str) -> Result<Option<Object>, Unwind> {
    if word == SET_NAME {
        return Ok(None);
    }
    let splits = colon_positions(word);
    if splits.is_empty() {
        return Ok(None);
    }
    let nodes = List::from_vec(vec![Object::identifier(LIST_NAME)]);
    let mut start = 0;
    for split in splits {
        handle_part(grammar, &word[start..split], &nodes)?;
        start = split + 1;
    }
    handle_part(grammar, &word[start..], &nodes)?;
    Ok(Some(Object::List(nodes)))
}

fn handle_part(grammar: &Grammar, part: &str, nodes: &List) -> Result<(), Unwind> {
    if part.is_empty() {
        nodes.push(Object::None);
        Ok(())
    } else {
        grammar.handle_word(part, nodes)
    }
}

/// Byte positions of the colons outside string literals.
fn colon_positions(word: &str) -> Vec<usize> {
    let bytes = word.as_bytes();
    let mut positions = Vec::new();
    let mut quote = None;
    let mut pos = 0;
    while pos < bytes.len() {
        let byte = bytes[pos];
        match quote {
            Some(_) if byte == b'\\' => pos += 1,
            Some(open) if byte == open => quote = None,
            Some(_) => {}
            None if byte == b'"' || byte == b'\'' => quote = Some(byte),
            None if byte == b':' => positions.push(pos),
            None => {}
        }
        pos += 1;
    }
    positions
}

fn parse_double_quoted(_: &Grammar, word: &str) -> Result<Option<Object>, Unwind> {
    Ok(quoted_body(word, '"').map(|body| Object::string(unescape(body))))
}

fn parse_single_quoted(_: &Grammar, word: &str) -> Result<Option<Object>, Unwind> {
    Ok(quoted_body(word, '\'').map(|body| Object::string(unescape(body))))
}

fn quoted_body(word: &str, quote: char) -> Option<&str> {
    if word.len() < 2 {
        return None;
    }
    word.strip_prefix(quote)?.strip_suffix(quote)
}

/// Decode `\n \t \r \0 \\ \' \"`; any other escape keeps both characters.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(c @ ('\\' | '\'' | '"')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Numbers start with a digit or a dot, after an optional sign, so words
/// such as `inf` or `nan` stay identifiers.
fn looks_numeric(word: &str) -> bool {
    word.trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

fn parse_integer(_: &Grammar, word: &str) -> Result<Option<Object>, Unwind> {
    if !looks_numeric(word) {
        return Ok(None);
    }
    Ok(word.parse::<i64>().ok().map(Object::Integer))
}

fn parse_float(_: &Grammar, word: &str) -> Result<Option<Object>, Unwind> {
    if !looks_numeric(word) {
        return Ok(None);
    }
    Ok(word.parse::<f64>().ok().map(Object::Float))
}

#[cfg(test)]
mod tests;
