//! Escaping for HTML text and URL components.

use il_eval::{Args, Environment, EvalResult, Object};
use pct_str::{Encoder, PctString};

use crate::define;

pub(crate) fn register(env: &Environment) {
    define(env, "EscapeHtml", |env, args| escaping(env, args, escape_html));
    define(env, "EscapeQuery", |env, args| escaping(env, args, escape_query));
    define(env, "EscapePath", |env, args| escaping(env, args, escape_path));
}

/// Non-string and empty input give `None`.
fn escaping(env: &Environment, mut args: Args<'_>, escape: fn(&str) -> String) -> EvalResult {
    Ok(match args.next_value(env)? {
        Object::String(text) if !text.is_empty() => Object::string(escape(&text)),
        _ => Object::None,
    })
}

fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

/// Query components: only unreserved characters pass through.
struct QueryComponent;

impl Encoder for QueryComponent {
    fn encode(&self, c: char) -> bool {
        !is_unreserved(c)
    }
}

/// Path segments additionally keep the sub-delimiters that cannot split a
/// path.
struct PathSegment;

impl Encoder for PathSegment {
    fn encode(&self, c: char) -> bool {
        !(is_unreserved(c) || matches!(c, '$' | '&' | '+' | ':' | '=' | '@'))
    }
}

/// Form encoding: spaces become `+`.
fn escape_query(text: &str) -> String {
    PctString::encode(text.chars(), QueryComponent)
        .to_string()
        .replace("%20", "+")
}

fn escape_path(text: &str) -> String {
    PctString::encode(text.chars(), PathSegment).to_string()
}

#[cfg(test)]
mod tests;
