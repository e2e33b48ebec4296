use pretty_assertions::assert_eq;

use il_eval::Object;

use super::{escape_html, escape_path, escape_query};
use crate::testing::run;

#[test]
fn html_special_characters() {
    assert_eq!(escape_html("<b>&"), "&lt;b&gt;&amp;");
    assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
    assert_eq!(escape_html("it's"), "it&#x27;s");
    assert_eq!(escape_html("plain text"), "plain text");
}

#[test]
fn query_components_use_plus_for_space() {
    assert_eq!(escape_query("a b&c$d@e"), "a+b%26c%24d%40e");
    assert_eq!(escape_query("safe-_.~"), "safe-_.~");
}

#[test]
fn path_segments_keep_sub_delimiters() {
    assert_eq!(escape_path("a b!c$d@e"), "a%20b%21c$d@e");
    assert_eq!(escape_path("x+y=z&w:v"), "x+y=z&w:v");
}

#[test]
fn primitives_reject_empty_and_non_strings() {
    assert_eq!(run(r#"EscapeHtml "<p>""#), Object::from("&lt;p&gt;"));
    assert_eq!(run(r#"EscapeQuery "a b""#), Object::from("a+b"));
    assert_eq!(run(r#"EscapePath """#), Object::None);
    assert_eq!(run("EscapeHtml 5"), Object::None);
}
