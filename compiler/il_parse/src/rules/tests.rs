#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use il_eval::{List, Object};

use crate::{Grammar, ATTRIBUTE_CATEGORY};

fn classify(word: &str) -> Object {
    let nodes = List::new();
    Grammar::new()
        .handle_word(word, &nodes)
        .unwrap_or_else(|signal| panic!("unexpected signal: {signal}"));
    assert_eq!(nodes.len(), 1, "exactly one node per word");
    nodes.first().unwrap_or_default()
}

fn id(name: &str) -> Object {
    Object::identifier(name)
}

#[test]
fn keywords() {
    assert_eq!(classify("true"), Object::Boolean(true));
    assert_eq!(classify("false"), Object::Boolean(false));
    assert_eq!(classify("None"), Object::None);
    assert_eq!(classify("True"), id("True"));
}

#[test]
fn numbers() {
    assert_eq!(classify("42"), Object::Integer(42));
    assert_eq!(classify("-7"), Object::Integer(-7));
    assert_eq!(classify("2.5"), Object::Float(2.5));
    assert_eq!(classify(".5"), Object::Float(0.5));
    assert_eq!(classify("1e3"), Object::Float(1000.0));
}

#[test]
fn operator_words_stay_identifiers() {
    for word in ["+", "-", "*", "/", "//", "%", "+=", "[]", "[]=", ".", "=="] {
        assert_eq!(classify(word), id(word), "{word}");
    }
}

#[test]
fn non_finite_spellings_stay_identifiers() {
    // Only words starting with a digit or `.` are numbers, so these can
    // be bound like any other name.
    for word in ["inf", "Inf", "+Inf", "-Inf", "infinity", "nan", "NaN"] {
        assert_eq!(classify(word), id(word), "{word}");
    }
}

#[test]
fn strings_and_escapes() {
    assert_eq!(classify(r#""a b""#), Object::from("a b"));
    assert_eq!(classify("'single'"), Object::from("single"));
    assert_eq!(classify(r#""tab\there""#), Object::from("tab\there"));
    assert_eq!(classify(r#""q\"q""#), Object::from("q\"q"));
    assert_eq!(classify(r"'it\'s'"), Object::from("it's"));
    assert_eq!(classify(r#""keep\d""#), Object::from("keep\\d"));
    assert_eq!(classify(r#""""#), Object::from(""));
}

#[test]
fn attribute_with_value() {
    let node = classify(r#"@href="/a b""#);
    let Object::List(list) = &node else {
        panic!("expected a list, got {node:?}");
    };
    assert!(list.has_category(ATTRIBUTE_CATEGORY));
    assert_eq!(list.to_vec(), vec![Object::from("href"), Object::from("/a b")]);
}

#[test]
fn attribute_value_is_classified() {
    let node = classify("@width=3");
    assert_eq!(
        node.as_list().map(List::to_vec),
        Some(vec![Object::from("width"), Object::Integer(3)])
    );
}

#[test]
fn bare_attribute() {
    let node = classify("@checked");
    assert_eq!(node.as_list().map(List::to_vec), Some(vec![Object::from("checked")]));
}

#[test]
fn colon_compound() {
    assert_eq!(
        classify("a:2:\"x\""),
        Object::list(vec![id("List"), id("a"), Object::Integer(2), Object::from("x")])
    );
}

#[test]
fn colon_compound_empty_parts() {
    assert_eq!(
        classify("a::"),
        Object::list(vec![id("List"), id("a"), Object::None, Object::None])
    );
}

#[test]
fn colons_inside_strings_do_not_split() {
    assert_eq!(
        classify(r#"x:"a:b""#),
        Object::list(vec![id("List"), id("x"), Object::from("a:b")])
    );
    assert_eq!(classify(r#""a:b""#), Object::from("a:b"));
}

#[test]
fn set_word_is_not_split() {
    assert_eq!(classify(":="), id(":="));
}
