use pretty_assertions::assert_eq;

use il_eval::Object;

use crate::testing::{id, int, list, run, Session};
use crate::{extract_float, extract_integer, extract_string};

#[test]
fn integer_conversion() {
    assert_eq!(run(r#"Int "42""#), int(42));
    assert_eq!(run("Int 3.9"), int(3));
    assert_eq!(run("Int -3.9"), int(-3));
    assert_eq!(run("Int true"), int(1));
    assert_eq!(run(r#"Int "x""#), int(0));
    assert_eq!(run("Int (List)"), int(0));
}

#[test]
fn float_conversion() {
    assert_eq!(run("Float 2"), Object::Float(2.0));
    assert_eq!(run(r#"Float "1.5""#), Object::Float(1.5));
    assert_eq!(run("Float false"), Object::Float(0.0));
}

#[test]
fn string_conversion() {
    assert_eq!(run("String 12"), Object::from("12"));
    assert_eq!(run("String 1.5"), Object::from("1.5"));
    assert_eq!(run("String (* 1000000 1.0)"), Object::from("1e+06"));
    assert_eq!(run(r#"String (List 1 "a" (List true))"#), Object::from("(1 a (true))"));
    assert_eq!(run("String None"), Object::from(""));
}

#[test]
fn bool_conversion() {
    assert_eq!(run("Bool (List)"), Object::Boolean(false));
    assert_eq!(run(r#"Bool "a""#), Object::Boolean(true));
    assert_eq!(run("Bool 0.0"), Object::Boolean(false));
    assert_eq!(run("Bool None"), Object::Boolean(false));
}

#[test]
fn identifier_conversion() {
    let session = Session::new();
    session.eval(":= y 3");
    assert_eq!(session.eval(r#"Identifier "y""#), id("y"));
    assert_eq!(session.eval(r#"Eval (Identifier "y")"#), int(3));
    assert_eq!(session.eval("Identifier 5"), Object::None);
}

#[test]
fn list_evaluates_its_arguments() {
    let session = Session::new();
    session.eval(":= x 2");
    assert_eq!(session.eval("List x (+ x 1)"), list(vec![int(2), int(3)]));
}

#[test]
fn dict_stops_at_the_first_non_pair() {
    let session = Session::new();
    session.eval(r#":= d (Dict (List "a" 1) (List "b" 2) 5 (List "c" 3))"#);
    assert_eq!(session.eval("Size d"), int(2));
    assert_eq!(session.eval(". d b"), int(2));
    assert_eq!(session.eval(". d c"), Object::None);
}

#[test]
fn extractors_on_values() {
    assert_eq!(extract_integer(&Object::Float(-0.5)), 0);
    assert_eq!(extract_float(&Object::from("x")), 0.0);
    assert_eq!(extract_string(&Object::Boolean(false)), "false");
    assert_eq!(extract_string(&Object::list(vec![])), "()");
    assert_eq!(extract_string(&id("name")), "");
}
