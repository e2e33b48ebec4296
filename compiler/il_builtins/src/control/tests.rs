use pretty_assertions::assert_eq;

use il_eval::Object;

use crate::testing::{int, list, run, Session};

// === If ===

#[test]
fn if_follows_truthiness() {
    assert_eq!(run(r#"If (> 5 3) "yes" "no""#), Object::from("yes"));
    assert_eq!(run(r#"If 0 "yes" "no""#), Object::from("no"));
    assert_eq!(run(r#"If (List) "yes" "no""#), Object::from("no"));
    assert_eq!(run(r#"If "" "yes""#), Object::None);
}

#[test]
fn if_evaluates_only_the_chosen_branch() {
    let session = Session::new();
    session.eval("If true 1 (:= touched true)");
    assert_eq!(session.get("touched"), Object::None);
}

#[test]
fn return_inside_if_ends_the_function() {
    let source = "\
Func check ()
    := x 5
    If (> x 3) (Return true) (Return false)
check";
    assert_eq!(run(source), Object::Boolean(true));
}

// === Loops ===

#[test]
fn for_collects_non_none_results() {
    assert_eq!(
        run("For i (List 1 2 3) (* i 2)"),
        list(vec![int(2), int(4), int(6)])
    );
    assert_eq!(run("For i (List 1 2) (:= y i)"), list(vec![]));
}

#[test]
fn for_binds_in_the_enclosing_environment() {
    let session = Session::new();
    session.eval("For i (List 1 2 3) None");
    assert_eq!(session.get("i"), Object::Integer(3));
}

#[test]
fn for_destructures_and_skips_non_iterables() {
    assert_eq!(
        run("For (k v) (List (List 1 2) (List 3 4) 5) (+ k v)"),
        list(vec![int(3), int(7)])
    );
}

#[test]
fn for_over_non_iterable_is_empty() {
    assert_eq!(run("For i 5 i"), list(vec![]));
}

#[test]
fn while_reevaluates_its_condition() {
    let source = "\
:= n 0
While (< n 3)
    += n 1
    * n 10";
    assert_eq!(run(source), list(vec![int(10), int(20), int(30)]));
}

// === Binding ===

#[test]
fn set_destructures_with_none_padding() {
    let session = Session::new();
    session.eval(":= (a b c) (List 1 2)");
    assert_eq!(session.get("a"), Object::Integer(1));
    assert_eq!(session.get("b"), Object::Integer(2));
    assert_eq!(session.get("c"), Object::None);
}

#[test]
fn set_returns_none() {
    assert_eq!(run(":= x 1"), Object::None);
}

#[test]
fn del_removes_keys_and_bindings() {
    let session = Session::new();
    session.eval(
        r#":= d (Dict (List "a" 1) (List "b" 2))
Del d "a"
:= x 1
Del x"#,
    );
    assert_eq!(session.eval("Size d"), Object::Integer(1));
    assert_eq!(session.get("x"), Object::None);
}

// === Access ===

#[test]
fn member_walks_nested_environments() {
    let session = Session::new();
    session.eval(r#":= d (Dict (List "inner" (Dict (List "v" 7))))"#);
    assert_eq!(session.eval(". d inner v"), Object::Integer(7));
    assert_eq!(session.eval(r#". d "inner" "v""#), Object::Integer(7));
    assert_eq!(session.eval(". d missing v"), Object::None);
}

#[test]
fn load_and_store_walk_keys() {
    let session = Session::new();
    session.eval(
        r#":= l (List 1 (List 2 3))
[]= l 1 0 "x""#,
    );
    assert_eq!(session.eval("[] l 1 0"), Object::from("x"));
    assert_eq!(session.eval("[] l 5 0"), Object::None);
    assert_eq!(session.eval(r#"[] "héllo" 1"#), Object::from("é"));
}

#[test]
fn store_into_dict() {
    let session = Session::new();
    session.eval(
        r#":= d (Dict)
[]= d "k" 3"#,
    );
    assert_eq!(session.eval(r#"[] d "k""#), Object::Integer(3));
}

#[test]
fn eval_runs_quoted_code() {
    let session = Session::new();
    session.eval(":= code (Quote (+ 1 2))");
    assert_eq!(session.eval("Eval code"), Object::Integer(3));
}

#[test]
fn get_env_exposes_bindings() {
    let session = Session::new();
    session.eval(":= x 4");
    assert_eq!(session.eval(". (GetEnv) x"), Object::Integer(4));
}
