use pretty_assertions::assert_eq;

use il_eval::Object;

use crate::testing::{int, list, run, Session};

fn ints(values: &[i64]) -> Object {
    list(values.iter().copied().map(int).collect())
}

#[test]
fn range_forms() {
    assert_eq!(run("For i (Range 3) i"), ints(&[0, 1, 2]));
    assert_eq!(run("For i (Range 1 10 3) i"), ints(&[1, 4, 7]));
    assert_eq!(run("For i (Range 5 0 -2) i"), ints(&[5, 3, 1]));
    assert_eq!(run("For i (Range 0 5 0) i"), ints(&[]));
    assert_eq!(run(r#"For i (Range "x") i"#), ints(&[]));
}

#[test]
fn range_stops_at_the_integer_bound() {
    assert_eq!(
        run("For i (Range 9223372036854775806 9223372036854775807 5) i"),
        ints(&[9_223_372_036_854_775_806])
    );
}

#[test]
fn enumerate_pairs_indices() {
    assert_eq!(
        run(r#"For (i v) (Enumerate (List "a" "b")) (List i v)"#),
        list(vec![
            list(vec![int(0), Object::from("a")]),
            list(vec![int(1), Object::from("b")]),
        ])
    );
    assert_eq!(run("Enumerate 5"), Object::None);
}

#[test]
fn next_steps_until_exhausted() {
    let session = Session::new();
    session.eval(":= it (Iter (List 1 2))");
    assert_eq!(session.eval("Next it"), list(vec![int(1), Object::Boolean(true)]));
    assert_eq!(session.eval("Next it"), list(vec![int(2), Object::Boolean(true)]));
    assert_eq!(session.eval("Next it"), list(vec![Object::None, Object::Boolean(false)]));
    assert_eq!(session.eval("Next 5"), list(vec![Object::None, Object::Boolean(false)]));
}

#[test]
fn close_ends_iteration() {
    let session = Session::new();
    session.eval(
        "\
:= it (Iter (List 1 2))
Close it",
    );
    assert_eq!(session.eval("Next it"), list(vec![Object::None, Object::Boolean(false)]));
}

#[test]
fn iter_of_an_iterator_shares_state() {
    let session = Session::new();
    session.eval(
        "\
:= a (Iter (List 1 2 3))
:= b (Iter a)
Next b",
    );
    assert_eq!(session.eval("Next a"), list(vec![int(2), Object::Boolean(true)]));
}

#[test]
fn size_of_sizables() {
    assert_eq!(run("Size (List 1 2)"), int(2));
    assert_eq!(run(r#"Size "héllo""#), int(5));
    assert_eq!(run(r#"Size (Dict (List "a" 1))"#), int(1));
    assert_eq!(run("Size 3"), Object::None);
}

#[test]
fn add_and_add_all_grow_lists() {
    let session = Session::new();
    session.eval(
        r#":= l (List)
Add l 1 2
AddAll l (List 3) "ab" 7 (List 9)"#,
    );
    assert_eq!(
        session.get("l"),
        list(vec![int(1), int(2), int(3), Object::from("a"), Object::from("b")])
    );
}
