use pretty_assertions::assert_eq;

use il_eval::Object;

use crate::testing::{id, int, Session};

#[test]
fn categories_on_lists() {
    let session = Session::new();
    session.eval(
        r#":= l (List 1)
AddCategory l "row""#,
    );
    assert_eq!(session.eval(r#"HasCategory l "row""#), Object::Boolean(true));
    assert_eq!(session.eval(r#"HasCategory l "col""#), Object::Boolean(false));
    assert_eq!(session.eval(r#"HasCategory 5 "row""#), Object::Boolean(false));
    assert_eq!(session.eval("HasCategory l"), Object::Boolean(false));
}

#[test]
fn parse_word_classifies() {
    let session = Session::new();
    assert_eq!(session.eval(r#"ParseWord "42""#), int(42));
    assert_eq!(session.eval(r#"ParseWord '"s"'"#), Object::from("s"));
    assert_eq!(session.eval(r#"ParseWord "abc""#), id("abc"));
    assert_eq!(session.eval(r#"ParseWord """#), Object::None);
    assert_eq!(session.eval("ParseWord 5"), Object::None);
}

#[test]
fn custom_rules_apply_to_later_parses() {
    let session = Session::new();
    session.eval(
        r#"Func magic (word nodes) (If (== word "magic") (Return 42))
AddCustomRule magic"#,
    );
    assert_eq!(session.grammar.rule_count(), 1);
    assert_eq!(session.eval("+ magic 1"), int(43));
    assert_eq!(session.eval(r#"ParseWord "magic""#), int(42));
}

#[test]
fn non_appliable_rules_are_refused() {
    let session = Session::new();
    session.eval("AddCustomRule 5");
    assert_eq!(session.grammar.rule_count(), 0);
}
