#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use il_eval::{Environment, Object};
use il_parse::Grammar;

use crate::{build_builtins, MAIN_NAME};

#[test]
fn builtins_claim_the_sandbox() {
    let grammar = Grammar::new();
    let builtins = build_builtins(&grammar);
    assert!(!grammar.install_sandbox(&Environment::new()));
    assert!(builtins.lookup("If").is_some_and(|form| form.is_appliable()));
    assert!(builtins.lookup("h6").is_some_and(|form| form.is_appliable()));
    assert_eq!(builtins.lookup(MAIN_NAME), None);
}

#[test]
fn builtins_are_shared_not_written() {
    let grammar = Grammar::new();
    let builtins = build_builtins(&grammar);
    let size = builtins.size();

    let program = Environment::local(&builtins);
    let tree = grammar.parse(":= x 1\nFunc f (a) (Return a)").unwrap();
    for line in tree.to_vec() {
        line.eval(&program).unwrap();
    }
    assert_eq!(builtins.size(), size);
    assert_eq!(program.load_str("x"), Object::Integer(1));
}
