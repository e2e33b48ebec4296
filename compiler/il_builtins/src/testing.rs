//! Shared helpers for the builtin tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use il_eval::{Environment, Object};
use il_parse::Grammar;

use crate::build_builtins;

/// A grammar, its builtins and one program frame, kept across snippets.
pub(crate) struct Session {
    pub(crate) grammar: Grammar,
    pub(crate) env: Environment,
}

impl Session {
    pub(crate) fn new() -> Self {
        let grammar = Grammar::new();
        let builtins = build_builtins(&grammar);
        Session {
            grammar,
            env: Environment::local(&builtins),
        }
    }

    /// Parse and evaluate every top-level line, answering the last value.
    pub(crate) fn eval(&self, source: &str) -> Object {
        let tree = self
            .grammar
            .parse(source)
            .unwrap_or_else(|err| panic!("parse failed: {err}"));
        let mut last = Object::None;
        for line in tree.to_vec() {
            last = line
                .eval(&self.env)
                .unwrap_or_else(|signal| panic!("escaped signal: {signal}"));
        }
        last
    }

    pub(crate) fn get(&self, name: &str) -> Object {
        self.env.load_str(name)
    }
}

/// Evaluate a standalone snippet.
pub(crate) fn run(source: &str) -> Object {
    Session::new().eval(source)
}

pub(crate) fn id(name: &str) -> Object {
    Object::identifier(name)
}

pub(crate) fn int(value: i64) -> Object {
    Object::Integer(value)
}

pub(crate) fn list(items: Vec<Object>) -> Object {
    Object::list(items)
}
