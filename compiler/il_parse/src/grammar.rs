//! The tree builder and the word classifier.
//!
//! # Indentation
//!
//! Each line opens a list. A stack of `(indent, list)` levels tracks the
//! lines that are still open:
//!
//! - deeper than the top: the new line nests under the top;
//! - equal to the top: the top is closed and the new line is its sibling;
//! - shallower: levels are closed until one with indent `<=` the new one is
//!   on top. If a level was closed and none matches exactly, the line sits
//!   between two levels and parsing fails.
//!
//! # Custom rules
//!
//! Rules registered at run time are appliables called as `(rule word
//! nodes)` through the raw path, in a sandbox environment layered over the
//! builtins. A non-`None` result is the node for the word and ends the
//! chain.

use std::sync::{Arc, OnceLock};

use il_eval::{Args, Environment, List, Object, Unwind};
use il_lexer::{lines, SourceLine, TokenKind};
use parking_lot::RwLock;
use smallvec::{smallvec, SmallVec};

use crate::rules::NATIVE_RULES;
use crate::{ParseError, ROOT_CATEGORY};

#[derive(Default)]
struct GrammarData {
    custom_rules: RwLock<Vec<Object>>,
    sandbox: OnceLock<Environment>,
}

/// Shared parser configuration: the custom rule list and the sandbox
/// custom rules run in.
///
/// Clones share state, so a rule added through one handle (for example by
/// `AddCustomRule` during evaluation) applies to every later parse.
#[derive(Clone, Default)]
pub struct Grammar(Arc<GrammarData>);

impl Grammar {
    pub fn new() -> Self {
        Grammar::default()
    }

    /// Layer the custom-rule sandbox over `builtins`. Only the first call
    /// has an effect; returns whether this call installed it.
    pub fn install_sandbox(&self, builtins: &Environment) -> bool {
        self.0.sandbox.set(Environment::local(builtins)).is_ok()
    }

    fn sandbox(&self) -> Environment {
        self.0.sandbox.get().cloned().unwrap_or_default()
    }

    /// Register a custom rule. Non-appliable objects are refused.
    pub fn add_rule(&self, rule: Object) -> bool {
        if !rule.is_appliable() {
            return false;
        }
        self.0.custom_rules.write().push(rule);
        true
    }

    pub fn rule_count(&self) -> usize {
        self.0.custom_rules.read().len()
    }

    /// Parse a whole document.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub fn parse(&self, text: &str) -> Result<List, ParseError> {
        let root = List::new();
        root.add_category(ROOT_CATEGORY);
        let mut levels: Vec<(usize, List)> = Vec::new();

        for line in lines(text) {
            let line = line?;
            let line_list = open_line(&mut levels, &root, &line)?;
            self.fill_line(&line, line_list)?;
        }
        Ok(root)
    }

    /// Classify the tokens of one line into `line_list`.
    fn fill_line(&self, line: &SourceLine<'_>, line_list: List) -> Result<(), ParseError> {
        let mut open: SmallVec<[List; 4]> = smallvec![line_list];
        for token in &line.tokens {
            match token.kind {
                TokenKind::Open => {
                    let nested = List::new();
                    if let Some(current) = open.last() {
                        current.push(Object::List(nested.clone()));
                    }
                    open.push(nested);
                }
                TokenKind::Close => {
                    // A stray `)` never closes the line list itself.
                    if open.len() > 1 {
                        open.pop();
                    }
                }
                TokenKind::Word(word) => {
                    if let Some(current) = open.last() {
                        self.handle_word(word, current)
                            .map_err(|_| ParseError::EscapedReturn {
                                line: line.number,
                                word: word.to_owned(),
                            })?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Classify one word and append exactly one node to `nodes`.
    ///
    /// Built-in rules, then custom rules in registration order, then the
    /// identifier fallback. Errs only when a custom rule leaks a signal.
    pub fn handle_word(&self, word: &str, nodes: &List) -> Result<(), Unwind> {
        for rule in NATIVE_RULES {
            if let Some(node) = rule(self, word)? {
                nodes.push(node);
                return Ok(());
            }
        }
        if let Some(node) = self.apply_custom_rules(word, nodes)? {
            nodes.push(node);
            return Ok(());
        }
        nodes.push(Object::identifier(word));
        Ok(())
    }

    fn apply_custom_rules(&self, word: &str, nodes: &List) -> Result<Option<Object>, Unwind> {
        // Snapshot: a rule may itself register rules.
        let rules = self.0.custom_rules.read().clone();
        if rules.is_empty() {
            return Ok(None);
        }
        let sandbox = self.sandbox();
        for rule in &rules {
            let args = Args::from_vec(vec![Object::string(word), Object::List(nodes.clone())]);
            let Some(result) = rule.apply_raw(&sandbox, args) else {
                continue;
            };
            let node = result?;
            if !node.is_none() {
                tracing::trace!(word, "custom rule matched");
                return Ok(Some(node));
            }
        }
        Ok(None)
    }
}

/// Position a new line in the level stack and return its (empty) list.
fn open_line(
    levels: &mut Vec<(usize, List)>,
    root: &List,
    line: &SourceLine<'_>,
) -> Result<List, ParseError> {
    let indent = line.indent;
    let mut closed = false;
    while levels.last().is_some_and(|(top, _)| *top > indent) {
        levels.pop();
        closed = true;
    }
    match levels.last() {
        Some((top, _)) if *top == indent => {
            levels.pop();
        }
        Some(_) if closed => {
            return Err(ParseError::inconsistent_indentation(line.number, indent, line.offset));
        }
        None if closed && indent != 0 => {
            return Err(ParseError::inconsistent_indentation(line.number, indent, line.offset));
        }
        _ => {}
    }

    let parent = levels.last().map_or(root, |(_, list)| list);
    let line_list = List::new();
    parent.push(Object::List(line_list.clone()));
    levels.push((indent, line_list.clone()));
    Ok(line_list)
}
