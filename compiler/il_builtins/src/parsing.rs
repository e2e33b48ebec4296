//! Hooks into the parser: list categories, custom rules and word
//! classification at run time.

use il_eval::{Args, Environment, EvalResult, List, Object, Unwind};
use il_parse::Grammar;

use crate::define;

pub(crate) fn register(env: &Environment, grammar: &Grammar) {
    define(env, "AddCategory", add_category_func);
    define(env, "HasCategory", has_category_func);

    let rules = grammar.clone();
    define(env, "AddCustomRule", move |env, mut args| {
        let rule = args.next_value(env)?;
        if !rules.add_rule(rule) {
            tracing::debug!("AddCustomRule ignored a non-appliable rule");
        }
        Ok(Object::None)
    });

    let classifier = grammar.clone();
    define(env, "ParseWord", move |env, mut args| {
        let word = match args.next_value(env)? {
            Object::String(word) if !word.is_empty() => word,
            _ => return Ok(Object::None),
        };
        let nodes = List::new();
        classifier.handle_word(&word, &nodes)?;
        Ok(nodes.first().unwrap_or_default())
    });
}

/// Evaluate `(list category)`; `None` unless both are present and typed.
fn list_and_category(
    env: &Environment,
    mut args: Args<'_>,
) -> Result<Option<(List, String)>, Unwind> {
    let (Some(list), Some(category)) = (args.next(), args.next()) else {
        return Ok(None);
    };
    let Object::List(list) = list.eval(env)? else {
        return Ok(None);
    };
    Ok(match category.eval(env)? {
        Object::String(category) => Some((list, category.to_string())),
        _ => None,
    })
}

fn add_category_func(env: &Environment, args: Args<'_>) -> EvalResult {
    if let Some((list, category)) = list_and_category(env, args)? {
        list.add_category(&category);
    }
    Ok(Object::None)
}

fn has_category_func(env: &Environment, args: Args<'_>) -> EvalResult {
    let found = list_and_category(env, args)?
        .is_some_and(|(list, category)| list.has_category(&category));
    Ok(Object::Boolean(found))
}

#[cfg(test)]
mod tests;
