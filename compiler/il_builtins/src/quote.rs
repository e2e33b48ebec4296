//! Quasi-quotation.

use il_eval::{ensure_sufficient_stack, Environment, EvalResult, List, Object};

use crate::define;

/// Head identifier marking an evaluated hole inside a `Quote`.
pub const UNQUOTE_NAME: &str = "Unquote";

pub(crate) fn register(env: &Environment) {
    define(env, "Quote", |env, mut args| expand_unquote(&args.next_arg(), env));
    define(env, UNQUOTE_NAME, |env, mut args| args.next_value(env));
}

/// Copy `object` with every `(Unquote x)` sub-list replaced by the value
/// of `x` in `env`.
///
/// Lists are rebuilt (keeping their categories), never mutated; any other
/// object is returned as is.
pub fn expand_unquote(object: &Object, env: &Environment) -> EvalResult {
    let Object::List(list) = object else {
        return Ok(object.clone());
    };
    let items = list.to_vec();
    match items.first() {
        None => return Ok(object.clone()),
        Some(Object::Identifier(head)) if &**head == UNQUOTE_NAME => {
            return items.get(1).cloned().unwrap_or_default().eval(env);
        }
        Some(_) => {}
    }
    let expanded = ensure_sufficient_stack(|| {
        items
            .iter()
            .map(|item| expand_unquote(item, env))
            .collect::<Result<Vec<_>, _>>()
    })?;
    Ok(Object::List(List::with_categories(expanded, list.categories())))
}
