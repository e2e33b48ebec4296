//! Control flow, binding and member access.
//!
//! `If`, `For`, `While`, `:=` and `Del` are special forms: they inspect
//! their raw arguments before deciding what to evaluate. Loop bodies run
//! in the enclosing environment, so a variable bound inside a loop stays
//! visible after it (and closures created in the body all see its last
//! value).

use il_eval::{Args, Environment, EvalResult, Name, Object, Unwind};
use il_parse::SET_NAME;

use crate::define;

pub(crate) fn register(env: &Environment) {
    define(env, "If", if_form);
    define(env, "For", for_form);
    define(env, "While", while_form);
    define(env, SET_NAME, set_form);
    define(env, ".", member_form);
    define(env, "[]", load_form);
    define(env, "[]=", store_form);
    define(env, "Del", del_form);
    define(env, "GetEnv", |env, _| Ok(Object::Environment(env.clone())));
    define(env, "Eval", |env, mut args| args.next_value(env)?.eval(env));
}

/// `If cond then [else]`: only the chosen branch is evaluated.
fn if_form(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let condition = args.next_value(env)?;
    let then = args.next_arg();
    if condition.is_truthy() {
        then.eval(env)
    } else {
        args.next_value(env)
    }
}

/// `For var iterable body...`
///
/// `var` is an identifier, or a list of identifiers to destructure each
/// element into (non-iterable elements are skipped). The result lists the
/// non-`None` values of every body line of every iteration.
fn for_form(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let target = args.next_arg();
    let Some(items) = args.next_value(env)?.iterate() else {
        return Ok(Object::list(Vec::new()));
    };
    let body: Vec<Object> = args.collect();
    let pattern = match &target {
        Object::List(list) => Some(identifiers(&list.to_vec())),
        _ => None,
    };

    let mut results = Vec::new();
    for item in items {
        match (&pattern, &target) {
            (Some(names), _) => {
                let Some(parts) = item.iterate() else {
                    continue;
                };
                bind_positional(env, names, parts);
            }
            (None, Object::Identifier(name)) => env.store_str(name.clone(), item),
            (None, _) => {}
        }
        run_body(&body, env, &mut results)?;
    }
    Ok(Object::list(results))
}

/// `While cond body...`: the condition is re-evaluated before each pass.
fn while_form(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let condition = args.next_arg();
    let body: Vec<Object> = args.collect();
    let mut results = Vec::new();
    while condition.eval(env)?.is_truthy() {
        run_body(&body, env, &mut results)?;
    }
    Ok(Object::list(results))
}

fn run_body(body: &[Object], env: &Environment, results: &mut Vec<Object>) -> Result<(), Unwind> {
    for line in body {
        let value = line.eval(env)?;
        if !value.is_none() {
            results.push(value);
        }
    }
    Ok(())
}

/// `:= name value` binds locally; `:= (a b) iterable` destructures, with
/// missing positions bound to `None`.
fn set_form(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let target = args.next_arg();
    let value = args.next_value(env)?;
    match target {
        Object::Identifier(name) => env.store_str(name, value),
        Object::List(list) => {
            if let Some(parts) = value.iterate() {
                bind_positional(env, &identifiers(&list.to_vec()), parts);
            }
        }
        _ => {}
    }
    Ok(Object::None)
}

fn identifiers(items: &[Object]) -> Vec<Name> {
    items
        .iter()
        .filter_map(|item| item.as_identifier().cloned())
        .collect()
}

fn bind_positional(env: &Environment, names: &[Name], mut values: impl Iterator<Item = Object>) {
    for name in names {
        env.store_str(name.clone(), values.next().unwrap_or_default());
    }
}

/// `. base name...`: walk string-keyed members; any missing step is `None`.
fn member_form(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let mut current = args.next_value(env)?;
    for step in args {
        let key = match &step {
            Object::Identifier(name) | Object::String(name) => name.clone(),
            _ => return Ok(Object::None),
        };
        match current.member(&key) {
            Some(next) => current = next,
            None => return Ok(Object::None),
        }
    }
    Ok(current)
}

/// `[] base key...`: walk evaluated keys through lists, strings and
/// environments.
fn load_form(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let mut current = args.next_value(env)?;
    for key in args {
        let key = key.eval(env)?;
        match current.load(&key) {
            Some(next) => current = next,
            None => return Ok(Object::None),
        }
    }
    Ok(current)
}

/// `[]= base key... value`: walk every key but the last, then store.
fn store_form(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let mut current = args.next_value(env)?;
    let mut rest = args.values(env)?;
    let (Some(value), Some(last_key)) = (rest.pop(), rest.pop()) else {
        return Ok(Object::None);
    };
    for key in rest {
        match current.load(&key) {
            Some(next) => current = next,
            None => return Ok(Object::None),
        }
    }
    if !current.store(&last_key, value) {
        tracing::trace!(target_type = current.type_name(), "store ignored");
    }
    Ok(Object::None)
}

/// `Del dict key` removes a key from an environment value; `Del name`
/// removes a local binding.
fn del_form(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let target = args.next_arg();
    match args.next() {
        Some(key) => {
            if let Object::Environment(dict) = target.eval(env)? {
                dict.delete(&key.eval(env)?);
            }
        }
        None => {
            if let Object::Identifier(name) = &target {
                env.delete_str(name);
            }
        }
    }
    Ok(Object::None)
}

#[cfg(test)]
mod tests;
