//! Type conversions and collection constructors.

use il_eval::{format_float, Args, Environment, EvalResult, Object};

use crate::define;

pub(crate) fn register(env: &Environment) {
    define(env, "Identifier", |env, mut args| {
        Ok(match args.next_value(env)? {
            Object::String(text) => Object::Identifier(text),
            _ => Object::None,
        })
    });
    define(env, "Bool", |env, mut args| {
        Ok(Object::Boolean(args.next_value(env)?.is_truthy()))
    });
    define(env, "Int", |env, mut args| {
        Ok(Object::Integer(extract_integer(&args.next_value(env)?)))
    });
    define(env, "Float", |env, mut args| {
        Ok(Object::Float(extract_float(&args.next_value(env)?)))
    });
    define(env, "String", |env, mut args| {
        Ok(Object::string(extract_string(&args.next_value(env)?)))
    });
    define(env, "List", |env, args| Ok(Object::list(args.values(env)?)));
    define(env, "Dict", dict_func);
}

/// Integer view: booleans are `0`/`1`, floats truncate, strings parse as
/// decimal. Anything else is `0`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float to integer conversion truncates and saturates"
)]
pub fn extract_integer(object: &Object) -> i64 {
    match object {
        Object::Boolean(b) => i64::from(*b),
        Object::Integer(i) => *i,
        Object::Float(f) => *f as i64,
        Object::String(text) => text.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Float view, with the same rules as [`extract_integer`].
pub fn extract_float(object: &Object) -> f64 {
    match object {
        Object::Boolean(b) => f64::from(u8::from(*b)),
        Object::Integer(i) => int_to_float(*i),
        Object::Float(f) => *f,
        Object::String(text) => text.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Text view: scalars print, strings are kept, other iterables print as
/// `(a b c)`. Anything else is empty.
pub fn extract_string(object: &Object) -> String {
    match object {
        Object::Boolean(b) => b.to_string(),
        Object::Integer(i) => i.to_string(),
        Object::Float(f) => format_float(*f),
        Object::String(text) => text.to_string(),
        other => match other.iterate() {
            Some(items) => {
                let parts: Vec<String> = items.map(|item| extract_string(&item)).collect();
                format!("({})", parts.join(" "))
            }
            None => String::new(),
        },
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "mixed arithmetic follows float semantics"
)]
pub(crate) fn int_to_float(value: i64) -> f64 {
    value as f64
}

/// `Dict (k v)...`: a fresh environment filled from key/value pairs.
/// Stops at the first argument that is not a pair.
fn dict_func(env: &Environment, args: Args<'_>) -> EvalResult {
    let dict = Environment::new();
    for arg in args {
        let Some(mut pair) = arg.eval(env)?.iterate() else {
            break;
        };
        let (Some(key), Some(value)) = (pair.next(), pair.next()) else {
            break;
        };
        dict.store(&key, value);
    }
    Ok(Object::Environment(dict))
}

#[cfg(test)]
mod tests;
