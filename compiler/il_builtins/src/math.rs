//! Arithmetic.
//!
//! Integer arithmetic wraps on overflow. Mixing an integer with a float
//! gives a float. A non-numeric operand, or a zero divisor, makes the whole
//! operation `None`.
//!
//! Every operator `op` has a compound form `op=`: `+= x 1` rewrites to
//! `:= x (+ x 1)` and evaluates that in the caller's environment.

use il_eval::{Args, Environment, EvalResult, Object};
use il_parse::SET_NAME;

use crate::conversion::int_to_float;
use crate::define;

pub(crate) fn register(env: &Environment) {
    define(env, "+", |env, args| {
        accumulate(env, args, 0, i64::wrapping_add, |a, b| a + b)
    });
    define(env, "*", |env, args| {
        accumulate(env, args, 1, i64::wrapping_mul, |a, b| a * b)
    });
    define(env, "-", minus_func);
    define(env, "/", divide_func);
    define(env, "//", |env, args| integer_op(env, args, i64::wrapping_div));
    define(env, "%", |env, args| integer_op(env, args, i64::wrapping_rem));

    define(env, "+=", |env, args| compound(env, args, "+"));
    define(env, "-=", |env, args| compound(env, args, "-"));
    define(env, "*=", |env, args| compound(env, args, "*"));
    define(env, "/=", |env, args| compound(env, args, "/"));
    define(env, "//=", |env, args| compound(env, args, "//"));
    define(env, "%=", |env, args| compound(env, args, "%"));
}

/// Fold every operand, keeping integer and float parts apart until the end
/// so that integer-only input stays exact.
fn accumulate(
    env: &Environment,
    args: Args<'_>,
    identity: i64,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    let mut int_acc = identity;
    let mut float_acc: Option<f64> = None;
    for arg in args {
        match arg.eval(env)? {
            Object::Integer(i) => int_acc = int_op(int_acc, i),
            Object::Float(f) => {
                float_acc = Some(float_op(float_acc.unwrap_or(int_to_float(identity)), f));
            }
            _ => return Ok(Object::None),
        }
    }
    Ok(match float_acc {
        Some(float) => Object::Float(float_op(int_to_float(int_acc), float)),
        None => Object::Integer(int_acc),
    })
}

fn minus_func(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let left = args.next_value(env)?;
    if !matches!(left, Object::Integer(_) | Object::Float(_)) {
        return Ok(Object::None);
    }
    Ok(match (left, args.next_value(env)?) {
        (Object::Integer(a), Object::Integer(b)) => Object::Integer(a.wrapping_sub(b)),
        (Object::Integer(a), Object::Float(b)) => Object::Float(int_to_float(a) - b),
        (Object::Float(a), Object::Integer(b)) => Object::Float(a - int_to_float(b)),
        (Object::Float(a), Object::Float(b)) => Object::Float(a - b),
        _ => Object::None,
    })
}

/// `/` always answers a float.
fn divide_func(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let dividend = match args.next_value(env)? {
        Object::Integer(i) => int_to_float(i),
        Object::Float(f) => f,
        _ => return Ok(Object::None),
    };
    let divisor = match args.next_value(env)? {
        Object::Integer(i) => int_to_float(i),
        Object::Float(f) => f,
        _ => return Ok(Object::None),
    };
    if divisor == 0.0 {
        return Ok(Object::None);
    }
    Ok(Object::Float(dividend / divisor))
}

/// `//` and `%`: integer operands only.
fn integer_op(env: &Environment, mut args: Args<'_>, op: fn(i64, i64) -> i64) -> EvalResult {
    let Object::Integer(left) = args.next_value(env)? else {
        return Ok(Object::None);
    };
    match args.next_value(env)? {
        Object::Integer(right) if right != 0 => Ok(Object::Integer(op(left, right))),
        _ => Ok(Object::None),
    }
}

fn compound(env: &Environment, mut args: Args<'_>, operator: &'static str) -> EvalResult {
    let target = args.next_arg();
    let mut call = vec![Object::identifier(operator), target.clone()];
    call.extend(args);
    Object::list(vec![Object::identifier(SET_NAME), target, Object::list(call)]).eval(env)
}
