//! Boolean logic, equality and ordering.
//!
//! `And` and `Or` short-circuit. Comparisons chain: `< a b c` holds when
//! every adjacent pair holds, and stops evaluating at the first pair that
//! fails. Integers and floats compare across types; strings compare with
//! strings; every other pairing is unordered and compares `false`.

use std::cmp::Ordering;

use il_eval::{Args, Environment, EvalResult, Object};

use crate::conversion::int_to_float;
use crate::define;

pub(crate) fn register(env: &Environment) {
    define(env, "Not", |env, mut args| {
        Ok(Object::Boolean(!args.next_value(env)?.is_truthy()))
    });
    define(env, "And", and_func);
    define(env, "Or", or_func);
    define(env, "==", |env, args| equality(env, args, true));
    define(env, "!=", |env, args| equality(env, args, false));
    define(env, ">", |env, args| compare_chain(env, args, Ordering::is_gt));
    define(env, ">=", |env, args| compare_chain(env, args, Ordering::is_ge));
    define(env, "<", |env, args| compare_chain(env, args, Ordering::is_lt));
    define(env, "<=", |env, args| compare_chain(env, args, Ordering::is_le));
}

fn and_func(env: &Environment, args: Args<'_>) -> EvalResult {
    for arg in args {
        if !arg.eval(env)?.is_truthy() {
            return Ok(Object::Boolean(false));
        }
    }
    Ok(Object::Boolean(true))
}

fn or_func(env: &Environment, args: Args<'_>) -> EvalResult {
    for arg in args {
        if arg.eval(env)?.is_truthy() {
            return Ok(Object::Boolean(true));
        }
    }
    Ok(Object::Boolean(false))
}

/// Needs exactly two operands to answer `true` either way.
fn equality(env: &Environment, mut args: Args<'_>, expected: bool) -> EvalResult {
    let (Some(left), Some(right)) = (args.next(), args.next()) else {
        return Ok(Object::Boolean(false));
    };
    let equal = values_equal(&left.eval(env)?, &right.eval(env)?);
    Ok(Object::Boolean(equal == expected))
}

fn values_equal(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::None, Object::None) => true,
        (Object::Boolean(a), Object::Boolean(b)) => a == b,
        (Object::String(a), Object::String(b)) => a == b,
        _ => compare_values(left, right) == Some(Ordering::Equal),
    }
}

fn compare_values(left: &Object, right: &Object) -> Option<Ordering> {
    match (left, right) {
        (Object::Integer(a), Object::Integer(b)) => Some(a.cmp(b)),
        (Object::Integer(a), Object::Float(b)) => int_to_float(*a).partial_cmp(b),
        (Object::Float(a), Object::Integer(b)) => a.partial_cmp(&int_to_float(*b)),
        (Object::Float(a), Object::Float(b)) => a.partial_cmp(b),
        (Object::String(a), Object::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn compare_chain(env: &Environment, mut args: Args<'_>, accept: fn(Ordering) -> bool) -> EvalResult {
    let Some(first) = args.next() else {
        return Ok(Object::Boolean(false));
    };
    let mut previous = first.eval(env)?;
    let mut holds = false;
    for arg in args {
        let current = arg.eval(env)?;
        holds = compare_values(&previous, &current).is_some_and(accept);
        if !holds {
            break;
        }
        previous = current;
    }
    Ok(Object::Boolean(holds))
}
