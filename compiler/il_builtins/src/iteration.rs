//! Iterators and collection growth.

use std::cmp::Ordering;

use il_eval::{Args, Environment, EvalResult, IteratorObject, Object};

use crate::define;

pub(crate) fn register(env: &Environment) {
    define(env, "Range", range_func);
    define(env, "Enumerate", enumerate_func);
    define(env, "Iter", iter_func);
    define(env, "Next", next_func);
    define(env, "Close", close_func);
    define(env, "Size", size_func);
    define(env, "Add", add_func);
    define(env, "AddAll", add_all_func);
}

/// Integer range stepping from `current` toward `end`, exclusive.
///
/// A zero step yields nothing; a negative step counts down while above
/// `end`.
struct RangeIter {
    current: i64,
    end: i64,
    step: i64,
}

impl Iterator for RangeIter {
    type Item = Object;

    fn next(&mut self) -> Option<Object> {
        let in_range = match self.step.cmp(&0) {
            Ordering::Greater => self.current < self.end,
            Ordering::Less => self.current > self.end,
            Ordering::Equal => false,
        };
        if !in_range {
            return None;
        }
        let value = self.current;
        self.current = self.current.saturating_add(self.step);
        Some(Object::Integer(value))
    }
}

/// `Range end` or `Range start end [step]`.
fn range_func(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let mut range = RangeIter {
        current: 0,
        end: 0,
        step: 1,
    };
    if let Object::Integer(first) = args.next_value(env)? {
        match args.next_value(env)? {
            Object::Integer(end) => {
                range.current = first;
                range.end = end;
                if let Object::Integer(step) = args.next_value(env)? {
                    range.step = step;
                }
            }
            _ => range.end = first,
        }
    }
    Ok(Object::Iterator(IteratorObject::new(range)))
}

/// `Enumerate iterable`: `(index value)` pairs, counting from zero.
fn enumerate_func(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let Some(items) = args.next_value(env)?.iterate() else {
        return Ok(Object::None);
    };
    let pairs = (0_i64..)
        .zip(items)
        .map(|(index, value)| Object::list(vec![Object::Integer(index), value]));
    Ok(Object::Iterator(IteratorObject::new(pairs)))
}

/// `Iter iterable`: an iterator over it. Iterators are returned as is.
fn iter_func(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let value = args.next_value(env)?;
    if let Object::Iterator(_) = value {
        return Ok(value);
    }
    Ok(value
        .iterate()
        .map_or(Object::None, |items| Object::Iterator(IteratorObject::new(items))))
}

/// `Next iterator`: the list `(value found)`.
fn next_func(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let step = match args.next_value(env)? {
        Object::Iterator(iter) => iter.next_object(),
        _ => None,
    };
    let found = step.is_some();
    Ok(Object::list(vec![step.unwrap_or_default(), Object::Boolean(found)]))
}

fn close_func(env: &Environment, mut args: Args<'_>) -> EvalResult {
    if let Object::Iterator(iter) = args.next_value(env)? {
        iter.close();
    }
    Ok(Object::None)
}

fn size_func(env: &Environment, mut args: Args<'_>) -> EvalResult {
    Ok(args
        .next_value(env)?
        .size()
        .map_or(Object::None, |size| {
            Object::Integer(i64::try_from(size).unwrap_or(i64::MAX))
        }))
}

/// `Add list value...`: append each evaluated value.
fn add_func(env: &Environment, mut args: Args<'_>) -> EvalResult {
    if let Object::List(list) = args.next_value(env)? {
        list.extend(args.values(env)?);
    }
    Ok(Object::None)
}

/// `AddAll list iterable...`: append the elements of each iterable,
/// stopping at the first argument that is not iterable.
fn add_all_func(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let Object::List(list) = args.next_value(env)? else {
        return Ok(Object::None);
    };
    for arg in args {
        let Some(items) = arg.eval(env)?.iterate() else {
            break;
        };
        list.extend(items);
    }
    Ok(Object::None)
}

#[cfg(test)]
mod tests;
