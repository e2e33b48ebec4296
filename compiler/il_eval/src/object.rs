//! The value model.
//!
//! [`Object`] is a closed sum. Capabilities that several variants share
//! (being appliable, iterable, sizable, loadable) are exposed as methods
//! that answer `None` for the variants lacking them, so callers degrade to
//! `None` instead of failing.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use serde_json::Value;

use crate::list::slice_bounds;
use crate::{
    ensure_sufficient_stack, format_float, Appliable, Args, Environment, EvalResult,
    IteratorObject, List, NativeCallable, ObjectIter, UserCallable,
};

/// Interned-by-sharing identifier text.
pub type Name = Arc<str>;

/// Every value an il program can produce or manipulate.
#[derive(Clone, Default)]
pub enum Object {
    #[default]
    None,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(Arc<str>),
    Identifier(Name),
    List(List),
    Native(NativeCallable),
    User(UserCallable),
    Environment(Environment),
    Iterator(IteratorObject),
}

impl Object {
    pub fn string(text: impl Into<Arc<str>>) -> Self {
        Object::String(text.into())
    }

    pub fn identifier(name: impl Into<Name>) -> Self {
        Object::Identifier(name.into())
    }

    pub fn list(items: Vec<Object>) -> Self {
        Object::List(List::from_vec(items))
    }

    /// Wrap a host primitive.
    pub fn native<F>(name: impl Into<Name>, func: F) -> Self
    where
        F: Fn(&Environment, Args<'_>) -> EvalResult + Send + Sync + 'static,
    {
        Object::Native(NativeCallable::new(name, func))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Object::None)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Object::None => "None",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Float(_) => "Float",
            Object::String(_) => "String",
            Object::Identifier(_) => "Identifier",
            Object::List(_) => "List",
            Object::Native(_) => "NativeCallable",
            Object::User(_) => "UserCallable",
            Object::Environment(_) => "Environment",
            Object::Iterator(_) => "Iterator",
        }
    }

    pub fn as_identifier(&self) -> Option<&Name> {
        match self {
            Object::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Object::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Object::List(list) => Some(list),
            _ => None,
        }
    }

    /// Integer view for indexing: integers as-is, floats truncated.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float indices truncate toward zero"
    )]
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            Object::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            _ => None,
        }
    }

    pub fn as_appliable(&self) -> Option<&dyn Appliable> {
        match self {
            Object::Native(native) => Some(native),
            Object::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_appliable(&self) -> bool {
        self.as_appliable().is_some()
    }

    /// Truthiness used by `If`, `While` and the logic primitives.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::None => false,
            Object::Boolean(b) => *b,
            Object::Integer(i) => *i != 0,
            Object::Float(f) => *f != 0.0,
            Object::String(_) | Object::List(_) | Object::Environment(_) => {
                self.size().is_some_and(|size| size > 0)
            }
            _ => true,
        }
    }

    /// Evaluate in `env`. Only identifiers and lists do anything.
    pub fn eval(&self, env: &Environment) -> EvalResult {
        match self {
            Object::Identifier(name) => Ok(env.load_str(name)),
            Object::List(list) => ensure_sufficient_stack(|| list.eval(env)),
            other => Ok(other.clone()),
        }
    }

    /// Write the textual form, returning the number of bytes written.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<u64> {
        let text = match self {
            Object::Boolean(b) => b.to_string(),
            Object::Integer(i) => i.to_string(),
            Object::Float(f) => format_float(*f),
            Object::String(s) => return write_all(out, s),
            Object::List(list) => return list.write_to(out),
            Object::None
            | Object::Identifier(_)
            | Object::Native(_)
            | Object::User(_)
            | Object::Environment(_)
            | Object::Iterator(_) => return Ok(0),
        };
        write_all(out, &text)
    }

    /// The textual form as a string.
    pub fn to_text(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Element count for lists, character count for strings, binding count
    /// for environments.
    pub fn size(&self) -> Option<usize> {
        match self {
            Object::List(list) => Some(list.len()),
            Object::String(s) => Some(s.chars().count()),
            Object::Environment(env) => Some(env.size()),
            _ => None,
        }
    }

    /// Stream the elements of an iterable value.
    ///
    /// Lists stream a snapshot, strings their characters, environments
    /// their `(key value)` pairs and iterators their remaining steps.
    pub fn iterate(&self) -> Option<ObjectIter> {
        match self {
            Object::List(list) => Some(Box::new(list.to_vec().into_iter())),
            Object::String(s) => {
                let chars: Vec<Object> = s.chars().map(|c| Object::string(c.to_string())).collect();
                Some(Box::new(chars.into_iter()))
            }
            Object::Environment(env) => Some(Box::new(
                env.entries()
                    .into_iter()
                    .map(|(key, value)| Object::list(vec![Object::String(key), value])),
            )),
            Object::Iterator(iter) => Some(iter.drain()),
            _ => None,
        }
    }

    /// String-keyed member lookup used by `.`.
    pub fn member(&self, name: &str) -> Option<Object> {
        match self {
            Object::Environment(env) => env.lookup(name),
            _ => None,
        }
    }

    /// Value-keyed lookup used by `[]`.
    pub fn load(&self, key: &Object) -> Option<Object> {
        match self {
            Object::List(list) => list.load(key),
            Object::String(s) => load_from_str(s, key),
            Object::Environment(env) => env.load(key),
            _ => None,
        }
    }

    /// Value-keyed store used by `[]=`; `false` when nothing was stored.
    pub fn store(&self, key: &Object, value: Object) -> bool {
        match self {
            Object::List(list) => list.store(key, value),
            Object::Environment(env) => env.store(key, value),
            _ => false,
        }
    }

    /// Apply through the raw path: user callables bind the arguments as
    /// given, without evaluating them. `None` if not appliable.
    pub fn apply_raw(&self, env: &Environment, args: Args<'_>) -> Option<EvalResult> {
        match self {
            Object::Native(native) => Some(native.apply(env, args)),
            Object::User(user) => Some(user.apply_raw(env, args)),
            _ => None,
        }
    }

    /// Apply with `data` exposed as read-only bindings. `None` if not
    /// appliable.
    pub fn apply_with_data(
        &self,
        data: &Value,
        env: &Environment,
        args: Args<'_>,
    ) -> Option<EvalResult> {
        match self {
            Object::Native(native) => Some(native.apply_with_data(data, env, args)),
            Object::User(user) => Some(user.apply_with_data(data, env, args)),
            _ => None,
        }
    }
}

fn write_all(out: &mut dyn Write, text: &str) -> io::Result<u64> {
    out.write_all(text.as_bytes())?;
    Ok(text.len() as u64)
}

/// Character-indexed lookup into a string.
fn load_from_str(text: &str, key: &Object) -> Option<Object> {
    match key {
        Object::Integer(_) | Object::Float(_) => {
            let index = usize::try_from(key.as_index()?).ok()?;
            text.chars().nth(index).map(|c| Object::string(c.to_string()))
        }
        Object::List(bounds) => {
            let chars: Vec<char> = text.chars().collect();
            let (start, end) = slice_bounds(bounds, chars.len())?;
            Some(Object::string(chars[start..end].iter().collect::<String>()))
        }
        _ => None,
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::None, Object::None) => true,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::String(a), Object::String(b)) | (Object::Identifier(a), Object::Identifier(b)) => {
                a == b
            }
            (Object::List(a), Object::List(b)) => a == b,
            (Object::Native(a), Object::Native(b)) => a.ptr_eq(b),
            (Object::User(a), Object::User(b)) => a.ptr_eq(b),
            (Object::Environment(a), Object::Environment(b)) => a.ptr_eq(b),
            (Object::Iterator(a), Object::Iterator(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::None => f.write_str("None"),
            Object::Boolean(b) => write!(f, "{b}"),
            Object::Integer(i) => write!(f, "{i}"),
            Object::Float(x) => write!(f, "{x:?}"),
            Object::String(s) => write!(f, "{s:?}"),
            Object::Identifier(name) => f.write_str(name),
            Object::List(list) => fmt::Debug::fmt(list, f),
            Object::Native(native) => fmt::Debug::fmt(native, f),
            Object::User(user) => fmt::Debug::fmt(user, f),
            Object::Environment(env) => fmt::Debug::fmt(env, f),
            Object::Iterator(iter) => fmt::Debug::fmt(iter, f),
        }
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Object::Float(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::string(value)
    }
}

impl From<List> for Object {
    fn from(value: List) -> Self {
        Object::List(value)
    }
}

impl From<Environment> for Object {
    fn from(value: Environment) -> Self {
        Object::Environment(value)
    }
}
