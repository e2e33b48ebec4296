//! Argument streams handed to appliables.

use std::fmt;

use crate::{Environment, EvalResult, Object};

/// The remaining, unevaluated elements of a call list.
///
/// Appliables pull what they need: special forms take raw syntax with
/// [`Args::next_arg`], ordinary primitives evaluate each element with
/// [`Args::next_value`]. Exhausted streams keep yielding `None` from
/// `next_arg`, so a missing argument reads the same as an explicit `None`.
pub struct Args<'a> {
    inner: Box<dyn Iterator<Item = Object> + 'a>,
}

impl<'a> Args<'a> {
    pub fn new(items: impl Iterator<Item = Object> + 'a) -> Self {
        Args {
            inner: Box::new(items),
        }
    }

    pub fn from_vec(items: Vec<Object>) -> Args<'static> {
        Args::new(items.into_iter())
    }

    pub fn empty() -> Args<'static> {
        Args::new(std::iter::empty())
    }

    /// Next raw argument, or `None` once exhausted.
    pub fn next_arg(&mut self) -> Object {
        self.inner.next().unwrap_or_default()
    }

    /// Next argument evaluated in `env`; `None` once exhausted.
    pub fn next_value(&mut self, env: &Environment) -> EvalResult {
        self.next_arg().eval(env)
    }

    /// Evaluate every remaining argument in order.
    pub fn values(self, env: &Environment) -> Result<Vec<Object>, crate::Unwind> {
        self.map(|arg| arg.eval(env)).collect()
    }
}

impl Iterator for Args<'_> {
    type Item = Object;

    fn next(&mut self) -> Option<Object> {
        self.inner.next()
    }
}

impl fmt::Debug for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Args(..)")
    }
}
