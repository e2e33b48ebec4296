//! Shared, growable, category-tagged lists.
//!
//! A [`List`] is both the syntax-tree node type and the runtime sequence
//! type. Clones share storage: pushing through one handle is visible through
//! every other, which is what lets `Add` mutate a list bound elsewhere.
//!
//! Locks are never held across evaluation. Every operation that evaluates
//! elements works on a snapshot taken with [`List::to_vec`], so evaluated
//! code may freely mutate the list it came from.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::{Args, Environment, EvalResult, Name, Object};

#[derive(Default)]
struct ListData {
    items: Vec<Object>,
    categories: Vec<Name>,
}

/// Ordered, mutable sequence of objects with a set of string categories.
#[derive(Clone, Default)]
pub struct List(Arc<RwLock<ListData>>);

impl List {
    pub fn new() -> Self {
        List::default()
    }

    pub fn from_vec(items: Vec<Object>) -> Self {
        List::with_categories(items, Vec::new())
    }

    pub fn with_categories(items: Vec<Object>, categories: Vec<Name>) -> Self {
        List(Arc::new(RwLock::new(ListData { items, categories })))
    }

    pub fn len(&self) -> usize {
        self.0.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Object> {
        self.0.read().items.get(index).cloned()
    }

    pub fn first(&self) -> Option<Object> {
        self.get(0)
    }

    /// Replace the element at `index`; `false` when out of range.
    pub fn set(&self, index: usize, value: Object) -> bool {
        match self.0.write().items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn push(&self, value: Object) {
        self.0.write().items.push(value);
    }

    pub fn extend(&self, values: impl IntoIterator<Item = Object>) {
        self.0.write().items.extend(values);
    }

    /// Snapshot of the current elements.
    pub fn to_vec(&self) -> Vec<Object> {
        self.0.read().items.clone()
    }

    pub fn categories(&self) -> Vec<Name> {
        self.0.read().categories.clone()
    }

    pub fn add_category(&self, category: &str) {
        let mut data = self.0.write();
        if !data.categories.iter().any(|c| &**c == category) {
            data.categories.push(Name::from(category));
        }
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.0.read().categories.iter().any(|c| &**c == category)
    }

    /// Two handles to the same storage.
    pub fn ptr_eq(&self, other: &List) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Evaluate this list as code.
    ///
    /// Empty lists are `None`. An appliable head is applied to the raw tail;
    /// otherwise every element is evaluated into a fresh list carrying the
    /// same categories.
    pub fn eval(&self, env: &Environment) -> EvalResult {
        let items = self.to_vec();
        let mut rest = items.into_iter();
        let Some(head) = rest.next() else {
            return Ok(Object::None);
        };
        let head = head.eval(env)?;
        if let Some(callable) = head.as_appliable() {
            return callable.apply(env, Args::new(rest));
        }
        let mut values = Vec::with_capacity(rest.len() + 1);
        values.push(head);
        for item in rest {
            values.push(item.eval(env)?);
        }
        Ok(Object::List(List::with_categories(
            values,
            self.categories(),
        )))
    }

    /// Value-keyed lookup used by `[]`.
    ///
    /// Integers (and truncated floats) index, an iterable key of up to two
    /// integers slices (`()` whole list, `(start)` to the end,
    /// `(start end)`). Anything out of range is a miss.
    pub fn load(&self, key: &Object) -> Option<Object> {
        match key {
            Object::Integer(_) | Object::Float(_) => {
                let index = usize::try_from(key.as_index()?).ok()?;
                self.get(index)
            }
            Object::List(bounds) => {
                let items = self.to_vec();
                let (start, end) = slice_bounds(bounds, items.len())?;
                Some(Object::list(items[start..end].to_vec()))
            }
            _ => None,
        }
    }

    /// Value-keyed store used by `[]=`; only in-range integer indices.
    pub fn store(&self, key: &Object, value: Object) -> bool {
        match key.as_index().and_then(|i| usize::try_from(i).ok()) {
            Some(index) => self.set(index, value),
            None => false,
        }
    }

    /// Write every element's textual form in order.
    pub fn write_to(&self, out: &mut dyn std::io::Write) -> std::io::Result<u64> {
        let mut written = 0;
        for item in self.to_vec() {
            written += item.write_to(out)?;
        }
        Ok(written)
    }
}

/// Resolve a slice key against a sequence of `len` elements.
pub(crate) fn slice_bounds(bounds: &List, len: usize) -> Option<(usize, usize)> {
    let bounds = bounds.to_vec();
    let index = |i: usize| -> Option<usize> {
        usize::try_from(bounds.get(i)?.as_index()?).ok()
    };
    let (start, end) = match bounds.len() {
        0 => (0, len),
        1 => (index(0)?, len),
        _ => (index(0)?, index(1)?),
    };
    (start <= end && end <= len).then_some((start, end))
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.to_vec() == other.to_vec()
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let categories = self.categories();
        if !categories.is_empty() {
            write!(f, "#{categories:?}")?;
        }
        f.debug_list().entries(self.to_vec()).finish()
    }
}
