//! Iterator values.
//!
//! `Iter`, `Range` and `Enumerate` produce stateful iterator objects that
//! `Next` advances one step at a time and `For` drains. The state is shared
//! between clones: two bindings of the same iterator advance together.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::Object;

/// A boxed stream of objects, as produced by [`Object::iterate`].
pub type ObjectIter = Box<dyn Iterator<Item = Object> + Send>;

struct IterState {
    inner: ObjectIter,
    closed: bool,
}

/// Shared, closeable iterator over objects.
#[derive(Clone)]
pub struct IteratorObject(Arc<Mutex<IterState>>);

impl IteratorObject {
    pub fn new(inner: impl Iterator<Item = Object> + Send + 'static) -> Self {
        IteratorObject(Arc::new(Mutex::new(IterState {
            inner: Box::new(inner),
            closed: false,
        })))
    }

    /// Advance one step; `None` once exhausted or closed.
    pub fn next_object(&self) -> Option<Object> {
        let mut state = self.0.lock();
        if state.closed {
            return None;
        }
        let next = state.inner.next();
        if next.is_none() {
            state.closed = true;
        }
        next
    }

    /// Stop the iterator; later steps yield nothing.
    pub fn close(&self) {
        let mut state = self.0.lock();
        state.closed = true;
        state.inner = Box::new(std::iter::empty());
    }

    /// Drain through this handle, one locked step at a time.
    pub fn drain(&self) -> ObjectIter {
        let shared = self.clone();
        Box::new(std::iter::from_fn(move || shared.next_object()))
    }

    pub fn ptr_eq(&self, other: &IteratorObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for IteratorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Iterator(..)")
    }
}
