//! Non-local control flow.
//!
//! A `Return` inside a user callable must leave every enclosing special form
//! (`If`, `For`, nested calls to other forms) and stop exactly at the call
//! frame that bound it. The signal travels as the `Err` side of
//! [`EvalResult`], so `?` threads it through native code without any
//! ambient unwinding.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::Object;

/// Identity of one user-callable invocation.
///
/// Every call allocates a fresh id; the `Return` primitive bound in that
/// call's frame tags its signal with it, and only the same call catches it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

impl FrameId {
    /// Allocate an id never handed out before in this process.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        FrameId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A control signal propagating up the evaluation stack.
#[derive(Clone, Debug, Error)]
pub enum Unwind {
    /// `Return` was called; `value` is the kind-specific payload.
    #[error("`Return` escaped the call frame that bound it ({frame:?})")]
    Return { frame: FrameId, value: Object },
}

/// Result of evaluating or applying anything.
pub type EvalResult = Result<Object, Unwind>;
