//! Evaluation core for the il template language.
//!
//! il programs are their own syntax trees: the parser produces nested
//! [`List`]s of [`Object`]s and evaluation walks those lists against a chain
//! of [`Environment`]s. This crate owns everything that is needed to run such
//! a tree and nothing that is needed to build one:
//!
//! - [`Object`]: the closed value model, with textual output and evaluation.
//! - [`List`]: the shared, growable, category-tagged sequence type.
//! - [`Environment`]: frames, read-only data overlays and merged views.
//! - [`UserCallable`] and [`NativeCallable`]: functions, macros and host
//!   primitives, applied through the [`Appliable`] trait.
//! - [`Unwind`]: the typed non-local `Return` signal threaded through every
//!   [`EvalResult`].
//!
//! # Evaluation rules
//!
//! Atoms evaluate to themselves. An identifier evaluates to its binding, or
//! `None` when unbound. A list whose evaluated head is appliable is a call:
//! the head receives the remaining elements *unevaluated*, which is how
//! special forms see raw syntax. Any other list is data and evaluates
//! element-wise into a new list.
//!
//! # Thread safety
//!
//! Every value is `Send + Sync`. Shared state sits behind `Arc` and
//! `parking_lot` locks so modules evaluated on import worker threads can be
//! handed to the threads that requested them.

mod args;
mod callable;
mod environment;
mod host;
mod iter;
mod list;
mod number;
mod object;
mod stack;
mod unwind;

pub use args::Args;
pub use callable::{
    Appliable, CallableKind, NativeCallable, NativeFn, Params, UserCallable, RETURN_NAME,
};
pub use environment::Environment;
pub use host::from_host;
pub use iter::{IteratorObject, ObjectIter};
pub use list::List;
pub use number::format_float;
pub use object::{Name, Object};
pub use stack::ensure_sufficient_stack;
pub use unwind::{EvalResult, FrameId, Unwind};
