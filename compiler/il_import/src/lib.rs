//! Module imports for the il template language.
//!
//! `Import "path"` evaluates another file once and copies its top-level
//! bindings into the importing environment. Every import, from any
//! thread, goes through one [`ImportCache`]:
//!
//! - a coordinator thread owns the path-to-module map and is the only code
//!   that reads or writes it;
//! - the first request for a path spawns one worker that reads, parses and
//!   evaluates the module; requests arriving meanwhile wait for the same
//!   result;
//! - results, failures included, are kept for the life of the cache.
//!
//! Paths are resolved against the directory of the importing module and
//! normalised lexically, so `a/../b.il` and `b.il` share one entry.
//!
//! Cyclic imports (including a module importing itself) block forever:
//! each worker waits on a result that only its own completion can
//! produce.

mod cache;
mod error;
mod source;

pub use cache::{ImportCache, ImportPolicy, Module, ModuleResult, IMPORT_NAME};
pub use error::ImportError;
pub use source::{FsSource, ModuleSource};
