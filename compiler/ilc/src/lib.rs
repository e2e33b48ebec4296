//! The il template engine.
//!
//! An [`Engine`] owns the builtins, the grammar and the import cache.
//! Loading a file imports it like any module and keeps the environment it
//! produced; the resulting [`Template`] renders by applying that module's
//! `Main` with the caller's data visible as read-only bindings.
//!
//! ```no_run
//! use ilc::Engine;
//! use serde_json::json;
//!
//! let engine = Engine::builder().build()?;
//! let page = engine.parse_path("templates/index.il")?;
//! let html = page.render(&json!({ "title": "Hello" }))?;
//! # Ok::<(), ilc::TemplateError>(())
//! ```

mod engine;
mod error;
mod template;
mod template_set;

use std::sync::Once;

pub use engine::{Engine, EngineBuilder};
pub use error::TemplateError;
pub use il_import::ImportPolicy;
pub use template::Template;
pub use template_set::TemplateSet;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. With `IL_LOG_TREE` also set,
/// spans render as an indented tree instead of flat lines. Safe to call
/// more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var("IL_LOG_TREE").is_ok() {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
