//! The builtins root environment.
//!
//! [`build_builtins`] creates the parentless environment every module and
//! every template execution is layered on. It is built once per engine and
//! never written to afterwards: all evaluation writes land in frames below
//! it.
//!
//! # Catalogue
//!
//! | Module | Names |
//! |---|---|
//! | `control` | `If` `For` `While` `:=` `.` `[]` `[]=` `Del` `GetEnv` `Eval` |
//! | `callables` | `Func` `Lambda` `Macro` `Call` |
//! | `quote` | `Quote` `Unquote` |
//! | `iteration` | `Range` `Enumerate` `Iter` `Next` `Close` `Size` `Add` `AddAll` |
//! | `conversion` | `Identifier` `Bool` `Int` `Float` `String` `List` `Dict` |
//! | `logic` | `Not` `And` `Or` `==` `!=` `>` `>=` `<` `<=` |
//! | `math` | `+` `-` `*` `/` `//` `%` and their `op=` forms |
//! | `escape` | `EscapeHtml` `EscapeQuery` `EscapePath` |
//! | `markup` | every HTML element, `XmlTag`, `html` |
//! | `parsing` | `AddCategory` `HasCategory` `AddCustomRule` `ParseWord` |
//!
//! Special forms receive raw syntax and decide what to evaluate; ordinary
//! primitives evaluate every argument. Type mismatches answer `None`.

use il_eval::{Args, Environment, EvalResult, Object};
use il_parse::Grammar;

mod callables;
mod control;
mod conversion;
mod escape;
mod iteration;
mod logic;
mod markup;
mod math;
mod parsing;
mod quote;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use conversion::{extract_float, extract_integer, extract_string};
pub use markup::element;
pub use quote::{expand_unquote, UNQUOTE_NAME};

/// Binding a template must define; the façade applies it to render.
pub const MAIN_NAME: &str = "Main";

/// Build the builtins root and give `grammar` its custom-rule sandbox.
#[tracing::instrument(level = "debug", skip_all)]
pub fn build_builtins(grammar: &Grammar) -> Environment {
    let env = Environment::new();
    control::register(&env);
    callables::register(&env);
    quote::register(&env);
    iteration::register(&env);
    conversion::register(&env);
    logic::register(&env);
    math::register(&env);
    escape::register(&env);
    markup::register(&env);
    parsing::register(&env, grammar);
    grammar.install_sandbox(&env);
    tracing::debug!(bindings = env.size(), "builtins ready");
    env
}

fn define<F>(env: &Environment, name: &'static str, func: F)
where
    F: Fn(&Environment, Args<'_>) -> EvalResult + Send + Sync + 'static,
{
    env.store_str(name, Object::native(name, func));
}
