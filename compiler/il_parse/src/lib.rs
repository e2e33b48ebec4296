//! Parser for the il template language.
//!
//! Source text becomes a tree of [`List`]s: the root list (tagged
//! [`ROOT_CATEGORY`]) holds one list per top-level line, and every line
//! list holds its words followed by the lists of the lines indented under
//! it. Parenthesised groups inside a line become nested lists.
//!
//! Every word is classified by the [`Grammar`]: built-in literal rules
//! first (booleans, `None`, attributes, colon compounds, strings, numbers),
//! then user rules registered at run time with `AddCustomRule`, then the
//! identifier fallback.
//!
//! ```text
//! html
//!     body @class=main
//!         h1 "Hello"
//! ```
//!
//! parses to `(root (html (body ("class" main) (h1 "Hello"))))`, with the
//! attribute list tagged [`ATTRIBUTE_CATEGORY`].
//!
//! [`List`]: il_eval::List

mod error;
mod grammar;
mod rules;

pub use error::ParseError;
pub use grammar::Grammar;

/// Category of the document root list.
pub const ROOT_CATEGORY: &str = "root";
/// Category of lists produced by `@name=value` words.
pub const ATTRIBUTE_CATEGORY: &str = "attribute";
/// Head identifier of lists produced by `a:b` words.
pub const LIST_NAME: &str = "List";
/// The assignment word, never split on its colon.
pub const SET_NAME: &str = ":=";
