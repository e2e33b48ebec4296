//! HTML and XML element builders.
//!
//! An element primitive evaluates its arguments in a fresh frame over the
//! caller, sorts them into attributes (lists tagged `attribute`) and
//! children, and answers a list of string fragments whose textual form is
//! the markup:
//!
//! ```text
//! < name ( " " attr [ =" value " ] )*  ( /> | > ( " " child )* </ name > )
//! ```
//!
//! `None` arguments contribute nothing. Values are not escaped; templates
//! call `EscapeHtml` where needed.

use il_eval::{Args, Environment, EvalResult, Name, Object};
use il_parse::ATTRIBUTE_CATEGORY;

use crate::{define, MAIN_NAME};

/// Every non-deprecated HTML element except `html`, which is special.
const HTML_ELEMENTS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col", "colgroup",
    "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt", "em", "embed",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "head", "header", "hgroup", "hr", "i", "iframe", "img", "input", "ins", "kbd", "label",
    "legend", "li", "link", "main", "map", "mark", "menu", "meta", "meter", "nav", "noscript",
    "object", "ol", "optgroup", "option", "output", "p", "picture", "pre", "progress", "q", "rp",
    "rt", "ruby", "s", "samp", "script", "section", "select", "slot", "small", "source", "span",
    "strong", "style", "sub", "summary", "sup", "table", "tbody", "td", "template", "textarea",
    "tfoot", "th", "thead", "time", "title", "tr", "track", "u", "ul", "var", "video", "wbr",
];

pub(crate) fn register(env: &Environment) {
    for name in HTML_ELEMENTS {
        env.store_str(*name, element(*name));
    }
    define(env, "html", html_form);
    define(env, "XmlTag", |env, mut args| {
        Ok(match args.next_value(env)? {
            Object::String(name) if !name.is_empty() => element(name),
            _ => Object::None,
        })
    });
}

/// A primitive rendering the element `name`.
pub fn element(name: impl Into<Name>) -> Object {
    let name: Name = name.into();
    Object::native(name.clone(), move |env, args| render_element(&name, env, args))
}

fn render_element(name: &Name, env: &Environment, args: Args<'_>) -> EvalResult {
    let local = Environment::local(env);
    let mut attributes = Vec::new();
    let mut children = Vec::new();
    for arg in args {
        match arg.eval(&local)? {
            Object::None => {}
            Object::List(list) if list.has_category(ATTRIBUTE_CATEGORY) => attributes.push(list),
            child => children.push(child),
        }
    }

    let mut out = vec![Object::from("<"), Object::String(name.clone())];
    for attribute in attributes {
        let mut parts = attribute.to_vec().into_iter();
        let Some(attribute_name) = parts.next() else {
            continue;
        };
        out.push(Object::from(" "));
        out.push(attribute_name);
        if let Some(value) = parts.next() {
            out.extend([Object::from("=\""), value, Object::from("\"")]);
        }
    }
    if children.is_empty() {
        out.push(Object::from("/>"));
    } else {
        out.push(Object::from(">"));
        for child in children {
            out.push(Object::from(" "));
            out.push(child);
        }
        out.extend([Object::from("</"), Object::String(name.clone()), Object::from(">")]);
    }
    Ok(Object::list(out))
}

/// `html child...` renders nothing now: it binds `Main` to a primitive
/// that renders the `html` element from these raw children, evaluated in
/// whatever environment `Main` is later applied in.
fn html_form(env: &Environment, args: Args<'_>) -> EvalResult {
    let children: Vec<Object> = args.collect();
    let name: Name = Name::from("html");
    env.store_str(
        MAIN_NAME,
        Object::native(MAIN_NAME, move |call_env, _| {
            render_element(&name, call_env, Args::from_vec(children.clone()))
        }),
    );
    Ok(Object::None)
}
