//! Templates loaded from disk.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use ilc::{Engine, ImportPolicy, TemplateError, TemplateSet};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;
use tempfile::tempdir;

fn write(dir: &Path, name: &str, text: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

const PAGE: &str = r#"# Greets whoever is named on the command line.
Import "parts/greeting.il"

html
    body @class="main"
        h1 (greet value1)
        ul
            For item values
                li item
"#;

const GREETING: &str = r#"Func greet (who)
    Return (List "Hello, " who)
"#;

#[test]
fn renders_html_with_imported_helpers() {
    let dir = tempdir().unwrap();
    write(dir.path(), "page.il", PAGE);
    write(dir.path(), "parts/greeting.il", GREETING);

    let engine = Engine::builder().build().unwrap();
    let page = engine.parse_path(dir.path().join("page.il")).unwrap();
    let html = page
        .render(&json!({ "value1": "Ada", "values": ["a", "b"] }))
        .unwrap();
    assert_eq!(
        html,
        r#"<html> <body class="main"> <h1> Hello, Ada</h1> <ul> <li> a</li><li> b</li></ul></body></html>"#
    );
}

#[test]
fn serializable_structs_are_data() {
    #[derive(Serialize)]
    struct User {
        name: &'static str,
        admin: bool,
    }

    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "user.il",
        "Func Main ()\n    If (. user admin) (Return \"root\") (Return (. user name))",
    );
    let engine = Engine::builder().build().unwrap();
    let page = engine.parse_path(dir.path().join("user.il")).unwrap();

    let admin = json!({ "user": User { name: "ada", admin: true } });
    let plain = json!({ "user": User { name: "bob", admin: false } });
    assert_eq!(page.render(&admin).unwrap(), "root");
    assert_eq!(page.render(&plain).unwrap(), "bob");
}

#[test]
fn execute_reports_bytes_written() {
    let dir = tempdir().unwrap();
    write(dir.path(), "n.il", "Func Main () (Return 12345)");
    let engine = Engine::builder().build().unwrap();
    let page = engine.parse_path(dir.path().join("n.il")).unwrap();

    let mut out = Vec::new();
    assert_eq!(page.execute(&mut out, &()).unwrap(), 5);
    assert_eq!(out, b"12345");
}

#[test]
fn unreadable_template_is_an_error() {
    let dir = tempdir().unwrap();
    let engine = Engine::builder().build().unwrap();
    let error = engine.parse_path(dir.path().join("absent.il")).unwrap_err();
    assert!(matches!(error, TemplateError::Module(_)), "{error}");
}

#[test]
fn malformed_template_is_an_error() {
    let dir = tempdir().unwrap();
    write(dir.path(), "bad.il", "a\n        b\n    c\n");
    let engine = Engine::builder().build().unwrap();
    let error = engine.parse_path(dir.path().join("bad.il")).unwrap_err();
    assert!(matches!(error, TemplateError::Module(_)), "{error}");
}

#[test]
fn strict_engines_reject_broken_imports() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "page.il",
        "Import \"missing.il\"\nFunc Main () (Return 1)",
    );

    let lenient = Engine::builder().build().unwrap();
    let page = lenient.parse_path(dir.path().join("page.il")).unwrap();
    assert_eq!(page.render(&()).unwrap(), "1");

    let strict = Engine::builder().policy(ImportPolicy::Strict).build().unwrap();
    let error = strict.parse_path(dir.path().join("page.il")).unwrap_err();
    let TemplateError::Import(failures) = error else {
        panic!("expected import failures, got {error}");
    };
    assert!(failures[0].path().ends_with("missing.il"));
}

#[test]
fn template_sets_key_by_relative_path() {
    let dir = tempdir().unwrap();
    write(dir.path(), "index.il", "Func Main () (Return \"home\")");
    write(dir.path(), "blog/post.il", "Func Main () (Return title)");
    write(dir.path(), "blog/helpers.il", ":= unused 1");
    write(dir.path(), "notes.txt", "not a template");

    let engine = Engine::builder().build().unwrap();
    let set = TemplateSet::load_dir(&engine, dir.path()).unwrap();
    assert_eq!(set.names().collect::<Vec<_>>(), ["blog/post.il", "index.il"]);
    assert_eq!(set.len(), 2);

    let mut out = Vec::new();
    set.execute("blog/post.il", &mut out, &json!({ "title": "First" }))
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "First");

    let error = set.execute("missing.il", &mut Vec::new(), &()).unwrap_err();
    assert!(matches!(error, TemplateError::UnknownTemplate(name) if name == "missing.il"));
}
