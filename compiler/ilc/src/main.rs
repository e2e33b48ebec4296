//! `il <template> <output> [values...]`
//!
//! Renders one template to a file. The template sees `values`, the list of
//! extra arguments, and `value1`..`valueN` for each of them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use ariadne::{Label, Report, ReportKind, Source};
use il_import::ImportError;
use il_parse::ParseError;
use ilc::{Engine, TemplateError};
use serde_json::{Map, Value};

fn main() -> ExitCode {
    ilc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        print_usage();
        return ExitCode::FAILURE;
    }
    let (template, output, values) = (&args[1], &args[2], &args[3..]);

    match render(template, output, values) {
        Ok(()) => {
            println!("{output} generated");
            ExitCode::SUCCESS
        }
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: il <template.il> <output> [values...]");
    eprintln!();
    eprintln!("The template's Main sees `values` (all extra arguments)");
    eprintln!("and `value1`, `value2`, ... for each of them.");
    eprintln!();
    eprintln!("Set RUST_LOG to enable logging, IL_LOG_TREE for a span tree.");
}

fn render(template: &str, output: &str, values: &[String]) -> Result<(), TemplateError> {
    let engine = Engine::builder().build()?;
    let template = engine.parse_path(template)?;
    let mut out = BufWriter::new(File::create(output)?);
    template.execute(&mut out, &command_data(values))?;
    out.flush()?;
    Ok(())
}

fn command_data(values: &[String]) -> Value {
    let mut data = Map::new();
    data.insert(
        "values".to_owned(),
        Value::Array(values.iter().cloned().map(Value::String).collect()),
    );
    for (index, value) in values.iter().enumerate() {
        data.insert(format!("value{}", index + 1), Value::String(value.clone()));
    }
    Value::Object(data)
}

fn report(error: &TemplateError) {
    match error {
        TemplateError::Module(failure) => match &**failure {
            ImportError::Parse { path, source } => report_parse(path, source),
            other => eprintln!("error: {other}"),
        },
        TemplateError::Import(failures) => {
            eprintln!("error: {error}");
            for failure in failures {
                eprintln!("  {failure}");
            }
        }
        other => eprintln!("error: {other}"),
    }
}

/// Point at the offending character when the file can still be read.
fn report_parse(path: &Path, error: &ParseError) {
    let name = path.display().to_string();
    let (Some(offset), Ok(text)) = (error.offset(), std::fs::read_to_string(path)) else {
        eprintln!("error: {name}:{}: {error}", error.line());
        return;
    };
    let span = offset..(offset + 1).min(text.len());
    let printed = Report::build(ReportKind::Error, name.as_str(), offset)
        .with_message(format!("cannot parse {name}"))
        .with_label(Label::new((name.as_str(), span)).with_message(error.to_string()))
        .finish()
        .eprint((name.as_str(), Source::from(text.as_str())));
    if printed.is_err() {
        eprintln!("error: {name}:{}: {error}", error.line());
    }
}
