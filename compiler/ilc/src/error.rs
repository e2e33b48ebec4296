//! Errors surfaced by the engine.

use std::io;
use std::sync::Arc;

use il_import::ImportError;
use il_parse::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The render data could not be turned into bindings.
    #[error("cannot convert template data: {0}")]
    Data(#[from] serde_json::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The template file itself failed to load.
    #[error(transparent)]
    Module(Arc<ImportError>),

    /// Imports that failed while loading under the strict policy.
    #[error("{} import(s) failed, first: {}", .0.len(), first_failure(.0))]
    Import(Vec<ImportError>),

    #[error("the template does not define `Main`")]
    MissingMain,

    #[error("`Main` is bound to a {0}, which cannot be applied")]
    MainNotAppliable(&'static str),

    /// A captured `Return` was invoked outside the function it belongs to.
    #[error("`Return` escaped its function")]
    EscapedReturn,

    #[error("no template named `{0}`")]
    UnknownTemplate(String),
}

fn first_failure(failures: &[ImportError]) -> String {
    failures
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}
