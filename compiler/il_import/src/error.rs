//! Import failures.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use il_parse::ParseError;

/// Why a module could not be imported.
///
/// Cloneable so a cached failure can be handed to every requester.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ImportError {
    #[error("cannot read module {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("cannot parse module {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A captured `Return` was invoked outside its function while the
    /// module's top level was evaluated.
    #[error("`Return` escaped the top level of module {}", path.display())]
    Escaped { path: PathBuf },

    #[error("import cache shut down before {} was loaded", path.display())]
    Unavailable { path: PathBuf },
}

impl ImportError {
    #[cold]
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        ImportError::Io {
            path: path.to_owned(),
            source: Arc::new(source),
        }
    }

    /// The module path the failure is about.
    pub fn path(&self) -> &Path {
        match self {
            ImportError::Io { path, .. }
            | ImportError::Parse { path, .. }
            | ImportError::Escaped { path }
            | ImportError::Unavailable { path } => path,
        }
    }
}
