//! Every template under a directory, keyed by relative path.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Component, Path};

use serde::Serialize;
use walkdir::WalkDir;

use crate::{Engine, Template, TemplateError};

const EXTENSION: &str = "il";

#[derive(Clone, Debug, Default)]
pub struct TemplateSet {
    templates: BTreeMap<String, Template>,
}

impl TemplateSet {
    /// Load every `*.il` file below `dir`.
    ///
    /// Files without a `Main` are helper modules meant for `Import` and are
    /// skipped; any other failure aborts the load.
    pub fn load_dir(engine: &Engine, dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        let mut templates = BTreeMap::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension() != Some(OsStr::new(EXTENSION)) {
                continue;
            }
            let name = template_name(path.strip_prefix(dir).unwrap_or(path));
            match engine.parse_path(path) {
                Ok(template) => {
                    templates.insert(name, template);
                }
                Err(TemplateError::MissingMain) => {
                    tracing::debug!(template = %name, "no Main, skipped");
                }
                Err(error) => return Err(error),
            }
        }
        tracing::debug!(templates = templates.len(), dir = %dir.display(), "templates loaded");
        Ok(TemplateSet { templates })
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Template names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn execute<T>(&self, name: &str, out: &mut dyn Write, data: &T) -> Result<u64, TemplateError>
    where
        T: Serialize + ?Sized,
    {
        self.get(name)
            .ok_or_else(|| TemplateError::UnknownTemplate(name.to_owned()))?
            .execute(out, data)
    }
}

/// `sub/page.il` on every platform.
fn template_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
