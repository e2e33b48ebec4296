//! The engine and its builder.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use il_builtins::build_builtins;
use il_eval::{Args, Environment, Object};
use il_import::{FsSource, ImportCache, ImportError, ImportPolicy, ModuleSource, IMPORT_NAME};
use il_parse::Grammar;

use crate::{Template, TemplateError};

/// Builder for an [`Engine`].
pub struct EngineBuilder {
    policy: ImportPolicy,
    source: Arc<dyn ModuleSource>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        EngineBuilder {
            policy: ImportPolicy::default(),
            source: Arc::new(FsSource),
        }
    }

    /// What a failed `Import` does.
    #[must_use]
    pub fn policy(mut self, policy: ImportPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Where module text is read from. Defaults to the file system.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn ModuleSource>) -> Self {
        self.source = source;
        self
    }

    /// Build the builtins and start the import coordinator.
    pub fn build(self) -> Result<Engine, TemplateError> {
        let grammar = Grammar::new();
        let builtins = build_builtins(&grammar);
        let imports = ImportCache::new(&builtins, &grammar, self.policy, self.source)?;
        Ok(Engine {
            builtins,
            grammar,
            imports,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads templates. Cheap to clone; clones share the import cache, so a
/// module imported by one template is evaluated once for all of them.
#[derive(Clone)]
pub struct Engine {
    builtins: Environment,
    grammar: Grammar,
    imports: ImportCache,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn policy(&self) -> ImportPolicy {
        self.imports.policy()
    }

    /// Load the template at `path`.
    ///
    /// The file is imported through the cache, so read and parse failures
    /// surface as errors instead of an empty module, and a strict engine
    /// rejects it for as long as any of its imports failed.
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<Template, TemplateError> {
        let path = std::path::absolute(path.as_ref())?;
        let module = self.imports.import(&path).map_err(TemplateError::Module)?;
        self.check_imports(module.failures().to_vec())?;

        let env = Environment::local(&self.builtins);
        module.env().copy_to(&env);
        Template::from_env(env)
    }

    /// Load `file` through an `Import` directive, as a module would.
    pub fn parse_from(&self, directive: &Object, file: &str) -> Result<Template, TemplateError> {
        let env = Environment::local(&self.builtins);
        let mark = self.imports.failure_mark();
        if let Some(result) = directive.apply_raw(&env, Args::from_vec(vec![Object::string(file)])) {
            result.map_err(|_| TemplateError::EscapedReturn)?;
        }
        self.check_imports(self.imports.failures_since(mark))?;
        Template::from_env(env)
    }

    /// Load a template from source text. Relative imports resolve against
    /// the current directory.
    pub fn parse_str(&self, text: &str) -> Result<Template, TemplateError> {
        let tree = self.grammar.parse(text)?;
        let module_env = Environment::local(&self.builtins);
        module_env.store_str(IMPORT_NAME, self.imports.directive(current_dir()));
        let env = Environment::local(&module_env);

        let mark = self.imports.failure_mark();
        for line in tree.to_vec() {
            line.eval(&env).map_err(|_| TemplateError::EscapedReturn)?;
        }
        self.check_imports(self.imports.failures_since(mark))?;
        Template::from_env(env)
    }

    fn check_imports(&self, failures: Vec<ImportError>) -> Result<(), TemplateError> {
        if self.policy() == ImportPolicy::Strict && !failures.is_empty() {
            return Err(TemplateError::Import(failures));
        }
        Ok(())
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_default()
}
