//! The import coordinator and the `Import` directive.
//!
//! # Channels
//!
//! ```text
//!  requesters ──Request──▶ coordinator ──spawn──▶ worker
//!      ▲                    │      ▲                │
//!      └──── responder ─────┘      └──Completion────┘
//! ```
//!
//! Requests and completions travel over rendezvous channels; each
//! requester gets a private one-slot responder, so the coordinator never
//! blocks on a send. Dropping the last [`ImportCache`] closes the request
//! channel and the coordinator exits.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Weak};
use std::thread;

use crossbeam::channel::{bounded, select, Receiver, Sender};
use il_eval::{Environment, Object};
use il_parse::Grammar;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::{ImportError, ModuleSource};

/// Name the directive is bound under in every module.
pub const IMPORT_NAME: &str = "Import";

/// What a failed import does besides merging nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportPolicy {
    /// Log at `debug` and carry on.
    #[default]
    Permissive,
    /// Log at `warn` and record the failure for the caller to inspect.
    Strict,
}

/// An evaluated module.
#[derive(Clone, Debug)]
pub struct Module {
    env: Environment,
    failures: Arc<[ImportError]>,
}

impl Module {
    /// The module's top-level bindings.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Imports that failed while the module was evaluated, its own
    /// imports' failures included.
    pub fn failures(&self) -> &[ImportError] {
        &self.failures
    }
}

/// The outcome every requester of one path shares.
pub type ModuleResult = Result<Module, Arc<ImportError>>;

type FailureSink = Arc<Mutex<Vec<ImportError>>>;

struct Request {
    path: PathBuf,
    responder: Sender<ModuleResult>,
}

struct Completion {
    path: PathBuf,
    result: ModuleResult,
}

enum Entry {
    Pending(Vec<Sender<ModuleResult>>),
    Resolved(ModuleResult),
}

struct CacheHandle {
    requests: Sender<Request>,
    builtins: Environment,
    grammar: Grammar,
    policy: ImportPolicy,
    source: Arc<dyn ModuleSource>,
    directives: Mutex<FxHashMap<PathBuf, Object>>,
    failures: Mutex<Vec<ImportError>>,
}

/// Shared handle on one import coordinator.
#[derive(Clone)]
pub struct ImportCache(Arc<CacheHandle>);

impl ImportCache {
    /// Start a coordinator evaluating modules over `builtins`.
    pub fn new(
        builtins: &Environment,
        grammar: &Grammar,
        policy: ImportPolicy,
        source: Arc<dyn ModuleSource>,
    ) -> io::Result<Self> {
        let (requests, incoming) = bounded(0);
        let handle = Arc::new(CacheHandle {
            requests,
            builtins: builtins.clone(),
            grammar: grammar.clone(),
            policy,
            source,
            directives: Mutex::new(FxHashMap::default()),
            failures: Mutex::new(Vec::new()),
        });
        let weak = Arc::downgrade(&handle);
        thread::Builder::new()
            .name("il-import".into())
            .spawn(move || coordinate(&incoming, &weak))?;
        Ok(ImportCache(handle))
    }

    pub fn policy(&self) -> ImportPolicy {
        self.0.policy
    }

    /// The `Import` primitive for modules living in `dir`. One directive
    /// is built per directory and reused.
    pub fn directive(&self, dir: impl Into<PathBuf>) -> Object {
        directive_for(&self.0, normalize(&dir.into()))
    }

    /// Import `path` directly, waiting for the shared result.
    pub fn import(&self, path: impl AsRef<Path>) -> ModuleResult {
        self.0.request(normalize(path.as_ref()))
    }

    /// Position in the failure log; pair with [`ImportCache::failures_since`].
    pub fn failure_mark(&self) -> usize {
        self.0.failures.lock().len()
    }

    /// Failures recorded under [`ImportPolicy::Strict`] after `mark`.
    pub fn failures_since(&self, mark: usize) -> Vec<ImportError> {
        self.0
            .failures
            .lock()
            .get(mark..)
            .map(<[ImportError]>::to_vec)
            .unwrap_or_default()
    }
}

impl CacheHandle {
    fn request(&self, path: PathBuf) -> ModuleResult {
        let (responder, response) = bounded(1);
        let unavailable =
            |path: PathBuf| -> ModuleResult { Err(Arc::new(ImportError::Unavailable { path })) };
        if self
            .requests
            .send(Request {
                path: path.clone(),
                responder,
            })
            .is_err()
        {
            return unavailable(path);
        }
        response.recv().unwrap_or_else(|_| unavailable(path))
    }

    fn report(&self, error: &ImportError) {
        match self.policy {
            ImportPolicy::Permissive => tracing::debug!(%error, "import failed"),
            ImportPolicy::Strict => tracing::warn!(%error, "import failed"),
        }
    }

    /// Charge `failures` to the importing module. Imports made outside any
    /// module go to the shared log, under [`ImportPolicy::Strict`] only.
    fn record(&self, sink: Option<&FailureSink>, failures: &[ImportError]) {
        match sink {
            Some(sink) => sink.lock().extend_from_slice(failures),
            None if self.policy == ImportPolicy::Strict => {
                self.failures.lock().extend_from_slice(failures);
            }
            None => {}
        }
    }
}

fn directive_for(handle: &Arc<CacheHandle>, dir: PathBuf) -> Object {
    let mut directives = handle.directives.lock();
    directives
        .entry(dir.clone())
        .or_insert_with(|| make_directive(Arc::downgrade(handle), dir, None))
        .clone()
}

/// `Import "relative/path"`: merge the module's bindings into the calling
/// environment, or nothing on failure. Always answers `None`.
///
/// A failed import, and every failure the imported module carries, is
/// recorded again on each application, so cached modules report them too.
fn make_directive(cache: Weak<CacheHandle>, dir: PathBuf, sink: Option<FailureSink>) -> Object {
    Object::native(IMPORT_NAME, move |env, mut args| {
        let Object::String(relative) = args.next_value(env)? else {
            return Ok(Object::None);
        };
        let Some(handle) = cache.upgrade() else {
            tracing::debug!(path = %relative, "import cache gone");
            return Ok(Object::None);
        };
        match handle.request(normalize(&dir.join(&*relative))) {
            Ok(module) => {
                module.env.copy_to(env);
                handle.record(sink.as_ref(), &module.failures);
            }
            Err(error) => {
                handle.report(&error);
                handle.record(sink.as_ref(), std::slice::from_ref(&*error));
            }
        }
        Ok(Object::None)
    })
}

/// Fold `.` and `..` without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// The coordinator loop: sole owner of the module map.
fn coordinate(requests: &Receiver<Request>, handle: &Weak<CacheHandle>) {
    let (completed, completions) = bounded::<Completion>(0);
    let mut entries: FxHashMap<PathBuf, Entry> = FxHashMap::default();
    loop {
        select! {
            recv(requests) -> request => {
                let Ok(Request { path, responder }) = request else {
                    break;
                };
                match entries.get_mut(&path) {
                    Some(Entry::Resolved(result)) => {
                        let _ = responder.send(result.clone());
                    }
                    Some(Entry::Pending(waiters)) => waiters.push(responder),
                    None => {
                        tracing::debug!(path = %path.display(), "import started");
                        entries.insert(path.clone(), Entry::Pending(vec![responder]));
                        let worker = spawn_worker(path.clone(), handle.clone(), completed.clone());
                        if let Err(error) = worker {
                            let failure = Err(Arc::new(ImportError::io(&path, error)));
                            resolve(&mut entries, path, &failure);
                        }
                    }
                }
            }
            recv(completions) -> completion => {
                if let Ok(Completion { path, result }) = completion {
                    tracing::debug!(path = %path.display(), ok = result.is_ok(), "import finished");
                    resolve(&mut entries, path, &result);
                }
            }
        }
    }
    tracing::debug!(modules = entries.len(), "import coordinator stopped");
}

fn resolve(entries: &mut FxHashMap<PathBuf, Entry>, path: PathBuf, result: &ModuleResult) {
    if let Some(Entry::Pending(waiters)) = entries.insert(path, Entry::Resolved(result.clone())) {
        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
    }
}

fn spawn_worker(
    path: PathBuf,
    handle: Weak<CacheHandle>,
    completed: Sender<Completion>,
) -> io::Result<()> {
    thread::Builder::new()
        .name("il-import-worker".into())
        .spawn(move || {
            let result = match handle.upgrade() {
                Some(handle) => load_module(&handle, &path).map_err(Arc::new),
                None => Err(Arc::new(ImportError::Unavailable { path: path.clone() })),
            };
            let _ = completed.send(Completion { path, result });
        })?;
    Ok(())
}

/// Read, parse and evaluate one module.
///
/// The module runs in a frame over a second frame holding its own
/// `Import` directive, so copying the module's bindings never copies the
/// directive. That directive is private to the module and collects its
/// failed imports.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
fn load_module(handle: &Arc<CacheHandle>, path: &Path) -> Result<Module, ImportError> {
    let text = handle
        .source
        .read(path)
        .map_err(|source| ImportError::io(path, source))?;
    let tree = handle
        .grammar
        .parse(&text)
        .map_err(|source| ImportError::Parse {
            path: path.to_owned(),
            source,
        })?;

    let module_env = Environment::local(&handle.builtins);
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let sink = FailureSink::default();
    let directive = make_directive(Arc::downgrade(handle), normalize(&dir), Some(sink.clone()));
    module_env.store_str(IMPORT_NAME, directive);
    let local = Environment::local(&module_env);
    for line in tree.to_vec() {
        line.eval(&local).map_err(|_| ImportError::Escaped {
            path: path.to_owned(),
        })?;
    }
    let failures: Arc<[ImportError]> = sink.lock().drain(..).collect();
    tracing::debug!(bindings = local.size(), failed_imports = failures.len(), "module evaluated");
    Ok(Module {
        env: local,
        failures,
    })
}
