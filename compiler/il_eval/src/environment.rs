//! Environments: name to object scopes chained through parents.
//!
//! Three shapes share one handle type:
//!
//! - **Frame**: owns bindings and optionally a parent. Every write lands in
//!   the frame it was issued on; reads fall back to the parent chain. The
//!   builtins root is a frame with no parent.
//! - **Data overlay**: a read-only view of host data (a serialized struct or
//!   map) consulted before its parent.
//! - **Merge**: the read-only union of a callable's creation scope and its
//!   call scope, creation first.
//!
//! A missing binding is not an error; lookups answer `None`. Writes and
//! deletes on the read-only shapes are silently ignored.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::{from_host, Name, Object};

enum Scope {
    Frame {
        bindings: RwLock<FxHashMap<Name, Object>>,
        parent: Option<Environment>,
    },
    Data {
        fields: Arc<Map<String, Value>>,
        parent: Option<Environment>,
    },
    Merge {
        creation: Environment,
        call: Environment,
    },
}

/// Shared handle to a scope. Clones alias the same scope.
#[derive(Clone)]
pub struct Environment(Arc<Scope>);

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    /// A parentless frame, used for the builtins root and `Dict` values.
    pub fn new() -> Self {
        Environment::frame(None)
    }

    /// A child frame of `parent`.
    pub fn local(parent: &Environment) -> Self {
        Environment::frame(Some(parent.clone()))
    }

    fn frame(parent: Option<Environment>) -> Self {
        Environment(Arc::new(Scope::Frame {
            bindings: RwLock::new(FxHashMap::default()),
            parent,
        }))
    }

    /// A read-only overlay over host data.
    ///
    /// Object-shaped values expose their fields; any other value exposes
    /// nothing and every lookup falls through to `parent`.
    pub fn data(value: &Value, parent: Option<&Environment>) -> Self {
        let fields = match value {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        Environment::from_fields(Arc::new(fields), parent.cloned())
    }

    pub(crate) fn from_fields(fields: Arc<Map<String, Value>>, parent: Option<Environment>) -> Self {
        Environment(Arc::new(Scope::Data { fields, parent }))
    }

    /// A read-only view resolving in `creation` first, then in `call`.
    pub fn merge(creation: &Environment, call: &Environment) -> Self {
        Environment(Arc::new(Scope::Merge {
            creation: creation.clone(),
            call: call.clone(),
        }))
    }

    /// Resolve `name` through the chain.
    pub fn lookup(&self, name: &str) -> Option<Object> {
        let mut current = self;
        loop {
            match &*current.0 {
                Scope::Frame { bindings, parent } => {
                    if let Some(value) = bindings.read().get(name) {
                        return Some(value.clone());
                    }
                    current = parent.as_ref()?;
                }
                Scope::Data { fields, parent } => {
                    if let Some(value) = fields.get(name) {
                        return Some(from_host(value));
                    }
                    current = parent.as_ref()?;
                }
                Scope::Merge { creation, call } => {
                    return creation.lookup(name).or_else(|| call.lookup(name));
                }
            }
        }
    }

    /// Resolve `name`, answering `None` when unbound.
    pub fn load_str(&self, name: &str) -> Object {
        self.lookup(name).unwrap_or_default()
    }

    /// Resolve a string key; non-string keys miss.
    pub fn load(&self, key: &Object) -> Option<Object> {
        self.lookup(key.as_str()?)
    }

    /// Bind `name` in this frame. Read-only shapes ignore the write.
    pub fn store_str(&self, name: impl Into<Name>, value: Object) {
        let name = name.into();
        match &*self.0 {
            Scope::Frame { bindings, .. } => {
                bindings.write().insert(name, value);
            }
            _ => tracing::trace!(%name, "write to read-only scope ignored"),
        }
    }

    /// Bind a string key in this frame; `false` for non-string keys or
    /// read-only shapes.
    pub fn store(&self, key: &Object, value: Object) -> bool {
        match (key, &*self.0) {
            (Object::String(name), Scope::Frame { .. }) => {
                self.store_str(name.clone(), value);
                true
            }
            _ => false,
        }
    }

    /// Remove a binding from this frame only.
    pub fn delete_str(&self, name: &str) {
        if let Scope::Frame { bindings, .. } = &*self.0 {
            bindings.write().remove(name);
        }
    }

    pub fn delete(&self, key: &Object) {
        if let Some(name) = key.as_str() {
            self.delete_str(name);
        }
    }

    /// Copy every binding of this frame into `target`, overwriting.
    pub fn copy_to(&self, target: &Environment) {
        for (name, value) in self.entries() {
            target.store_str(name, value);
        }
    }

    /// Number of local bindings (or exposed fields).
    pub fn size(&self) -> usize {
        match &*self.0 {
            Scope::Frame { bindings, .. } => bindings.read().len(),
            Scope::Data { fields, .. } => fields.len(),
            Scope::Merge { .. } => 0,
        }
    }

    /// Snapshot of the local bindings.
    ///
    /// Data overlays keep the host field order; frame order is unspecified.
    pub fn entries(&self) -> Vec<(Name, Object)> {
        match &*self.0 {
            Scope::Frame { bindings, .. } => bindings
                .read()
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            Scope::Data { fields, .. } => fields
                .iter()
                .map(|(name, value)| (Name::from(name.as_str()), from_host(value)))
                .collect(),
            Scope::Merge { .. } => Vec::new(),
        }
    }

    pub fn is_read_only(&self) -> bool {
        !matches!(&*self.0, Scope::Frame { .. })
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match &*self.0 {
            Scope::Frame { .. } => "Frame",
            Scope::Data { .. } => "Data",
            Scope::Merge { .. } => "Merge",
        };
        write!(f, "Environment::{shape}({} bindings)", self.size())
    }
}
