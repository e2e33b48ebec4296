//! Callables: host primitives, user functions and user macros.
//!
//! # Call protocol
//!
//! A user call builds a fresh frame over the callable's closure, binds a
//! private `Return` primitive tagged with a new [`FrameId`], binds the
//! parameters, then evaluates the body lines in order. A `Return` signal
//! carrying this call's id ends the call; signals carrying any other id
//! keep propagating to the frame that owns them.
//!
//! Functions and macros differ in three places:
//!
//! | | Function | Macro |
//! |---|---|---|
//! | arguments | evaluated in the caller's env | bound as raw syntax |
//! | `Return x y ...` | evaluated: none, one value, or a list | first argument resolved in the macro frame |
//! | call result | the returned value | the returned value evaluated in the caller's env |
//!
//! The macro row is what makes `Macro m (x) (Return x)` answer the caller's
//! binding of whatever identifier was passed: `x` resolves to the raw
//! syntax, which the caller's environment then evaluates.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{Args, Environment, EvalResult, FrameId, Name, Object, Unwind};

/// Name under which every user call binds its `Return` primitive.
pub const RETURN_NAME: &str = "Return";

/// Anything that can sit at the head of a call list.
pub trait Appliable {
    /// Apply to the raw argument syntax, in the caller's environment.
    fn apply(&self, env: &Environment, args: Args<'_>) -> EvalResult;
}

/// Signature of a host primitive.
pub type NativeFn = dyn Fn(&Environment, Args<'_>) -> EvalResult + Send + Sync;

/// A host primitive receiving its raw arguments.
#[derive(Clone)]
pub struct NativeCallable {
    name: Name,
    func: Arc<NativeFn>,
}

impl NativeCallable {
    pub fn new<F>(name: impl Into<Name>, func: F) -> Self
    where
        F: Fn(&Environment, Args<'_>) -> EvalResult + Send + Sync + 'static,
    {
        NativeCallable {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run in a read-only overlay of `data` over the call environment.
    pub fn apply_with_data(&self, data: &Value, env: &Environment, args: Args<'_>) -> EvalResult {
        self.apply(&Environment::data(data, Some(env)), args)
    }

    pub fn ptr_eq(&self, other: &NativeCallable) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Appliable for NativeCallable {
    fn apply(&self, env: &Environment, args: Args<'_>) -> EvalResult {
        (self.func)(env, args)
    }
}

impl fmt::Debug for NativeCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Native({})", self.name)
    }
}

/// Function or macro.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallableKind {
    Function,
    Macro,
}

/// How call arguments bind to the frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Params {
    /// Nothing is bound.
    Empty,
    /// Every argument collected into one list.
    Variadic(Name),
    /// One argument per name; missing ones bind `None`, extra ones drop.
    Positional(Vec<Name>),
}

impl Params {
    /// Read a parameter declaration: an identifier is variadic, a
    /// non-empty list of identifiers is positional (up to the first
    /// non-identifier), anything else binds nothing.
    pub fn from_declaration(declared: &Object) -> Self {
        match declared {
            Object::Identifier(name) => Params::Variadic(name.clone()),
            Object::List(list) if !list.is_empty() => Params::Positional(
                list.to_vec()
                    .iter()
                    .map_while(|item| item.as_identifier().cloned())
                    .collect(),
            ),
            _ => Params::Empty,
        }
    }
}

struct UserCallableData {
    kind: CallableKind,
    params: Params,
    body: Vec<Object>,
    closure: Environment,
}

/// A function or macro defined in il code, closing over its defining scope.
#[derive(Clone)]
pub struct UserCallable(Arc<UserCallableData>);

/// Whether parameter binding evaluates the arguments.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Binding {
    ByKind,
    Raw,
}

impl UserCallable {
    pub fn new(kind: CallableKind, params: Params, body: Vec<Object>, closure: &Environment) -> Self {
        UserCallable(Arc::new(UserCallableData {
            kind,
            params,
            body,
            closure: closure.clone(),
        }))
    }

    pub fn kind(&self) -> CallableKind {
        self.0.kind
    }

    pub fn params(&self) -> &Params {
        &self.0.params
    }

    /// Apply to arguments that are already values: nothing is evaluated
    /// before binding, whatever the kind. Used by `Call` and custom rules.
    pub fn apply_raw(&self, env: &Environment, args: Args<'_>) -> EvalResult {
        self.invoke(&self.0.closure, env, args, Binding::Raw)
    }

    /// Run with `data` visible: the frame sits on the merge of a data
    /// overlay over the closure and the call environment.
    pub fn apply_with_data(&self, data: &Value, env: &Environment, args: Args<'_>) -> EvalResult {
        let creation = Environment::data(data, Some(&self.0.closure));
        self.invoke(&Environment::merge(&creation, env), env, args, Binding::ByKind)
    }

    pub fn ptr_eq(&self, other: &UserCallable) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn invoke(
        &self,
        base: &Environment,
        call_env: &Environment,
        args: Args<'_>,
        binding: Binding,
    ) -> EvalResult {
        let frame = FrameId::fresh();
        let local = Environment::local(base);
        local.store_str(RETURN_NAME, return_primitive(self.0.kind, frame));
        let evaluate = binding == Binding::ByKind && self.0.kind == CallableKind::Function;
        self.bind_params(&local, call_env, args, evaluate)?;

        for line in &self.0.body {
            match line.eval(&local) {
                Ok(_) => {}
                Err(Unwind::Return { frame: target, value }) if target == frame => {
                    return match self.0.kind {
                        CallableKind::Function => Ok(value),
                        CallableKind::Macro => value.eval(call_env),
                    };
                }
                Err(signal) => return Err(signal),
            }
        }
        Ok(Object::None)
    }

    fn bind_params(
        &self,
        local: &Environment,
        call_env: &Environment,
        mut args: Args<'_>,
        evaluate: bool,
    ) -> Result<(), Unwind> {
        let prepare = |arg: Object| if evaluate { arg.eval(call_env) } else { Ok(arg) };
        match &self.0.params {
            Params::Empty => {}
            Params::Variadic(name) => {
                let values = args.map(prepare).collect::<Result<Vec<_>, _>>()?;
                local.store_str(name.clone(), Object::list(values));
            }
            Params::Positional(names) => {
                for name in names {
                    let value = prepare(args.next_arg())?;
                    local.store_str(name.clone(), value);
                }
            }
        }
        Ok(())
    }
}

impl Appliable for UserCallable {
    fn apply(&self, env: &Environment, args: Args<'_>) -> EvalResult {
        self.invoke(&self.0.closure, env, args, Binding::ByKind)
    }
}

impl fmt::Debug for UserCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.0.kind, self.0.params)
    }
}

/// The `Return` primitive bound in one call frame.
fn return_primitive(kind: CallableKind, frame: FrameId) -> Object {
    Object::Native(NativeCallable::new(RETURN_NAME, move |env, mut args| {
        let value = match kind {
            CallableKind::Function => {
                let mut values = args.values(env)?;
                match values.len() {
                    0 => Object::None,
                    1 => values.pop().unwrap_or_default(),
                    _ => Object::list(values),
                }
            }
            CallableKind::Macro => args.next_value(env)?,
        };
        Err(Unwind::Return { frame, value })
    }))
}
