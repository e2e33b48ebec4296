//! Defining and calling user callables.

use il_eval::{Args, CallableKind, Environment, EvalResult, Object, Params, UserCallable};

use crate::define;

pub(crate) fn register(env: &Environment) {
    define(env, "Func", |env, args| define_named(env, args, CallableKind::Function));
    define(env, "Macro", |env, args| define_named(env, args, CallableKind::Macro));
    define(env, "Lambda", lambda_form);
    define(env, "Call", call_form);
}

/// `Func name params body...` / `Macro name params body...`
///
/// Binds `name` in the current environment, closing over it. Nothing is
/// bound when the name is not an identifier or the body is empty.
fn define_named(env: &Environment, mut args: Args<'_>, kind: CallableKind) -> EvalResult {
    let Object::Identifier(name) = args.next_arg() else {
        return Ok(Object::None);
    };
    let declared = args.next_arg();
    let body: Vec<Object> = args.collect();
    if !body.is_empty() {
        let callable = UserCallable::new(kind, Params::from_declaration(&declared), body, env);
        env.store_str(name, Object::User(callable));
    }
    Ok(Object::None)
}

/// `Lambda params body...`: an anonymous function value.
fn lambda_form(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let declared = args.next_arg();
    let body: Vec<Object> = args.collect();
    if body.is_empty() {
        return Ok(Object::None);
    }
    let params = Params::from_declaration(&declared);
    Ok(Object::User(UserCallable::new(CallableKind::Function, params, body, env)))
}

/// `Call callee args`: apply `callee` to the elements of the iterable
/// `args` as already-evaluated values.
fn call_form(env: &Environment, mut args: Args<'_>) -> EvalResult {
    let callee = args.next_value(env)?;
    let Some(arguments) = args.next_value(env)?.iterate() else {
        return Ok(Object::None);
    };
    callee
        .apply_raw(env, Args::new(arguments))
        .unwrap_or(Ok(Object::None))
}
