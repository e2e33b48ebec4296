//! Host data exposure.
//!
//! Templates read caller-supplied data through data-overlay environments.
//! Host values arrive as `serde_json::Value` (anything `Serialize` converts
//! into one) and are turned into objects lazily, on lookup.

use std::sync::Arc;

use serde_json::Value;

use crate::{Environment, Object};

/// Convert one host value into an object.
///
/// Objects (structs and maps) become parentless read-only environments so
/// `.` can walk into them. Unsigned integers above `i64::MAX` wrap.
pub fn from_host(value: &Value) -> Object {
    match value {
        Value::Null => Object::None,
        Value::Bool(b) => Object::Boolean(*b),
        Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                Object::Integer(i)
            } else if let Some(u) = number.as_u64() {
                Object::Integer(i64::from_ne_bytes(u.to_ne_bytes()))
            } else {
                number.as_f64().map_or(Object::None, Object::Float)
            }
        }
        Value::String(s) => Object::string(s.as_str()),
        Value::Array(items) => Object::list(items.iter().map(from_host).collect()),
        Value::Object(fields) => {
            Object::Environment(Environment::from_fields(Arc::new(fields.clone()), None))
        }
    }
}
