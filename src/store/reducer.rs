//! Reducer and method signatures.

use std::sync::Arc;

use serde_json::Value;

use super::action::Action;
use super::container::Store;

/// Computes the next state from a copy of the current one.
///
/// The state argument is an owned copy, so a reducer may edit it in place and
/// return it. Returning `None` or a falsy value declines the action: the
/// store keeps its state and raises no event.
pub type Reducer = Arc<dyn Fn(&Store, Value, &Action) -> Option<Value> + Send + Sync>;

/// Domain accessor attached to a store and invoked through
/// [`Store::call`](super::Store::call).
pub type Method = Arc<dyn Fn(&Store, &[Value]) -> Value + Send + Sync>;

/// JavaScript-style truthiness over JSON values.
///
/// `null`, `false`, zero and the empty string are falsy. Every object and
/// array is truthy, including empty ones.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
