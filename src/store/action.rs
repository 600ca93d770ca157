use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::reducer::is_truthy;

/// Primary field naming the action.
pub const ACTION_NAME_FIELD: &str = "actionName";
/// Legacy field consulted when `actionName` is absent.
pub const LEGACY_NAME_FIELD: &str = "_name";

/// A dispatched action: a JSON object with a name field and any payload.
///
/// Both `actionName` and `_name` identify the action; `actionName` wins when
/// both are present and truthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(Value);

impl Action {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An action carrying only `actionName`.
    pub fn named(name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(ACTION_NAME_FIELD.to_string(), Value::String(name.into()));
        Self(Value::Object(fields))
    }

    /// Add a payload field. A non-object action is replaced by an object.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }
        if let Value::Object(fields) = &mut self.0 {
            fields.insert(field.into(), value.into());
        }
        self
    }

    /// The reducer key for this action, if any.
    ///
    /// Only string names route. A truthy non-string `actionName` (say `5`)
    /// is still the chosen field, so the action matches no reducer and the
    /// `_name` fallback is not consulted.
    pub fn name(&self) -> Option<&str> {
        [ACTION_NAME_FIELD, LEGACY_NAME_FIELD]
            .iter()
            .filter_map(|field| self.0.get(*field))
            .find(|value| is_truthy(value))
            .and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Action {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_prefers_action_name() {
        let action = Action::new(json!({ "actionName": "A", "_name": "B" }));
        assert_eq!(action.name(), Some("A"));
    }

    #[test]
    fn test_name_falls_back_to_legacy_field() {
        let action = Action::new(json!({ "_name": "FOO", "foo": "baz" }));
        assert_eq!(action.name(), Some("FOO"));
    }

    #[test]
    fn test_empty_action_name_falls_back() {
        let action = Action::new(json!({ "actionName": "", "_name": "FOO" }));
        assert_eq!(action.name(), Some("FOO"));
    }

    #[test]
    fn test_unnamed_action() {
        assert_eq!(Action::new(json!({ "foo": 1 })).name(), None);
        assert_eq!(Action::new(json!("FOO")).name(), None);
    }

    #[test]
    fn test_non_string_action_name_does_not_route() {
        let action = Action::new(json!({ "actionName": 5, "_name": "FOO" }));
        assert_eq!(action.name(), None);
        assert_eq!(Action::new(json!({ "actionName": 5 })).name(), None);
    }

    #[test]
    fn test_builder_adds_payload() {
        let action = Action::named("ADD").with("id", 7).with("title", "milk");
        assert_eq!(
            action.as_value(),
            &json!({ "actionName": "ADD", "id": 7, "title": "milk" })
        );
    }

    #[test]
    fn test_serde_is_transparent() {
        let action: Action = serde_json::from_str(r#"{"_name":"FOO"}"#).unwrap();
        assert_eq!(action.name(), Some("FOO"));
        assert_eq!(serde_json::to_string(&action).unwrap(), r#"{"_name":"FOO"}"#);
    }
}
