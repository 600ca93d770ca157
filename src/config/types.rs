use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::DEFAULT_STORE_NAME;

/// Configuration for one store.
///
/// ```toml
/// name = "todos"
///
/// [initial_state]
/// items = []
/// filter = "all"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Label used in log fields (default: "store").
    #[serde(default = "default_name")]
    pub name: String,
    /// State the store starts from and returns to on reset (default: `{}`).
    #[serde(default = "default_initial_state")]
    pub initial_state: Value,
}

fn default_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

fn default_initial_state() -> Value {
    Value::Object(Map::new())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            initial_state: default_initial_state(),
        }
    }
}
