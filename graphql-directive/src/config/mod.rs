use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key holding the namespace that model classes default to.
pub const MODELS_NAMESPACE_KEY: &str = "namespaces.models";

/// Read-only configuration lookup by dotted key.
pub trait ConfigProvider: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub namespaces: NamespaceSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceSettings {
    pub models: Option<String>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_models_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.models = Some(namespace.into());
        self
    }
}

impl ConfigProvider for Settings {
    fn get(&self, key: &str) -> Option<Value> {
        match key {
            MODELS_NAMESPACE_KEY => self.namespaces.models.clone().map(Value::String),
            _ => serde_json::to_value(self).ok()?.get_dotted(key),
        }
    }
}

impl ConfigProvider for Value {
    fn get(&self, key: &str) -> Option<Value> {
        self.get_dotted(key)
    }
}

trait DottedLookup {
    fn get_dotted(&self, key: &str) -> Option<Value>;
}

impl DottedLookup for Value {
    fn get_dotted(&self, key: &str) -> Option<Value> {
        let pointer = format!("/{}", key.replace('.', "/"));
        self.pointer(&pointer).filter(|v| !v.is_null()).cloned()
    }
}
