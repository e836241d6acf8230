//! Resource state
//!
//! [`ResourceData`] is what a lifecycle operation reads its configuration
//! from and writes refreshed state into. It serialises to a flat record: the
//! opaque `id` next to every attribute.

use super::error::ResourceError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration or state of a single managed resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// External identity handle; empty until the resource exists
    #[serde(default)]
    id: String,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build resource data from configuration attributes
    pub fn from_attributes<I, K>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            id: String::new(),
            attributes: attributes.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Resource data holding nothing but an identity, as used by import
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// True while the resource has no identity
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Read a string attribute
    pub fn get_string(&self, key: &str) -> Result<&str, ResourceError> {
        let value = self
            .get(key)
            .ok_or_else(|| ResourceError::MissingAttribute(key.to_string()))?;
        value.as_str().ok_or_else(|| ResourceError::InvalidAttribute {
            key: key.to_string(),
            expected: "string",
        })
    }

    /// Read an integer attribute
    pub fn get_int(&self, key: &str) -> Result<i64, ResourceError> {
        let value = self
            .get(key)
            .ok_or_else(|| ResourceError::MissingAttribute(key.to_string()))?;
        value.as_i64().ok_or_else(|| ResourceError::InvalidAttribute {
            key: key.to_string(),
            expected: "integer",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialises_as_flat_record() {
        let mut data = ResourceData::from_attributes([
            ("project_id", json!("42")),
            ("group_id", json!(7)),
            ("access_level", json!("developer")),
        ]);
        data.set_id("42:7");

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"id": "42:7", "project_id": "42", "group_id": 7, "access_level": "developer"})
        );
    }

    #[test]
    fn deserialises_without_id() {
        let data: ResourceData = serde_json::from_value(json!({"project_id": "42"})).unwrap();
        assert!(data.is_new());
        assert_eq!(data.get_string("project_id").unwrap(), "42");
    }

    #[test]
    fn typed_getters_report_missing_and_mistyped_attributes() {
        let data =
            ResourceData::from_attributes([("group_id", json!("seven")), ("x", Value::Null)]);

        assert!(matches!(
            data.get_int("group_id"),
            Err(ResourceError::InvalidAttribute { expected: "integer", .. })
        ));
        assert!(matches!(data.get_string("x"), Err(ResourceError::MissingAttribute(_))));
        assert!(matches!(data.get_string("nope"), Err(ResourceError::MissingAttribute(_))));
    }
}
