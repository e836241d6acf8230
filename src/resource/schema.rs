//! Resource schemas
//!
//! Describes the attributes a resource accepts and checks configuration
//! against them before any API call is made.

use super::data::ResourceData;
use super::error::ResourceError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Int,
}

impl AttributeType {
    fn matches(self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Int => value.is_i64(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Int => "integer",
        }
    }
}

/// A single attribute definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub ty: AttributeType,
    pub required: bool,
    /// Changing this attribute replaces the resource instead of updating it
    pub force_new: bool,
    /// Exact values a string attribute may take
    pub allowed_values: Option<Vec<String>>,
}

impl Attribute {
    pub fn required_string() -> Self {
        Self {
            ty: AttributeType::String,
            required: true,
            force_new: false,
            allowed_values: None,
        }
    }

    pub fn required_int() -> Self {
        Self {
            ty: AttributeType::Int,
            ..Self::required_string()
        }
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    fn validate(&self, key: &str, value: Option<&Value>) -> Result<(), ResourceError> {
        let Some(value) = value else {
            if self.required {
                return Err(ResourceError::MissingAttribute(key.to_string()));
            }
            return Ok(());
        };

        if !self.ty.matches(value) {
            return Err(ResourceError::InvalidAttribute {
                key: key.to_string(),
                expected: self.ty.name(),
            });
        }

        if let (Some(allowed), Some(s)) = (&self.allowed_values, value.as_str()) {
            if !allowed.iter().any(|v| v == s) {
                return Err(ResourceError::Validation(format!(
                    "{} is an invalid value for argument {}. Acceptable values are: {:?}",
                    s, key, allowed
                )));
            }
        }

        Ok(())
    }
}

/// Attribute definitions of one resource type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: &str, attribute: Attribute) -> Self {
        self.attributes.insert(key.to_string(), attribute);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(k, a)| (k.as_str(), a))
    }

    /// Check configuration against every attribute definition
    pub fn validate(&self, data: &ResourceData) -> Result<(), ResourceError> {
        for (key, attribute) in &self.attributes {
            attribute.validate(key, data.get(key))?;
        }
        Ok(())
    }

    /// Force-new attributes whose value differs between prior state and
    /// planned configuration
    pub fn replace_fields(&self, prior: &ResourceData, planned: &ResourceData) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|(key, attribute)| attribute.force_new && prior.get(key) != planned.get(key))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Attributes of any kind whose value differs
    pub fn changed_fields(&self, prior: &ResourceData, planned: &ResourceData) -> Vec<String> {
        self.attributes
            .keys()
            .filter(|key| prior.get(key) != planned.get(key))
            .cloned()
            .collect()
    }
}
