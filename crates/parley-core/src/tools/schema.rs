//! Tool schema normalization
//!
//! Registries hand out loosely shaped schemas. Every vendor wants at least an
//! object type and a properties map, so [`normalize`] fills those in. Keys the
//! normalizer does not own are carried through untouched; stripping keys a
//! particular vendor rejects happens later, in that vendor's adapter.

use crate::tools::types::ToolDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Minimal schema shape accepted by all providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Remaining keys, e.g. `additionalProperties`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NormalizedSchema {
    pub fn into_value(self) -> Value {
        let mut map = self.extra;
        map.insert("type".to_string(), Value::String(self.schema_type));
        map.insert("properties".to_string(), Value::Object(self.properties));
        if let Some(required) = self.required {
            map.insert(
                "required".to_string(),
                Value::Array(required.into_iter().map(Value::String).collect()),
            );
        }
        Value::Object(map)
    }
}

/// Normalize a descriptor's input schema. Never fails.
pub fn normalize(tool: &ToolDescriptor) -> NormalizedSchema {
    let mut map = match &tool.input_schema {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };

    let schema_type = match map.remove("type") {
        Some(Value::String(t)) if !t.is_empty() => t,
        _ => "object".to_string(),
    };

    let properties = match map.remove("properties") {
        Some(Value::Object(props)) => props,
        _ => Map::new(),
    };

    let required = match map.remove("required") {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ),
        _ => None,
    };

    NormalizedSchema {
        schema_type,
        properties,
        required,
        extra: map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_schema_defaults_to_empty_object() {
        let tool = ToolDescriptor::new("ping", "");
        assert_eq!(
            normalize(&tool).into_value(),
            json!({"type": "object", "properties": {}})
        );
    }

    #[test]
    fn test_missing_type_and_properties_are_filled() {
        let tool = ToolDescriptor::new("ping", "").with_input_schema(json!({"required": ["a"]}));
        let schema = normalize(&tool);
        assert_eq!(schema.schema_type, "object");
        assert!(schema.properties.is_empty());
        assert_eq!(schema.required, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_null_properties_become_empty_map() {
        let tool = ToolDescriptor::new("ping", "")
            .with_input_schema(json!({"type": "object", "properties": null}));
        assert_eq!(
            normalize(&tool).into_value(),
            json!({"type": "object", "properties": {}})
        );
    }

    #[test]
    fn test_existing_schema_and_extra_keys_survive() {
        let tool = ToolDescriptor::new("search", "Search posts").with_input_schema(json!({
            "type": "object",
            "properties": {"query": {"type": "string"}},
            "required": ["query"],
            "additionalProperties": false
        }));
        let value = normalize(&tool).into_value();
        assert_eq!(value["properties"]["query"]["type"], "string");
        assert_eq!(value["required"], json!(["query"]));
        assert_eq!(value["additionalProperties"], json!(false));
    }

    #[test]
    fn test_non_object_schema_is_ignored() {
        let tool = ToolDescriptor::new("ping", "").with_input_schema(json!("nonsense"));
        assert_eq!(normalize(&tool).schema_type, "object");
    }
}
