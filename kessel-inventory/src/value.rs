//! Conversions between JSON values and protobuf `Struct` attribute maps.

use crate::error::ApiError;
use prost_types::{value::Kind, ListValue, Struct, Value};
use serde_json::{Map, Number};

/// Convert a JSON object into a protobuf `Struct`
///
/// ```
/// use serde_json::json;
///
/// let common = kessel_inventory::to_struct(json!({ "workspace_id": "6eb10953" })).unwrap();
/// assert!(common.fields.contains_key("workspace_id"));
/// ```
pub fn to_struct(value: serde_json::Value) -> Result<Struct, ApiError> {
    match value {
        serde_json::Value::Object(map) => Ok(object_to_struct(map)),
        other => Err(ApiError::InvalidRequest(format!(
            "attributes must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Convert a protobuf `Struct` back into a JSON object
pub fn from_struct(value: &Struct) -> serde_json::Value {
    serde_json::Value::Object(
        value
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), from_value(value)))
            .collect(),
    )
}

fn object_to_struct(map: Map<String, serde_json::Value>) -> Struct {
    Struct {
        fields: map
            .into_iter()
            .map(|(key, value)| (key, to_value(value)))
            .collect(),
    }
}

fn to_value(value: serde_json::Value) -> Value {
    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(0),
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or_default()),
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(items) => Kind::ListValue(ListValue {
            values: items.into_iter().map(to_value).collect(),
        }),
        serde_json::Value::Object(map) => Kind::StructValue(object_to_struct(map)),
    };
    Value { kind: Some(kind) }
}

fn from_value(value: &Value) -> serde_json::Value {
    match &value.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(*b),
        Some(Kind::NumberValue(n)) => Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s.clone()),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.iter().map(from_value).collect())
        }
        Some(Kind::StructValue(s)) => from_struct(s),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_attributes_keep_their_kinds() {
        let reporter = to_struct(json!({
            "document_id": "doc-123",
            "document_name": "My Important Document",
            "document_type": "presentation",
            "owner_id": "user-456",
            "file_size": 2048576,
            "shared": false,
            "labels": ["q3", "draft"],
            "parent": { "folder_id": "folder-9", "depth": 2 },
            "deleted_at": null
        }))
        .unwrap();

        assert!(matches!(
            reporter.fields["file_size"].kind,
            Some(Kind::NumberValue(n)) if n == 2048576.0
        ));
        assert!(matches!(
            reporter.fields["shared"].kind,
            Some(Kind::BoolValue(false))
        ));
        assert!(matches!(
            reporter.fields["labels"].kind,
            Some(Kind::ListValue(ref list)) if list.values.len() == 2
        ));
        assert!(matches!(
            reporter.fields["parent"].kind,
            Some(Kind::StructValue(ref parent)) if parent.fields.contains_key("folder_id")
        ));
        assert!(matches!(
            reporter.fields["deleted_at"].kind,
            Some(Kind::NullValue(_))
        ));
    }

    #[test]
    fn test_from_struct_restores_json() {
        let original = json!({
            "workspace_id": "6eb10953-4ec9-4feb-838f-ba43a60880bf",
            "tags": ["a", { "b": true }],
            "count": 1.5
        });
        let restored = from_struct(&to_struct(original.clone()).unwrap());
        assert_eq!(restored, original);
    }

    #[test]
    fn test_integers_become_doubles() {
        let restored = from_struct(&to_struct(json!({ "size": 3 })).unwrap());
        assert_eq!(restored["size"], json!(3.0));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = to_struct(json!(["not", "an", "object"])).unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(to_struct(json!("text")).is_err());
    }
}
