//! Closed-schema transform for structured output.
//!
//! The JSON Schemas sent to the provider are hand-written next to each
//! result type. Before a schema leaves this crate, every object node in it
//! is closed: providers otherwise accept undeclared properties silently, and
//! models fabricate extra fields to fill them.

use serde_json::Value;

/// Recursively mark every `"type": "object"` node as disallowing properties
/// outside its declared set, including objects nested in arrays.
pub fn close_object_schemas(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            for value in map.values_mut() {
                close_object_schemas(value);
            }
        }
        Value::Array(items) => {
            for item in items {
                close_object_schemas(item);
            }
        }
        _ => {}
    }
}

/// Consuming form of [`close_object_schemas`].
pub fn closed(mut schema: Value) -> Value {
    close_object_schemas(&mut schema);
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn closes_top_level_object() {
        let schema = closed(json!({
            "type": "object",
            "properties": { "name": { "type": "string" } }
        }));
        assert_eq!(schema["additionalProperties"], json!(false));
    }

    #[test]
    fn closes_nested_objects_inside_arrays() {
        let schema = closed(json!({
            "type": "object",
            "properties": {
                "dishes": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "inner": {
                                "type": "object",
                                "properties": { "x": { "type": "integer" } }
                            }
                        }
                    }
                }
            }
        }));

        assert_eq!(schema["additionalProperties"], json!(false));
        let items = &schema["properties"]["dishes"]["items"];
        assert_eq!(items["additionalProperties"], json!(false));
        assert_eq!(
            items["properties"]["inner"]["additionalProperties"],
            json!(false)
        );
    }

    #[test]
    fn leaves_non_object_nodes_alone() {
        let schema = closed(json!({
            "type": "array",
            "items": { "type": "string" }
        }));
        assert!(schema.get("additionalProperties").is_none());
        assert!(schema["items"].get("additionalProperties").is_none());
    }
}
