//! Conversion between plain JSON and Firestore's typed value encoding.
//!
//! Firestore's REST API wraps every value in a single-key object naming its
//! type, e.g. `{"integerValue": "42"}` or `{"mapValue": {"fields": {...}}}`.
//! 64-bit integers travel as strings.

use serde_json::{Map, Number, Value, json};

use super::{Document, StoreError};

/// Encodes a document as the `fields` map of a Firestore document body.
pub(crate) fn encode_fields(document: &Document) -> Map<String, Value> {
    document
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Decodes the `fields` map of a Firestore document into plain JSON.
pub(crate) fn decode_fields(fields: &Map<String, Value>) -> Result<Document, StoreError> {
    fields
        .iter()
        .map(|(key, value)| Ok::<_, StoreError>((key.clone(), decode_value(value)?)))
        .collect()
}

fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err(StoreError::Codec(format!("expected typed value, got {value}")));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| StoreError::Codec(format!("invalid booleanValue: {inner}"))),
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                other => other.as_i64(),
            };
            parsed
                .map(Value::from)
                .ok_or_else(|| StoreError::Codec(format!("invalid integerValue: {inner}")))
        }
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| StoreError::Codec(format!("unrepresentable doubleValue: {inner}"))),
        // Timestamps, references and bytes surface as their string forms.
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| StoreError::Codec(format!("invalid {kind}: {inner}"))),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(Value::Array(values)) => values
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?,
                _ => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => {
            let fields = match inner.get("fields") {
                Some(Value::Object(fields)) => decode_fields(fields)?,
                _ => Map::new(),
            };
            Ok(Value::Object(fields))
        }
        other => Err(StoreError::Codec(format!("unsupported value type {other}"))),
    }
}

/// Extracts the document id from a full resource name such as
/// `projects/p/databases/(default)/documents/users/admin001`.
pub(crate) fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_encode_scalars() {
        let fields = encode_fields(&document(json!({
            "name": "admin",
            "createdAt": 1_704_067_200_000_i64,
            "isActive": true,
            "ratio": 0.5,
            "missing": null
        })));

        assert_eq!(fields["name"], json!({ "stringValue": "admin" }));
        assert_eq!(fields["createdAt"], json!({ "integerValue": "1704067200000" }));
        assert_eq!(fields["isActive"], json!({ "booleanValue": true }));
        assert_eq!(fields["ratio"], json!({ "doubleValue": 0.5 }));
        assert_eq!(fields["missing"], json!({ "nullValue": null }));
    }

    #[test]
    fn test_encode_nested_map() {
        let fields = encode_fields(&document(json!({
            "clientStatusSettings": { "greenDays": 30, "tags": ["a"] }
        })));

        assert_eq!(
            fields["clientStatusSettings"],
            json!({
                "mapValue": { "fields": {
                    "greenDays": { "integerValue": "30" },
                    "tags": { "arrayValue": { "values": [ { "stringValue": "a" } ] } }
                } }
            })
        );
    }

    #[test]
    fn test_decode_server_document() {
        let fields = document(json!({
            "role": { "stringValue": "admin" },
            "createdAt": { "integerValue": "1704067200000" },
            "lastLogin": { "timestampValue": "2024-01-01T00:00:00Z" },
            "settings": { "mapValue": {} },
            "tags": { "arrayValue": {} },
            "score": { "doubleValue": 1.5 }
        }));

        let decoded = decode_fields(&fields).unwrap();
        assert_eq!(decoded["role"], "admin");
        assert_eq!(decoded["createdAt"], 1_704_067_200_000_i64);
        assert_eq!(decoded["lastLogin"], "2024-01-01T00:00:00Z");
        assert_eq!(decoded["settings"], json!({}));
        assert_eq!(decoded["tags"], json!([]));
        assert_eq!(decoded["score"], 1.5);
    }

    #[test]
    fn test_decode_rejects_untyped_value() {
        let fields = document(json!({ "role": "admin" }));
        assert!(matches!(decode_fields(&fields), Err(StoreError::Codec(_))));

        let fields = document(json!({ "n": { "integerValue": "not a number" } }));
        assert!(decode_fields(&fields).is_err());
    }

    #[test]
    fn test_encoded_document_decodes_to_original() {
        let original = document(json!({
            "systemSettings": {
                "autoFreeze": true,
                "lastUpdated": 1_704_067_200_000_i64
            },
            "agentName": ""
        }));

        let encoded = Value::Object(encode_fields(&original));
        let decoded = decode_fields(encoded.as_object().unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_document_id() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/users/admin001"),
            Some("admin001")
        );
        assert_eq!(document_id("users/"), None);
    }
}
