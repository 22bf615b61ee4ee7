//! Shaping helpers for backend responses.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Build the object a create mutation returns: the caller's input plus the
/// identifier the backend assigned. The backend answers creates with `{id}`
/// only, so this avoids a second round trip. A numeric id is kept as its
/// decimal string, the form GraphQL `ID`s take.
pub fn merge_created<I, O>(input: &I, id: Value) -> Result<O, serde_json::Error>
where
    I: Serialize,
    O: DeserializeOwned,
{
    let id = match id {
        Value::Number(number) => Value::String(number.to_string()),
        other => other,
    };

    let mut merged = serde_json::to_value(input)?;
    if let Value::Object(fields) = &mut merged {
        fields.insert("id".to_string(), id);
    }
    serde_json::from_value(merged)
}

/// Whether a single-object lookup came back empty (`null` or `{}`).
pub fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}
