//! Field value parsing from JSON

use crate::{FieldValues, Result, TemplateError, TemplateKind};
use serde::Deserialize;

/// A composition request as sent by the form collaborator
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRequest {
    /// Document kind
    pub kind: TemplateKind,
    /// Raw field values
    #[serde(default)]
    pub fields: serde_json::Value,
}

/// Parse field values from a JSON object string
///
/// Strings are taken as-is, numbers and booleans are stringified, `null`
/// becomes an empty value.
pub fn parse_field_values(json: &str) -> Result<FieldValues> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))?;
    field_values_from_json(&value)
}

/// Convert an already parsed JSON object into field values
pub fn field_values_from_json(value: &serde_json::Value) -> Result<FieldValues> {
    match value {
        serde_json::Value::Object(map) => Ok(map
            .iter()
            .map(|(name, value)| (name.as_str(), value_to_string(value)))
            .collect()),
        serde_json::Value::Null => Ok(FieldValues::new()),
        other => Err(TemplateError::ParseError(format!(
            "field values must be a JSON object, got {}",
            json_type_name(other)
        ))),
    }
}

/// Parse a `{ "kind": ..., "fields": { ... } }` request
pub fn parse_document_request(json: &str) -> Result<(TemplateKind, FieldValues)> {
    let request: DocumentRequest =
        serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))?;
    let fields = field_values_from_json(&request.fields)?;
    Ok((request.kind, fields))
}

/// Convert a JSON value to string for rendering
pub fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => value.to_string(),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
