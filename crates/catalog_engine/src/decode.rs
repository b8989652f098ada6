use catalog_core::{RatingEntry, Record};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid json: {0}")]
    InvalidJson(String),
    #[error("expected a json array, found {found}")]
    NotAnArray { found: &'static str },
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes the videos collection. Elements are kept as-is; field access is
/// tolerant, so odd elements become records with default fields.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<Record>, DecodeError> {
    Ok(decode_array(bytes)?
        .into_iter()
        .map(Record::from_value)
        .collect())
}

/// Decodes the rating collection.
pub fn decode_rating(bytes: &[u8]) -> Result<Vec<RatingEntry>, DecodeError> {
    Ok(decode_array(bytes)?
        .iter()
        .map(RatingEntry::from_value)
        .collect())
}

fn decode_array(bytes: &[u8]) -> Result<Vec<Value>, DecodeError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::InvalidJson(err.to_string()))?;
    match value {
        Value::Array(items) => Ok(items),
        other => Err(DecodeError::NotAnArray {
            found: kind_name(&other),
        }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
