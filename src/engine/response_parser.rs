use serde_json::Value;

use crate::error::ParseError;

/// Decode a model reply as JSON, tolerating a markdown code fence around it.
pub fn parse_response(raw: &str) -> Result<Value, ParseError> {
    let mut cleaned = raw.trim();

    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }

    Ok(serde_json::from_str(cleaned.trim())?)
}
