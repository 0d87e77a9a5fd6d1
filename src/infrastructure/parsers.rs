use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// Decode an inbound webhook body into a JSON document.
///
/// The alerting platform double-encodes some templates: the body
/// arrives as a JSON string literal whose contents are the real
/// object, or as a quoted-and-escaped blob that is not valid JSON at
/// all. Try a direct decode first; unwrap one layer of quoting and
/// escaping and retry once before giving up.
pub fn parse_payload(raw: &[u8]) -> Result<Value, ParseError> {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::String(inner)) => {
            serde_json::from_str(&inner).map_err(|e| ParseError::Malformed(e.to_string()))
        }
        Ok(value) => Ok(value),
        Err(_) => {
            let text = String::from_utf8_lossy(raw);
            let unwrapped = text.trim().trim_matches('"').replace("\\\"", "\"");
            serde_json::from_str(&unwrapped).map_err(|e| ParseError::Malformed(e.to_string()))
        }
    }
}
