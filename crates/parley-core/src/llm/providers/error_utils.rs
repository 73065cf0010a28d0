//! Vendor error body handling

use crate::error::ParleyError;
use crate::llm::provider_types::ProviderId;
use serde_json::Value;

/// The vendor's own error message, if the body carries one
///
/// All three vendors use `{"error": {"message": ...}}`; Gemini sometimes
/// wraps it in a one-element array.
pub fn extract_error_message(body: &Value) -> Option<String> {
    let body = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    let message = match &body["error"] {
        Value::String(message) => message.as_str(),
        error => error["message"].as_str()?,
    };
    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}

/// Build the error for a non-2xx status
pub fn api_error(status: u16, body: &Value, provider: ProviderId) -> ParleyError {
    let message = extract_error_message(body).unwrap_or_else(|| format!("API error: {}", status));
    ParleyError::api(status, message, provider.as_str())
}
