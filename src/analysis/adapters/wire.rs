use serde_json::Value;

use crate::analysis::{
    error::{AnalysisError, schema_error, server_error},
    types::AnalysisResult,
};

const BODY_EXCERPT_CHARS: usize = 240;

/// Decodes a success body into a result. The service answers some failures
/// with a 2xx error envelope; those are reported as server errors.
pub fn decode_analysis_body(body: &str) -> Result<AnalysisResult, AnalysisError> {
    let value: Value = serde_json::from_str(body).map_err(|err| {
        schema_error(format!(
            "analysis response is not valid JSON: {err}; body: {}",
            excerpt(body)
        ))
    })?;

    if let Some(reason) = error_envelope(&value) {
        return Err(server_error(format!(
            "reasoning service reported an error: {reason}"
        )));
    }

    // Decoded from the text, not `value`: a `Value` map already collapsed any
    // repeated keys.
    serde_json::from_str(body).map_err(|err| {
        schema_error(format!(
            "analysis response violates the result contract: {err}"
        ))
    })
}

pub fn map_http_error(status: u16, body: &str) -> AnalysisError {
    let normalized_body = excerpt(body);
    let message = if normalized_body.is_empty() {
        format!("reasoning service returned status {status}")
    } else {
        format!("reasoning service returned status {status}: {normalized_body}")
    };
    server_error(message).with_http_status(status)
}

pub fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

fn error_envelope(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    let code = object.get("error")?;
    let code = code
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string());

    match object.get("message").and_then(Value::as_str) {
        Some(message) => Some(format!("{code}: {}", excerpt(message))),
        None => Some(code),
    }
}
