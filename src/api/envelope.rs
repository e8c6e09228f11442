//! Response envelope handling.
//!
//! Success bodies are `{ "data": <payload> }`; a body without `data` is taken
//! as the payload itself. Error bodies are `{ "message": "..." }`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::{ApiError, NETWORK_ERROR_MESSAGE};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Decode a 2xx body into `T`, unwrapping the `data` envelope.
pub fn decode_data<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| ApiError::Parse(e.to_string()))?;

    let payload = match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    };

    serde_json::from_value(payload).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Build the error for a non-2xx response.
///
/// The server's `message` is kept verbatim; anything unparseable or blank
/// falls back to [`NETWORK_ERROR_MESSAGE`].
pub fn error_from_body(status: u16, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| NETWORK_ERROR_MESSAGE.to_string());

    ApiError::Api { status, message }
}
