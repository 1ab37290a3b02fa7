use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure shapes reported by the marketplace backend.
///
/// The backend answers rejected requests with JSON carrying either a
/// `validationErrors` map (field name to message) or a single `message`
/// string. Anything else, including an unparsable body, is kept as the bare
/// status; transport-level problems stay as `Network`.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend rejected {} field(s)", .0.len())]
    Validation(BTreeMap<String, String>),

    #[error("backend error: {0}")]
    Message(String),

    #[error("backend returned status {0}")]
    Status(StatusCode),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Wire shape of a backend error body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    validation_errors: Option<BTreeMap<String, String>>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a non-success response body into a [`BackendError`]
pub(crate) fn decode_failure(status: StatusCode, body: &str) -> BackendError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            validation_errors: Some(errors),
            ..
        }) if !errors.is_empty() => BackendError::Validation(errors),
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => BackendError::Message(message),
        _ => BackendError::Status(status),
    }
}
