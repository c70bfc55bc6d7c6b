//! Client error types.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use verdia_core::session::SessionError;

/// Convenience alias for client operation return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the request gateway and the endpoint bindings.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Terminal authorization failure — the 401 survived the single
    /// refresh-and-replay cycle (or no cycle was possible).
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any non-401 API failure, passed through untouched.
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response decode error: {0}")]
    Decode(String),

    #[error("Request encode error: {0}")]
    Encode(String),

    #[error("Session store error: {0}")]
    Session(#[from] SessionError),
}

/// Error body shape emitted by the API (`{error, message}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Map a failed HTTP response to an error, preferring the server's
    /// `message` field over the status line.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                message: Some(message),
            }) => message,
            _ => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Api { status, message }
        }
    }

    /// Whether this is a terminal authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}
