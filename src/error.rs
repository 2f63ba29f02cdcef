/// Error types for the diagnosis service.
///
/// Every failure the orchestrator can hit is a variant here, so handlers can
/// always render one coherent error state instead of propagating panics.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

pub const TIMEOUT_MESSAGE: &str =
    "The request to the prediction API timed out. Please try again later.";
pub const API_FALLBACK_MESSAGE: &str = "Failed to get specific error message from API.";

#[derive(Debug)]
pub enum AppError {
    /// Bad submission; reported before any external call.
    Validation(String),
    /// Missing classifier URL or credential.
    Config(String),
    Timeout,
    Unreachable(String),
    /// The classifier answered with an error. `status` is `None` when the
    /// error arrived inside a successful response body.
    Api { status: Option<u16>, message: String },
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{msg}"),
            AppError::Config(msg) => write!(f, "{msg}"),
            AppError::Timeout => write!(f, "{TIMEOUT_MESSAGE}"),
            AppError::Unreachable(msg) => write!(f, "{msg}"),
            AppError::Api {
                status: Some(status),
                message,
            } => write!(f, "Prediction API request failed ({status}): {message}"),
            AppError::Api {
                status: None,
                message,
            } => write!(f, "Prediction API Error: {message}"),
            AppError::Internal(msg) => write!(f, "An unexpected error occurred: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Unreachable(_) => StatusCode::BAD_GATEWAY,
            AppError::Api { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {err}"))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else if err.is_connect() || err.is_request() {
            AppError::Unreachable(
                "Prediction API request made but no response received. Check network or API status."
                    .to_string(),
            )
        } else if err.is_decode() {
            AppError::Api {
                status: None,
                message: format!("Malformed response from classifier: {err}"),
            }
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), "{message}");
        } else {
            warn!(status = status.as_u16(), "{message}");
        }

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
