use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Multipart parsing error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Upload too large: {0}")]
    UploadTooLarge(String),

    #[error("Backend returned {0}")]
    Backend(StatusCode),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // HTTP errors might contain internal URLs or authentication info
            Error::Http(e) if e.is_timeout() => "Backend request timed out".to_string(),
            Error::Http(e) if e.is_connect() => "Backend unreachable".to_string(),
            Error::Http(_) => "External HTTP request failed".to_string(),

            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password")
                    || lower.contains("secret")
                    || lower.contains("token")
                    || lower.contains("key")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::Multipart(e) => format!("Multipart parsing error: {}", e.body_text()),
            Error::UploadTooLarge(msg) => format!("Upload too large: {msg}"),
            Error::Backend(status) => format!("Backend returned {status}"),
            Error::InvalidJson(_) => "Backend returned invalid JSON".to_string(),
            Error::Io(_) => "File system operation failed".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
            Error::RateLimited => "Rate limit exceeded".to_string(),
            Error::MethodNotAllowed => "Method not allowed".to_string(),
        }
    }
}

// Everything except a wrong method collapses to a generic 500
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Error::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
            _ => {
                tracing::error!("Error processing request: {}", self.log_safe());
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_not_allowed_status() {
        let response = Error::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_other_errors_are_generic_500() {
        let errors = [
            Error::UploadTooLarge("image".to_string()),
            Error::Backend(StatusCode::BAD_GATEWAY),
            Error::RateLimited,
            Error::Validation("bad".to_string()),
            Error::Internal("boom".to_string()),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_log_safe_redacts_secrets() {
        let error = Error::Internal("api token abc123 rejected".to_string());
        assert_eq!(error.log_safe(), "Internal error (details redacted)");

        let error = Error::Internal("template failed".to_string());
        assert_eq!(error.log_safe(), "Internal error: template failed");
    }
}
