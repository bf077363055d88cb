//! Error classification for backend responses.

use reqwest::StatusCode;
use serde::Deserialize;

/// Failure of a single request against the bookstore backend.
///
/// Travels inside `anyhow::Error`; callers that care about the kind use
/// `err.downcast_ref::<ApiError>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP 401
    Unauthorized(String),
    /// HTTP 403
    Forbidden(String),
    /// HTTP 404
    NotFound(String),
    /// Any other 4xx
    Client { status: u16, message: String },
    /// 5xx
    Server { status: u16, message: String },
    /// The request never produced a response (connect, timeout, body read).
    Transport(String),
    /// A 2xx response whose body was not the expected JSON.
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => {
                write!(f, "Authentication required: {}. Try logging in again.", msg)
            }
            ApiError::Forbidden(msg) => write!(f, "Access forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Client { status, message } => {
                write!(f, "Request rejected (HTTP {}): {}", status, message)
            }
            ApiError::Server { status, message } => {
                write!(f, "Server error (HTTP {}): {}", status, message)
            }
            ApiError::Transport(msg) => write!(f, "Network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error bodies from the backend look like `{"message": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Builds the error for a non-2xx status, preferring the backend's own message.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
            StatusCode::FORBIDDEN => ApiError::Forbidden(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            s if s.is_server_error() => ApiError::Server {
                status: s.as_u16(),
                message,
            },
            s => ApiError::Client {
                status: s.as_u16(),
                message,
            },
        }
    }

    pub fn from_transport(error: &reqwest::Error) -> Self {
        ApiError::Transport(error.to_string())
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// 401 and 403: the credential itself was rejected.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::Forbidden(_))
    }

    /// Failures that might succeed if the same request is sent again.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Server { .. } | ApiError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classifies_auth_errors() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "");
        assert_eq!(err, ApiError::Unauthorized("Unauthorized".to_string()));
        assert!(err.is_auth());

        let err = ApiError::from_status(StatusCode::FORBIDDEN, "");
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert!(err.is_auth());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_from_status_uses_backend_message() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Genre already exists"}"#,
        );
        assert_eq!(
            err,
            ApiError::Client {
                status: 400,
                message: "Genre already exists".to_string()
            }
        );
        assert!(err.to_string().contains("Genre already exists"));
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn test_from_status_ignores_blank_or_foreign_bodies() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"message": "  "}"#);
        assert_eq!(err, ApiError::NotFound("Not Found".to_string()));

        let err = ApiError::from_status(StatusCode::NOT_FOUND, "<html>oops</html>");
        assert_eq!(err, ApiError::NotFound("Not Found".to_string()));
    }

    #[test]
    fn test_server_and_transport_errors_are_transient() {
        let err = ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.status(), Some(503));
        assert!(err.is_transient());
        assert!(!err.is_auth());

        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert!(err.is_transient());
    }

    #[test]
    fn test_other_client_errors_are_final() {
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "");
        assert_eq!(err.status(), Some(422));
        assert!(!err.is_transient());
        assert!(!err.is_auth());

        let err = ApiError::Decode("missing field `data`".to_string());
        assert!(!err.is_transient());
        assert!(err.to_string().contains("missing field"));
    }
}
