//! GitLab API error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the GitLab API.
#[derive(Debug, Error)]
pub enum GitLabError {
    #[error("GitLab API error: {status} - {message}")]
    Api { status: StatusCode, message: String },

    #[error("Authentication failed: {status} - {message}")]
    Auth { status: StatusCode, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl GitLabError {
    /// Classify an HTTP status code and response body into a typed error.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = api_message(body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth { status, message },
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited(message),
            _ => Self::Api { status, message },
        }
    }

    /// HTTP status behind this error, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::Auth { status, .. } => Some(*status),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::RateLimited(_) => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::Http(e) => e.status(),
            Self::Deserialize(_) => None,
        }
    }
}

/// Pull the `message` (or `error`) field out of a GitLab error body.
///
/// GitLab answers errors as `{"message": ...}` where the message is either a
/// string or an object of field errors; anything else is passed through.
fn api_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    match value.get("message").or_else(|| value.get("error")) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_classifies_auth() {
        let err =
            GitLabError::from_status(StatusCode::UNAUTHORIZED, r#"{"message":"401 Unauthorized"}"#);
        assert!(matches!(err, GitLabError::Auth { .. }));
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn from_status_classifies_not_found() {
        let err = GitLabError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"message":"404 Project Not Found"}"#,
        );
        assert_eq!(err.to_string(), "Not found: 404 Project Not Found");
    }

    #[test]
    fn from_status_keeps_structured_messages() {
        let err = GitLabError::from_status(
            StatusCode::CONFLICT,
            r#"{"message":{"group_id":["has already been taken"]}}"#,
        );
        match err {
            GitLabError::Api { status, message } => {
                assert_eq!(status, StatusCode::CONFLICT);
                assert!(message.contains("has already been taken"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_status_passes_plain_bodies_through() {
        let err = GitLabError::from_status(StatusCode::BAD_GATEWAY, "  upstream down\n");
        assert_eq!(err.to_string(), "GitLab API error: 502 Bad Gateway - upstream down");
    }
}
