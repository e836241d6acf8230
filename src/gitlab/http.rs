//! HTTP utilities for GitLab REST API calls

use super::error::GitLabError;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Header GitLab reads personal and project access tokens from
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Sanitize response body for logging
/// Truncates long responses and drops non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = match body.char_indices().nth(MAX_LOG_BODY_LENGTH) {
        Some((cut, _)) => format!("{}... [truncated, {} bytes total]", &body[..cut], body.len()),
        None => body.to_string(),
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for GitLab API calls
#[derive(Clone)]
pub struct GitLabHttpClient {
    client: Client,
}

impl GitLabHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self, GitLabError> {
        let client = Client::builder()
            .user_agent(concat!("glshare/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request to the GitLab API
    pub async fn get(&self, url: &str, token: &str) -> Result<Value, GitLabError> {
        tracing::debug!("GET {}", url);
        self.send(self.client.get(url), token).await
    }

    /// Make a POST request with a JSON body to the GitLab API
    pub async fn post(&self, url: &str, token: &str, body: &Value) -> Result<Value, GitLabError> {
        tracing::debug!("POST {}", url);
        self.send(self.client.post(url).json(body), token).await
    }

    /// Make a DELETE request to the GitLab API
    pub async fn delete(&self, url: &str, token: &str) -> Result<Value, GitLabError> {
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url), token).await
    }

    async fn send(&self, request: RequestBuilder, token: &str) -> Result<Value, GitLabError> {
        let response = request.header(TOKEN_HEADER, token).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(GitLabError::from_status(status, &body));
        }

        // 204 No Content and friends
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Format a GitLab API error for display
/// Maps status classes to short messages instead of echoing raw API bodies
pub fn format_gitlab_error(error: &GitLabError) -> String {
    if let GitLabError::Deserialize(_) = error {
        return "Unexpected response from GitLab.".to_string();
    }

    let Some(status) = error.status() else {
        return "Request failed. Check your network connection and GitLab URL.".to_string();
    };

    match status.as_u16() {
        401 => "Authentication failed. Check your GitLab token.".to_string(),
        403 => "Permission denied. The token cannot manage this project.".to_string(),
        404 => "Project or group not found.".to_string(),
        409 => "Conflict. The project may already be shared with this group.".to_string(),
        429 => "Rate limit exceeded. Please try again later.".to_string(),
        400 | 422 => "Invalid request. Check your parameters.".to_string(),
        500..=599 => "GitLab service temporarily unavailable. Please try again.".to_string(),
        other => format!("Request failed with status {}.", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let logged = sanitize_for_log(&body);
        assert!(logged.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(logged.ends_with("[truncated, 500 bytes total]"));
    }

    #[test]
    fn sanitize_respects_char_boundaries() {
        let body = "é".repeat(300);
        let logged = sanitize_for_log(&body);
        assert!(logged.contains("[truncated, 600 bytes total]"));
    }

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("a\nb\tc"), "abc");
    }

    #[test]
    fn format_maps_status_classes() {
        let err = GitLabError::from_status(StatusCode::FORBIDDEN, "{}");
        assert_eq!(
            format_gitlab_error(&err),
            "Permission denied. The token cannot manage this project."
        );

        let err = GitLabError::from_status(StatusCode::SERVICE_UNAVAILABLE, "secret details");
        let msg = format_gitlab_error(&err);
        assert!(!msg.contains("secret"));
    }
}
