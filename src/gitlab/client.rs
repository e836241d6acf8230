//! GitLab Client
//!
//! Main client for interacting with the GitLab REST API, combining the
//! access token and HTTP functionality.

use super::error::GitLabError;
use super::http::GitLabHttpClient;
use serde_json::Value;

/// Main GitLab client
#[derive(Clone)]
pub struct GitLabClient {
    pub http: GitLabHttpClient,
    base_url: String,
    token: String,
}

impl GitLabClient {
    /// Create a new GitLab client.
    ///
    /// `base_url` is the API root, e.g. `https://gitlab.com/api/v4`.
    pub fn new(base_url: &str, token: &str) -> Result<Self, GitLabError> {
        Ok(Self {
            http: GitLabHttpClient::new()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// API root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request to the GitLab API
    pub async fn get(&self, url: &str) -> Result<Value, GitLabError> {
        self.http.get(url, &self.token).await
    }

    /// Make a POST request to the GitLab API
    pub async fn post(&self, url: &str, body: &Value) -> Result<Value, GitLabError> {
        self.http.post(url, &self.token, body).await
    }

    /// Make a DELETE request to the GitLab API
    pub async fn delete(&self, url: &str) -> Result<Value, GitLabError> {
        self.http.delete(url, &self.token).await
    }

    // =========================================================================
    // Projects API helpers
    // =========================================================================

    /// Build a project URL.
    ///
    /// `project_id` is either a numeric ID or a `namespace/path` string; the
    /// latter must be sent as a single percent-encoded path segment.
    pub fn project_url(&self, project_id: &str) -> String {
        format!("{}/projects/{}", self.base_url, urlencoding::encode(project_id))
    }

    /// Build the URL used to share a project with a group
    pub fn project_share_url(&self, project_id: &str) -> String {
        format!("{}/share", self.project_url(project_id))
    }

    /// Build the URL of one project/group share
    pub fn project_share_group_url(&self, project_id: &str, group_id: i64) -> String {
        format!("{}/{}", self.project_share_url(project_id), group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitLabClient {
        GitLabClient::new("https://gitlab.example.com/api/v4/", "token").unwrap()
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        assert_eq!(client().base_url(), "https://gitlab.example.com/api/v4");
    }

    #[test]
    fn numeric_project_ids_are_used_as_is() {
        assert_eq!(
            client().project_url("42"),
            "https://gitlab.example.com/api/v4/projects/42"
        );
    }

    #[test]
    fn project_paths_are_percent_encoded() {
        assert_eq!(
            client().project_share_url("my-group/my project"),
            "https://gitlab.example.com/api/v4/projects/my-group%2Fmy%20project/share"
        );
    }

    #[test]
    fn share_group_url_appends_group_id() {
        assert_eq!(
            client().project_share_group_url("42", 7),
            "https://gitlab.example.com/api/v4/projects/42/share/7"
        );
    }
}
