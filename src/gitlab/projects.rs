//! GitLab Projects
//!
//! The slice of the Projects API used to manage group shares.

use super::client::GitLabClient;
use super::error::GitLabError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A group the project is shared with, as reported by `GET /projects/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedWithGroup {
    pub group_id: i64,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub group_full_path: Option<String>,
    /// Raw access code; see [`crate::AccessLevel::from_code`]
    pub group_access_level: i64,
}

/// Project information
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    pub id: i64,
    #[serde(default)]
    pub shared_with_groups: Vec<SharedWithGroup>,
}

impl Project {
    /// Find the share entry for a group, if the project is shared with it
    pub fn shared_group(&self, group_id: i64) -> Option<&SharedWithGroup> {
        self.shared_with_groups.iter().find(|g| g.group_id == group_id)
    }
}

/// Options for `POST /projects/:id/share`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareWithGroupOptions {
    pub group_id: i64,
    pub group_access: i64,
}

impl ShareWithGroupOptions {
    pub fn new(group_id: i64, group_access: i64) -> Self {
        Self {
            group_id,
            group_access,
        }
    }
}

/// Project share operations the resource depends on
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// Share a project with a group at the given access code
    async fn share_project_with_group(
        &self,
        project_id: &str,
        options: &ShareWithGroupOptions,
    ) -> Result<Value, GitLabError>;

    /// Fetch a project, including the groups it is shared with
    async fn get_project(&self, project_id: &str) -> Result<Project, GitLabError>;

    /// Revoke a group's access to a project
    async fn delete_shared_project_from_group(
        &self,
        project_id: &str,
        group_id: i64,
    ) -> Result<(), GitLabError>;
}

#[async_trait]
impl ProjectsApi for GitLabClient {
    async fn share_project_with_group(
        &self,
        project_id: &str,
        options: &ShareWithGroupOptions,
    ) -> Result<Value, GitLabError> {
        let url = self.project_share_url(project_id);
        let body = serde_json::to_value(options)?;
        self.post(&url, &body).await
    }

    async fn get_project(&self, project_id: &str) -> Result<Project, GitLabError> {
        let url = self.project_url(project_id);
        let response = self.get(&url).await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn delete_shared_project_from_group(
        &self,
        project_id: &str,
        group_id: i64,
    ) -> Result<(), GitLabError> {
        let url = self.project_share_group_url(project_id, group_id);
        self.delete(&url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_parses_shared_with_groups() {
        let project: Project = serde_json::from_value(json!({
            "id": 42,
            "name": "widgets",
            "path_with_namespace": "acme/widgets",
            "visibility": "private",
            "shared_with_groups": [
                {
                    "group_id": 7,
                    "group_name": "devs",
                    "group_full_path": "acme/devs",
                    "group_access_level": 30
                },
                {"group_id": 9, "group_name": "ops", "group_access_level": 40}
            ]
        }))
        .unwrap();

        assert_eq!(project.shared_with_groups.len(), 2);
        assert_eq!(project.shared_group(9).map(|g| g.group_access_level), Some(40));
        assert!(project.shared_group(8).is_none());
    }

    #[test]
    fn project_without_shares_parses() {
        let project: Project = serde_json::from_value(json!({"id": 1})).unwrap();
        assert!(project.shared_with_groups.is_empty());
    }

    #[test]
    fn share_options_serialise_group_and_access() {
        let body = serde_json::to_value(ShareWithGroupOptions::new(7, 30)).unwrap();
        assert_eq!(body, json!({"group_id": 7, "group_access": 30}));
    }
}
