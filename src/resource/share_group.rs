//! Project group share resource
//!
//! Grants a group access to a project at a given access level. The resource
//! is identified by `"<project_id>:<group_id>"`; `project_id` and `group_id`
//! force replacement when changed, only `access_level` updates in place.

use super::data::ResourceData;
use super::error::ResourceError;
use super::id::{project_and_group_from_id, project_group_id};
use super::schema::{Attribute, Schema};
use super::{ReadOutcome, Resource};
use crate::access_level::{shareable_access_levels, AccessLevel};
use crate::gitlab::{ProjectsApi, ShareWithGroupOptions, SharedWithGroup};
use async_trait::async_trait;

/// Resource type name
pub const RESOURCE_TYPE: &str = "gitlab_project_share_group";

pub const PROJECT_ID: &str = "project_id";
pub const GROUP_ID: &str = "group_id";
pub const ACCESS_LEVEL: &str = "access_level";

/// Schema of [`ProjectShareGroup`]
pub fn share_group_schema() -> Schema {
    Schema::new()
        .with_attribute(PROJECT_ID, Attribute::required_string().force_new())
        .with_attribute(GROUP_ID, Attribute::required_int().force_new())
        .with_attribute(
            ACCESS_LEVEL,
            Attribute::required_string().with_allowed_values(shareable_access_levels()),
        )
}

/// Shares a GitLab project with a group
pub struct ProjectShareGroup<C> {
    client: C,
    schema: Schema,
}

impl<C: ProjectsApi> ProjectShareGroup<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            schema: share_group_schema(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Validate configuration and build the share request it describes
    fn share_request(
        &self,
        d: &ResourceData,
    ) -> Result<(String, ShareWithGroupOptions), ResourceError> {
        self.schema.validate(d)?;

        let project_id = d.get_string(PROJECT_ID)?.to_string();
        let group_id = d.get_int(GROUP_ID)?;
        let access_level = d.get_string(ACCESS_LEVEL)?;
        let level = AccessLevel::from_name(access_level).ok_or_else(|| {
            ResourceError::Validation(format!("unknown access level: {access_level}"))
        })?;

        Ok((project_id, ShareWithGroupOptions::new(group_id, level.code())))
    }
}

/// Overwrite state from the share entry the server reported
fn set_to_state(
    d: &mut ResourceData,
    group: &SharedWithGroup,
    project_id: &str,
) -> Result<(), ResourceError> {
    let level = AccessLevel::from_code(group.group_access_level)
        .ok_or(ResourceError::UnknownAccessLevel(group.group_access_level))?;

    d.set(PROJECT_ID, project_id);
    d.set(GROUP_ID, group.group_id);
    d.set(ACCESS_LEVEL, level.name());
    d.set_id(project_group_id(project_id, group.group_id));
    Ok(())
}

#[async_trait]
impl<C: ProjectsApi> Resource for ProjectShareGroup<C> {
    fn resource_type(&self) -> &'static str {
        RESOURCE_TYPE
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    async fn create(&self, d: &mut ResourceData) -> Result<(), ResourceError> {
        let (project_id, options) = self.share_request(d)?;
        tracing::debug!(
            "create gitlab project share for group {} in {}",
            options.group_id,
            project_id
        );

        self.client
            .share_project_with_group(&project_id, &options)
            .await?;

        d.set_id(project_group_id(&project_id, options.group_id));
        self.read(d).await?;
        Ok(())
    }

    async fn read(&self, d: &mut ResourceData) -> Result<ReadOutcome, ResourceError> {
        let id = d.id().to_string();
        tracing::debug!("read gitlab project share {}", id);

        let (project_id, group_id) = project_and_group_from_id(&id)?;
        let project = self.client.get_project(&project_id).await?;

        match project.shared_group(group_id) {
            Some(group) => {
                set_to_state(d, group, &project_id)?;
                Ok(ReadOutcome::Found)
            }
            None => {
                // State is left as it was; the caller decides what a miss means.
                tracing::warn!("project {} is not shared with group {}", project_id, group_id);
                Ok(ReadOutcome::NotFound)
            }
        }
    }

    async fn update(&self, d: &mut ResourceData) -> Result<(), ResourceError> {
        let (project_id, options) = self.share_request(d)?;
        tracing::debug!(
            "update gitlab project share for group {} in {}",
            options.group_id,
            project_id
        );

        self.client
            .share_project_with_group(&project_id, &options)
            .await?;

        self.read(d).await?;
        Ok(())
    }

    async fn delete(&self, d: &ResourceData) -> Result<(), ResourceError> {
        let (project_id, group_id) = project_and_group_from_id(d.id())?;
        tracing::debug!("delete gitlab project share for group {} in {}", group_id, project_id);

        self.client
            .delete_shared_project_from_group(&project_id, group_id)
            .await?;
        Ok(())
    }
}
