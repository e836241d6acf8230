//! Planning and applying changes
//!
//! Compares prior state with desired configuration and drives the matching
//! lifecycle call, replacing the resource when a force-new attribute moved.

use super::data::ResourceData;
use super::error::ResourceError;
use super::schema::Schema;
use super::{ReadOutcome, Resource};
use crate::gitlab::GitLabError;

/// Lifecycle call needed to reach the desired configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Nothing exists yet
    Create,
    /// Mutable attributes changed
    Update(Vec<String>),
    /// Force-new attributes changed; delete then create
    Replace(Vec<String>),
    /// Configuration matches state; only refresh it
    Refresh,
}

impl Plan {
    /// Short human-readable description
    pub fn describe(&self) -> String {
        match self {
            Plan::Create => "create".to_string(),
            Plan::Update(fields) => format!("update in place ({})", fields.join(", ")),
            Plan::Replace(fields) => format!("replace ({} forces replacement)", fields.join(", ")),
            Plan::Refresh => "no changes".to_string(),
        }
    }
}

/// Decide how to move from `prior` state to `config`.
///
/// Configuration is validated first so nothing reaches the API on bad input.
pub fn plan(
    schema: &Schema,
    prior: Option<&ResourceData>,
    config: &ResourceData,
) -> Result<Plan, ResourceError> {
    schema.validate(config)?;

    let Some(prior) = prior.filter(|p| !p.is_new()) else {
        return Ok(Plan::Create);
    };

    let replace = schema.replace_fields(prior, config);
    if !replace.is_empty() {
        return Ok(Plan::Replace(replace));
    }

    let changed = schema.changed_fields(prior, config);
    if !changed.is_empty() {
        return Ok(Plan::Update(changed));
    }

    Ok(Plan::Refresh)
}

/// Re-read prior state before diffing against configuration.
///
/// A share that no longer exists upstream comes back as `None`, so the
/// following [`plan`] creates it again instead of trusting stale state.
pub async fn refresh_prior<R>(
    resource: &R,
    prior: Option<ResourceData>,
) -> Result<Option<ResourceData>, ResourceError>
where
    R: Resource + ?Sized,
{
    let Some(mut d) = prior.filter(|p| !p.is_new()) else {
        return Ok(None);
    };

    match resource.read(&mut d).await? {
        ReadOutcome::Found => Ok(Some(d)),
        ReadOutcome::NotFound => {
            tracing::warn!(
                "{} {} not found upstream, planning to create it",
                resource.resource_type(),
                d.id()
            );
            Ok(None)
        }
    }
}

/// Delete a resource, treating an upstream 404 as already deleted
pub async fn destroy<R>(resource: &R, d: &ResourceData) -> Result<(), ResourceError>
where
    R: Resource + ?Sized,
{
    match resource.delete(d).await {
        Ok(()) => Ok(()),
        Err(ResourceError::Api(GitLabError::NotFound(_))) => {
            tracing::warn!(
                "{} {} already deleted upstream",
                resource.resource_type(),
                d.id()
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Carry out a plan, returning the new state
pub async fn apply<R>(
    resource: &R,
    plan: &Plan,
    prior: Option<ResourceData>,
    config: ResourceData,
) -> Result<ResourceData, ResourceError>
where
    R: Resource + ?Sized,
{
    tracing::info!("{}: {}", resource.resource_type(), plan.describe());

    match (plan, prior) {
        (Plan::Create, _) | (_, None) => {
            let mut d = config;
            resource.create(&mut d).await?;
            Ok(d)
        }
        (Plan::Replace(_), Some(prior)) => {
            destroy(resource, &prior).await?;
            let mut d = config;
            d.set_id("");
            resource.create(&mut d).await?;
            Ok(d)
        }
        (Plan::Update(_), Some(prior)) => {
            let mut d = config;
            d.set_id(prior.id());
            resource.update(&mut d).await?;
            Ok(d)
        }
        (Plan::Refresh, Some(prior)) => {
            let mut d = prior;
            if resource.read(&mut d).await? == ReadOutcome::NotFound {
                tracing::warn!(
                    "{} {} not found upstream, keeping state",
                    resource.resource_type(),
                    d.id()
                );
            }
            Ok(d)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::share_group::share_group_schema;
    use serde_json::json;

    fn data(project_id: &str, group_id: i64, access_level: &str) -> ResourceData {
        ResourceData::from_attributes([
            ("project_id", json!(project_id)),
            ("group_id", json!(group_id)),
            ("access_level", json!(access_level)),
        ])
    }

    fn state(project_id: &str, group_id: i64, access_level: &str) -> ResourceData {
        let mut d = data(project_id, group_id, access_level);
        d.set_id(format!("{project_id}:{group_id}"));
        d
    }

    #[test]
    fn no_prior_state_plans_create() {
        let schema = share_group_schema();
        assert_eq!(plan(&schema, None, &data("42", 7, "guest")).unwrap(), Plan::Create);
    }

    #[test]
    fn access_level_change_plans_update() {
        let schema = share_group_schema();
        let prior = state("42", 7, "guest");
        assert_eq!(
            plan(&schema, Some(&prior), &data("42", 7, "reporter")).unwrap(),
            Plan::Update(vec!["access_level".to_string()])
        );
    }

    #[test]
    fn group_change_plans_replace() {
        let schema = share_group_schema();
        let prior = state("42", 7, "guest");
        assert_eq!(
            plan(&schema, Some(&prior), &data("42", 8, "reporter")).unwrap(),
            Plan::Replace(vec!["group_id".to_string()])
        );
    }

    #[test]
    fn identical_configuration_plans_refresh() {
        let schema = share_group_schema();
        let prior = state("42", 7, "guest");
        assert_eq!(
            plan(&schema, Some(&prior), &data("42", 7, "guest")).unwrap(),
            Plan::Refresh
        );
    }

    #[test]
    fn invalid_configuration_fails_planning() {
        let schema = share_group_schema();
        assert!(matches!(
            plan(&schema, None, &data("42", 7, "owner")),
            Err(ResourceError::Validation(_))
        ));
    }
}
