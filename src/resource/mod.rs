//! Resource lifecycle layer
//!
//! A resource maps the Create/Read/Update/Delete lifecycle driven by a host
//! onto calls against the GitLab API.
//!
//! # Architecture
//!
//! - [`data`] - Attribute/identity record a lifecycle call reads and writes
//! - [`schema`] - Attribute definitions and configuration validation
//! - [`id`] - Composite identifier encoding
//! - [`share_group`] - The project group share resource
//! - [`plan`] - Deciding and applying the lifecycle call a change needs

pub mod data;
pub mod error;
pub mod id;
pub mod plan;
pub mod schema;
pub mod share_group;

use async_trait::async_trait;

pub use data::ResourceData;
pub use error::ResourceError;
pub use plan::{apply, destroy, plan, refresh_prior, Plan};
pub use schema::{Attribute, AttributeType, Schema};
pub use share_group::ProjectShareGroup;

/// Result of refreshing a resource from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// State was overwritten from the server
    Found,
    /// The server no longer reports the resource; state was left untouched
    NotFound,
}

/// Lifecycle operations of a managed resource
#[async_trait]
pub trait Resource: Send + Sync {
    fn resource_type(&self) -> &'static str;

    fn schema(&self) -> &Schema;

    /// Create the resource from configuration and populate its state
    async fn create(&self, d: &mut ResourceData) -> Result<(), ResourceError>;

    /// Refresh state from the API using the resource's identity
    async fn read(&self, d: &mut ResourceData) -> Result<ReadOutcome, ResourceError>;

    /// Apply in-place changes and refresh state
    async fn update(&self, d: &mut ResourceData) -> Result<(), ResourceError>;

    async fn delete(&self, d: &ResourceData) -> Result<(), ResourceError>;

    /// Adopt an existing resource by identity, then read its full state
    async fn import(&self, id: &str) -> Result<(ResourceData, ReadOutcome), ResourceError> {
        let mut d = ResourceData::with_id(id);
        let outcome = self.read(&mut d).await?;
        Ok((d, outcome))
    }
}
