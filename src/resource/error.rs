//! Resource lifecycle errors.

use crate::gitlab::GitLabError;
use thiserror::Error;

/// Errors surfaced by resource lifecycle operations
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Configuration rejected before any API call was made
    #[error("{0}")]
    Validation(String),

    #[error("Unexpected ID format ({id:?}): {reason}")]
    InvalidId { id: String, reason: String },

    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    #[error("Attribute {key} has the wrong type, expected {expected}")]
    InvalidAttribute { key: String, expected: &'static str },

    #[error("GitLab reported unknown access level code {0}")]
    UnknownAccessLevel(i64),

    /// Failure from the GitLab API, passed through untouched
    #[error(transparent)]
    Api(#[from] GitLabError),
}

impl ResourceError {
    pub fn invalid_id(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidId {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
