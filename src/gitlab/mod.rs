//! GitLab API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Main GitLab client and URL helpers
//! - [`error`] - Typed API errors
//! - [`http`] - HTTP utilities for REST API calls
//! - [`projects`] - Project sharing operations
//!
//! # Example
//!
//! ```ignore
//! use gitlab_share::gitlab::{GitLabClient, ProjectsApi};
//!
//! async fn example() -> Result<(), gitlab_share::gitlab::GitLabError> {
//!     let client = GitLabClient::new("https://gitlab.com/api/v4", "glpat-...")?;
//!     let project = client.get_project("acme/widgets").await?;
//!     println!("{} groups", project.shared_with_groups.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod projects;

pub use client::GitLabClient;
pub use error::GitLabError;
pub use http::format_gitlab_error;
pub use projects::{Project, ProjectsApi, ShareWithGroupOptions, SharedWithGroup};
