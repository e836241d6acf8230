//! Manage GitLab project group shares.
//!
//! A group share grants a GitLab group access to a project at an access
//! level. This crate exposes it as a resource with a Create/Read/Update/Delete
//! lifecycle (see [`resource::ProjectShareGroup`]) on top of a small GitLab
//! REST client ([`gitlab`]).
//!
//! The `glshare` binary drives that lifecycle from the command line and keeps
//! state in a local JSON file.

pub mod access_level;
pub mod config;
pub mod gitlab;
pub mod resource;
pub mod state;

pub use access_level::AccessLevel;
