//! Configuration Management
//!
//! Provider settings for glshare: which GitLab API to talk to and with what
//! token.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// API root used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4";

pub const BASE_URL_ENV: &str = "GITLAB_BASE_URL";
pub const TOKEN_ENV: &str = "GITLAB_TOKEN";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// GitLab API root, e.g. https://gitlab.example.com/api/v4
    #[serde(default)]
    pub base_url: Option<String>,
    /// Personal or project access token
    #[serde(default)]
    pub token: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("glshare").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Get effective base URL (CLI > env > config > default)
    pub fn effective_base_url(&self, cli: Option<&str>) -> Result<String> {
        let raw = cli
            .map(str::to_string)
            .or_else(|| non_empty_env(BASE_URL_ENV))
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let url = Url::parse(&raw).with_context(|| format!("Invalid GitLab base URL: {raw}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("GitLab base URL must use http or https: {raw}");
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    /// Get effective token (CLI > env > config)
    pub fn effective_token(&self, cli: Option<&str>) -> Result<String> {
        cli.map(str::to_string)
            .or_else(|| non_empty_env(TOKEN_ENV))
            .or_else(|| self.token.clone())
            .filter(|t| !t.is_empty())
            .with_context(|| format!("No GitLab token configured. Set {TOKEN_ENV} or use --token"))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_values_take_precedence() {
        let config = Config {
            base_url: Some("https://file.example.com/api/v4".to_string()),
            token: Some("file-token".to_string()),
        };

        assert_eq!(
            config
                .effective_base_url(Some("https://cli.example.com/api/v4/"))
                .unwrap(),
            "https://cli.example.com/api/v4"
        );
        assert_eq!(config.effective_token(Some("cli-token")).unwrap(), "cli-token");
    }

    #[test]
    fn rejects_invalid_base_urls() {
        let config = Config::default();
        assert!(config.effective_base_url(Some("not a url")).is_err());
        assert!(config.effective_base_url(Some("ftp://gitlab.example.com")).is_err());
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert!(config.base_url.is_none());
        assert!(config.token.is_none());
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"base_url": "https://gitlab.example.com/api/v4"}"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.base_url.as_deref(), Some("https://gitlab.example.com/api/v4"));
    }
}
