//! Persisted state
//!
//! The state file records the last known state of the managed share between
//! invocations.

use crate::resource::ResourceData;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current on-disk format version
pub const STATE_VERSION: u32 = 1;

/// Default state file name, relative to the working directory
pub const DEFAULT_STATE_FILE: &str = "glshare.state.json";

/// Contents of the state file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub resource: Option<ResourceData>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            resource_type: None,
            resource: None,
        }
    }
}

impl StateFile {
    /// Load state from disk; a missing file is empty state
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {:?}", path))?;
        let state: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file {:?}", path))?;

        if state.version != STATE_VERSION {
            anyhow::bail!(
                "Unsupported state file version {} in {:?} (expected {})",
                state.version,
                path,
                STATE_VERSION
            );
        }

        Ok(state)
    }

    /// Save state to disk, writing through a temporary file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        let tmp = tmp_path(path);
        std::fs::write(&tmp, content)
            .with_context(|| format!("Failed to write state file {:?}", tmp))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace state file {:?}", path))?;

        Ok(())
    }

    /// Record the resource's new state
    pub fn set_resource(&mut self, resource_type: &str, data: ResourceData) {
        self.resource_type = Some(resource_type.to_string());
        self.resource = Some(data);
    }

    /// Forget the resource after it was destroyed
    pub fn clear(&mut self) {
        self.resource_type = None;
        self.resource = None;
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
