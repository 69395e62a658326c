//! Process configuration: a working-directory-scoped `opkit.toml`,
//! loaded into an [`AppContext`] that is passed explicitly to handler
//! constructors at setup time.
//!
//! # Configuration File Format
//!
//! ```toml
//! [project]
//! name = "my-project"
//!
//! [cli]
//! internal = false
//! timeout_secs = 30
//! log_filter = "opkit=debug"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The configuration file name looked up in the working directory.
pub const CONFIG_FILE: &str = "opkit.toml";

/// Application configuration. All sections and fields are optional; a
/// missing file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub project: ProjectSettings,
    #[serde(default)]
    pub cli: CliSettings,
}

/// Project-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Project name (defaults to the working directory name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Defaults for the CLI surface, overridable per invocation by flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliSettings {
    /// Expose internal operations without passing --internal
    #[serde(default)]
    pub internal: bool,
    /// Default bound on the wait for an operation result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Default log filter when RUST_LOG is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Load `opkit.toml` from the given directory, falling back to
    /// defaults when the file does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// The per-process context handed to handler constructors.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub working_dir: PathBuf,
    pub config: AppConfig,
}

impl AppContext {
    pub fn load(working_dir: PathBuf) -> Result<Self> {
        let config = AppConfig::load(&working_dir)?;
        Ok(Self {
            working_dir,
            config,
        })
    }

    /// The configured project name, defaulting to the working directory
    /// name.
    pub fn project_name(&self) -> String {
        match &self.config.project.name {
            Some(name) => name.clone(),
            None => self
                .working_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "opkit".to_string()),
        }
    }
}
