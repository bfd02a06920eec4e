use crate::persist::DATA_DIR;
use crate::store::StorePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PROJECT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl ProjectConfig {
    /// Validation policy handed to the record store.
    #[must_use]
    pub const fn store_policy(&self) -> StorePolicy {
        StorePolicy {
            require_contacts: self.validation.require_contacts,
            strict_transitions: self.workflow.strict_transitions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_true")]
    pub seed_on_init: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_on_init: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub require_contacts: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub strict_transitions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(DATA_DIR).join(PROJECT_CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    load_user_config_from(&config_dir.join("locate/config.toml"))
}

fn load_user_config_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write the default project config unless one already exists.
pub fn write_default_project_config(project_root: &Path) -> Result<bool> {
    let dir = project_root.join(DATA_DIR);
    let path = dir.join(PROJECT_CONFIG_FILE);
    if path.exists() {
        return Ok(false);
    }

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let body = toml::to_string_pretty(&ProjectConfig::default())
        .context("Failed to render default config")?;
    std::fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

const fn default_true() -> bool {
    true
}

fn default_bind() -> String {
    "127.0.0.1:7878".to_string()
}
