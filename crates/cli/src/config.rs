use anyhow::{Context, Result};
use codevision_import::ImportConfig;
use codevision_store::PROJECTS_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_STORE_DIR: &str = "CODEVISION_STORE_DIR";
pub const ENV_API_BASE_URL: &str = "CODEVISION_API_BASE_URL";
pub const ENV_OFFLINE: &str = "CODEVISION_OFFLINE";
pub const ENV_GITHUB_TOKEN: &str = "CODEVISION_GITHUB_TOKEN";

/// Where imported projects are persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub dir: PathBuf,
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            dir: home.join(".codevision"),
            key: PROJECTS_KEY.to_string(),
        }
    }
}

/// Everything the CLI needs to wire importers and the repository.
///
/// Layered as defaults, then the optional TOML file, then environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub import: ImportConfig,
    pub store: StoreConfig,

    /// Use the built-in synthetic listing instead of the GitHub API
    pub offline: bool,
}

impl CliConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok());
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid configuration")?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_STORE_DIR).filter(|v| !v.trim().is_empty()) {
            self.store.dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.import.api_base_url = url;
        }
        if let Some(token) = lookup(ENV_GITHUB_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.import.token = Some(token.trim().to_string());
        }
        if let Some(flag) = lookup(ENV_OFFLINE) {
            self.offline = flag == "1" || flag.eq_ignore_ascii_case("true");
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.import.validate()?;
        if self.store.key.trim().is_empty() {
            return Err("store.key cannot be empty".to_string());
        }
        Ok(())
    }
}
