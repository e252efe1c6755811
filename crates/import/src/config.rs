use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deepest listing level the walkers read; directories found at this level
/// are emitted without children.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Configuration shared by every importer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Depth bound for tree walks (root listing = 0)
    pub max_depth: usize,

    /// Upper bound for a remote fetch, in milliseconds
    pub remote_timeout_ms: u64,

    /// Upper bound for acquiring a local directory handle, in milliseconds
    pub local_timeout_ms: u64,

    /// Base URL of the GitHub REST API
    pub api_base_url: String,

    /// User-Agent sent to the GitHub API
    pub user_agent: String,

    /// Path segments skipped in remote listings
    pub exclude: Vec<String>,

    /// GitHub access token sent as `Authorization: token <t>`
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            remote_timeout_ms: 5_000,
            local_timeout_ms: 120_000,
            api_base_url: "https://api.github.com".to_string(),
            user_agent: concat!("codevision/", env!("CARGO_PKG_VERSION")).to_string(),
            exclude: ["node_modules", ".git", "dist", "build"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            token: None,
        }
    }
}

impl ImportConfig {
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }

    pub fn local_timeout(&self) -> Duration {
        Duration::from_millis(self.local_timeout_ms)
    }

    pub fn is_excluded(&self, segment: &str) -> bool {
        self.exclude.iter().any(|skip| skip == segment)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.remote_timeout_ms == 0 {
            return Err("remote_timeout_ms must be > 0".to_string());
        }

        if self.local_timeout_ms == 0 {
            return Err("local_timeout_ms must be > 0".to_string());
        }

        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(format!(
                "api_base_url ({}) must be an http(s) URL",
                self.api_base_url
            ));
        }

        if self.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err("token cannot be blank when set".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }

        Ok(())
    }
}
