use serde::Deserialize;

use crate::error::ConfigError;
use crate::host::WorkspaceFiles;
use crate::transport::Endpoint;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Per-worktree override, relative to the worktree root
pub const CONFIG_FILE: &str = ".zed/local-ai.json";

/// Where the local AI service lives.
///
/// Built once per invocation and handed to the transport; nothing reads a
/// global.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: base_url.into(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `.zed/local-ai.json` from the worktree, falling back to the
    /// default service when the file is missing or unusable.
    pub fn load(files: &dyn WorkspaceFiles) -> Self {
        let raw = match files.read_text_file(CONFIG_FILE) {
            Ok(raw) => raw,
            Err(err) => {
                log::debug!("no {} in worktree ({}), using {}", CONFIG_FILE, err, DEFAULT_BASE_URL);
                return Self::default();
            }
        };

        match Self::from_json(&raw) {
            Ok(config) => {
                log::debug!("using service at {}", config.base_url);
                config
            }
            Err(err) => {
                log::warn!("ignoring {}: {}", CONFIG_FILE, err);
                Self::default()
            }
        }
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |details: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            details,
        };
        let parsed = url::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme `{}`", other))),
        }
    }
}
