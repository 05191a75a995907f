// Client settings, loaded from a JSON file.
use crate::error::{RegistroError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    /// Server origin used outside of dev mode.
    pub base_url: String,
    pub dev_base_url: String,
    pub dev: bool,
    /// File backing the token cache. In memory when unset.
    pub token_store_path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            base_url: String::new(),
            dev_base_url: "http://localhost:1323".to_string(),
            dev: false,
            token_store_path: None,
        }
    }
}

impl ClientSettings {
    /// Reads the settings; fields missing from the file keep their default.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RegistroError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let settings: ClientSettings = serde_json::from_str(&raw)?;
        info!(path = %path.display(), dev = settings.dev, "Loaded client settings");
        Ok(settings)
    }

    /// The origin requests go to.
    pub fn api_url(&self) -> &str {
        if self.dev {
            &self.dev_base_url
        } else {
            &self.base_url
        }
    }
}
