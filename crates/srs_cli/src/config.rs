//! CLI configuration file.
//!
//! ```toml
//! [assistant]
//! endpoint = "http://localhost:11434"
//! model = "mistral"
//! timeout_secs = 120
//!
//! [store]
//! enabled = true
//! dir = ".srsv"
//!
//! [matching]
//! cutoff = 0.6
//! ```
//!
//! Every section and key is optional. Command line flags win over the file,
//! and `SRS_STORE_DIR` / `SRS_OLLAMA_*` win over the file too.

use anyhow::{Context, Result};
use serde::Deserialize;
use srs_assistant::AssistantConfig;
use srs_validator::DEFAULT_CUTOFF;
use std::path::PathBuf;

/// Default history directory, relative to the working directory.
pub const DEFAULT_STORE_DIR: &str = ".srsv";

/// Environment variable overriding the history directory.
pub const STORE_DIR_ENV: &str = "SRS_STORE_DIR";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub assistant: AssistantConfig,
    pub store: StoreConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Record runs at all
    pub enabled: bool,
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from(DEFAULT_STORE_DIR),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub cutoff: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl AppConfig {
    /// Loads the config file if one is given, then applies `SRS_STORE_DIR`.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path))?;
                Self::parse(&content)
                    .with_context(|| format!("Failed to parse config file: {}", path))?
            }
            None => Self::default(),
        };

        if let Ok(dir) = std::env::var(STORE_DIR_ENV) {
            config.store.dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// History directory, with a command line override.
    pub fn store_dir(&self, flag: Option<&str>) -> PathBuf {
        flag.map(PathBuf::from)
            .unwrap_or_else(|| self.store.dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.store.enabled);
        assert_eq!(config.store.dir, PathBuf::from(".srsv"));
        assert_eq!(config.matching.cutoff, 0.6);
        assert_eq!(config.assistant, AssistantConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = AppConfig::parse(
            r#"
[assistant]
model = "llama2"

[matching]
cutoff = 0.8
"#,
        )
        .unwrap();
        assert_eq!(config.assistant.model, "llama2");
        assert_eq!(config.assistant.endpoint, "http://localhost:11434");
        assert_eq!(config.matching.cutoff, 0.8);
        assert!(config.store.enabled);
    }

    #[test]
    fn test_store_section() {
        let config = AppConfig::parse("[store]\nenabled = false\ndir = \"/var/lib/srsv\"\n").unwrap();
        assert!(!config.store.enabled);
        assert_eq!(config.store_dir(None), PathBuf::from("/var/lib/srsv"));
        assert_eq!(config.store_dir(Some("elsewhere")), PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_invalid_file() {
        assert!(AppConfig::parse("[matching]\ncutoff = \"high\"\n").is_err());
    }
}
