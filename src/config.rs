//! Configuration Management
//!
//! Optional persistent configuration for tfsync. Everything here has a
//! sensible default; a missing or malformed config file is ignored.

use serde::Deserialize;
use std::path::PathBuf;

/// User configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// AWS region used when neither the CLI nor the environment supplies one
    #[serde(default)]
    pub region: Option<String>,
    /// Path to the terraform binary (defaults to `terraform` on PATH)
    #[serde(default)]
    pub terraform_bin: Option<PathBuf>,
    /// Single AWS endpoint override, e.g. a LocalStack URL
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tfsync").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// The terraform binary to invoke
    pub fn terraform_bin(&self) -> PathBuf {
        self.terraform_bin
            .clone()
            .unwrap_or_else(|| PathBuf::from("terraform"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_terraform_bin() {
        let config = Config::default();
        assert_eq!(config.terraform_bin(), PathBuf::from("terraform"));
    }

    #[test]
    fn test_explicit_terraform_bin() {
        let config: Config =
            serde_json::from_str(r#"{ "terraform_bin": "/usr/local/bin/terraform" }"#).unwrap();
        assert_eq!(
            config.terraform_bin(),
            PathBuf::from("/usr/local/bin/terraform")
        );
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let config: Config =
            serde_json::from_str(r#"{ "region": "eu-west-1", "color": "mauve" }"#).unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
    }
}
