//! AWS Authentication
//!
//! Resolves credentials through the AWS default provider chain (environment,
//! shared credentials file, instance/container roles) and discovers a default
//! region from the environment or `~/.aws/config`.

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use std::path::PathBuf;

/// AWS credentials holder
///
/// Wraps whichever provider the default chain resolved to; the chain caches
/// and refreshes internally, so `get` is cheap after the first call.
#[derive(Clone)]
pub struct AwsCredentials {
    provider: SharedCredentialsProvider,
}

impl AwsCredentials {
    /// Create new credentials using the AWS default provider chain
    pub async fn new(region: &str) -> Result<Self> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        let provider = sdk_config.credentials_provider().context(
            "No AWS credentials found. Configure the environment or ~/.aws/credentials",
        )?;

        Ok(Self { provider })
    }

    /// Create credentials from a fixed key pair (used by tests and tooling
    /// that points at a local endpoint)
    pub fn from_static(access_key_id: &str, secret_access_key: &str) -> Self {
        let credentials = Credentials::new(access_key_id, secret_access_key, None, None, "static");
        Self {
            provider: SharedCredentialsProvider::new(credentials),
        }
    }

    /// Resolve the current credentials
    pub async fn get(&self) -> Result<Credentials> {
        self.provider
            .provide_credentials()
            .await
            .context("Failed to resolve AWS credentials")
    }
}

/// Get the shared AWS config file path
fn get_aws_config_file() -> Option<PathBuf> {
    // Check AWS_CONFIG_FILE environment variable first
    if let Ok(path) = std::env::var("AWS_CONFIG_FILE") {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::home_dir().map(|p| p.join(".aws").join("config"))
}

/// Read the default region from the environment or the shared config file
pub fn get_default_region() -> Option<String> {
    // Environment wins
    if let Ok(region) = std::env::var("AWS_REGION") {
        if !region.is_empty() {
            return Some(region);
        }
    }
    if let Ok(region) = std::env::var("AWS_DEFAULT_REGION") {
        if !region.is_empty() {
            return Some(region);
        }
    }

    let config_path = get_aws_config_file()?;
    let content = std::fs::read_to_string(&config_path).ok()?;
    parse_region_from_profile(&content, "default")
}

/// Parse `region` out of an ini-style AWS config for one profile section
fn parse_region_from_profile(content: &str, profile: &str) -> Option<String> {
    let section_header = format!("[{}]", profile);
    let mut in_section = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            in_section = line == section_header;
        } else if in_section && line.starts_with("region") && line.contains('=') {
            if let Some(value) = line.split('=').nth(1) {
                let region = value.trim().to_string();
                if !region.is_empty() {
                    return Some(region);
                }
            }
        }
    }

    None
}
