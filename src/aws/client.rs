//! AWS Client
//!
//! Main client for the AWS listing APIs, combining credential resolution,
//! request signing and endpoint construction.

use super::auth::AwsCredentials;
use super::http::AwsHttpClient;
use anyhow::{Context, Result};
use serde_json::Value;

/// Main AWS client
///
/// The SigV4 signing name doubles as the endpoint host prefix for every
/// service this tool talks to (`states`, `glue`, `lambda`, `dms`).
#[derive(Clone)]
pub struct AwsClient {
    pub credentials: AwsCredentials,
    pub http: AwsHttpClient,
    pub region: String,
    /// Single endpoint override for all services (LocalStack, tests)
    pub endpoint_url: Option<String>,
}

impl AwsClient {
    /// Create a new AWS client
    pub async fn new(region: &str, endpoint_url: Option<&str>) -> Result<Self> {
        let credentials = AwsCredentials::new(region)
            .await
            .context("Failed to initialize AWS credentials")?;

        let http = AwsHttpClient::new()?;

        Ok(Self {
            credentials,
            http,
            region: region.to_string(),
            endpoint_url: endpoint_url.map(|s| s.to_string()),
        })
    }

    /// Create a client with fixed credentials and an explicit endpoint
    pub fn with_static_credentials(
        region: &str,
        endpoint_url: &str,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Result<Self> {
        Ok(Self {
            credentials: AwsCredentials::from_static(access_key_id, secret_access_key),
            http: AwsHttpClient::new()?,
            region: region.to_string(),
            endpoint_url: Some(endpoint_url.to_string()),
        })
    }

    /// Build a service URL from the signing name and a request path
    pub fn service_url(&self, signing_name: &str, path: &str) -> String {
        let base = match &self.endpoint_url {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.{}.amazonaws.com", signing_name, self.region),
        };
        format!("{}{}", base, path)
    }

    /// Make a signed AWS JSON protocol call (`X-Amz-Target` dispatch)
    pub async fn post_target(
        &self,
        signing_name: &str,
        target: &str,
        content_type: &str,
        params: &Value,
    ) -> Result<Value> {
        let credentials = self.credentials.get().await?;
        let url = self.service_url(signing_name, "/");
        self.http
            .post_target(
                &credentials,
                &self.region,
                signing_name,
                &url,
                target,
                content_type,
                params,
            )
            .await
    }

    /// Make a signed GET request to a prebuilt service URL
    pub async fn get(&self, signing_name: &str, url: &str) -> Result<Value> {
        let credentials = self.credentials.get().await?;
        self.http
            .get(&credentials, &self.region, signing_name, url)
            .await
    }
}
