//! HTTP utilities for AWS API calls
//!
//! Builds SigV4-signed requests for the AWS JSON protocols (POST with an
//! `X-Amz-Target` header) and for REST-style GET listings, returning parsed
//! JSON bodies.

use anyhow::{Context, Result};
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::Client;
use serde_json::Value;
use std::time::SystemTime;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        // Back off to a char boundary so multi-byte bodies can't panic
        let mut cut = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for AWS API calls
#[derive(Clone)]
pub struct AwsHttpClient {
    client: Client,
}

impl AwsHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tfsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// POST an AWS JSON protocol request (`X-Amz-Target` + JSON body)
    pub async fn post_target(
        &self,
        credentials: &Credentials,
        region: &str,
        signing_name: &str,
        url: &str,
        target: &str,
        content_type: &str,
        body: &Value,
    ) -> Result<Value> {
        tracing::debug!("POST {} target={}", url, target);

        let body_bytes = serde_json::to_vec(body).context("Failed to serialize request body")?;

        let mut request = http::Request::builder()
            .method("POST")
            .uri(url)
            .header("content-type", content_type)
            .header("x-amz-target", target)
            .body(body_bytes)
            .context("Failed to build request")?;

        sign_request(&mut request, credentials, region, signing_name)?;

        let request =
            reqwest::Request::try_from(request).context("Failed to convert signed request")?;
        let response = self
            .client
            .execute(request)
            .await
            .context("Failed to send request")?;

        handle_response(response).await
    }

    /// GET a REST-style AWS API URL
    pub async fn get(
        &self,
        credentials: &Credentials,
        region: &str,
        signing_name: &str,
        url: &str,
    ) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let mut request = http::Request::builder()
            .method("GET")
            .uri(url)
            .body(Vec::new())
            .context("Failed to build request")?;

        sign_request(&mut request, credentials, region, signing_name)?;

        let request =
            reqwest::Request::try_from(request).context("Failed to convert signed request")?;
        let response = self
            .client
            .execute(request)
            .await
            .context("Failed to send request")?;

        handle_response(response).await
    }
}

/// SigV4-sign a request in place
fn sign_request(
    request: &mut http::Request<Vec<u8>>,
    credentials: &Credentials,
    region: &str,
    signing_name: &str,
) -> Result<()> {
    let identity: Identity = credentials.clone().into();

    let signing_params = v4::SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(signing_name)
        .time(SystemTime::now())
        .settings(SigningSettings::default())
        .build()
        .context("Failed to build signing parameters")?
        .into();

    let signable = SignableRequest::new(
        request.method().as_str(),
        request.uri().to_string(),
        request
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str(), value.to_str().unwrap_or(""))),
        SignableBody::Bytes(request.body()),
    )
    .context("Failed to build signable request")?;

    let (instructions, _signature) = sign(signable, &signing_params)
        .context("Failed to sign request")?
        .into_parts();

    instructions.apply_to_request_http1x(request);
    Ok(())
}

/// Check status, log sanitized errors, and parse the JSON body
async fn handle_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        // Only log the sanitized/truncated error body to avoid leaking
        // request details into the shared log
        tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        return Err(anyhow::anyhow!("API request failed: {}", status));
    }

    if body.is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).context("Failed to parse response JSON")
}
