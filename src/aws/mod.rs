//! AWS API interaction module
//!
//! This module provides the core functionality for talking to AWS listing
//! APIs: credential resolution, SigV4 request signing, and a thin client
//! that hands back raw JSON for the descriptor-driven layer above.
//!
//! # Module Structure
//!
//! - [`auth`] - Credential resolution through the AWS default provider chain
//! - [`client`] - Main AWS client for making API requests
//! - [`http`] - Signed HTTP utilities for the AWS JSON and REST protocols
//!
//! # Example
//!
//! ```ignore
//! use tfsync::aws::client::AwsClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = AwsClient::new("us-east-1", None).await?;
//!     let response = client
//!         .post_target("glue", "AWSGlue.GetCrawlers", "application/x-amz-json-1.1", &serde_json::json!({}))
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
