//! Resource abstraction layer
//!
//! This module provides a data-driven approach to reconciling AWS resources.
//! Resource descriptors are loaded from JSON files at compile time, so a new
//! resource kind is a table entry, not a new code path.
//!
//! # Architecture
//!
//! - [`registry`] - Loads and caches resource descriptors from embedded JSON
//! - [`fetcher`] - Fetches resources from AWS APIs with pagination support
//! - [`sdk_dispatch`] - Maps abstract SDK method names to concrete API calls
//!
//! # Example
//!
//! ```ignore
//! use tfsync::aws::client::AwsClient;
//! use tfsync::resource::{fetch_resources, get_resource};
//!
//! async fn list_crawlers(client: &AwsClient) -> anyhow::Result<Vec<serde_json::Value>> {
//!     let def = get_resource("crawler").unwrap();
//!     fetch_resources(def, client).await
//! }
//! ```

mod fetcher;
mod registry;
pub mod sdk_dispatch;

pub use fetcher::{
    extract_attributes, extract_json_value, fetch_resources, fetch_resources_paginated,
    PaginatedResult,
};
pub use registry::*;
