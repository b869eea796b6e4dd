//! Resource Registry - Load resource descriptors from JSON
//!
//! This module loads all AWS resource descriptors from embedded JSON files
//! and provides lookup functions for the rest of the application. Adding a
//! resource kind means adding a JSON entry (plus a dispatch arm for its
//! listing call) - the sync loop itself never changes.

use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;

/// Embedded descriptor JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[include_str!("../resources/aws.json")];

/// Resource descriptor from JSON
///
/// Describes how one resource kind is enumerated, how its pages chain
/// together, and how each live object maps to a Terraform address and
/// provider import ID.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDef {
    /// Symbolic kind identifier, also the local config file name prefix
    pub kind: String,
    /// Service key understood by `sdk_dispatch`
    pub service: String,
    /// Listing method name understood by `sdk_dispatch`
    pub sdk_method: String,
    /// Initial parameters for the first page request
    #[serde(default)]
    pub sdk_method_params: Value,
    /// Response field carrying the next-page token (absent/empty when done)
    pub response_token_field: String,
    /// Request parameter the token is fed back into
    pub request_token_param: String,
    /// Response field holding the page's item array
    pub items_field: String,
    /// Field names extracted from each item, in order. The templates below
    /// reference these positionally, so order matters.
    pub attributes: Vec<String>,
    /// Template for the Terraform resource address
    pub address_format: String,
    /// Template for the provider-specific import ID
    pub provider_id_format: String,
    /// Provider resource type used when building the address
    pub terraform_resource_type: String,
}

impl ResourceDef {
    /// Format the Terraform resource address for an extracted attribute tuple.
    pub fn format_address(&self, attrs: &[String]) -> String {
        render_format(
            &self.address_format,
            Some(&self.terraform_resource_type),
            attrs,
        )
    }

    /// Format the provider import ID for an extracted attribute tuple.
    pub fn format_provider_id(&self, attrs: &[String]) -> String {
        render_format(&self.provider_id_format, None, attrs)
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub resources: Vec<ResourceDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ResourceConfig> = OnceLock::new();

/// Get the resource registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ResourceConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = ResourceConfig {
            resources: Vec::new(),
        };

        for content in RESOURCE_FILES {
            let partial: ResourceConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    })
}

/// All descriptors in declaration order. The sync pipeline walks this slice
/// front to back, so JSON order is processing order.
pub fn descriptors() -> &'static [ResourceDef] {
    &get_registry().resources
}

/// Get a resource descriptor by kind
pub fn get_resource(kind: &str) -> Option<&'static ResourceDef> {
    get_registry().resources.iter().find(|r| r.kind == kind)
}

/// Substitute `{resource_type}` and positional `{obj[N]}` placeholders.
///
/// The templates consume attributes by position, matching the descriptor's
/// `attributes` order. Nothing else is interpreted; unknown placeholders are
/// left as-is so a mismatched template is visible in the produced address.
fn render_format(format: &str, resource_type: Option<&str>, attrs: &[String]) -> String {
    let mut out = format.to_string();
    if let Some(resource_type) = resource_type {
        out = out.replace("{resource_type}", resource_type);
    }
    for (idx, value) in attrs.iter().enumerate() {
        out = out.replace(&format!("{{obj[{}]}}", idx), value);
    }
    out
}
