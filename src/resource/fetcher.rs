//! Resource Fetcher
//!
//! Handles fetching resources from AWS listing APIs based on resource
//! descriptors, following continuation tokens until a response carries none.

use super::registry::ResourceDef;
use super::sdk_dispatch;
use crate::aws::client::AwsClient;
use anyhow::Result;
use serde_json::Value;

/// Result of one paginated fetch
pub struct PaginatedResult {
    pub items: Vec<Value>,
    pub next_token: Option<String>,
}

/// Fetch all live resources for a descriptor (auto-paginate).
///
/// Pages are fetched strictly in sequence and fully materialized before the
/// caller sees anything; the continuation token creates a hard ordering.
pub async fn fetch_resources(def: &ResourceDef, client: &AwsClient) -> Result<Vec<Value>> {
    let mut all_items = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let result = fetch_resources_paginated(def, client, page_token.as_deref()).await?;
        all_items.extend(result.items);

        if result.next_token.is_none() {
            break;
        }
        page_token = result.next_token;
    }

    Ok(all_items)
}

/// Fetch one page of resources
pub async fn fetch_resources_paginated(
    def: &ResourceDef,
    client: &AwsClient,
    page_token: Option<&str>,
) -> Result<PaginatedResult> {
    // Fresh copy of the initial params; the token is injected per request.
    let mut params = def.sdk_method_params.clone();
    if params.is_null() {
        params = Value::Object(serde_json::Map::new());
    }

    if let Value::Object(ref mut map) = params {
        if let Some(token) = page_token {
            map.insert(
                def.request_token_param.clone(),
                Value::String(token.to_string()),
            );
        }
    }

    let response = sdk_dispatch::invoke_sdk(&def.service, &def.sdk_method, client, &params).await?;

    let items = extract_items(&response, &def.items_field);

    // An absent or empty token field both mean "last page" - treating them
    // differently would loop forever on APIs that omit the field entirely.
    let next_token = response
        .get(&def.response_token_field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Ok(PaginatedResult { items, next_token })
}

/// Extract the page's item array; a missing or non-array field is zero items.
fn extract_items(response: &Value, items_field: &str) -> Vec<Value> {
    response
        .get(items_field)
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
}

/// Extract the descriptor's attribute tuple from one raw item.
///
/// Missing fields yield the `"-"` placeholder rather than an error, so a
/// partially-shaped item still produces a fixed-width tuple.
pub fn extract_attributes(item: &Value, attributes: &[String]) -> Vec<String> {
    attributes
        .iter()
        .map(|attr| extract_json_value(item, attr))
        .collect()
}

/// Extract a value from JSON using a dot-notation path
pub fn extract_json_value(item: &Value, path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    let mut current = item;

    for part in parts {
        // Handle array index
        if let Ok(idx) = part.parse::<usize>() {
            current = match current.get(idx) {
                Some(v) => v,
                None => return "-".to_string(),
            };
        } else {
            current = match current.get(part) {
                Some(v) => v,
                None => return "-".to_string(),
            };
        }
    }

    match current {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(_) => "[object]".to_string(),
    }
}
