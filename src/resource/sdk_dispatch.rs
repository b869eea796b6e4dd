//! SDK Dispatch
//!
//! Maps abstract `(service, sdk_method)` descriptor names to concrete AWS
//! API calls. Step Functions, Glue and DMS speak the AWS JSON protocol
//! (POST with an `X-Amz-Target` header); Lambda is a REST API where the
//! listing params become query parameters.

use crate::aws::client::AwsClient;
use anyhow::Result;
use serde_json::Value;

/// Invoke a listing method against AWS
pub async fn invoke_sdk(
    service: &str,
    method: &str,
    client: &AwsClient,
    params: &Value,
) -> Result<Value> {
    tracing::debug!("invoke_sdk: service={}, method={}", service, method);

    match service {
        "stepfunctions" => invoke_stepfunctions(method, client, params).await,
        "glue" => invoke_glue(method, client, params).await,
        "lambda" => invoke_lambda(method, client, params).await,
        "dms" => invoke_dms(method, client, params).await,
        _ => Err(anyhow::anyhow!("Unknown service: {}", service)),
    }
}

async fn invoke_stepfunctions(method: &str, client: &AwsClient, params: &Value) -> Result<Value> {
    match method {
        "list_state_machines" => {
            client
                .post_target(
                    "states",
                    "AWSStepFunctions.ListStateMachines",
                    "application/x-amz-json-1.0",
                    params,
                )
                .await
        }
        _ => Err(anyhow::anyhow!("Unknown stepfunctions method: {}", method)),
    }
}

async fn invoke_glue(method: &str, client: &AwsClient, params: &Value) -> Result<Value> {
    match method {
        "get_crawlers" => {
            client
                .post_target(
                    "glue",
                    "AWSGlue.GetCrawlers",
                    "application/x-amz-json-1.1",
                    params,
                )
                .await
        }
        _ => Err(anyhow::anyhow!("Unknown glue method: {}", method)),
    }
}

async fn invoke_lambda(method: &str, client: &AwsClient, params: &Value) -> Result<Value> {
    match method {
        "list_functions" => {
            let url = client.service_url("lambda", "/2015-03-31/functions/");
            let url = add_query_params(&url, params);
            client.get("lambda", &url).await
        }
        _ => Err(anyhow::anyhow!("Unknown lambda method: {}", method)),
    }
}

async fn invoke_dms(method: &str, client: &AwsClient, params: &Value) -> Result<Value> {
    match method {
        "describe_replication_tasks" => {
            client
                .post_target(
                    "dms",
                    "AmazonDMSv20160101.DescribeReplicationTasks",
                    "application/x-amz-json-1.1",
                    params,
                )
                .await
        }
        _ => Err(anyhow::anyhow!("Unknown dms method: {}", method)),
    }
}

/// Render a params object into query parameters for REST-style listings
fn add_query_params(url: &str, params: &Value) -> String {
    let Value::Object(map) = params else {
        return url.to_string();
    };

    let mut query_parts: Vec<String> = Vec::new();

    for (key, value) in map {
        match value {
            Value::String(s) => {
                query_parts.push(format!("{}={}", key, urlencoding::encode(s)));
            }
            Value::Number(n) => {
                query_parts.push(format!("{}={}", key, n));
            }
            Value::Bool(b) => {
                query_parts.push(format!("{}={}", key, b));
            }
            _ => {}
        }
    }

    if query_parts.is_empty() {
        url.to_string()
    } else if url.contains('?') {
        format!("{}&{}", url, query_parts.join("&"))
    } else {
        format!("{}?{}", url, query_parts.join("&"))
    }
}
