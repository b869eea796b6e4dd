//! Sync Pipeline
//!
//! Orchestrates one run: `terraform init` gates everything, then each
//! descriptor in registry order is enumerated and its live objects imported.
//! A failed import is logged and the batch continues; an enumeration failure
//! propagates and ends the run.

use crate::aws::client::AwsClient;
use crate::resource::{self, ResourceDef};
use crate::terraform::TerraformRunner;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for one sync run
pub struct SyncOptions {
    /// Directory containing the Terraform configuration files
    pub path: PathBuf,
    /// Optional backend config file passed to `terraform init`
    pub backend_config: Option<PathBuf>,
}

/// Run the full sync pipeline
pub async fn run(opts: &SyncOptions, runner: &TerraformRunner, client: &AwsClient) -> Result<()> {
    tracing::info!("Call terraform init");
    if !runner.init(&opts.path, opts.backend_config.as_deref())? {
        tracing::error!("terraform init failed, skipping resource sync");
        return Ok(());
    }
    tracing::info!("Terraform now initialized");

    for def in resource::descriptors() {
        if !has_local_config(&opts.path, &def.kind)? {
            tracing::debug!("No local config with prefix [{}], skipping", def.kind);
            continue;
        }

        tracing::info!("SYNC {}s", def.kind.to_uppercase());
        let items = resource::fetch_resources(def, client).await?;
        tracing::info!("Found {} live {} object(s)", items.len(), def.kind);

        reconcile(opts, runner, def, &items)?;
    }

    Ok(())
}

/// A kind is synced only when some file name in the target directory starts
/// with its `kind` string - the presence of a local configuration stub.
fn has_local_config(path: &Path, kind: &str) -> Result<bool> {
    for entry in
        fs::read_dir(path).with_context(|| format!("Failed to read directory: {}", path.display()))?
    {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with(kind) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Import every enumerated item, logging failures without aborting the batch
fn reconcile(
    opts: &SyncOptions,
    runner: &TerraformRunner,
    def: &ResourceDef,
    items: &[serde_json::Value],
) -> Result<()> {
    for item in items {
        let attrs = resource::extract_attributes(item, &def.attributes);
        let address = def.format_address(&attrs);
        let provider_id = def.format_provider_id(&attrs);

        if !runner.import(&opts.path, &address, &provider_id)? {
            tracing::error!(
                "Failed to import the resource {} id {}",
                address,
                provider_id
            );
        }
    }
    Ok(())
}
