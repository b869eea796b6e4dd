//! Terraform Integration
//!
//! Spawns the terraform binary for `init` and `import` and streams its
//! output into the log line by line as it arrives. Failure of the underlying
//! command is reported through the returned success flag, never as an error.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs terraform commands against one working directory's configuration
pub struct TerraformRunner {
    bin: PathBuf,
    no_color: bool,
}

impl TerraformRunner {
    pub fn new(bin: PathBuf, no_color: bool) -> Self {
        Self { bin, no_color }
    }

    /// Run `terraform init`, optionally with a backend config file.
    ///
    /// Returns true iff the exit code is exactly zero. The sync pipeline
    /// must not touch any resource kind when this returns false.
    pub fn init(&self, working_dir: &Path, backend_config: Option<&Path>) -> Result<bool> {
        let mut args = vec!["init".to_string()];
        if self.no_color {
            args.push("-no-color".to_string());
        }
        if let Some(path) = backend_config {
            args.push(format!("-backend-config={}", path.display()));
        }

        let exit_code = self.run(&args, working_dir)?;
        tracing::info!("terraform init completed with exit code [{}]", exit_code);
        Ok(exit_code == 0)
    }

    /// Run `terraform import <address> <provider_id>`.
    ///
    /// Returns true iff the exit code is exactly zero.
    pub fn import(&self, working_dir: &Path, address: &str, provider_id: &str) -> Result<bool> {
        tracing::debug!("Address: {}", address);
        tracing::debug!("Provider ID: {}", provider_id);

        let mut args = vec!["import".to_string()];
        if self.no_color {
            args.push("-no-color".to_string());
        }
        args.push(address.to_string());
        args.push(provider_id.to_string());

        let exit_code = self.run(&args, working_dir)?;
        tracing::info!("terraform import completed with exit code [{}]", exit_code);
        Ok(exit_code == 0)
    }

    /// Spawn the binary, stream its output into the log, and wait for exit.
    ///
    /// stdout is drained on this thread and stderr on a helper thread so
    /// neither pipe can fill up and stall the child.
    fn run(&self, args: &[String], working_dir: &Path) -> Result<i32> {
        tracing::debug!("Executing: {} {}", self.bin.display(), args.join(" "));

        let mut child = Command::new(&self.bin)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn {}", self.bin.display()))?;

        tracing::info!("terraform started: pid [{}]", child.id());

        let stderr_reader = child.stderr.take().map(|stderr| {
            std::thread::spawn(move || {
                for line in BufReader::new(stderr).lines().map_while(|l| l.ok()) {
                    tracing::info!("{}", line.trim_end());
                }
            })
        });

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines().map_while(|l| l.ok()) {
                tracing::info!("{}", line.trim_end());
            }
        }

        if let Some(handle) = stderr_reader {
            let _ = handle.join();
        }

        let status = child.wait().context("Failed to wait for terraform")?;
        Ok(status.code().unwrap_or(-1))
    }
}
