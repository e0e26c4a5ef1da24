//! Host bridge process adapter
//!
//! Every request spawns the configured bridge executable, writes one JSON
//! request to its stdin and decodes one JSON response from its stdout.

use super::models::{ExportResult, ProjectInfo, TextureListing, TextureSetInfo};
use super::traits::HostService;
use crate::config::HostConfig;
use crate::domain::channel::NativeChannel;
use crate::domain::ids::TextureSetName;
use crate::domain::spec::ExportSpec;
use crate::domain::{HostError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

/// [`HostService`] backed by an external bridge executable
#[derive(Debug, Clone)]
pub struct BridgeHost {
    program: String,
    args: Vec<String>,
}

impl BridgeHost {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(config.bridge.clone(), config.args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn call<T: DeserializeOwned>(&self, request: Value) -> Result<T> {
        let command = request["command"].as_str().unwrap_or_default().to_string();
        tracing::debug!(bridge = %self.program, command = %command, "Sending host request");

        let mut child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HostError::BridgeUnavailable(format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            let payload = serde_json::to_vec(&request)?;
            stdin.write_all(&payload).await.map_err(|e| {
                HostError::BridgeUnavailable(format!("Failed to send request: {e}"))
            })?;
            stdin.shutdown().await.map_err(|e| {
                HostError::BridgeUnavailable(format!("Failed to send request: {e}"))
            })?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| HostError::BridgeUnavailable(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(HostError::BridgeFailed {
                status: output.status.code().unwrap_or(-1),
                message,
            }
            .into());
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            HostError::InvalidResponse(format!("{command}: {e}")).into()
        })
    }
}

#[async_trait]
impl HostService for BridgeHost {
    async fn project_info(&self) -> Result<ProjectInfo> {
        self.call(json!({ "command": "project_info" })).await
    }

    async fn texture_sets(&self) -> Result<Vec<TextureSetInfo>> {
        self.call(json!({ "command": "list_texture_sets" })).await
    }

    async fn channels(&self, texture_set: &TextureSetName) -> Result<Vec<NativeChannel>> {
        self.call(json!({
            "command": "list_channels",
            "texture_set": texture_set.as_str(),
        }))
        .await
    }

    async fn execute(&self, spec: &ExportSpec) -> Result<ExportResult> {
        self.call(json!({ "command": "export", "spec": spec })).await
    }

    async fn dry_run(&self, spec: &ExportSpec) -> Result<TextureListing> {
        self.call(json!({ "command": "list_textures", "spec": spec }))
            .await
    }
}
