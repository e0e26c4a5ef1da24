//! Preview command implementation
//!
//! Asks the host which files an export would write without writing them.

use super::{exit_code_for, load_or_report, parse_selection, EXIT_SUCCESS};
use crate::adapters::host::BridgeHost;
use crate::core::builder::ExportOptions;
use crate::core::export::ExportCoordinator;
use clap::Args;
use std::sync::Arc;

/// Arguments for the preview command
#[derive(Args, Debug, Default)]
pub struct PreviewArgs {
    /// Texture set(s) to preview (comma-separated, default: all)
    #[arg(long)]
    pub texture_set: Option<String>,

    /// Preview 8 bit output
    #[arg(long = "force-8bit")]
    pub force_8bit: bool,

    /// Channel and UDIM range expression
    #[arg(long)]
    pub range: Option<String>,
}

impl PreviewArgs {
    /// Execute the preview command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let options = ExportOptions {
            force_eight_bit: self.force_8bit,
            scope_expression: self.range.clone(),
            ..ExportOptions::default()
        };
        let selection = parse_selection(self.texture_set.as_deref());

        let host = Arc::new(BridgeHost::from_config(&config.host));
        let coordinator = ExportCoordinator::new(config, host);

        let previews = match coordinator.preview(&selection, &options).await {
            Ok(previews) => previews,
            Err(e) => {
                tracing::error!(error = %e, "Preview failed");
                eprintln!("Preview failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        for preview in &previews {
            println!("📄 {} ({})", preview.texture_set, preview.name_preview);
            if preview.files.is_empty() {
                println!("   Nothing");
            }
            for file in &preview.files {
                println!("   {file}");
            }
        }

        Ok(EXIT_SUCCESS)
    }
}
