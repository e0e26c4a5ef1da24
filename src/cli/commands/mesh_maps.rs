//! Mesh-maps command implementation

use super::{
    exit_code_for, load_or_report, parse_selection, state_manager, EXIT_PARTIAL, EXIT_SUCCESS,
};
use crate::adapters::host::BridgeHost;
use crate::core::builder::MeshMapMode;
use crate::core::export::ExportCoordinator;
use clap::Args;
use std::sync::Arc;

/// Arguments for the mesh-maps command
#[derive(Args, Debug, Default)]
pub struct MeshMapsArgs {
    /// Texture set(s) to export (comma-separated, default: all)
    #[arg(long)]
    pub texture_set: Option<String>,

    /// Pack ambient occlusion, curvature and thickness into one file
    #[arg(long)]
    pub combined: bool,
}

impl MeshMapsArgs {
    /// Execute the mesh-maps command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let state = state_manager(&config);
        let selection = parse_selection(self.texture_set.as_deref());
        let host = Arc::new(BridgeHost::from_config(&config.host));
        let coordinator = ExportCoordinator::new(config, host);

        let mode = MeshMapMode::from_combined(self.combined);
        println!("🚀 Exporting mesh maps ({mode:?})...");

        let summary = match coordinator.export_meshmaps(&selection, mode).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Mesh-map export failed");
                eprintln!("Mesh-map export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        match state.load_options().await {
            Ok(mut remembered) => {
                remembered.combined_meshmap = self.combined;
                if let Err(e) = state.save_options(&remembered).await {
                    tracing::warn!(error = %e, "Failed to remember mesh-map mode");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Could not read remembered options"),
        }

        println!();
        println!("📊 Mesh-map Summary:");
        println!("  Texture Sets: {}", summary.total_texture_sets);
        println!("  Exported: {}", summary.exported_texture_sets);
        println!("  Files Written: {}", summary.exported_files);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
        }

        if summary.is_successful() {
            println!("✅ Mesh maps exported");
            Ok(EXIT_SUCCESS)
        } else {
            println!("⚠️  Mesh-map export completed with failures");
            Ok(EXIT_PARTIAL)
        }
    }
}
