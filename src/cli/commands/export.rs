//! Export command implementation
//!
//! This module implements the `export` command: channel textures of the open
//! project are exported through the host bridge and optionally converted.

use super::{
    exit_code_for, load_or_report, parse_selection, state_manager, EXIT_PARTIAL, EXIT_SUCCESS,
};
use crate::adapters::host::BridgeHost;
use crate::core::builder::ExportOptions;
use crate::core::export::ExportCoordinator;
use crate::core::state::RememberedOptions;
use clap::Args;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Texture set(s) to export (comma-separated, default: all)
    #[arg(long)]
    pub texture_set: Option<String>,

    /// Export 16-bit channels at 8 bits
    #[arg(long = "force-8bit")]
    pub force_8bit: bool,

    /// Convert exported files afterwards
    #[arg(long)]
    pub convert: bool,

    /// Color-correct converted color channels
    #[arg(long)]
    pub color_correct: bool,

    /// Channel and UDIM range expression, e.g. "basecolor:1001-1004, *:1001"
    #[arg(long)]
    pub range: Option<String>,

    /// Start from the options of the last export
    #[arg(long)]
    pub reuse_last: bool,
}

impl ExportArgs {
    /// Options for this run, layered over the remembered ones
    ///
    /// Flags can only switch options on; `--range` replaces the remembered
    /// expression.
    pub fn export_options(&self, remembered: Option<&RememberedOptions>) -> ExportOptions {
        let base = remembered
            .map(RememberedOptions::to_export_options)
            .unwrap_or_default();

        ExportOptions {
            force_eight_bit: base.force_eight_bit || self.force_8bit,
            convert_after: base.convert_after || self.convert,
            color_correct: base.color_correct || self.color_correct,
            scope_expression: self.range.clone().or(base.scope_expression),
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let state = state_manager(&config);
        let remembered = match state.load_options().await {
            Ok(remembered) => remembered,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read remembered options, using defaults");
                RememberedOptions::default()
            }
        };

        let options = self.export_options(self.reuse_last.then_some(&remembered));
        let selection = parse_selection(self.texture_set.as_deref());

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Export Configuration:");
            println!(
                "  Texture Sets: {}",
                if selection.is_empty() {
                    "All".to_string()
                } else {
                    selection.join(", ")
                }
            );
            println!("  Format: {}", config.export.format);
            println!("  Output Size: {}", config.export.output_size.pixels());
            println!("  Force 8 bit: {}", options.force_eight_bit);
            println!("  Convert: {}", options.convert_after);
            println!("  Color Correct: {}", options.color_correct);
            println!(
                "  Range: {}",
                options.scope_expression.as_deref().unwrap_or("all channels")
            );
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(EXIT_SUCCESS);
            }
        }

        let host = Arc::new(BridgeHost::from_config(&config.host));
        let coordinator = ExportCoordinator::new(config, host);

        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.execute_export(&selection, &options).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let to_remember =
            RememberedOptions::from_export_options(&options, remembered.combined_meshmap);
        if let Err(e) = state.save_options(&to_remember).await {
            tracing::warn!(error = %e, "Failed to remember export options");
        }

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Run ID: {}", summary.run_id);
        println!("  Texture Sets: {}", summary.total_texture_sets);
        println!("  Exported: {}", summary.exported_texture_sets);
        println!("  Skipped: {}", summary.skipped_texture_sets);
        if summary.cancelled_texture_sets > 0 {
            println!("  Cancelled: {}", summary.cancelled_texture_sets);
        }
        println!("  Files Written: {}", summary.exported_files);
        if options.convert_after {
            println!("  Converted: {}", summary.converted_files);
            println!("  Conversion Failures: {}", summary.failed_conversions);
            println!("  Missing Files: {}", summary.missing_files);
        }
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {:?}: {}", error.error_type, error.message);
                if let Some(context) = &error.context {
                    println!("    Context: {context}");
                }
            }
            println!();
        }

        let exit_code = if summary.is_successful() {
            println!("✅ Export completed successfully!");
            EXIT_SUCCESS
        } else {
            println!("⚠️  Export completed with failures");
            EXIT_PARTIAL
        };

        Ok(exit_code)
    }
}
