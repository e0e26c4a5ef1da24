//! Convert command implementation
//!
//! Runs the converter pool over files that were exported earlier, without
//! talking to the host.

use super::{load_or_report, EXIT_FATAL, EXIT_PARTIAL, EXIT_SUCCESS};
use crate::core::conversion::ConversionPipeline;
use clap::Args;

/// Arguments for the convert command
#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Exported files to convert
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Channel whose files get color correction (repeatable)
    #[arg(long)]
    pub color_correct_channel: Vec<String>,
}

impl ConvertArgs {
    /// Execute the convert command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let pipeline = ConversionPipeline::from_config(&config);
        println!(
            "🔄 Converting {} file(s) with {} worker(s)...",
            self.files.len(),
            pipeline.workers()
        );

        let report = match pipeline
            .convert(&self.files, &self.color_correct_channel)
            .await
        {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Conversion failed");
                eprintln!("Conversion failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        println!();
        println!("📊 Conversion Summary:");
        println!("  Scheduled: {}", report.scheduled.len());
        println!("  Succeeded: {}", report.succeeded.len());
        println!("  Failed: {}", report.failed.len());
        println!("  Missing: {}", report.skipped.len());
        println!("  Duration: {:.2}s", report.duration.as_secs_f64());

        for failure in &report.failed {
            println!(
                "  - {}: {}",
                failure.job.source_path.display(),
                failure.error
            );
        }
        for missing in &report.skipped {
            println!("  - missing: {}", missing.display());
        }

        if report.is_success() && report.skipped.is_empty() {
            println!("✅ Conversion completed");
            Ok(EXIT_SUCCESS)
        } else {
            println!("⚠️  Conversion completed with failures");
            Ok(EXIT_PARTIAL)
        }
    }
}
