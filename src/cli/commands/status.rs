//! Status command implementation
//!
//! This module implements the `status` command: project readiness, texture
//! sets, remembered options and converter availability.

use super::{load_or_report, state_manager, EXIT_HOST, EXIT_SUCCESS};
use crate::adapters::host::{BridgeHost, HostService};
use crate::core::conversion::converter_available;
use crate::core::export::ExportCoordinator;
use crate::core::naming::ProjectStatus;
use clap::Args;
use std::sync::Arc;

/// Arguments for the status command
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Do not contact the host
    #[arg(long)]
    pub offline: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        println!("📊 Export Status");
        println!();

        let config = match load_or_report(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let mut exit_code = EXIT_SUCCESS;

        if !self.offline {
            let host = Arc::new(BridgeHost::from_config(&config.host));
            let coordinator = ExportCoordinator::new(config.clone(), host.clone());

            match coordinator.project_status().await {
                Ok(ProjectStatus::Ready { title }) => {
                    println!("✅ Project ready: {title}");
                    match host.texture_sets().await {
                        Ok(sets) => {
                            println!("  Texture Sets: {}", sets.len());
                            for set in &sets {
                                match &set.label {
                                    Some(label) => println!("    {} ({label})", set.name),
                                    None => println!("    {}", set.name),
                                }
                            }
                        }
                        Err(e) => println!("⚠️  Could not list texture sets: {e}"),
                    }
                }
                Ok(ProjectStatus::NameIsNotCorrect) => {
                    println!("❌ The project name is incorrect");
                    println!("   Expected pattern: {}", config.project.naming);
                }
                Ok(ProjectStatus::ProjectNotOpened) => {
                    println!("❌ No project is opened");
                }
                Err(e) => {
                    println!("❌ Failed to reach the host");
                    println!("   Error: {e}");
                    exit_code = EXIT_HOST;
                }
            }
            println!();
        }

        match state_manager(&config).load_options().await {
            Ok(remembered) => {
                println!("Remembered Options:");
                let last_export = remembered
                    .updated_at
                    .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "Never".to_string());
                println!("  Last Export: {last_export}");
                println!(
                    "  Range: {}",
                    if remembered.channel_ranges.is_empty() {
                        "all channels"
                    } else {
                        remembered.channel_ranges.as_str()
                    }
                );
                println!("  Force 8 bit: {}", remembered.force_eight_bit);
                println!("  Convert: {}", remembered.convert_after);
                println!("  Color Correct: {}", remembered.color_correct);
                println!("  Combined Mesh Maps: {}", remembered.combined_meshmap);
            }
            Err(e) => {
                println!("⚠️  Could not read remembered options");
                println!("   Error: {e}");
            }
        }
        println!();

        if converter_available(&config.converter.path) {
            println!("✅ Converter found: {}", config.converter.path);
        } else {
            println!("⚠️  Converter not found: {}", config.converter.path);
        }
        println!();

        Ok(exit_code)
    }
}
