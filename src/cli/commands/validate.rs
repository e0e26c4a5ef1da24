//! Validate config command implementation
//!
//! This module implements the `validate-config` command. Parse errors and
//! validation errors are reported separately.

use super::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::parse_config;
use crate::core::conversion::converter_available;
use clap::Args;
use std::fs;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let contents = match fs::read_to_string(config_path) {
            Ok(contents) => contents,
            Err(e) => {
                println!("❌ Failed to read configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let config = match parse_config(&contents) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            println!();
            return Ok(EXIT_CONFIG);
        }

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Name: {}", config.application.config_name);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Project Naming: {}", config.project.naming);
        println!("  Export Name: {}", config.naming.export_name);
        println!("  Legacy Name: {}", config.naming.legacy_name);
        println!(
            "  Directories: {} / {} / {}",
            config.directories.export, config.directories.convert, config.directories.meshmap
        );
        println!("  Output Size: {}", config.export.output_size.pixels());
        println!(
            "  Format: {} -> {}",
            config.export.format, config.export.convert_format
        );
        println!("  Normal Map: {}", config.export.normal_map);
        println!("  Padding: {}", config.export.padding_algorithm);
        println!("  Channels: {}", config.channels.len());
        for (key, name) in &config.channels {
            println!("    {key} -> {name}");
        }
        println!("  Converter: {}", config.converter.path);
        println!("  Workers: {}", config.converter.worker_count());
        println!("  Host Bridge: {}", config.host.bridge);
        println!();

        if !converter_available(&config.converter.path) {
            println!(
                "⚠️  Converter '{}' was not found; exports with conversion will fail",
                config.converter.path
            );
            println!();
        }

        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs {};
        let code = args.execute("nonexistent-texport.toml").await.unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[tokio::test]
    async fn test_validate_rejects_empty_dictionary() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[application]\nlog_level = \"info\"\n").unwrap();
        file.flush().unwrap();

        let args = ValidateArgs {};
        let code = args.execute(&file.path().to_string_lossy()).await.unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }

    #[tokio::test]
    async fn test_validate_accepts_minimal_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[channels]\nbasecolor = \"Color\"\n").unwrap();
        file.flush().unwrap();

        let args = ValidateArgs {};
        let code = args.execute(&file.path().to_string_lossy()).await.unwrap();
        assert_eq!(code, EXIT_SUCCESS);
    }
}
