//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for texport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// texport - texture export and conversion tool
#[derive(Parser, Debug)]
#[command(name = "texport")]
#[command(version, about, long_about = None)]
#[command(author = "Texport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "texport.toml", env = "TEXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TEXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export channel textures of the open project
    Export(commands::export::ExportArgs),

    /// List the files an export would write
    Preview(commands::preview::PreviewArgs),

    /// Export baked mesh maps
    MeshMaps(commands::mesh_maps::MeshMapsArgs),

    /// Convert already exported files
    Convert(commands::convert::ConvertArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show project status and remembered options
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["texport", "export"]);
        assert_eq!(cli.config, "texport.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["texport", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["texport", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_export_flags() {
        let cli = Cli::parse_from([
            "texport",
            "export",
            "--texture-set",
            "Body,Head",
            "--convert",
            "--range",
            "basecolor:1001-1003",
            "--yes",
        ]);
        let Commands::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.texture_set.as_deref(), Some("Body,Head"));
        assert!(args.convert);
        assert!(!args.force_8bit);
        assert_eq!(args.range.as_deref(), Some("basecolor:1001-1003"));
        assert!(args.yes);
    }

    #[test]
    fn test_cli_parse_preview() {
        let cli = Cli::parse_from(["texport", "preview"]);
        assert!(matches!(cli.command, Commands::Preview(_)));
    }

    #[test]
    fn test_cli_parse_mesh_maps() {
        let cli = Cli::parse_from(["texport", "mesh-maps", "--combined"]);
        let Commands::MeshMaps(args) = cli.command else {
            panic!("expected mesh-maps command");
        };
        assert!(args.combined);
    }

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from([
            "texport",
            "convert",
            "TIF/a_Color.1001.tif",
            "TIF/a_Rough.1001.tif",
            "--color-correct-channel",
            "Color",
        ]);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.color_correct_channel, vec!["Color".to_string()]);
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["texport", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["texport", "status"]);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["texport", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
