//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "texport.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing texport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Fill the [channels] dictionary with your export names");
                println!("  3. Point converter.path at your texture converter");
                println!("  4. Validate configuration: texport validate-config");
                println!("  5. Preview the output: texport preview");
                println!("  6. Run export: texport export");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# texport configuration

[application]
log_level = "info"

[project]
naming = '^([A-Za-z][A-Za-z0-9]*)(?:_v\d+)?\.spp$'

[naming]
export_name = "$title_$channel.$udim"
legacy_name = "$title_$channel.$textureSet"
meshmap_name = "$title_$channel"

[directories]
export = "TIF"
convert = "TX"
meshmap = "MeshMaps"

[export]
output_size = 4096
format = "tif"
convert_format = "tx"
normal_map = "open_gl"

[channels]
basecolor = "Color"
roughness = "Rough"
metallic = "Metal"
normal = "Normal"
height = "Height"
opacity = "Opacity"

[converter]
path = "maketx"

[host]
bridge = "texport-bridge"

[state]
metadata_path = ".texport/metadata.json"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# texport configuration
#
# This file contains all configuration options with examples and explanations.
# ${VAR} references are replaced from the environment, and every value can be
# overridden with TEXPORT_<SECTION>_<KEY> (e.g. TEXPORT_CONVERTER_PATH).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Name shown by `texport status`
config_name = "texport"

# ============================================================================
# Project Naming
# ============================================================================
[project]
# Matched against the project file name from its first character.
# Capture group 1 is the title used in every output name.
naming = '^([A-Za-z][A-Za-z0-9]*)(?:_v\d+)?\.spp$'

# ============================================================================
# Output File Names
# ============================================================================
[naming]
# $title and $channel are filled in by texport; other $tokens ($udim,
# $textureSet) are resolved by the host.
export_name = "$title_$channel.$udim"

# Used when texture sets are named after UDIM tiles (1001, 1002, ...)
legacy_name = "$title_$channel.$textureSet"

# Mesh-map outputs
meshmap_name = "$title_$channel"

# ============================================================================
# Directories (relative to the project file)
# ============================================================================
[directories]
export = "TIF"
convert = "TX"
meshmap = "MeshMaps"

# ============================================================================
# Export Parameters
# ============================================================================
[export]
# 512, 1024, 2048, 4096 or 8192
output_size = 4096

# Only needed for sizes without a fixed exponent
# default_size_log2 = 13

# png, tga, jpg or tif
format = "tif"

# Extension written by the converter
convert_format = "tx"

# directx or open_gl
normal_map = "open_gl"

preset = "texport"
shader_params = 1
dithering = 1
dilation_distance = 16

# passthrough, color, transparent, diffusion or infinite
padding_algorithm = "infinite"

# ============================================================================
# Channel Dictionary
# ============================================================================
# Host channel (or user channel label) -> export name.
# Keys are case-insensitive. Channels not listed here are not exported.
[channels]
basecolor = "Color"
roughness = "Rough"
metallic = "Metal"
normal = "Normal"
height = "Height"
opacity = "Opacity"
emissive = "Emission"
# user0 = "Mask"

# ============================================================================
# Converter
# ============================================================================
[converter]
path = "${TEXPORT_MAKETX}"
options = ["-oiio", "-u", "--checknan", "--constant-color-detect", "--monochrome-detect", "--opaque-detect"]

# Added for color channels when color correction is requested
color_convert = ["--colorconvert", "sRGB", "scene-linear Rec 709/sRGB"]

# Defaults to the number of CPUs
# max_workers = 8

# ============================================================================
# Host Bridge
# ============================================================================
[host]
bridge = "texport-bridge"
args = []

# ============================================================================
# Remembered Options
# ============================================================================
[state]
metadata_path = ".texport/metadata.json"

# ============================================================================
# Logging
# ============================================================================
[logging]
local_enabled = false
local_path = "logs"

# daily or hourly
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_minimal_config_parses_and_validates() {
        let config = parse_config(&InitArgs::generate_minimal_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.channels["basecolor"], "Color");
    }

    #[test]
    fn test_example_config_parses_and_validates() {
        std::env::set_var("TEXPORT_MAKETX", "maketx");
        let config = parse_config(&InitArgs::generate_config_with_examples()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.converter.path, "maketx");
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("texport.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");
    }
}
