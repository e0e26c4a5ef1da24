//! Configuration management for texport.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! texport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `TEXPORT_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Legal-value fallback for export options
//! - Comprehensive validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use texport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("texport.toml")?;
//!
//! println!("Export format: {}", config.export.format);
//! println!("Converter: {}", config.converter.path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and configuration name
//! - [`ProjectConfig`] - Project file naming regex
//! - [`NamingConfig`] - Output file name templates
//! - [`DirectoriesConfig`] - Export, convert and mesh-map directory names
//! - [`ExportConfig`] - Host export parameters
//! - `channels` - Channel-name dictionary
//! - [`ConverterConfig`] - External converter and pool size
//! - [`HostConfig`] - Host bridge executable
//! - [`StateConfig`] - Remembered-options file
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [project]
//! naming = '^([A-Za-z][A-Za-z0-9]*)(?:_v\d+)?\.spp$'
//!
//! [naming]
//! export_name = "$title_$channel.$udim"
//! legacy_name = "$title_$channel.$textureSet"
//!
//! [export]
//! output_size = 4096
//! format = "tif"
//! convert_format = "tx"
//!
//! [channels]
//! basecolor = "Color"
//! roughness = "Rough"
//! normal = "Normal"
//!
//! [converter]
//! path = "${TEXPORT_MAKETX}"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_logging_settings, parse_config};
pub use schema::{
    ApplicationConfig, ConverterConfig, DirectoriesConfig, ExportConfig, HostConfig,
    LoggingConfig, NamingConfig, ProjectConfig, StateConfig, TexportConfig,
};
