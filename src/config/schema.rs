//! Configuration schema types
//!
//! This module defines the configuration structure for texport. Option
//! vocabularies with legal-value sets (output size, formats, padding...) are
//! typed in [`crate::domain::options`] and fall back while deserializing.

use crate::domain::options::{
    Dithering, ExportFormat, NormalMapFormat, OutputSize, PaddingAlgorithm, ShaderParams,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main texport configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TexportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Project file naming rules
    #[serde(default)]
    pub project: ProjectConfig,

    /// Output file name templates
    #[serde(default)]
    pub naming: NamingConfig,

    /// Directory names under the project root
    #[serde(default)]
    pub directories: DirectoriesConfig,

    /// Host export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Channel-name dictionary: lookup key → canonical export name
    ///
    /// Keys are lower-cased on load. Iteration follows key order.
    #[serde(default)]
    pub channels: BTreeMap<String, String>,

    /// External converter settings
    #[serde(default)]
    pub converter: ConverterConfig,

    /// Host bridge settings
    #[serde(default)]
    pub host: HostConfig,

    /// Remembered-options storage
    #[serde(default)]
    pub state: StateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TexportConfig {
    /// Loads, substitutes, overrides and validates a configuration file
    ///
    /// Shorthand for [`crate::config::load_config`].
    pub fn from_file(
        path: impl AsRef<std::path::Path>,
    ) -> crate::domain::result::Result<Self> {
        super::loader::load_config(path)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.project.validate()?;
        self.naming.validate()?;
        self.directories.validate()?;
        self.export.validate()?;

        if self.channels.is_empty() {
            return Err("channels dictionary cannot be empty".to_string());
        }
        if let Some((key, _)) = self.channels.iter().find(|(_, name)| name.trim().is_empty()) {
            return Err(format!("channels.{key} has an empty export name"));
        }

        self.converter.validate()?;
        self.host.validate()?;
        self.state.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Lower-cases dictionary keys so lookups are case-insensitive
    pub(crate) fn normalize(&mut self) {
        let channels = std::mem::take(&mut self.channels);
        for (key, name) in channels {
            let lowered = key.to_lowercase();
            if self.channels.contains_key(&lowered) {
                tracing::warn!(key = %key, "Channel key differs only by case, keeping first entry");
                continue;
            }
            self.channels.insert(lowered, name);
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Name shown in status output and stored with remembered options
    #[serde(default = "default_config_name")]
    pub config_name: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            config_name: default_config_name(),
        }
    }
}

/// Project file naming rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Regular expression matched against the project file name;
    /// capture group 1 is the project title
    #[serde(default = "default_project_naming")]
    pub naming: String,
}

impl ProjectConfig {
    fn validate(&self) -> Result<(), String> {
        let regex = Regex::new(&self.naming)
            .map_err(|e| format!("project.naming is not a valid regular expression: {e}"))?;
        if regex.captures_len() < 2 {
            return Err("project.naming must contain a capture group for the title".to_string());
        }
        Ok(())
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            naming: default_project_naming(),
        }
    }
}

/// Output file name templates
///
/// `$title` and `$channel` are substituted; other `$tokens` are passed
/// through to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Template for named texture sets
    #[serde(default = "default_export_name")]
    pub export_name: String,

    /// Template for texture sets named after a UDIM tile
    #[serde(default = "default_legacy_name")]
    pub legacy_name: String,

    /// Template for mesh-map outputs
    #[serde(default = "default_meshmap_name")]
    pub meshmap_name: String,
}

impl NamingConfig {
    fn validate(&self) -> Result<(), String> {
        for (key, template) in [
            ("export_name", &self.export_name),
            ("legacy_name", &self.legacy_name),
            ("meshmap_name", &self.meshmap_name),
        ] {
            if !template.contains("$channel") {
                return Err(format!("naming.{key} must contain $channel"));
            }
        }
        Ok(())
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            export_name: default_export_name(),
            legacy_name: default_legacy_name(),
            meshmap_name: default_meshmap_name(),
        }
    }
}

/// Directory names under the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoriesConfig {
    /// Host export target
    #[serde(default = "default_export_directory")]
    pub export: String,

    /// Converter output
    #[serde(default = "default_convert_directory")]
    pub convert: String,

    /// Mesh-map export target
    #[serde(default = "default_meshmap_directory")]
    pub meshmap: String,
}

impl DirectoriesConfig {
    fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("export", &self.export),
            ("convert", &self.convert),
            ("meshmap", &self.meshmap),
        ] {
            if value.trim().is_empty() {
                return Err(format!("directories.{key} cannot be empty"));
            }
        }
        if self.export == self.convert
            || self.export == self.meshmap
            || self.convert == self.meshmap
        {
            return Err("directories.export, convert and meshmap must be distinct".to_string());
        }
        Ok(())
    }
}

impl Default for DirectoriesConfig {
    fn default() -> Self {
        Self {
            export: default_export_directory(),
            convert: default_convert_directory(),
            meshmap: default_meshmap_directory(),
        }
    }
}

/// Host export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output size in pixels
    #[serde(default)]
    pub output_size: OutputSize,

    /// Size exponent used for sizes without a fixed mapping
    #[serde(default)]
    pub default_size_log2: Option<u8>,

    /// Format written by the host
    #[serde(default)]
    pub format: ExportFormat,

    /// Format produced by the converter
    #[serde(default = "default_convert_format")]
    pub convert_format: String,

    /// Tangent-space normal encoding
    #[serde(default)]
    pub normal_map: NormalMapFormat,

    /// Preset name sent to the host
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Export shader parameters (1 or 0)
    #[serde(default)]
    pub shader_params: ShaderParams,

    /// Dither on bit-depth reduction (0 or 1)
    #[serde(default)]
    pub dithering: Dithering,

    /// Dilation distance in pixels
    #[serde(default = "default_dilation_distance")]
    pub dilation_distance: u32,

    /// Padding algorithm outside UV islands
    #[serde(default)]
    pub padding_algorithm: PaddingAlgorithm,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.convert_format.trim().is_empty() {
            return Err("export.convert_format cannot be empty".to_string());
        }
        if self.convert_format.eq_ignore_ascii_case(self.format.as_str()) {
            return Err("export.convert_format must differ from export.format".to_string());
        }
        if self.preset.trim().is_empty() {
            return Err("export.preset cannot be empty".to_string());
        }
        if let Some(size_log2) = self.default_size_log2 {
            if !(1..=16).contains(&size_log2) {
                return Err(format!(
                    "export.default_size_log2 must be between 1 and 16, got {size_log2}"
                ));
            }
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_size: OutputSize::default(),
            default_size_log2: None,
            format: ExportFormat::default(),
            convert_format: default_convert_format(),
            normal_map: NormalMapFormat::default(),
            preset: default_preset(),
            shader_params: ShaderParams::default(),
            dithering: Dithering::default(),
            dilation_distance: default_dilation_distance(),
            padding_algorithm: PaddingAlgorithm::default(),
        }
    }
}

/// External converter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Converter executable
    #[serde(default = "default_converter_path")]
    pub path: String,

    /// Fixed flags passed to every job
    #[serde(default = "default_converter_options")]
    pub options: Vec<String>,

    /// Extra flags for jobs that need color correction
    #[serde(default = "default_color_convert")]
    pub color_convert: Vec<String>,

    /// Upper bound on concurrent converter processes (defaults to CPU count)
    #[serde(default)]
    pub max_workers: Option<usize>,
}

impl ConverterConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("converter.path cannot be empty".to_string());
        }
        if self.max_workers == Some(0) {
            return Err("converter.max_workers must be >= 1".to_string());
        }
        Ok(())
    }

    /// Effective pool size: CPU count, lowered by `max_workers`
    pub fn worker_count(&self) -> usize {
        let cpus = num_cpus::get().max(1);
        match self.max_workers {
            Some(max) => max.clamp(1, cpus),
            None => cpus,
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            path: default_converter_path(),
            options: default_converter_options(),
            color_convert: default_color_convert(),
            max_workers: None,
        }
    }
}

/// Host bridge settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Bridge executable talking to the texturing application
    #[serde(default = "default_bridge")]
    pub bridge: String,

    /// Arguments placed before every request
    #[serde(default)]
    pub args: Vec<String>,
}

impl HostConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bridge.trim().is_empty() {
            return Err("host.bridge cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bridge: default_bridge(),
            args: Vec::new(),
        }
    }
}

/// Remembered-options storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// JSON file holding remembered options
    #[serde(default = "default_metadata_path")]
    pub metadata_path: String,
}

impl StateConfig {
    fn validate(&self) -> Result<(), String> {
        if self.metadata_path.trim().is_empty() {
            return Err("state.metadata_path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            metadata_path: default_metadata_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_config_name() -> String {
    "texport".to_string()
}

fn default_project_naming() -> String {
    r"^([A-Za-z][A-Za-z0-9]*)(?:_v\d+)?\.spp$".to_string()
}

fn default_export_name() -> String {
    "$title_$channel.$udim".to_string()
}

fn default_legacy_name() -> String {
    "$title_$channel.$textureSet".to_string()
}

fn default_meshmap_name() -> String {
    "$title_$channel".to_string()
}

fn default_export_directory() -> String {
    "TIF".to_string()
}

fn default_convert_directory() -> String {
    "TX".to_string()
}

fn default_meshmap_directory() -> String {
    "MeshMaps".to_string()
}

fn default_convert_format() -> String {
    "tx".to_string()
}

fn default_preset() -> String {
    "texport".to_string()
}

fn default_dilation_distance() -> u32 {
    16
}

fn default_converter_path() -> String {
    "maketx".to_string()
}

fn default_converter_options() -> Vec<String> {
    [
        "-oiio",
        "-u",
        "--checknan",
        "--constant-color-detect",
        "--monochrome-detect",
        "--opaque-detect",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_color_convert() -> Vec<String> {
    ["--colorconvert", "sRGB", "scene-linear Rec 709/sRGB"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_bridge() -> String {
    "texport-bridge".to_string()
}

fn default_metadata_path() -> String {
    ".texport/metadata.json".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> TexportConfig {
        let mut config = TexportConfig::default();
        config
            .channels
            .insert("basecolor".to_string(), "Color".to_string());
        config
    }

    #[test]
    fn test_default_config_needs_channels() {
        let config = TexportConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.contains("channels"));

        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_project_naming_requires_capture_group() {
        let mut config = ProjectConfig::default();
        assert!(config.validate().is_ok());

        config.naming = r"^\w+\.spp$".to_string();
        assert!(config.validate().unwrap_err().contains("capture group"));

        config.naming = r"^(\w+".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_naming_templates_require_channel() {
        let mut config = NamingConfig::default();
        assert!(config.validate().is_ok());

        config.meshmap_name = "$title_maps".to_string();
        assert!(config.validate().unwrap_err().contains("meshmap_name"));
    }

    #[test]
    fn test_directories_must_be_distinct() {
        let mut config = DirectoriesConfig::default();
        assert!(config.validate().is_ok());

        config.convert = "TIF".to_string();
        assert!(config.validate().is_err());

        config.convert = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.convert_format = "TIF".to_string();
        assert!(config.validate().is_err());

        config.convert_format = "tx".to_string();
        config.default_size_log2 = Some(13);
        assert!(config.validate().is_ok());

        config.default_size_log2 = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_converter_max_workers() {
        let mut config = ConverterConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.worker_count() >= 1);

        config.max_workers = Some(0);
        assert!(config.validate().is_err());

        config.max_workers = Some(1);
        assert_eq!(config.worker_count(), 1);
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_normalize_lowercases_channel_keys() {
        let mut config = TexportConfig::default();
        config
            .channels
            .insert("BaseColor".to_string(), "Color".to_string());
        config
            .channels
            .insert("basecolor".to_string(), "Diffuse".to_string());
        config
            .channels
            .insert("Roughness".to_string(), "Rough".to_string());

        config.normalize();

        assert_eq!(config.channels.len(), 2);
        assert_eq!(config.channels["basecolor"], "Color");
        assert_eq!(config.channels["roughness"], "Rough");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_export_directory(), "TIF");
        assert_eq!(default_convert_directory(), "TX");
        assert_eq!(default_convert_format(), "tx");
        assert_eq!(default_converter_options().len(), 6);
        assert_eq!(
            default_color_convert(),
            vec!["--colorconvert", "sRGB", "scene-linear Rec 709/sRGB"]
        );
    }
}
