//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{ApplicationConfig, LoggingConfig, TexportConfig};
use crate::domain::errors::TexportError;
use crate::domain::result::Result;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TexportConfig (illegal option values fall back here)
/// 4. Applies environment variable overrides (TEXPORT_* prefix)
/// 5. Lower-cases channel dictionary keys
/// 6. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use texport::config::loader::load_config;
///
/// let config = load_config("texport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TexportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TexportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TexportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;

    config.validate().map_err(|e| {
        TexportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(
        path = %path.display(),
        channels = config.channels.len(),
        "Configuration loaded"
    );

    Ok(config)
}

/// Parses configuration text without validating it
///
/// Used by `load_config` and by `validate-config`, which reports validation
/// errors separately from parse errors.
pub fn parse_config(contents: &str) -> Result<TexportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: TexportConfig = toml::from_str(&contents)
        .map_err(|e| TexportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    config.normalize();

    Ok(config)
}

/// Sections needed before logging is up
#[derive(Debug, Default, Deserialize)]
struct LoggingSections {
    #[serde(default)]
    application: ApplicationConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

/// Reads the log level and `[logging]` section of a configuration file
///
/// Runs before the subscriber exists, so it never fails: an unreadable or
/// invalid file yields the defaults and the full load reports the problem
/// later.
pub fn load_logging_settings(path: impl AsRef<Path>) -> (String, LoggingConfig) {
    let sections = fs::read_to_string(path)
        .ok()
        .and_then(|contents| substitute_env_vars(&contents).ok())
        .and_then(|contents| toml::from_str::<LoggingSections>(&contents).ok())
        .unwrap_or_default();

    let log_level = std::env::var("TEXPORT_APPLICATION_LOG_LEVEL")
        .unwrap_or(sections.application.log_level);
    (log_level, sections.logging)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. Naming templates use `$name` without
/// braces, so they never collide with this syntax.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TexportError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(TexportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        TexportError::Configuration(format!("Invalid value for {name}: '{value}'"))
    })
}

fn split_list(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

/// Applies environment variable overrides using TEXPORT_* prefix
///
/// Environment variables follow the pattern: TEXPORT_<SECTION>_<KEY>
/// For example: TEXPORT_EXPORT_OUTPUT_SIZE, TEXPORT_CONVERTER_PATH.
/// List values (converter options, host args) are whitespace separated.
fn apply_env_overrides(config: &mut TexportConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application
    if let Some(val) = var("TEXPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = var("TEXPORT_APPLICATION_CONFIG_NAME") {
        config.application.config_name = val;
    }

    // Project and naming
    if let Some(val) = var("TEXPORT_PROJECT_NAMING") {
        config.project.naming = val;
    }
    if let Some(val) = var("TEXPORT_NAMING_EXPORT_NAME") {
        config.naming.export_name = val;
    }
    if let Some(val) = var("TEXPORT_NAMING_LEGACY_NAME") {
        config.naming.legacy_name = val;
    }
    if let Some(val) = var("TEXPORT_NAMING_MESHMAP_NAME") {
        config.naming.meshmap_name = val;
    }

    // Directories
    if let Some(val) = var("TEXPORT_DIRECTORIES_EXPORT") {
        config.directories.export = val;
    }
    if let Some(val) = var("TEXPORT_DIRECTORIES_CONVERT") {
        config.directories.convert = val;
    }
    if let Some(val) = var("TEXPORT_DIRECTORIES_MESHMAP") {
        config.directories.meshmap = val;
    }

    // Export
    if let Some(val) = var("TEXPORT_EXPORT_OUTPUT_SIZE") {
        let size: i64 = parse_override("TEXPORT_EXPORT_OUTPUT_SIZE", &val)?;
        config.export.output_size = size.into();
    }
    if let Some(val) = var("TEXPORT_EXPORT_DEFAULT_SIZE_LOG2") {
        config.export.default_size_log2 =
            Some(parse_override("TEXPORT_EXPORT_DEFAULT_SIZE_LOG2", &val)?);
    }
    if let Some(val) = var("TEXPORT_EXPORT_FORMAT") {
        config.export.format = val.into();
    }
    if let Some(val) = var("TEXPORT_EXPORT_CONVERT_FORMAT") {
        config.export.convert_format = val;
    }
    if let Some(val) = var("TEXPORT_EXPORT_NORMAL_MAP") {
        config.export.normal_map = val.into();
    }
    if let Some(val) = var("TEXPORT_EXPORT_PRESET") {
        config.export.preset = val;
    }
    if let Some(val) = var("TEXPORT_EXPORT_SHADER_PARAMS") {
        let flag: i64 = parse_override("TEXPORT_EXPORT_SHADER_PARAMS", &val)?;
        config.export.shader_params = flag.into();
    }
    if let Some(val) = var("TEXPORT_EXPORT_DITHERING") {
        let flag: i64 = parse_override("TEXPORT_EXPORT_DITHERING", &val)?;
        config.export.dithering = flag.into();
    }
    if let Some(val) = var("TEXPORT_EXPORT_DILATION_DISTANCE") {
        config.export.dilation_distance =
            parse_override("TEXPORT_EXPORT_DILATION_DISTANCE", &val)?;
    }
    if let Some(val) = var("TEXPORT_EXPORT_PADDING_ALGORITHM") {
        config.export.padding_algorithm = val.into();
    }

    // Converter
    if let Some(val) = var("TEXPORT_CONVERTER_PATH") {
        config.converter.path = val;
    }
    if let Some(val) = var("TEXPORT_CONVERTER_OPTIONS") {
        config.converter.options = split_list(&val);
    }
    if let Some(val) = var("TEXPORT_CONVERTER_MAX_WORKERS") {
        config.converter.max_workers = Some(parse_override("TEXPORT_CONVERTER_MAX_WORKERS", &val)?);
    }

    // Host
    if let Some(val) = var("TEXPORT_HOST_BRIDGE") {
        config.host.bridge = val;
    }
    if let Some(val) = var("TEXPORT_HOST_ARGS") {
        config.host.args = split_list(&val);
    }

    // State
    if let Some(val) = var("TEXPORT_STATE_METADATA_PATH") {
        config.state.metadata_path = val;
    }

    // Logging
    if let Some(val) = var("TEXPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = var("TEXPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("TEXPORT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::{ExportFormat, OutputSize};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
[channels]
basecolor = "Color"
Roughness = "Rough"
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("TEXPORT_LOADER_TEST_VAR", "tools/maketx");
        let input = "path = \"${TEXPORT_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path = \"tools/maketx\"");
        std::env::remove_var("TEXPORT_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("TEXPORT_LOADER_MISSING_VAR");
        let input = "path = \"${TEXPORT_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("TEXPORT_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments_and_templates() {
        let input = "# path = \"${TEXPORT_LOADER_COMMENTED}\"\nexport_name = \"$title_$channel\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-texport.toml");
        assert!(matches!(result, Err(TexportError::Configuration(_))));
    }

    #[test]
    fn test_load_config_minimal() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(MINIMAL.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.channels.len(), 2);
        assert_eq!(config.channels["roughness"], "Rough");
        assert_eq!(config.directories.export, "TIF");
        assert_eq!(config.export.output_size, OutputSize::S4096);
    }

    #[test]
    fn test_parse_config_applies_fallbacks() {
        let contents = format!(
            "{MINIMAL}\n[export]\noutput_size = 3000\nformat = \"exr\"\n"
        );
        let config = parse_config(&contents).unwrap();
        assert_eq!(config.export.output_size, OutputSize::S4096);
        assert_eq!(config.export.format, ExportFormat::Tif);
    }

    #[test]
    fn test_load_logging_settings() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[application]\nlog_level = \"debug\"\n\n[logging]\nlocal_enabled = true\nlocal_path = \"logs\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let (level, logging) = load_logging_settings(temp_file.path());
        assert_eq!(level, "debug");
        assert!(logging.local_enabled);
        assert_eq!(logging.local_path, "logs");
    }

    #[test]
    fn test_load_logging_settings_missing_file() {
        let (level, logging) = load_logging_settings("nonexistent-texport.toml");
        assert_eq!(level, "info");
        assert!(!logging.local_enabled);
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[application]\nlog_level = \"info\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }
}
