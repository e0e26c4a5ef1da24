//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use texport::config::load_config;
use texport::domain::options::{ExportFormat, NormalMapFormat, OutputSize, PaddingAlgorithm};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("TEXPORT_APPLICATION_LOG_LEVEL");
    std::env::remove_var("TEXPORT_EXPORT_OUTPUT_SIZE");
    std::env::remove_var("TEXPORT_EXPORT_FORMAT");
    std::env::remove_var("TEXPORT_CONVERTER_PATH");
    std::env::remove_var("TEXPORT_CONVERTER_OPTIONS");
    std::env::remove_var("TEST_TEXPORT_MAKETX");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"
config_name = "studio"

[project]
naming = '^([A-Z]\w+?)_v\d+\.spp$'

[naming]
export_name = "$title_$channel_$textureSet.$udim"
legacy_name = "$title_$channel.$textureSet"
meshmap_name = "$title_$textureSet_$channel"

[directories]
export = "EXR"
convert = "TEX"
meshmap = "Bakes"

[export]
output_size = 2048
format = "png"
convert_format = "tex"
normal_map = "directx"
preset = "studio"
shader_params = 0
dithering = 0
dilation_distance = 8
padding_algorithm = "diffusion"

[channels]
BaseColor = "Diffuse"
roughness = "Rough"
user0 = "Mask"

[converter]
path = "/opt/bin/txmake"
options = ["-mode", "periodic"]
color_convert = ["-colorconvert"]
max_workers = 2

[host]
bridge = "/opt/bin/bridge"
args = ["--port", "6403"]

[state]
metadata_path = "state/options.json"

[logging]
local_enabled = false
local_path = "/tmp/texport"
local_rotation = "hourly"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.application.config_name, "studio");

    assert_eq!(config.naming.meshmap_name, "$title_$textureSet_$channel");
    assert_eq!(config.directories.convert, "TEX");

    assert_eq!(config.export.output_size, OutputSize::S2048);
    assert_eq!(config.export.format, ExportFormat::Png);
    assert_eq!(config.export.normal_map, NormalMapFormat::DirectX);
    assert_eq!(config.export.padding_algorithm, PaddingAlgorithm::Diffusion);
    assert!(!config.export.shader_params.is_enabled());
    assert!(!config.export.dithering.is_enabled());
    assert_eq!(config.export.dilation_distance, 8);

    // Dictionary keys are lower-cased
    assert_eq!(config.channels.len(), 3);
    assert_eq!(config.channels["basecolor"], "Diffuse");
    assert!(!config.channels.contains_key("BaseColor"));

    assert_eq!(config.converter.options, vec!["-mode", "periodic"]);
    assert_eq!(config.converter.max_workers, Some(2));
    assert_eq!(config.host.args, vec!["--port", "6403"]);
    assert_eq!(config.state.metadata_path, "state/options.json");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[channels]\nbasecolor = \"Color\"\n");
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.naming.export_name, "$title_$channel.$udim");
    assert_eq!(config.directories.export, "TIF");
    assert_eq!(config.directories.convert, "TX");
    assert_eq!(config.directories.meshmap, "MeshMaps");
    assert_eq!(config.export.output_size, OutputSize::S4096);
    assert_eq!(config.export.format, ExportFormat::Tif);
    assert_eq!(config.export.convert_format, "tx");
    assert_eq!(config.export.normal_map, NormalMapFormat::OpenGl);
    assert_eq!(config.export.padding_algorithm, PaddingAlgorithm::Infinite);
    assert_eq!(config.converter.path, "maketx");
    assert!(config.converter.worker_count() >= 1);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_illegal_option_values_fall_back() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[export]
output_size = 3000
format = "bmp"
normal_map = "metal"
padding_algorithm = "smear"

[channels]
basecolor = "Color"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.export.output_size, OutputSize::S4096);
    assert_eq!(config.export.format, ExportFormat::Tif);
    assert_eq!(config.export.normal_map, NormalMapFormat::OpenGl);
    assert_eq!(config.export.padding_algorithm, PaddingAlgorithm::Infinite);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_TEXPORT_MAKETX", "/tools/maketx");

    let toml_content = r#"
[channels]
basecolor = "Color"

[converter]
path = "${TEST_TEXPORT_MAKETX}"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.converter.path, "/tools/maketx");

    std::env::remove_var("TEST_TEXPORT_MAKETX");
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEXPORT_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("TEXPORT_EXPORT_OUTPUT_SIZE", "1024");
    std::env::set_var("TEXPORT_CONVERTER_OPTIONS", "-u --checknan");

    let toml_content = r#"
[application]
log_level = "info"

[export]
output_size = 4096

[channels]
basecolor = "Color"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.export.output_size, OutputSize::S1024);
    assert_eq!(config.converter.options, vec!["-u", "--checknan"]);

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "invalid_level"

[channels]
basecolor = "Color"
"#;

    let temp_file = write_config(toml_content);
    assert!(load_config(temp_file.path()).is_err());
}

#[test]
fn test_naming_regex_requires_capture_group() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[project]
naming = '^\w+\.spp$'

[channels]
basecolor = "Color"
"#;

    let temp_file = write_config(toml_content);
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("capture group"));
}

#[test]
fn test_convert_format_must_differ_from_export_format() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[export]
format = "png"
convert_format = "PNG"

[channels]
basecolor = "Color"
"#;

    let temp_file = write_config(toml_content);
    assert!(load_config(temp_file.path()).is_err());
}
