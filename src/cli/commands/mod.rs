//! CLI command implementations
//!
//! This module contains all CLI command implementations and the helpers
//! they share.

pub mod convert;
pub mod export;
pub mod init;
pub mod mesh_maps;
pub mod preview;
pub mod status;
pub mod validate;

use crate::config::{load_config, TexportConfig};
use crate::core::state::{JsonFileStore, StateManager};
use crate::domain::{HostError, TexportError};
use std::sync::Arc;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when some texture sets or conversions failed
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code for configuration and selection errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code when the host cannot be reached or has no usable project
pub const EXIT_HOST: i32 = 4;
/// Exit code for everything else
pub const EXIT_FATAL: i32 = 5;

/// Maps an error that aborted a run to a process exit code
pub fn exit_code_for(error: &TexportError) -> i32 {
    match error {
        TexportError::Configuration(_) | TexportError::Validation(_) => EXIT_CONFIG,
        TexportError::Host(HostError::TextureSetNotFound(_)) => EXIT_CONFIG,
        TexportError::Host(_) => EXIT_HOST,
        _ => EXIT_FATAL,
    }
}

/// Splits a comma-separated texture set list
pub(crate) fn parse_selection(value: Option<&str>) -> Vec<String> {
    value
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Loads the configuration, printing the failure the way every command does
pub(crate) fn load_or_report(config_path: &str) -> Result<TexportConfig, i32> {
    load_config(config_path).map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        println!("❌ Failed to load configuration file");
        println!("   Error: {e}");
        EXIT_CONFIG
    })
}

/// State manager backed by the configured metadata file
pub(crate) fn state_manager(config: &TexportConfig) -> StateManager {
    StateManager::new_with_store(Arc::new(JsonFileStore::new(&config.state.metadata_path)))
}
