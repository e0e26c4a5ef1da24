//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - Configurable log levels (`RUST_LOG` wins when set)
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use texport::logging::init_logging;
//! use texport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(texture_set = "Body", "Exporting");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a texture set export
///
/// # Example
///
/// ```no_run
/// use texport::log_export_start;
/// use texport::domain::TextureSetName;
///
/// let texture_set = TextureSetName::new("Body").unwrap();
/// log_export_start!(&texture_set, "/proj/TIF");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($texture_set:expr, $export_path:expr) => {
        tracing::info!(
            texture_set = %$texture_set,
            export_path = %$export_path,
            "Starting export"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use texport::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!(12, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            files = $count,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use texport::log_error_with_context;
/// use texport::domain::TexportError;
///
/// let error = TexportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log conversion batch progress
///
/// # Example
///
/// ```no_run
/// use texport::log_batch_progress;
///
/// log_batch_progress!(3, 10);
/// ```
#[macro_export]
macro_rules! log_batch_progress {
    ($finished:expr, $total:expr) => {
        tracing::debug!(
            finished = $finished,
            total = $total,
            progress_pct = ($finished as f64 / ($total as f64).max(1.0) * 100.0),
            "Conversion progress"
        );
    };
}
