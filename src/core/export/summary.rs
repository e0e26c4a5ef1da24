//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::core::conversion::{BatchState, ConversionReport};
use std::time::Duration;
use uuid::Uuid;

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Identifier of this run, repeated in log lines
    pub run_id: Uuid,

    /// Texture sets selected for export
    pub total_texture_sets: usize,

    /// Texture sets the host exported (success or warning)
    pub exported_texture_sets: usize,

    /// Texture sets with nothing to export
    pub skipped_texture_sets: usize,

    /// Texture sets whose export the host cancelled
    pub cancelled_texture_sets: usize,

    /// Files written by the host
    pub exported_files: usize,

    /// Files converted successfully
    pub converted_files: usize,

    /// Conversion jobs that failed
    pub failed_conversions: usize,

    /// Exported files skipped at conversion time (missing or not remappable)
    pub missing_files: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            total_texture_sets: 0,
            exported_texture_sets: 0,
            skipped_texture_sets: 0,
            cancelled_texture_sets: 0,
            exported_files: 0,
            converted_files: 0,
            failed_conversions: 0,
            missing_files: 0,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Fold a conversion report into the totals
    pub fn add_conversion(&mut self, report: &ConversionReport) {
        self.converted_files += report.succeeded.len();
        self.failed_conversions += report.failed.len();
        self.missing_files += report.skipped.len();

        if report.state == BatchState::PartialFailure {
            for failure in &report.failed {
                self.add_error(
                    ExportError::new(ExportErrorType::Conversion, failure.error.clone())
                        .with_context(format!("file={}", failure.job.source_path.display())),
                );
            }
        }

        for missing in &report.skipped {
            self.add_error(
                ExportError::new(
                    ExportErrorType::Conversion,
                    "Exported file was not converted".to_string(),
                )
                .with_context(format!("file={}", missing.display())),
            );
        }
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed_conversions == 0 && self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_export_complete!(self.exported_files, self.duration);
        tracing::info!(
            run_id = %self.run_id,
            texture_sets = self.total_texture_sets,
            exported = self.exported_texture_sets,
            skipped = self.skipped_texture_sets,
            cancelled = self.cancelled_texture_sets,
            converted_files = self.converted_files,
            failed_conversions = self.failed_conversions,
            missing_files = self.missing_files,
            "Export summary"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Files a texture set would produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexturePreview {
    pub texture_set: String,

    /// Output name pattern with `(Channel)` standing in for channel names
    pub name_preview: String,

    pub files: Vec<String>,
}

/// Type of export error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Host request failed or reported an error
    Host,
    /// Directory creation failed
    Filesystem,
    /// A converter job failed
    Conversion,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g. texture set, file)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
