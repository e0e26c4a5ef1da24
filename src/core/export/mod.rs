//! Export orchestration
//!
//! This module provides the export workflow for texport:
//! - Export coordination across texture sets
//! - Summary and reporting

pub mod coordinator;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use summary::{ExportError, ExportErrorType, ExportSummary, TexturePreview};
