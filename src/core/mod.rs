//! Core business logic for texport.
//!
//! # Modules
//!
//! - [`naming`] - Project title, output file names and directory layout
//! - [`channels`] - Channel resolution against the channel-name dictionary
//! - [`scope`] - UDIM scope expressions
//! - [`builder`] - Export spec assembly
//! - [`conversion`] - Parallel conversion of exported files
//! - [`export`] - Export orchestration and reporting
//! - [`state`] - Remembered export options
//!
//! # Export Workflow
//!
//! 1. **Check Project**: The open project's file name yields the title
//! 2. **Resolve Channels**: Host channels are mapped through the dictionary
//! 3. **Parse Scope**: The range expression restricts channels and tiles
//! 4. **Build Spec**: Presets, export list and parameters per texture set
//! 5. **Export**: The host writes the files
//! 6. **Convert** (optional): Files are converted by a pool of converter processes
//! 7. **Report**: Generate export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use texport::adapters::host::BridgeHost;
//! use texport::config::load_config;
//! use texport::core::builder::ExportOptions;
//! use texport::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("texport.toml")?;
//! let host = Arc::new(BridgeHost::from_config(&config.host));
//! let coordinator = ExportCoordinator::new(config, host);
//!
//! let options = ExportOptions {
//!     convert_after: true,
//!     ..ExportOptions::default()
//! };
//! let summary = coordinator.execute_export(&[], &options).await?;
//!
//! println!("Exported files: {}", summary.exported_files);
//! println!("Converted: {}", summary.converted_files);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod channels;
pub mod conversion;
pub mod export;
pub mod naming;
pub mod scope;
pub mod state;
