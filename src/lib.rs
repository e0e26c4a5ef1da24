// texport - Texture export and conversion tool
// Copyright (c) 2025 Texport Contributors
// Licensed under the MIT License

//! # texport - texture export and conversion
//!
//! texport drives a texture-painting application through a small bridge
//! program: it builds export specs for the open project, asks the host to
//! write the channel textures, and converts the written files with an
//! external converter running in parallel.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Naming** outputs from the project file name and configurable templates
//! - **Resolving** host channels through a channel-name dictionary
//! - **Scoping** exports to channels and UDIM tiles with range expressions
//! - **Building** host export specs (presets, export lists, parameters)
//! - **Converting** exported files with a bounded pool of converter processes
//! - **Remembering** the options of the last export
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (naming, channels, scope, builder, conversion, export, state)
//! - [`adapters`] - Host bridge integration
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use texport::adapters::host::BridgeHost;
//! use texport::config::TexportConfig;
//! use texport::core::builder::ExportOptions;
//! use texport::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TexportConfig::from_file("texport.toml")?;
//!     let host = Arc::new(BridgeHost::from_config(&config.host));
//!     let coordinator = ExportCoordinator::new(config, host);
//!
//!     let summary = coordinator
//!         .execute_export(&[], &ExportOptions::default())
//!         .await?;
//!
//!     println!("Exported {} files", summary.exported_files);
//!     Ok(())
//! }
//! ```
//!
//! ## Scope Expressions
//!
//! A range expression restricts which channels and tiles are exported:
//!
//! ```rust
//! use texport::core::scope::ScopeExpressionParser;
//!
//! let parser = ScopeExpressionParser::new(["basecolor", "normal"]);
//! let scope = parser.parse("basecolor:1001-1003, *:1011", &["basecolor", "normal"]);
//!
//! assert_eq!(scope.get("basecolor").map(|tiles| tiles.len()), Some(3));
//! assert_eq!(scope.get("normal").map(|tiles| tiles.len()), Some(1));
//! ```
//!
//! ## Error Handling
//!
//! texport uses the [`domain::TexportError`] type for all errors:
//!
//! ```rust,no_run
//! use texport::domain::TexportError;
//!
//! fn example() -> Result<(), TexportError> {
//!     let config = texport::config::load_config("texport.toml")?;
//!     println!("{} channels", config.channels.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! texport uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(texture_set = "Body", "No exportable channels, skipping");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
