//! External system integrations for texport.
//!
//! - [`host`] - Texturing application (project, texture sets, channels, export)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. The host is reached through the
//! [`host::HostService`] trait; the CLI wires in [`host::BridgeHost`].
//!
//! ```rust,no_run
//! use texport::adapters::host::{BridgeHost, HostService};
//! use texport::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("texport.toml")?;
//! let host = BridgeHost::from_config(&config.host);
//!
//! let project = host.project_info().await?;
//! println!("Open project: {:?}", project.file_path);
//! # Ok(())
//! # }
//! ```

pub mod host;
