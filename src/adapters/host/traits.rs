//! Host service trait
//!
//! Abstracts the texturing application so exports can run against the real
//! host (through [`super::BridgeHost`]) or a test double.

use super::models::{ExportResult, ProjectInfo, TextureListing, TextureSetInfo};
use crate::domain::channel::NativeChannel;
use crate::domain::ids::TextureSetName;
use crate::domain::spec::ExportSpec;
use crate::domain::Result;
use async_trait::async_trait;

/// Capabilities texport needs from the host application
///
/// # Example
///
/// ```no_run
/// use texport::adapters::host::{BridgeHost, HostService};
/// use texport::config::HostConfig;
///
/// # async fn example() -> texport::domain::Result<()> {
/// let host = BridgeHost::from_config(&HostConfig::default());
///
/// for texture_set in host.texture_sets().await? {
///     println!("{}", texture_set.name);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait HostService: Send + Sync {
    /// Currently opened project
    async fn project_info(&self) -> Result<ProjectInfo>;

    /// Texture sets of the open project, in host order
    async fn texture_sets(&self) -> Result<Vec<TextureSetInfo>>;

    /// Channels of one texture set
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::HostError::TextureSetNotFound`] for unknown
    /// texture sets
    async fn channels(&self, texture_set: &TextureSetName) -> Result<Vec<NativeChannel>>;

    /// Executes an export spec
    ///
    /// A non-success [`ExportResult::status`] is not an error; the caller
    /// decides what to do with it.
    async fn execute(&self, spec: &ExportSpec) -> Result<ExportResult>;

    /// Lists the files an export spec would produce, without writing them
    async fn dry_run(&self, spec: &ExportSpec) -> Result<TextureListing>;
}
