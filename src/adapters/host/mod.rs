//! Texturing-application host integration
//!
//! [`HostService`] is the seam between texport and the host. [`BridgeHost`]
//! implements it by talking JSON to a bridge executable running next to the
//! host; tests substitute their own implementations.

pub mod bridge;
pub mod models;
mod traits;

pub use bridge::BridgeHost;
pub use models::{
    ExportResult, ExportStatus, ExportedTextures, ProjectInfo, TextureListing, TextureSetInfo,
};
pub use traits::HostService;
