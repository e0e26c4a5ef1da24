//! Domain models and types for texport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`TextureSetName`], [`UdimTile`])
//! - **Channel models** ([`NativeChannel`], [`Channel`], [`ChannelFormat`])
//! - **Export option vocabularies** ([`OutputSize`], [`ExportFormat`], ...)
//! - **The host export request** ([`ExportSpec`] and its parts)
//! - **Error types** ([`TexportError`], [`HostError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Tile numbers are validated on construction, so a [`UdimTile`] always maps
//! to a grid coordinate:
//!
//! ```rust
//! use texport::domain::{TileCoord, UdimTile};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tile = UdimTile::new(1003)?;
//! assert_eq!(tile.coordinates(), TileCoord(2, 0));
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, TexportError>`]:
//!
//! ```rust
//! use texport::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = texport::config::TexportConfig::from_file("texport.toml")?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod context;
pub mod errors;
pub mod ids;
pub mod options;
pub mod result;
pub mod spec;

// Re-export commonly used types for convenience
pub use channel::{BitDepth, Channel, ChannelFormat, NativeChannel};
pub use errors::{HostError, TexportError};
pub use ids::{TextureSetName, TileCoord, UdimTile};
pub use options::{
    Dithering, ExportFormat, NormalMapFormat, OutputSize, PaddingAlgorithm, ShaderParams,
};
pub use result::Result;
pub use spec::{
    ChannelMapEntry, ExportFilter, ExportListEntry, ExportParameters, ExportParametersEntry,
    ExportPreset, ExportSpec, MapParameters, SrcMapType, SubChannel,
};
