//! Domain identifier types with validation
//!
//! Newtype wrappers for texture set names and UDIM tiles. Each type ensures
//! type safety and validates its format on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First tile of the UDIM numbering scheme
pub const UDIM_FIRST: u16 = 1001;

/// Last tile expressible with four digits
pub const UDIM_LAST: u16 = 9999;

/// Returns true when `name` is a canonical four-digit tile number (`1001`, `1042`, ...)
///
/// The first digit must be non-zero; `0999` is not a tile.
pub fn is_udim_number(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() == 4 && bytes[0].is_ascii_digit() && bytes[0] != b'0' && bytes.iter().all(u8::is_ascii_digit)
}

/// Texture set name newtype wrapper
///
/// Legacy per-tile projects name their texture sets after the tile number
/// itself; [`TextureSetName::is_udim`] detects that case.
///
/// # Examples
///
/// ```
/// use texport::domain::ids::TextureSetName;
/// use std::str::FromStr;
///
/// let body = TextureSetName::from_str("Body").unwrap();
/// assert!(!body.is_udim());
///
/// let tile = TextureSetName::from_str("1001").unwrap();
/// assert!(tile.is_udim());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureSetName(String);

impl TextureSetName {
    /// Creates a new TextureSetName
    ///
    /// # Returns
    ///
    /// Returns `Ok(TextureSetName)` if the name is non-empty, `Err` otherwise
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Texture set name cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the texture set is named after a UDIM tile (legacy naming)
    pub fn is_udim(&self) -> bool {
        is_udim_number(&self.0)
    }
}

impl fmt::Display for TextureSetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TextureSetName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TextureSetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Grid coordinates of a UDIM tile, serialized as `[u, v]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord(pub u32, pub u32);

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

/// UDIM tile number newtype wrapper
///
/// Tiles are numbered from 1001, ten per row:
/// `u = (n - 1001) mod 10`, `v = (n - 1001) div 10`.
///
/// # Examples
///
/// ```
/// use texport::domain::ids::{UdimTile, TileCoord};
///
/// let tile = UdimTile::new(1012).unwrap();
/// assert_eq!(tile.coordinates(), TileCoord(1, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UdimTile(u16);

impl UdimTile {
    /// Creates a tile from its number
    ///
    /// # Returns
    ///
    /// Returns `Err` when the number is outside `1001..=9999`
    pub fn new(number: u16) -> Result<Self, String> {
        if !(UDIM_FIRST..=UDIM_LAST).contains(&number) {
            return Err(format!(
                "UDIM tile must be between {UDIM_FIRST} and {UDIM_LAST}, got {number}"
            ));
        }
        Ok(Self(number))
    }

    /// Returns the tile number
    pub fn number(&self) -> u16 {
        self.0
    }

    /// Normalizes the tile number to grid coordinates
    pub fn coordinates(&self) -> TileCoord {
        let offset = u32::from(self.0 - UDIM_FIRST);
        TileCoord(offset % 10, offset / 10)
    }
}

impl fmt::Display for UdimTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UdimTile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_udim_number(s) {
            return Err(format!("Invalid UDIM tile: '{s}'"));
        }
        let number: u16 = s
            .parse()
            .map_err(|e| format!("Invalid UDIM tile '{s}': {e}"))?;
        Self::new(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_set_name_valid() {
        let name = TextureSetName::new("Body").unwrap();
        assert_eq!(name.as_str(), "Body");
        assert_eq!(name.to_string(), "Body");
    }

    #[test]
    fn test_texture_set_name_empty() {
        assert!(TextureSetName::new("").is_err());
        assert!(TextureSetName::new("   ").is_err());
    }

    #[test]
    fn test_texture_set_name_udim_detection() {
        assert!(TextureSetName::new("1001").unwrap().is_udim());
        assert!(TextureSetName::new("9999").unwrap().is_udim());
        assert!(!TextureSetName::new("0999").unwrap().is_udim());
        assert!(!TextureSetName::new("10010").unwrap().is_udim());
        assert!(!TextureSetName::new("Head").unwrap().is_udim());
    }

    #[test]
    fn test_udim_tile_bounds() {
        assert!(UdimTile::new(1000).is_err());
        assert!(UdimTile::new(1001).is_ok());
        assert!(UdimTile::new(9999).is_ok());
        assert!(UdimTile::new(10000).is_err());
    }

    #[test]
    fn test_udim_tile_coordinates() {
        assert_eq!(UdimTile::new(1001).unwrap().coordinates(), TileCoord(0, 0));
        assert_eq!(UdimTile::new(1010).unwrap().coordinates(), TileCoord(9, 0));
        assert_eq!(UdimTile::new(1011).unwrap().coordinates(), TileCoord(0, 1));
        assert_eq!(UdimTile::new(1023).unwrap().coordinates(), TileCoord(2, 2));
    }

    #[test]
    fn test_udim_tile_from_str() {
        assert_eq!(UdimTile::from_str("1002").unwrap().number(), 1002);
        assert!(UdimTile::from_str("0002").is_err());
        assert!(UdimTile::from_str("100").is_err());
        assert!(UdimTile::from_str("1x02").is_err());
    }

    #[test]
    fn test_tile_coord_serializes_as_pair() {
        let json = serde_json::to_string(&TileCoord(3, 1)).unwrap();
        assert_eq!(json, "[3,1]");
    }
}
