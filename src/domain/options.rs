//! Export option vocabularies
//!
//! Each option accepts a fixed set of legal values. An illegal value read from
//! configuration falls back to the last listed legal value with a warning, so
//! the rest of the crate only ever sees valid options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output texture size in pixels
///
/// Legal values, in listing order: 512, 1024, 2048, 8192, 4096.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum OutputSize {
    S512,
    S1024,
    S2048,
    S8192,
    #[default]
    S4096,
}

impl OutputSize {
    pub const LEGAL: [OutputSize; 5] = [
        OutputSize::S512,
        OutputSize::S1024,
        OutputSize::S2048,
        OutputSize::S8192,
        OutputSize::S4096,
    ];

    pub fn pixels(&self) -> u32 {
        match self {
            OutputSize::S512 => 512,
            OutputSize::S1024 => 1024,
            OutputSize::S2048 => 2048,
            OutputSize::S8192 => 8192,
            OutputSize::S4096 => 4096,
        }
    }

    /// Host size exponent, `None` for sizes without a fixed mapping (8192)
    pub fn size_log2(&self) -> Option<u8> {
        match self {
            OutputSize::S512 => Some(9),
            OutputSize::S1024 => Some(10),
            OutputSize::S2048 => Some(11),
            OutputSize::S4096 => Some(12),
            OutputSize::S8192 => None,
        }
    }
}

impl From<i64> for OutputSize {
    fn from(value: i64) -> Self {
        match Self::LEGAL.iter().find(|size| i64::from(size.pixels()) == value) {
            Some(size) => *size,
            None => {
                tracing::warn!(
                    value,
                    fallback = 4096,
                    "Illegal output size, falling back to last legal value"
                );
                OutputSize::S4096
            }
        }
    }
}

impl From<OutputSize> for i64 {
    fn from(value: OutputSize) -> Self {
        i64::from(value.pixels())
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

/// Image format written by the host exporter
///
/// Legal values: png, tga, jpg, tif.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExportFormat {
    Png,
    Tga,
    Jpg,
    #[default]
    Tif,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Tga => "tga",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Tif => "tif",
        }
    }
}

impl From<String> for ExportFormat {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "png" => ExportFormat::Png,
            "tga" => ExportFormat::Tga,
            "jpg" => ExportFormat::Jpg,
            "tif" => ExportFormat::Tif,
            _ => {
                tracing::warn!(
                    value = %value,
                    fallback = "tif",
                    "Illegal export format, falling back to last legal value"
                );
                ExportFormat::Tif
            }
        }
    }
}

impl From<ExportFormat> for String {
    fn from(value: ExportFormat) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tangent-space normal encoding
///
/// Legal values: directx, open_gl. Configuration loading falls back to
/// `open_gl`; `Unrecognized` only exists for encodings built in code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NormalMapFormat {
    DirectX,
    #[default]
    OpenGl,
    /// Encoding the host has no virtual map for
    Unrecognized(String),
}

impl NormalMapFormat {
    pub fn as_str(&self) -> &str {
        match self {
            NormalMapFormat::DirectX => "directx",
            NormalMapFormat::OpenGl => "open_gl",
            NormalMapFormat::Unrecognized(name) => name,
        }
    }

    /// Name of the host virtual map producing this encoding
    pub fn virtual_map_name(&self) -> Option<&'static str> {
        match self {
            NormalMapFormat::DirectX => Some("Normal_DirectX"),
            NormalMapFormat::OpenGl => Some("Normal_OpenGL"),
            NormalMapFormat::Unrecognized(_) => None,
        }
    }
}

impl From<String> for NormalMapFormat {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "directx" => NormalMapFormat::DirectX,
            "open_gl" => NormalMapFormat::OpenGl,
            _ => {
                tracing::warn!(
                    value = %value,
                    fallback = "open_gl",
                    "Illegal normal map format, falling back to last legal value"
                );
                NormalMapFormat::OpenGl
            }
        }
    }
}

impl From<NormalMapFormat> for String {
    fn from(value: NormalMapFormat) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for NormalMapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Padding algorithm applied outside UV islands
///
/// Legal values: passthrough, color, transparent, diffusion, infinite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaddingAlgorithm {
    Passthrough,
    Color,
    Transparent,
    Diffusion,
    #[default]
    Infinite,
}

impl PaddingAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddingAlgorithm::Passthrough => "passthrough",
            PaddingAlgorithm::Color => "color",
            PaddingAlgorithm::Transparent => "transparent",
            PaddingAlgorithm::Diffusion => "diffusion",
            PaddingAlgorithm::Infinite => "infinite",
        }
    }
}

impl From<String> for PaddingAlgorithm {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "passthrough" => PaddingAlgorithm::Passthrough,
            "color" => PaddingAlgorithm::Color,
            "transparent" => PaddingAlgorithm::Transparent,
            "diffusion" => PaddingAlgorithm::Diffusion,
            "infinite" => PaddingAlgorithm::Infinite,
            _ => {
                tracing::warn!(
                    value = %value,
                    fallback = "infinite",
                    "Illegal padding algorithm, falling back to last legal value"
                );
                PaddingAlgorithm::Infinite
            }
        }
    }
}

impl From<PaddingAlgorithm> for String {
    fn from(value: PaddingAlgorithm) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PaddingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On/off switch stored as `1` / `0`
///
/// `shader_params` lists `[1, 0]` (fallback off) and `dithering` lists
/// `[0, 1]` (fallback on), so each has its own wrapper.
macro_rules! switch_option {
    ($(#[$meta:meta])* $name:ident, $fallback:expr, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "i64", into = "i64")]
        pub struct $name(pub bool);

        impl $name {
            pub fn is_enabled(&self) -> bool {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name($fallback)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                match value {
                    0 => $name(false),
                    1 => $name(true),
                    _ => {
                        tracing::warn!(
                            option = $label,
                            value,
                            fallback = i64::from($fallback),
                            "Illegal switch value, falling back to last legal value"
                        );
                        $name($fallback)
                    }
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                i64::from(value.0)
            }
        }
    };
}

switch_option!(
    /// Whether the host exports shader parameters alongside textures
    ShaderParams,
    false,
    "shader_params"
);

switch_option!(
    /// Whether the host dithers when reducing bit depth
    Dithering,
    true,
    "dithering"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        size: OutputSize,
        format: ExportFormat,
        normal: NormalMapFormat,
        padding: PaddingAlgorithm,
        shader: ShaderParams,
        dithering: Dithering,
    }

    #[test]
    fn test_legal_values_are_kept() {
        let probe: Probe = toml::from_str(
            r#"
            size = 2048
            format = "png"
            normal = "directx"
            padding = "diffusion"
            shader = 1
            dithering = 0
            "#,
        )
        .unwrap();

        assert_eq!(probe.size, OutputSize::S2048);
        assert_eq!(probe.format, ExportFormat::Png);
        assert_eq!(probe.normal, NormalMapFormat::DirectX);
        assert_eq!(probe.padding, PaddingAlgorithm::Diffusion);
        assert!(probe.shader.is_enabled());
        assert!(!probe.dithering.is_enabled());
    }

    #[test]
    fn test_illegal_values_fall_back_to_last_listed() {
        let probe: Probe = toml::from_str(
            r#"
            size = 300
            format = "exr"
            normal = "metal"
            padding = "smear"
            shader = 7
            dithering = 9
            "#,
        )
        .unwrap();

        assert_eq!(probe.size, OutputSize::S4096);
        assert_eq!(probe.format, ExportFormat::Tif);
        assert_eq!(probe.normal, NormalMapFormat::OpenGl);
        assert_eq!(probe.padding, PaddingAlgorithm::Infinite);
        assert!(!probe.shader.is_enabled());
        assert!(probe.dithering.is_enabled());
    }

    #[test]
    fn test_size_log2_mapping() {
        assert_eq!(OutputSize::S512.size_log2(), Some(9));
        assert_eq!(OutputSize::S1024.size_log2(), Some(10));
        assert_eq!(OutputSize::S2048.size_log2(), Some(11));
        assert_eq!(OutputSize::S4096.size_log2(), Some(12));
        assert_eq!(OutputSize::S8192.size_log2(), None);
    }

    #[test]
    fn test_normal_virtual_map_names() {
        assert_eq!(NormalMapFormat::OpenGl.virtual_map_name(), Some("Normal_OpenGL"));
        assert_eq!(NormalMapFormat::DirectX.virtual_map_name(), Some("Normal_DirectX"));
        assert_eq!(
            NormalMapFormat::Unrecognized("metal".to_string()).virtual_map_name(),
            None
        );
    }
}
