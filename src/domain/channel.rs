//! Channel models reported by the host application
//!
//! A texture set is made of paintable channels (base color, normal, roughness,
//! user slots...). The host describes each channel by its type, an optional
//! user label and its pixel format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Native pixel format of a channel
///
/// Serialized using the host's format names (`sRGB8`, `L16F`, ...). Formats
/// the classification doesn't know are kept as [`ChannelFormat::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelFormat {
    /// 8-bit gamma-encoded color
    Srgb8,
    /// 8-bit luminance
    L8,
    /// 8-bit linear color
    Rgb8,
    /// 16-bit luminance
    L16,
    /// 16-bit color
    Rgb16,
    /// 16-bit float luminance
    L16F,
    /// 16-bit float color
    Rgb16F,
    /// 32-bit float luminance
    L32F,
    /// 32-bit float color
    Rgb32F,
    /// Any format outside the classification lists
    Other(String),
}

impl ChannelFormat {
    /// Host name of the format
    pub fn as_str(&self) -> &str {
        match self {
            ChannelFormat::Srgb8 => "sRGB8",
            ChannelFormat::L8 => "L8",
            ChannelFormat::Rgb8 => "RGB8",
            ChannelFormat::L16 => "L16",
            ChannelFormat::Rgb16 => "RGB16",
            ChannelFormat::L16F => "L16F",
            ChannelFormat::Rgb16F => "RGB16F",
            ChannelFormat::L32F => "L32F",
            ChannelFormat::Rgb32F => "RGB32F",
            ChannelFormat::Other(name) => name,
        }
    }

    /// True for single-component (luminance only) formats
    pub fn is_luminance(&self) -> bool {
        matches!(
            self,
            ChannelFormat::L8 | ChannelFormat::L16 | ChannelFormat::L16F | ChannelFormat::L32F
        )
    }

    /// Bit depth class of the format, `None` when the host default applies
    pub fn bit_depth(&self) -> Option<BitDepth> {
        match self {
            ChannelFormat::Srgb8 | ChannelFormat::L8 | ChannelFormat::Rgb8 => Some(BitDepth::Eight),
            ChannelFormat::L16
            | ChannelFormat::Rgb16
            | ChannelFormat::L16F
            | ChannelFormat::Rgb16F => Some(BitDepth::Sixteen),
            ChannelFormat::L32F | ChannelFormat::Rgb32F => Some(BitDepth::ThirtyTwo),
            ChannelFormat::Other(_) => None,
        }
    }

    /// Gamma-encoded channels are converted to linear after export
    pub fn needs_color_correct(&self) -> bool {
        matches!(self, ChannelFormat::Srgb8)
    }
}

impl FromStr for ChannelFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Hosts sometimes prefix the enum type name ("ChannelFormat.L8")
        let name = s.rsplit('.').next().unwrap_or(s);
        Ok(match name {
            "sRGB8" => ChannelFormat::Srgb8,
            "L8" => ChannelFormat::L8,
            "RGB8" => ChannelFormat::Rgb8,
            "L16" => ChannelFormat::L16,
            "RGB16" => ChannelFormat::Rgb16,
            "L16F" => ChannelFormat::L16F,
            "RGB16F" => ChannelFormat::Rgb16F,
            "L32F" => ChannelFormat::L32F,
            "RGB32F" => ChannelFormat::Rgb32F,
            other => ChannelFormat::Other(other.to_string()),
        })
    }
}

impl From<String> for ChannelFormat {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(format) => format,
            Err(never) => match never {},
        }
    }
}

impl From<ChannelFormat> for String {
    fn from(value: ChannelFormat) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ChannelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bit depth requested from the host exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitDepth {
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "16")]
    Sixteen,
    #[serde(rename = "32")]
    ThirtyTwo,
}

impl BitDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            BitDepth::Eight => "8",
            BitDepth::Sixteen => "16",
            BitDepth::ThirtyTwo => "32",
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A channel as reported by the host for one texture set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeChannel {
    /// Host channel type (`BaseColor`, `Normal`, `User0`, ...)
    pub channel_type: String,

    /// User label, only meaningful for user slots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Native pixel format
    pub format: ChannelFormat,
}

impl NativeChannel {
    pub fn new(channel_type: impl Into<String>, format: ChannelFormat) -> Self {
        Self {
            channel_type: channel_type.into(),
            label: None,
            format,
        }
    }

    /// Set the user label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// True for the host's user-defined slots (`User0` .. `User7`)
    pub fn is_user_channel(&self) -> bool {
        self.channel_type.to_lowercase().starts_with("user")
    }

    /// Lookup key: lower-cased type, or `user<N>#<label>` for labelled user slots
    pub fn lookup_key(&self) -> String {
        let base = self.channel_type.to_lowercase();
        match &self.label {
            Some(label) if self.is_user_channel() && !label.is_empty() => {
                format!("{base}#{label}")
            }
            _ => base,
        }
    }
}

/// A channel after its dictionary key and canonical export name are known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Dictionary key the channel resolved under
    pub canonical_key: String,

    /// Canonical export name (`Color`, `Normal`, ...)
    pub label: String,

    /// Native pixel format
    pub native_format: ChannelFormat,

    /// Whether the channel lives in a user slot
    pub is_user_channel: bool,
}
