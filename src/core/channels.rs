//! Channel resolution
//!
//! Maps the native channels of a texture set onto the channel-name dictionary
//! and produces one [`ChannelMapEntry`] per exported file.

use crate::config::TexportConfig;
use crate::domain::channel::{BitDepth, Channel, NativeChannel};
use crate::domain::options::NormalMapFormat;
use crate::domain::spec::{ChannelMapEntry, MapParameters, SrcMapType, SubChannel};
use std::collections::{BTreeMap, HashSet};

const RGB: [&str; 3] = ["R", "G", "B"];
const LUMINANCE: [&str; 1] = ["L"];

/// Dictionary key of the normal channel
pub const NORMAL_KEY: &str = "normal";

/// Result of resolving one texture set's channels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedChannels {
    /// Output files, in the order the host reported the channels
    pub entries: Vec<ChannelMapEntry>,

    /// Resolved channels, parallel to `entries`
    pub channels: Vec<Channel>,

    /// Canonical names whose files need color correction after export
    pub color_correct_channels: Vec<String>,
}

impl ResolvedChannels {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dictionary keys that resolved for this texture set
    pub fn known_keys(&self) -> Vec<String> {
        self.channels
            .iter()
            .map(|channel| channel.canonical_key.clone())
            .collect()
    }
}

/// Resolves native channels against the channel-name dictionary
#[derive(Debug, Clone)]
pub struct ChannelResolver {
    dictionary: BTreeMap<String, String>,
    normal_map: NormalMapFormat,
}

impl ChannelResolver {
    pub fn new(dictionary: BTreeMap<String, String>, normal_map: NormalMapFormat) -> Self {
        Self {
            dictionary,
            normal_map,
        }
    }

    pub fn from_config(config: &TexportConfig) -> Self {
        Self::new(config.channels.clone(), config.export.normal_map.clone())
    }

    pub fn dictionary(&self) -> &BTreeMap<String, String> {
        &self.dictionary
    }

    /// Finds the dictionary entry for a lookup key
    ///
    /// For `slot#label` keys the label is tried first, then the slot id.
    /// Returns the matching dictionary key and canonical name.
    pub fn lookup(&self, lookup_key: &str) -> Option<(&str, &str)> {
        let (base, label) = match lookup_key.split_once('#') {
            Some((base, label)) => (base, Some(label)),
            None => (lookup_key, None),
        };

        let by_label = label
            .map(str::to_lowercase)
            .and_then(|label| self.dictionary.get_key_value(label.as_str()));

        by_label
            .or_else(|| self.dictionary.get_key_value(base.to_lowercase().as_str()))
            .map(|(key, name)| (key.as_str(), name.as_str()))
    }

    /// Resolves the channels of one texture set
    ///
    /// `file_name` maps a canonical name to its output file name. Unknown
    /// channels and duplicate canonical names are skipped with a warning.
    pub fn resolve<F>(
        &self,
        native_channels: &[NativeChannel],
        force_eight_bit: bool,
        file_name: F,
    ) -> ResolvedChannels
    where
        F: Fn(&str) -> String,
    {
        let mut resolved = ResolvedChannels::default();
        let mut emitted: HashSet<String> = HashSet::new();

        for native in native_channels {
            let lookup_key = native.lookup_key();
            let Some((dictionary_key, canonical_name)) = self.lookup(&lookup_key) else {
                tracing::warn!(channel = %lookup_key, "Channel not in channel dictionary, skipping");
                continue;
            };

            if !emitted.insert(canonical_name.to_string()) {
                tracing::warn!(
                    channel = %lookup_key,
                    name = %canonical_name,
                    "Duplicated channel name, skipping"
                );
                continue;
            }

            let slot_id = lookup_key
                .split_once('#')
                .map_or(lookup_key.as_str(), |(base, _)| base);
            let (src_map_type, src_map_name) = self.source_map(native, slot_id);

            let components: &[&str] = if native.format.is_luminance() {
                &LUMINANCE
            } else {
                &RGB
            };
            let sub_channels = components
                .iter()
                .map(|component| {
                    SubChannel::new(*component, *component, src_map_type, src_map_name.clone())
                })
                .collect();

            let bit_depth = if force_eight_bit {
                Some(BitDepth::Eight)
            } else {
                native.format.bit_depth()
            };

            if native.format.needs_color_correct() {
                resolved.color_correct_channels.push(canonical_name.to_string());
            }

            tracing::debug!(
                channel = %lookup_key,
                name = %canonical_name,
                format = %native.format,
                "Resolved channel"
            );

            resolved.entries.push(ChannelMapEntry {
                output_file_name: file_name(canonical_name),
                sub_channels,
                parameters: MapParameters {
                    file_format: None,
                    bit_depth,
                },
            });
            resolved.channels.push(Channel {
                canonical_key: dictionary_key.to_string(),
                label: canonical_name.to_string(),
                native_format: native.format.clone(),
                is_user_channel: native.is_user_channel(),
            });
        }

        resolved
    }

    fn source_map(&self, native: &NativeChannel, slot_id: &str) -> (SrcMapType, String) {
        if native.is_user_channel() {
            return (SrcMapType::DocumentMap, slot_id.to_string());
        }
        if slot_id == NORMAL_KEY {
            return match self.normal_map.virtual_map_name() {
                Some(name) => (SrcMapType::VirtualMap, name.to_string()),
                None => (SrcMapType::DocumentMap, NORMAL_KEY.to_string()),
            };
        }
        (SrcMapType::DocumentMap, slot_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::channel::ChannelFormat;

    fn resolver(normal_map: NormalMapFormat) -> ChannelResolver {
        let dictionary = [
            ("basecolor", "Color"),
            ("diffuse", "Color"),
            ("roughness", "Rough"),
            ("normal", "Normal"),
            ("height", "Height"),
            ("mask01", "Mask"),
            ("user1", "Extra"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        ChannelResolver::new(dictionary, normal_map)
    }

    fn name_of(canonical: &str) -> String {
        format!("Hero_{canonical}")
    }

    #[test]
    fn test_rgb_and_luminance_components() {
        let channels = vec![
            NativeChannel::new("BaseColor", ChannelFormat::Srgb8),
            NativeChannel::new("Roughness", ChannelFormat::L16),
        ];
        let resolved = resolver(NormalMapFormat::OpenGl).resolve(&channels, false, name_of);

        assert_eq!(resolved.entries.len(), 2);
        let color = &resolved.entries[0];
        assert_eq!(color.output_file_name, "Hero_Color");
        let dests: Vec<&str> = color.sub_channels.iter().map(|s| s.dest.as_str()).collect();
        assert_eq!(dests, vec!["R", "G", "B"]);
        assert_eq!(color.sub_channels[0].src_map_name, "basecolor");
        assert_eq!(color.sub_channels[0].src_map_type, SrcMapType::DocumentMap);

        let rough = &resolved.entries[1];
        assert_eq!(rough.sub_channels.len(), 1);
        assert_eq!(rough.sub_channels[0].dest, "L");
        assert_eq!(rough.parameters.bit_depth, Some(BitDepth::Sixteen));
    }

    #[test]
    fn test_unknown_and_duplicate_channels_are_skipped() {
        let channels = vec![
            NativeChannel::new("BaseColor", ChannelFormat::Srgb8),
            NativeChannel::new("Specular", ChannelFormat::Rgb8),
            NativeChannel::new("Diffuse", ChannelFormat::Rgb8),
        ];
        let resolved = resolver(NormalMapFormat::OpenGl).resolve(&channels, false, name_of);

        assert_eq!(resolved.entries.len(), 1);
        assert_eq!(resolved.channels[0].canonical_key, "basecolor");
    }

    #[test]
    fn test_normal_uses_virtual_map() {
        let channels = vec![NativeChannel::new("Normal", ChannelFormat::Rgb16F)];

        let opengl = resolver(NormalMapFormat::OpenGl).resolve(&channels, false, name_of);
        assert_eq!(opengl.entries[0].sub_channels[0].src_map_type, SrcMapType::VirtualMap);
        assert_eq!(opengl.entries[0].sub_channels[0].src_map_name, "Normal_OpenGL");

        let directx = resolver(NormalMapFormat::DirectX).resolve(&channels, false, name_of);
        assert_eq!(directx.entries[0].sub_channels[0].src_map_name, "Normal_DirectX");

        let other = resolver(NormalMapFormat::Unrecognized("metal".to_string()))
            .resolve(&channels, false, name_of);
        assert_eq!(other.entries[0].sub_channels[0].src_map_type, SrcMapType::DocumentMap);
        assert_eq!(other.entries[0].sub_channels[0].src_map_name, "normal");
    }

    #[test]
    fn test_user_channel_label_then_slot_fallback() {
        let channels = vec![
            NativeChannel::new("User0", ChannelFormat::L8).with_label("Mask01"),
            NativeChannel::new("User1", ChannelFormat::L8).with_label("unlisted"),
        ];
        let resolved = resolver(NormalMapFormat::OpenGl).resolve(&channels, false, name_of);

        assert_eq!(resolved.entries.len(), 2);
        assert_eq!(resolved.entries[0].output_file_name, "Hero_Mask");
        assert_eq!(resolved.entries[0].sub_channels[0].src_map_name, "user0");
        assert!(resolved.channels[0].is_user_channel);

        assert_eq!(resolved.entries[1].output_file_name, "Hero_Extra");
        assert_eq!(resolved.entries[1].sub_channels[0].src_map_name, "user1");
        assert_eq!(resolved.channels[1].canonical_key, "user1");
    }

    #[test]
    fn test_force_eight_bit() {
        let channels = vec![
            NativeChannel::new("Height", ChannelFormat::L32F),
            NativeChannel::new("Normal", ChannelFormat::Rgb16F),
            NativeChannel::new("BaseColor", ChannelFormat::Other("RGBA4".to_string())),
        ];
        let resolved = resolver(NormalMapFormat::OpenGl).resolve(&channels, true, name_of);

        assert!(resolved
            .entries
            .iter()
            .all(|entry| entry.parameters.bit_depth == Some(BitDepth::Eight)));
    }

    #[test]
    fn test_unclassified_format_leaves_bit_depth_unset() {
        let channels = vec![NativeChannel::new(
            "BaseColor",
            ChannelFormat::Other("RGBA4".to_string()),
        )];
        let resolved = resolver(NormalMapFormat::OpenGl).resolve(&channels, false, name_of);
        assert_eq!(resolved.entries[0].parameters.bit_depth, None);
    }

    #[test]
    fn test_color_correct_channels_are_returned() {
        let channels = vec![
            NativeChannel::new("BaseColor", ChannelFormat::Srgb8),
            NativeChannel::new("Roughness", ChannelFormat::L8),
        ];
        let resolved = resolver(NormalMapFormat::OpenGl).resolve(&channels, false, name_of);
        assert_eq!(resolved.color_correct_channels, vec!["Color".to_string()]);
    }

    #[test]
    fn test_lookup() {
        let resolver = resolver(NormalMapFormat::OpenGl);
        assert_eq!(resolver.lookup("basecolor"), Some(("basecolor", "Color")));
        assert_eq!(resolver.lookup("user0#MASK01"), Some(("mask01", "Mask")));
        assert_eq!(resolver.lookup("user1#nothing"), Some(("user1", "Extra")));
        assert_eq!(resolver.lookup("user5#nothing"), None);
    }
}
