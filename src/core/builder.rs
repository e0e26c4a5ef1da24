//! Export specification assembly
//!
//! Turns the resolved channels of one texture set, the user's scope
//! expression and the export settings into the [`ExportSpec`] the host
//! executes (or lists in a dry run).

use crate::config::{ExportConfig, TexportConfig};
use crate::core::channels::{ChannelResolver, ResolvedChannels};
use crate::core::naming::{NamingPolicy, ProjectDirectories};
use crate::core::scope::{ScopeExpressionParser, ScopeMap};
use crate::domain::channel::{BitDepth, NativeChannel};
use crate::domain::ids::TextureSetName;
use crate::domain::spec::{
    ChannelMapEntry, ExportFilter, ExportListEntry, ExportParameters, ExportParametersEntry,
    ExportPreset, ExportSpec, MapParameters, SrcMapType, SubChannel,
};
use crate::domain::{Result, TexportError};
use std::path::Path;

/// Mesh maps exported one file each, in export order
pub const MESH_MAPS: [&str; 7] = [
    "ambient_occlusion",
    "id",
    "curvature",
    "normal_base",
    "world_space_normals",
    "position",
    "thickness",
];

/// File name of the packed mesh map
pub const COMBINED_MAP: &str = "CombinedMap";

/// Packed mesh map layout: destination component → source mesh map
const COMBINED_LAYOUT: [(&str, &str); 3] = [
    ("R", "ambient_occlusion"),
    ("G", "curvature"),
    ("B", "thickness"),
];

const RGB: [&str; 3] = ["R", "G", "B"];

/// Options chosen by the user for one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Export every channel at 8 bits
    pub force_eight_bit: bool,

    /// Convert the exported files afterwards
    pub convert_after: bool,

    /// Color-correct sRGB channels during conversion
    pub color_correct: bool,

    /// Channel/tile restriction, see [`crate::core::scope`]
    pub scope_expression: Option<String>,
}

/// How mesh maps are laid out on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshMapMode {
    /// One file per mesh map
    Separate,
    /// Ambient occlusion, curvature and thickness packed into one file
    Combined,
}

impl MeshMapMode {
    pub fn from_combined(combined: bool) -> Self {
        if combined {
            MeshMapMode::Combined
        } else {
            MeshMapMode::Separate
        }
    }
}

/// Export request for one texture set, plus what conversion needs from it
#[derive(Debug, Clone)]
pub struct PreparedExport {
    pub texture_set: TextureSetName,
    pub spec: ExportSpec,
    pub channels: ResolvedChannels,
    pub scope: ScopeMap,

    /// Canonical names to color-correct; empty unless the user asked for it
    pub color_correct_channels: Vec<String>,
}

impl PreparedExport {
    /// True when no channel of the texture set resolved
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Builds export specifications for one open project
#[derive(Debug, Clone)]
pub struct ExportSpecBuilder {
    title: String,
    directories: ProjectDirectories,
    naming: NamingPolicy,
    resolver: ChannelResolver,
    parser: ScopeExpressionParser,
    export: ExportConfig,
}

impl ExportSpecBuilder {
    /// Creates a builder for the project `title` laid out in `directories`
    pub fn new(
        config: &TexportConfig,
        title: impl Into<String>,
        directories: ProjectDirectories,
    ) -> Result<Self> {
        let resolver = ChannelResolver::from_config(config);
        let parser = ScopeExpressionParser::new(resolver.dictionary().keys());

        Ok(Self {
            title: title.into(),
            directories,
            naming: NamingPolicy::from_config(config)?,
            resolver,
            parser,
            export: config.export.clone(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn directories(&self) -> &ProjectDirectories {
        &self.directories
    }

    pub fn naming(&self) -> &NamingPolicy {
        &self.naming
    }

    /// Resolves channels for a texture set
    pub fn resolve_channels(
        &self,
        texture_set: &TextureSetName,
        native_channels: &[NativeChannel],
        force_eight_bit: bool,
    ) -> ResolvedChannels {
        self.resolver
            .resolve(native_channels, force_eight_bit, |canonical_name| {
                self.naming
                    .export_file_name(&self.title, texture_set, canonical_name)
            })
    }

    /// Prepares the channel export of one texture set
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the output size has no size
    /// exponent and no default is configured
    pub fn prepare(
        &self,
        texture_set: &TextureSetName,
        native_channels: &[NativeChannel],
        options: &ExportOptions,
    ) -> Result<PreparedExport> {
        let channels =
            self.resolve_channels(texture_set, native_channels, options.force_eight_bit);
        let scope = self.parser.parse(
            options.scope_expression.as_deref().unwrap_or_default(),
            &channels.known_keys(),
        );
        let spec = self.build_spec(texture_set, &channels, &scope)?;

        let color_correct_channels = if options.color_correct {
            channels.color_correct_channels.clone()
        } else {
            Vec::new()
        };

        Ok(PreparedExport {
            texture_set: texture_set.clone(),
            spec,
            channels,
            scope,
            color_correct_channels,
        })
    }

    /// Assembles the channel export spec of a texture set
    pub fn build_spec(
        &self,
        texture_set: &TextureSetName,
        channels: &ResolvedChannels,
        scope: &ScopeMap,
    ) -> Result<ExportSpec> {
        Ok(ExportSpec {
            export_path: self.directories.export.clone(),
            shader_params_flag: self.export.shader_params.is_enabled(),
            default_preset_name: self.export.preset.clone(),
            presets: vec![ExportPreset {
                name: self.export.preset.clone(),
                maps: channels.entries.clone(),
            }],
            export_list: self.export_list(texture_set, scope),
            export_parameters: self.export_parameters()?,
        })
    }

    /// Export list for a texture set under a scope
    ///
    /// An empty scope exports the whole texture set. Otherwise each scoped
    /// channel gets its own filtered entry, in dictionary key order.
    pub fn export_list(&self, texture_set: &TextureSetName, scope: &ScopeMap) -> Vec<ExportListEntry> {
        if scope.is_empty() {
            return vec![ExportListEntry::whole(texture_set.as_str())];
        }

        self.resolver
            .dictionary()
            .iter()
            .filter_map(|(key, canonical_name)| {
                let tiles = scope.get(key)?;
                let uv_tiles = if tiles.is_empty() {
                    scope.wildcard().filter(|w| !w.is_empty()).map(<[_]>::to_vec)
                } else {
                    Some(tiles.to_vec())
                };

                Some(ExportListEntry {
                    root_path: texture_set.as_str().to_string(),
                    filter: Some(ExportFilter {
                        output_maps: vec![self.naming.export_file_name(
                            &self.title,
                            texture_set,
                            canonical_name,
                        )],
                        uv_tiles,
                    }),
                })
            })
            .collect()
    }

    /// Assembles the mesh-map export spec of a texture set
    pub fn build_meshmap_spec(
        &self,
        texture_set: &TextureSetName,
        mode: MeshMapMode,
    ) -> Result<ExportSpec> {
        let parameters = MapParameters {
            file_format: Some(self.export.format),
            bit_depth: Some(BitDepth::Eight),
        };
        let file_name =
            |map: &str| self.naming.meshmap_file_name(&self.title, texture_set, map);

        let maps = match mode {
            MeshMapMode::Combined => vec![ChannelMapEntry {
                output_file_name: file_name(COMBINED_MAP),
                sub_channels: COMBINED_LAYOUT
                    .iter()
                    .map(|(dest, map)| SubChannel::new(*dest, "L", SrcMapType::MeshMap, *map))
                    .collect(),
                parameters,
            }],
            MeshMapMode::Separate => MESH_MAPS
                .iter()
                .map(|map| ChannelMapEntry {
                    output_file_name: file_name(map),
                    sub_channels: RGB
                        .iter()
                        .map(|dest| SubChannel::new(*dest, *dest, SrcMapType::MeshMap, *map))
                        .collect(),
                    parameters: parameters.clone(),
                })
                .collect(),
        };

        let preset = self.meshmap_preset_name();
        Ok(ExportSpec {
            export_path: self.directories.meshmap.clone(),
            shader_params_flag: self.export.shader_params.is_enabled(),
            default_preset_name: preset.clone(),
            presets: vec![ExportPreset { name: preset, maps }],
            export_list: vec![ExportListEntry::whole(texture_set.as_str())],
            export_parameters: self.export_parameters()?,
        })
    }

    fn meshmap_preset_name(&self) -> String {
        format!("{}_meshmaps", self.export.preset)
    }

    /// Size exponent sent to the host
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the output size has no fixed
    /// exponent and `export.default_size_log2` is not set
    pub fn size_log2(&self) -> Result<u8> {
        self.export
            .output_size
            .size_log2()
            .or(self.export.default_size_log2)
            .ok_or_else(|| {
                TexportError::Configuration(format!(
                    "Output size {} has no size exponent; set export.default_size_log2",
                    self.export.output_size
                ))
            })
    }

    /// Global export parameters
    pub fn export_parameters(&self) -> Result<Vec<ExportParametersEntry>> {
        Ok(vec![ExportParametersEntry {
            parameters: ExportParameters::new(
                self.export.format,
                self.export.dithering,
                self.size_log2()?,
                self.export.padding_algorithm,
                self.export.dilation_distance,
            ),
        }])
    }

    /// Creates the export directory, and the convert directory when needed
    ///
    /// # Errors
    ///
    /// Returns a filesystem error when a directory cannot be created
    pub fn ensure_export_directories(&self, convert_after: bool) -> Result<()> {
        ensure_directory(&self.directories.export)?;
        if convert_after {
            ensure_directory(&self.directories.convert)?;
        }
        Ok(())
    }

    /// Creates the mesh-map directory
    pub fn ensure_meshmap_directory(&self) -> Result<()> {
        ensure_directory(&self.directories.meshmap)
    }
}

/// Creates a directory and its parents; an existing directory is fine
pub fn ensure_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|e| {
        TexportError::Filesystem(format!(
            "Failed to create directory {}: {}",
            path.display(),
            e
        ))
    })?;
    tracing::debug!(path = %path.display(), "Directory ready");
    Ok(())
}
