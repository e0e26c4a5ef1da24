//! Export specification handed to the host exporter
//!
//! One [`ExportSpec`] fully determines a single host export call (or dry run).
//! It is built fresh per texture set and never mutated after handoff. Field
//! names serialize to the host's camelCase keys.

use crate::domain::channel::BitDepth;
use crate::domain::ids::TileCoord;
use crate::domain::options::{Dithering, ExportFormat, PaddingAlgorithm};
use serde::{Deserialize, Serialize};

/// Where the host reads a sub-channel from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SrcMapType {
    /// A painted document channel
    DocumentMap,
    /// A map the host derives on the fly (normal encodings)
    VirtualMap,
    /// A baked mesh map
    MeshMap,
}

/// One destination component of an output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubChannel {
    #[serde(rename = "destChannel")]
    pub dest: String,

    #[serde(rename = "srcChannel")]
    pub src: String,

    #[serde(rename = "srcMapType")]
    pub src_map_type: SrcMapType,

    #[serde(rename = "srcMapName")]
    pub src_map_name: String,
}

impl SubChannel {
    pub fn new(
        dest: impl Into<String>,
        src: impl Into<String>,
        src_map_type: SrcMapType,
        src_map_name: impl Into<String>,
    ) -> Self {
        Self {
            dest: dest.into(),
            src: src.into(),
            src_map_type,
            src_map_name: src_map_name.into(),
        }
    }
}

/// Per-file export parameters; unset fields use the host default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_format: Option<ExportFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_depth: Option<BitDepth>,
}

/// One output file of a preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMapEntry {
    /// File name template, host placeholders (`$textureSet`, `$udim`) left verbatim
    #[serde(rename = "fileName")]
    pub output_file_name: String,

    #[serde(rename = "channels")]
    pub sub_channels: Vec<SubChannel>,

    pub parameters: MapParameters,
}

/// Named list of output files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPreset {
    pub name: String,
    pub maps: Vec<ChannelMapEntry>,
}

/// Restriction of an export list entry to some outputs and tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFilter {
    pub output_maps: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv_tiles: Option<Vec<TileCoord>>,
}

/// What to export from one texture set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportListEntry {
    pub root_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ExportFilter>,
}

impl ExportListEntry {
    /// Unfiltered entry covering the whole texture set
    pub fn whole(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            filter: None,
        }
    }
}

/// Global export parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParameters {
    #[serde(rename = "fileFormat")]
    pub format: ExportFormat,
    pub dithering: bool,
    pub size_log2: u8,
    pub padding_algorithm: PaddingAlgorithm,
    pub dilation_distance: u32,
}

impl ExportParameters {
    pub fn new(
        format: ExportFormat,
        dithering: Dithering,
        size_log2: u8,
        padding_algorithm: PaddingAlgorithm,
        dilation_distance: u32,
    ) -> Self {
        Self {
            format,
            dithering: dithering.is_enabled(),
            size_log2,
            padding_algorithm,
            dilation_distance,
        }
    }
}

/// Wrapper matching the host's `{"parameters": {...}}` layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportParametersEntry {
    pub parameters: ExportParameters,
}

/// Complete request for one host export call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSpec {
    #[serde(rename = "exportPath")]
    pub export_path: String,

    #[serde(rename = "exportShaderParams")]
    pub shader_params_flag: bool,

    #[serde(rename = "defaultExportPreset")]
    pub default_preset_name: String,

    #[serde(rename = "exportPresets")]
    pub presets: Vec<ExportPreset>,

    #[serde(rename = "exportList")]
    pub export_list: Vec<ExportListEntry>,

    #[serde(rename = "exportParameters")]
    pub export_parameters: Vec<ExportParametersEntry>,
}

impl ExportSpec {
    /// Output file names of the default preset
    pub fn output_file_names(&self) -> Vec<&str> {
        self.presets
            .iter()
            .filter(|preset| preset.name == self.default_preset_name)
            .flat_map(|preset| preset.maps.iter())
            .map(|map| map.output_file_name.as_str())
            .collect()
    }
}
