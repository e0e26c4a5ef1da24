//! Integration tests for export spec assembly, from configuration text to
//! the JSON the host bridge receives

use serde_json::json;
use texport::config::{parse_config, TexportConfig};
use texport::core::builder::{ExportOptions, ExportSpecBuilder, MeshMapMode};
use texport::core::naming::{NamingPolicy, ProjectStatus};
use texport::domain::{NativeChannel, TextureSetName};

const CONFIG: &str = r#"
[export]
output_size = 2048
format = "png"
convert_format = "tx"
normal_map = "directx"
padding_algorithm = "diffusion"
dilation_distance = 8

[channels]
BaseColor = "Color"
roughness = "Rough"
normal = "Normal"
mask = "Mask"
"#;

const PROJECT_FILE: &str = "C:\\work\\hero\\scenes\\Hero_v012.spp";

fn config() -> TexportConfig {
    parse_config(CONFIG).expect("test config parses")
}

fn builder(config: &TexportConfig) -> ExportSpecBuilder {
    let naming = NamingPolicy::from_config(config).unwrap();
    let title = match naming.project_status(Some(PROJECT_FILE)) {
        ProjectStatus::Ready { title } => title,
        other => panic!("unexpected project status: {other:?}"),
    };
    ExportSpecBuilder::new(config, title, naming.directories(PROJECT_FILE)).unwrap()
}

/// Channels as the bridge reports them
fn host_channels() -> Vec<NativeChannel> {
    serde_json::from_value(json!([
        { "channel_type": "BaseColor", "format": "sRGB8" },
        { "channel_type": "Roughness", "format": "ChannelFormat.L16" },
        { "channel_type": "Normal", "format": "RGB16F" },
        { "channel_type": "Specular", "format": "L8" },
        { "channel_type": "User0", "label": "Mask", "format": "L8" }
    ]))
    .unwrap()
}

#[test]
fn test_project_layout_from_windows_path() {
    let config = config();
    let builder = builder(&config);

    assert_eq!(builder.title(), "Hero");
    assert_eq!(builder.directories().root, "C:/work/hero");
    assert_eq!(builder.directories().export, "C:/work/hero/TIF");
    assert_eq!(builder.directories().convert, "C:/work/hero/TX");
}

#[test]
fn test_full_export_spec_wire_format() {
    let config = config();
    let builder = builder(&config);
    let texture_set = TextureSetName::new("Body").unwrap();

    let prepared = builder
        .prepare(&texture_set, &host_channels(), &ExportOptions::default())
        .unwrap();
    let value = serde_json::to_value(&prepared.spec).unwrap();

    assert_eq!(value["exportPath"], "C:/work/hero/TIF");
    assert_eq!(value["defaultExportPreset"], "texport");
    assert_eq!(value["exportShaderParams"], false);
    assert_eq!(value["exportList"], json!([{ "rootPath": "Body" }]));
    assert_eq!(
        value["exportParameters"],
        json!([{
            "parameters": {
                "fileFormat": "png",
                "dithering": true,
                "sizeLog2": 11,
                "paddingAlgorithm": "diffusion",
                "dilationDistance": 8
            }
        }])
    );

    // Specular is not in the dictionary
    assert_eq!(
        prepared.spec.output_file_names(),
        vec![
            "Hero_$textureSet_Color.$udim",
            "Hero_$textureSet_Rough.$udim",
            "Hero_$textureSet_Normal.$udim",
            "Hero_$textureSet_Mask.$udim",
        ]
    );

    let maps = &value["exportPresets"][0]["maps"];
    assert_eq!(
        maps[2]["channels"][0],
        json!({
            "destChannel": "R",
            "srcChannel": "R",
            "srcMapType": "virtualMap",
            "srcMapName": "Normal_DirectX"
        })
    );
    assert_eq!(maps[1]["parameters"], json!({ "bitDepth": "16" }));
    assert_eq!(maps[3]["channels"][0]["srcMapName"], "user0");
}

#[test]
fn test_udim_texture_set_uses_legacy_name() {
    let config = config();
    let builder = builder(&config);
    let texture_set = TextureSetName::new("1001").unwrap();

    let prepared = builder
        .prepare(&texture_set, &host_channels(), &ExportOptions::default())
        .unwrap();

    assert_eq!(
        prepared.spec.output_file_names()[0],
        "Hero_Color.$textureSet"
    );
}

#[test]
fn test_force_eight_bit_and_color_correct() {
    let config = config();
    let builder = builder(&config);
    let texture_set = TextureSetName::new("Body").unwrap();
    let options = ExportOptions {
        force_eight_bit: true,
        color_correct: true,
        ..ExportOptions::default()
    };

    let prepared = builder
        .prepare(&texture_set, &host_channels(), &options)
        .unwrap();
    let value = serde_json::to_value(&prepared.spec).unwrap();

    for map in value["exportPresets"][0]["maps"].as_array().unwrap() {
        assert_eq!(map["parameters"]["bitDepth"], "8");
    }
    assert_eq!(prepared.color_correct_channels, vec!["Color".to_string()]);
}

#[test]
fn test_scoped_export_list_wire_format() {
    let config = config();
    let builder = builder(&config);
    let texture_set = TextureSetName::new("Body").unwrap();
    let options = ExportOptions {
        scope_expression: Some("normal:1001-1002, Roughness:*".to_string()),
        ..ExportOptions::default()
    };

    let prepared = builder
        .prepare(&texture_set, &host_channels(), &options)
        .unwrap();
    let value = serde_json::to_value(&prepared.spec).unwrap();

    assert_eq!(
        value["exportList"],
        json!([
            {
                "rootPath": "Body",
                "filter": {
                    "outputMaps": ["Hero_$textureSet_Normal.$udim"],
                    "uvTiles": [[0, 0], [1, 0]]
                }
            },
            {
                "rootPath": "Body",
                "filter": { "outputMaps": ["Hero_$textureSet_Rough.$udim"] }
            }
        ])
    );
}

#[test]
fn test_meshmap_spec_wire_format() {
    let config = config();
    let builder = builder(&config);
    let texture_set = TextureSetName::new("Body").unwrap();

    let spec = builder
        .build_meshmap_spec(&texture_set, MeshMapMode::Combined)
        .unwrap();
    let value = serde_json::to_value(&spec).unwrap();

    assert_eq!(value["exportPath"], "C:/work/hero/MeshMaps");
    assert_eq!(value["defaultExportPreset"], "texport_meshmaps");
    assert_eq!(
        value["exportPresets"][0]["maps"][0]["parameters"],
        json!({ "fileFormat": "png", "bitDepth": "8" })
    );
    assert_eq!(
        value["exportPresets"][0]["maps"][0]["channels"][1],
        json!({
            "destChannel": "G",
            "srcChannel": "L",
            "srcMapType": "meshMap",
            "srcMapName": "curvature"
        })
    );
}

#[test]
fn test_incorrect_project_name() {
    let config = config();
    let naming = NamingPolicy::from_config(&config).unwrap();

    assert_eq!(
        naming.project_status(Some("/work/scenes/hero-final.spp")),
        ProjectStatus::NameIsNotCorrect
    );
    assert_eq!(naming.project_status(None), ProjectStatus::ProjectNotOpened);
}
