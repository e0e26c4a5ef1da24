//! Host request and response models

use serde::{Deserialize, Serialize};

/// Currently opened project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project file path; `None` when no project is open
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Texture set as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSetInfo {
    pub name: String,

    /// Display label of user texture sets
    #[serde(default)]
    pub label: Option<String>,
}

impl TextureSetInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Outcome of a host export call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Success,
    /// Files were written but the host reported a problem
    Warning,
    Error,
    Cancelled,
}

impl ExportStatus {
    /// Whether the written files may be converted
    pub fn allows_conversion(&self) -> bool {
        matches!(self, ExportStatus::Success | ExportStatus::Warning)
    }
}

/// Files written (or that would be written) for one texture set and scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedTextures {
    pub texture_set: String,

    /// Stack or scope inside the texture set; empty for the whole set
    #[serde(default)]
    pub scope: String,

    #[serde(default)]
    pub files: Vec<String>,
}

/// Result of a host export call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResult {
    pub status: ExportStatus,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub textures: Vec<ExportedTextures>,
}

impl ExportResult {
    /// All written files, in host order
    pub fn files(&self) -> Vec<String> {
        self.textures
            .iter()
            .flat_map(|textures| textures.files.iter().cloned())
            .collect()
    }
}

/// Files a spec would produce, from a dry run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureListing {
    #[serde(default)]
    pub textures: Vec<ExportedTextures>,
}

impl TextureListing {
    pub fn files(&self) -> Vec<String> {
        self.textures
            .iter()
            .flat_map(|textures| textures.files.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_result_decodes_host_json() {
        let json = r#"{
            "status": "warning",
            "message": "Padding skipped",
            "textures": [
                {"texture_set": "Body", "scope": "", "files": ["/p/TIF/a.tif", "/p/TIF/b.tif"]},
                {"texture_set": "Head", "files": ["/p/TIF/c.tif"]}
            ]
        }"#;
        let result: ExportResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.status, ExportStatus::Warning);
        assert!(result.status.allows_conversion());
        assert_eq!(result.files().len(), 3);
        assert_eq!(result.textures[1].scope, "");
    }

    #[test]
    fn test_status_gates_conversion() {
        assert!(ExportStatus::Success.allows_conversion());
        assert!(!ExportStatus::Error.allows_conversion());
        assert!(!ExportStatus::Cancelled.allows_conversion());
    }

    #[test]
    fn test_project_info_defaults_to_closed() {
        let info: ProjectInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info.file_path, None);
    }
}
