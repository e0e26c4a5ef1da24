//! Conversion jobs and path remapping

use crate::config::TexportConfig;
use std::path::{Path, PathBuf};

/// One file to convert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
    pub needs_color_correct: bool,
}

impl ConversionJob {
    pub fn new(
        source_path: impl Into<PathBuf>,
        dest_path: impl Into<PathBuf>,
        needs_color_correct: bool,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            dest_path: dest_path.into(),
            needs_color_correct,
        }
    }
}

/// Maps exported file paths to their converted counterparts
///
/// The export directory name is swapped for the convert directory name in
/// the directory part, and the export format for the convert format in the
/// file name. Only the rightmost occurrence of each is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRemapper {
    export_directory: String,
    convert_directory: String,
    export_format: String,
    convert_format: String,
}

impl PathRemapper {
    pub fn new(
        export_directory: impl Into<String>,
        convert_directory: impl Into<String>,
        export_format: impl Into<String>,
        convert_format: impl Into<String>,
    ) -> Self {
        Self {
            export_directory: export_directory.into(),
            convert_directory: convert_directory.into(),
            export_format: export_format.into(),
            convert_format: convert_format.into(),
        }
    }

    pub fn from_config(config: &TexportConfig) -> Self {
        Self::new(
            config.directories.export.clone(),
            config.directories.convert.clone(),
            config.export.format.as_str(),
            config.export.convert_format.clone(),
        )
    }

    /// Destination of a source path, with forward slashes
    pub fn destination(&self, source: &str) -> String {
        let normalized = source.replace('\\', "/");
        match normalized.rsplit_once('/') {
            Some((directory, file_name)) => format!(
                "{}/{}",
                replace_rightmost(directory, &self.export_directory, &self.convert_directory),
                replace_rightmost(file_name, &self.export_format, &self.convert_format)
            ),
            None => replace_rightmost(&normalized, &self.export_format, &self.convert_format),
        }
    }
}

fn replace_rightmost(haystack: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return haystack.to_string();
    }
    match haystack.rfind(from) {
        Some(pos) => format!("{}{}{}", &haystack[..pos], to, &haystack[pos + from.len()..]),
        None => haystack.to_string(),
    }
}

/// True when the file name contains one of the color-correct channel names
pub fn needs_color_correct(source: &Path, color_correct_channels: &[String]) -> bool {
    let Some(file_name) = source.file_name().map(|name| name.to_string_lossy()) else {
        return false;
    };
    color_correct_channels
        .iter()
        .any(|channel| !channel.is_empty() && file_name.contains(channel.as_str()))
}
