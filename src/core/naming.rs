//! Project title, output file names and directory layout
//!
//! Naming templates carry `$title` and `$channel`, which are substituted here.
//! Every other `$token` (`$textureSet`, `$udim`, ...) is left verbatim for the
//! host to resolve at export time.

use crate::config::{DirectoriesConfig, NamingConfig, ProjectConfig, TexportConfig};
use crate::domain::ids::{is_udim_number, TextureSetName};
use crate::domain::{Result, TexportError};
use regex::Regex;
use std::path::Path;

/// Host placeholder for the texture set name
pub const TEXTURE_SET_TOKEN: &str = "$textureSet";

/// Stand-in channel name used by texture-name previews
pub const PREVIEW_CHANNEL: &str = "(Channel)";

/// Whether an export can run against the current project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    /// Project open and its file name matches the naming rule
    Ready { title: String },
    /// Project open but the file name does not match
    NameIsNotCorrect,
    /// The host has no open project
    ProjectNotOpened,
}

impl ProjectStatus {
    pub fn title(&self) -> Option<&str> {
        match self {
            ProjectStatus::Ready { title } => Some(title.as_str()),
            _ => None,
        }
    }
}

/// Export, convert and mesh-map directories of a project, forward-slashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDirectories {
    pub root: String,
    pub export: String,
    pub convert: String,
    pub meshmap: String,
}

/// Substitutes `$key` occurrences in a single left-to-right pass
///
/// The longest matching key wins. Substituted values are not rescanned and
/// unknown `$tokens` are copied through unchanged.
pub fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let matched = vars
            .iter()
            .filter(|(key, _)| !key.is_empty() && after.starts_with(key))
            .max_by_key(|(key, _)| key.len());

        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after[key.len()..];
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Naming rules for one configuration
#[derive(Debug, Clone)]
pub struct NamingPolicy {
    matcher: Regex,
    export_name: String,
    legacy_name: String,
    meshmap_name: String,
    directories: DirectoriesConfig,
}

impl NamingPolicy {
    /// Compiles the project naming rule
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the naming regex does not compile
    pub fn new(
        project: &ProjectConfig,
        naming: &NamingConfig,
        directories: &DirectoriesConfig,
    ) -> Result<Self> {
        let matcher = Regex::new(&project.naming).map_err(|e| {
            TexportError::Configuration(format!("Invalid project naming rule: {e}"))
        })?;

        Ok(Self {
            matcher,
            export_name: naming.export_name.clone(),
            legacy_name: naming.legacy_name.clone(),
            meshmap_name: naming.meshmap_name.clone(),
            directories: directories.clone(),
        })
    }

    pub fn from_config(config: &TexportConfig) -> Result<Self> {
        Self::new(&config.project, &config.naming, &config.directories)
    }

    /// Extracts the project title from a file name
    ///
    /// The match must start at the beginning of the name; capture group 1 is
    /// the title.
    pub fn extract_title(&self, file_name: &str) -> Option<String> {
        let caps = self.matcher.captures(file_name)?;
        if caps.get(0)?.start() != 0 {
            return None;
        }
        caps.get(1).map(|m| m.as_str().to_string())
    }

    /// Classifies the project the host has open (`None` when nothing is open)
    pub fn project_status(&self, project_file: Option<&str>) -> ProjectStatus {
        let Some(project_file) = project_file else {
            return ProjectStatus::ProjectNotOpened;
        };

        let normalized = project_file.replace('\\', "/");
        let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);

        match self.extract_title(file_name) {
            Some(title) => ProjectStatus::Ready { title },
            None => {
                tracing::error!(project = %file_name, "The project name is incorrect");
                ProjectStatus::NameIsNotCorrect
            }
        }
    }

    /// Title used in file names for a texture set
    ///
    /// Named sets get the host placeholder appended so each set writes its
    /// own files; sets named after a tile keep the bare title.
    pub fn texture_set_title(&self, title: &str, texture_set: &TextureSetName) -> String {
        if texture_set.is_udim() {
            title.to_string()
        } else {
            format!("{title}_{TEXTURE_SET_TOKEN}")
        }
    }

    fn template_for(&self, texture_set_name: &str) -> &str {
        if is_udim_number(texture_set_name) {
            &self.legacy_name
        } else {
            &self.export_name
        }
    }

    /// Output file name for one channel of a texture set
    pub fn export_file_name(
        &self,
        title: &str,
        texture_set: &TextureSetName,
        channel_name: &str,
    ) -> String {
        let set_title = self.texture_set_title(title, texture_set);
        substitute(
            self.template_for(texture_set.as_str()),
            &[("title", set_title.as_str()), ("channel", channel_name)],
        )
    }

    /// Output file name for one mesh map of a texture set
    pub fn meshmap_file_name(
        &self,
        title: &str,
        texture_set: &TextureSetName,
        meshmap: &str,
    ) -> String {
        let set_title = self.texture_set_title(title, texture_set);
        substitute(
            &self.meshmap_name,
            &[("title", set_title.as_str()), ("channel", meshmap)],
        )
    }

    /// Name the outputs of a texture set will carry, for display
    ///
    /// `$textureSet` is resolved to the set name (or its label for user
    /// slots) and the channel is shown as `(Channel)`.
    pub fn texture_name_preview(
        &self,
        title: &str,
        texture_set: &TextureSetName,
        label: Option<&str>,
    ) -> String {
        let display_name = match label {
            Some(label) if texture_set.as_str().starts_with("User") && !label.is_empty() => {
                label
            }
            _ => texture_set.as_str(),
        };

        let set_title = self
            .texture_set_title(title, texture_set)
            .replace(TEXTURE_SET_TOKEN, display_name);
        let template = self
            .template_for(display_name)
            .replace(TEXTURE_SET_TOKEN, display_name);

        substitute(
            &template,
            &[("title", set_title.as_str()), ("channel", PREVIEW_CHANNEL)],
        )
    }

    /// Directory layout for a project file
    ///
    /// The root is the grandparent of the project file. A project file
    /// directly under the filesystem root keeps `/` as its root.
    pub fn directories(&self, project_file: &str) -> ProjectDirectories {
        let normalized = project_file.replace('\\', "/");
        let root = Path::new(&normalized)
            .parent()
            .map(|dir| dir.parent().unwrap_or(dir))
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();

        ProjectDirectories {
            export: join_forward(&root, &self.directories.export),
            convert: join_forward(&root, &self.directories.convert),
            meshmap: join_forward(&root, &self.directories.meshmap),
            root,
        }
    }
}

fn join_forward(root: &str, name: &str) -> String {
    if root.is_empty() {
        name.to_string()
    } else if root.ends_with('/') {
        format!("{root}{name}")
    } else {
        format!("{root}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> NamingPolicy {
        let mut config = TexportConfig::default();
        config.naming.export_name = "$title_$channel.$udim".to_string();
        config.naming.legacy_name = "$title_$channel.$textureSet".to_string();
        config.naming.meshmap_name = "$title_$channel".to_string();
        NamingPolicy::from_config(&config).unwrap()
    }

    fn set(name: &str) -> TextureSetName {
        TextureSetName::new(name).unwrap()
    }

    #[test]
    fn test_substitute_leaves_unknown_tokens() {
        let result = substitute(
            "$title_$channel.$udim",
            &[("title", "Hero"), ("channel", "Color")],
        );
        assert_eq!(result, "Hero_Color.$udim");
    }

    #[test]
    fn test_substitute_does_not_rescan_values() {
        let result = substitute("$title", &[("title", "$channel"), ("channel", "Color")]);
        assert_eq!(result, "$channel");
    }

    #[test]
    fn test_substitute_prefers_longest_key() {
        let result = substitute("$titles", &[("title", "a"), ("titles", "b")]);
        assert_eq!(result, "b");
    }

    #[test]
    fn test_project_status() {
        let policy = policy();
        assert_eq!(
            policy.project_status(Some("D:\\work\\hero\\scenes\\Hero_v003.spp")),
            ProjectStatus::Ready {
                title: "Hero".to_string()
            }
        );
        assert_eq!(
            policy.project_status(Some("/work/hero/scenes/untitled project.spp")),
            ProjectStatus::NameIsNotCorrect
        );
        assert_eq!(policy.project_status(None), ProjectStatus::ProjectNotOpened);
    }

    #[test]
    fn test_title_must_match_from_start() {
        let policy = policy();
        assert_eq!(policy.extract_title("Hero.spp"), Some("Hero".to_string()));
        assert_eq!(policy.extract_title("_Hero.spp"), None);
    }

    #[test]
    fn test_export_file_names() {
        let policy = policy();
        assert_eq!(
            policy.export_file_name("Hero", &set("Body"), "Color"),
            "Hero_$textureSet_Color.$udim"
        );
        assert_eq!(
            policy.export_file_name("Hero", &set("1001"), "Color"),
            "Hero_Color.$textureSet"
        );
    }

    #[test]
    fn test_meshmap_file_name() {
        let policy = policy();
        assert_eq!(
            policy.meshmap_file_name("Hero", &set("Body"), "CombinedMap"),
            "Hero_$textureSet_CombinedMap"
        );
    }

    #[test]
    fn test_texture_name_preview() {
        let policy = policy();
        assert_eq!(
            policy.texture_name_preview("Hero", &set("Body"), None),
            "Hero_Body_(Channel).$udim"
        );
        assert_eq!(
            policy.texture_name_preview("Hero", &set("1002"), None),
            "Hero_(Channel).1002"
        );
        assert_eq!(
            policy.texture_name_preview("Hero", &set("User0"), Some("Cloth")),
            "Hero_Cloth_(Channel).$udim"
        );
    }

    #[test]
    fn test_directories() {
        let policy = policy();
        let dirs = policy.directories("C:\\proj\\hero\\scenes\\Hero.spp");
        assert_eq!(dirs.root, "C:/proj/hero");
        assert_eq!(dirs.export, "C:/proj/hero/TIF");
        assert_eq!(dirs.convert, "C:/proj/hero/TX");
        assert_eq!(dirs.meshmap, "C:/proj/hero/MeshMaps");

        let shallow = policy.directories("Hero.spp");
        assert_eq!(shallow.export, "TIF");
    }

    #[test]
    fn test_directories_at_filesystem_root() {
        let policy = policy();

        let top = policy.directories("/Hero.spp");
        assert_eq!(top.root, "/");
        assert_eq!(top.export, "/TIF");

        let one_level = policy.directories("/scenes/Hero.spp");
        assert_eq!(one_level.root, "/");
        assert_eq!(one_level.convert, "/TX");
    }
}
