//! Project - the consuming frontend package.
//!
//! A Project bundles the project manifest, the path mapping file and the
//! resolved settings, and answers every path question the composer asks.

use std::path::{Path, PathBuf};

use crate::core::manifest::{load_manifest, PackageManifest};
use crate::core::path_mapping::{resolve_core_path, PathMapping};
use crate::resolver::errors::OverlayError;
use crate::util::config::ResolveSettings;
use crate::util::fs::{normalize_path, resolve_from};

/// A loaded project.
#[derive(Debug, Clone)]
pub struct Project {
    /// Project root directory
    root: PathBuf,

    /// Project package manifest
    manifest: PackageManifest,

    /// Compiler path mapping
    path_mapping: PathMapping,

    /// Where the base framework is mounted
    base_path: PathBuf,

    /// Resolution settings
    settings: ResolveSettings,
}

impl Project {
    /// Load the manifest and path mapping of the project at `root`.
    pub fn load(root: &Path, settings: ResolveSettings) -> Result<Self, OverlayError> {
        let root = normalize_path(root);
        let manifest = load_manifest(&root.join(&settings.manifest_file))?;
        let path_mapping = PathMapping::load(&root, &settings)?;
        let base_path = resolve_core_path(&root, &path_mapping, &settings);

        tracing::debug!(
            "project {} with {} addon(s), base framework at {}",
            root.display(),
            path_mapping.addons.len(),
            base_path.display()
        );

        Ok(Project {
            root,
            manifest,
            path_mapping,
            base_path,
            settings,
        })
    }

    /// Get the project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &PackageManifest {
        &self.manifest
    }

    pub fn path_mapping(&self) -> &PathMapping {
        &self.path_mapping
    }

    pub fn settings(&self) -> &ResolveSettings {
        &self.settings
    }

    /// Configured addons, lowest precedence first.
    pub fn addons(&self) -> &[String] {
        &self.path_mapping.addons
    }

    /// Where the base framework is mounted.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Base framework folder that addon overrides mirror.
    pub fn base_source_root(&self) -> PathBuf {
        self.base_path.join(&self.settings.base_source_dir)
    }

    /// Folder holding the project's overrides of addon files.
    pub fn override_root(&self) -> PathBuf {
        let folder = self
            .manifest
            .addons_customization_path
            .as_deref()
            .unwrap_or(&self.settings.customizations_dir);
        resolve_from(&self.root, folder)
    }

    /// The project's own source folder.
    pub fn source_root(&self) -> PathBuf {
        self.root.join("src")
    }

    /// The base framework's theme folder.
    pub fn theme_root(&self) -> PathBuf {
        self.base_path.join("theme").join("themes")
    }

    /// The project's theme folder.
    pub fn project_theme_root(&self) -> PathBuf {
        self.root.join("theme")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_project(dir: &Path, manifest: &str, mapping: &str) {
        fs::write(dir.join("package.json"), manifest).unwrap();
        fs::write(dir.join("jsconfig.json"), mapping).unwrap();
    }

    #[test]
    fn test_project_defaults() {
        let tmp = TempDir::new().unwrap();
        write_project(tmp.path(), r#"{ "name": "site" }"#, r#"{ "addons": ["a", "b"] }"#);

        let project = Project::load(tmp.path(), ResolveSettings::default()).unwrap();
        let root = tmp.path().canonicalize().unwrap();

        assert_eq!(project.addons(), &["a".to_string(), "b".to_string()]);
        assert_eq!(project.base_path(), root.join("node_modules/@plone/volto"));
        assert_eq!(project.override_root(), root.join("src/customizations"));
        assert_eq!(project.source_root(), root.join("src"));
        assert_eq!(project.theme_root(), root.join("node_modules/@plone/volto/theme/themes"));
        assert_eq!(project.base_source_root(), root.join("node_modules/@plone/volto/src"));
    }

    #[test]
    fn test_project_custom_override_folder() {
        let tmp = TempDir::new().unwrap();
        write_project(
            tmp.path(),
            r#"{ "name": "site", "addonsCustomizationPath": "src/addon-overrides" }"#,
            "{}",
        );

        let project = Project::load(tmp.path(), ResolveSettings::default()).unwrap();
        assert!(project.override_root().ends_with("src/addon-overrides"));
        assert!(project.addons().is_empty());
    }

    #[test]
    fn test_project_requires_path_mapping() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("package.json"), "{}").unwrap();

        let err = Project::load(tmp.path(), ResolveSettings::default()).unwrap_err();
        assert!(matches!(err, OverlayError::ManifestIo { .. }));
    }
}
