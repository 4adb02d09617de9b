//! Test fixtures for common test scenarios.
//!
//! [`ProjectFixture`] describes a project tree in memory: the project
//! itself, a base framework under the dependency tree, and any number of
//! addons. [`ProjectFixture::build`] writes it to a temporary directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::project::Project;
use crate::resolver::errors::OverlayError;
use crate::util::config::ResolveSettings;

const BASE_DIR: &str = "node_modules/@plone/volto";

/// Fixture for a complete project tree.
#[derive(Debug, Clone, Default)]
pub struct ProjectFixture {
    /// Configured addons, in override order.
    addons: Vec<String>,
    /// Project-relative package folder of each known addon.
    addon_dirs: BTreeMap<String, PathBuf>,
    /// Path mapping entries (package -> project-relative path).
    mounts: BTreeMap<String, String>,
    /// `addonsCustomizationPath` of the project manifest.
    override_folder: Option<String>,
    /// Files to write (project-relative path -> content).
    files: BTreeMap<PathBuf, String>,
}

impl ProjectFixture {
    /// Create a project configured with `addons`.
    pub fn new(addons: &[&str]) -> Self {
        ProjectFixture {
            addons: addons.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Add a file to the base framework's source folder.
    pub fn base_file(mut self, rel: &str) -> Self {
        self.files
            .insert(Path::new(BASE_DIR).join("src").join(rel), String::new());
        self
    }

    fn package(mut self, name: &str, dir: PathBuf, customization: Option<&str>) -> Self {
        let manifest = match customization {
            Some(folder) => format!(
                r#"{{ "name": "{}", "voltoCustomizationPath": "{}" }}"#,
                name, folder
            ),
            None => format!(r#"{{ "name": "{}" }}"#, name),
        };
        self.files.insert(dir.join("package.json"), manifest);
        self.mounts.insert(
            name.to_string(),
            format!("{}/src", dir.to_string_lossy()),
        );
        self.addon_dirs.insert(name.to_string(), dir);
        self
    }

    /// Install an addon in the dependency tree, imported from its `src`.
    pub fn addon(self, name: &str, customization: Option<&str>) -> Self {
        let dir = Path::new("node_modules").join(name);
        self.package(name, dir, customization)
    }

    /// Add an addon checked out inside the project at `dir`.
    pub fn project_addon(self, name: &str, dir: &str, customization: Option<&str>) -> Self {
        self.package(name, PathBuf::from(dir), customization)
    }

    /// Add a file to an addon, relative to the addon's package root.
    pub fn addon_file(mut self, name: &str, rel: &str) -> Self {
        let dir = self
            .addon_dirs
            .get(name)
            .cloned()
            .unwrap_or_else(|| Path::new("node_modules").join(name));
        self.files.insert(dir.join(rel), String::new());
        self
    }

    /// Add a file to the project.
    pub fn project_file(mut self, rel: &str) -> Self {
        self.files.insert(PathBuf::from(rel), String::new());
        self
    }

    /// Set the project's override folder.
    pub fn with_override_folder(mut self, folder: &str) -> Self {
        self.override_folder = Some(folder.to_string());
        self
    }

    fn project_manifest(&self) -> String {
        match &self.override_folder {
            Some(folder) => format!(
                r#"{{ "name": "site", "addonsCustomizationPath": "{}" }}"#,
                folder
            ),
            None => r#"{ "name": "site" }"#.to_string(),
        }
    }

    fn path_mapping(&self) -> String {
        let paths: BTreeMap<&String, Vec<&String>> =
            self.mounts.iter().map(|(k, v)| (k, vec![v])).collect();
        serde_json::json!({
            "addons": self.addons,
            "compilerOptions": { "paths": paths }
        })
        .to_string()
    }

    /// Write this fixture to a fresh temporary directory.
    pub fn build(self) -> BuiltProject {
        let dir = TempDir::new().expect("failed to create temp dir");
        let root = dir
            .path()
            .canonicalize()
            .expect("failed to canonicalize temp dir");

        write(&root.join("package.json"), &self.project_manifest());
        write(&root.join("jsconfig.json"), &self.path_mapping());
        for (rel, contents) in &self.files {
            write(&root.join(rel), contents);
        }

        BuiltProject {
            _dir: dir,
            root,
            addon_dirs: self.addon_dirs,
        }
    }
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create fixture dir");
    }
    std::fs::write(path, contents).expect("failed to write fixture file");
}

/// A fixture written to disk. The tree is removed on drop.
#[derive(Debug)]
pub struct BuiltProject {
    _dir: TempDir,
    root: PathBuf,
    addon_dirs: BTreeMap<String, PathBuf>,
}

impl BuiltProject {
    /// The project root (canonical).
    pub fn project_dir(&self) -> &Path {
        &self.root
    }

    /// Package root of an addon.
    pub fn addon_dir(&self, name: &str) -> PathBuf {
        let rel = self
            .addon_dirs
            .get(name)
            .cloned()
            .unwrap_or_else(|| Path::new("node_modules").join(name));
        self.root.join(rel)
    }

    /// The base framework's folder.
    pub fn base_dir(&self) -> PathBuf {
        self.root.join(BASE_DIR)
    }

    /// Load the project with default settings.
    pub fn load(&self) -> Result<Project, OverlayError> {
        self.load_with(ResolveSettings::default())
    }

    /// Load the project with explicit settings.
    pub fn load_with(&self, settings: ResolveSettings) -> Result<Project, OverlayError> {
        Project::load(&self.root, settings)
    }
}
