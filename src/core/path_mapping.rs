//! Compiler path mapping (`jsconfig.json`).
//!
//! The project lists its addons here, in override order, and may mount
//! packages from local folders instead of the dependency tree:
//!
//! ```json
//! {
//!   "addons": ["volto-slate", "volto-blocks"],
//!   "compilerOptions": {
//!     "baseUrl": "src",
//!     "paths": { "volto-slate": ["develop/volto-slate/src"] }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::manifest::read_json;
use crate::resolver::errors::OverlayError;
use crate::util::config::ResolveSettings;

/// The parsed path mapping file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathMapping {
    /// Configured addon packages, lowest precedence first
    #[serde(default)]
    pub addons: Vec<String>,

    #[serde(default, rename = "compilerOptions")]
    pub compiler_options: CompilerOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompilerOptions {
    /// Directory that `paths` entries are relative to
    #[serde(default, rename = "baseUrl")]
    pub base_url: Option<String>,

    /// Package name to candidate local paths
    #[serde(default)]
    pub paths: BTreeMap<String, Vec<String>>,
}

impl PathMapping {
    /// Load the path mapping file of the project at `project_root`.
    pub fn load(project_root: &Path, settings: &ResolveSettings) -> Result<Self, OverlayError> {
        read_json(&project_root.join(&settings.path_mapping_file))
    }

    fn base_dir(&self, project_root: &Path) -> PathBuf {
        match &self.compiler_options.base_url {
            Some(base_url) => project_root.join(base_url),
            None => project_root.to_path_buf(),
        }
    }

    /// Local mount of `package`, from the first path listed for it.
    pub fn mounted_path(&self, project_root: &Path, package: &str) -> Option<PathBuf> {
        self.compiler_options
            .paths
            .get(package)
            .and_then(|candidates| candidates.first())
            .map(|first| self.base_dir(project_root).join(first))
    }

    /// Every local mount, by package name.
    pub fn mounts(&self, project_root: &Path) -> Vec<(String, PathBuf)> {
        self.compiler_options
            .paths
            .keys()
            .filter_map(|name| {
                self.mounted_path(project_root, name)
                    .map(|path| (name.clone(), path))
            })
            .collect()
    }
}

/// Where the base framework is mounted for this project.
///
/// A local mount in the path mapping wins over the dependency tree.
pub fn resolve_core_path(
    project_root: &Path,
    mapping: &PathMapping,
    settings: &ResolveSettings,
) -> PathBuf {
    match mapping.mounted_path(project_root, &settings.base_package) {
        Some(path) => {
            tracing::debug!("base framework mounted locally at {}", path.display());
            path
        }
        None => project_root
            .join(&settings.dependency_dir)
            .join(&settings.base_package),
    }
}
