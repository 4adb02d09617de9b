//! Package lookup - locating addon packages and describing them.

use std::path::{Path, PathBuf};

use crate::core::alias::AliasTable;
use crate::core::manifest::load_manifest;
use crate::core::source_files::source_files;
use crate::resolver::errors::OverlayError;
use crate::util::config::ResolveSettings;
use crate::util::fs::{module_path, normalize_path, resolve_from};

/// Walk upward from `start` (inclusive) to the nearest directory holding
/// `manifest_file`, inspecting at most `max_depth` directories.
pub fn find_package_root(
    start: &Path,
    manifest_file: &str,
    max_depth: usize,
) -> Result<PathBuf, OverlayError> {
    let mut current = normalize_path(start);

    for _ in 0..max_depth {
        if current.join(manifest_file).is_file() {
            return Ok(current);
        }
        if !current.pop() {
            break;
        }
    }

    Err(OverlayError::PackageNotFound {
        start: start.to_path_buf(),
        manifest: manifest_file.to_string(),
        max_depth,
    })
}

/// Where `package` lives on disk: its alias if one is set, otherwise its
/// folder in the project's dependency tree.
///
/// Relative alias values are taken relative to `project_root`.
pub fn package_alias_path(
    package: &str,
    aliases: &AliasTable,
    project_root: &Path,
    dependency_dir: &str,
) -> PathBuf {
    match aliases.path(package) {
        Some(alias) => {
            let raw = alias.to_string_lossy();
            let trimmed = raw.trim_end_matches(['/', '\\']);
            let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
            resolve_from(project_root, Path::new(trimmed))
        }
        None => project_root.join(dependency_dir).join(package),
    }
}

/// Everything the resolver needs to know about one addon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Configured package name
    pub name: String,

    /// Directory holding the package manifest
    pub root: PathBuf,

    /// Directory the package is imported from (may be below `root`)
    pub location: PathBuf,

    /// Module paths (`<name>/<relative file>`) the project may override
    pub declared_sources: Vec<String>,

    /// Absolute folder of overrides this addon applies to the base framework
    pub base_customization_path: Option<PathBuf>,
}

impl PackageDescriptor {
    /// Locate `name` and read its manifest and customizable files.
    pub fn resolve(
        name: &str,
        aliases: &AliasTable,
        project_root: &Path,
        settings: &ResolveSettings,
    ) -> Result<Self, OverlayError> {
        let location = normalize_path(&package_alias_path(
            name,
            aliases,
            project_root,
            &settings.dependency_dir,
        ));
        if !location.exists() {
            return Err(OverlayError::PackageMissing {
                name: name.to_string(),
                location,
            });
        }
        let root = find_package_root(&location, &settings.manifest_file, settings.max_depth)?;
        let manifest = load_manifest(&root.join(&settings.manifest_file))?;

        if let Some(declared) = manifest.name.as_deref() {
            if declared != name {
                tracing::debug!("addon `{}` declares package name `{}`", name, declared);
            }
        }

        let base_customization_path = manifest
            .base_customization_path
            .map(|folder| root.join(folder));

        // An addon's own override folder is not part of its public surface,
        // declared or not.
        let blacklist = base_customization_path
            .clone()
            .unwrap_or_else(|| root.join(&settings.customizations_dir));

        let declared_sources = source_files(&location, Some(&blacklist), &settings.dependency_dir)
            .map(|rel| format!("{}/{}", name, module_path(&rel)))
            .collect();

        Ok(PackageDescriptor {
            name: name.to_string(),
            root,
            location,
            declared_sources,
            base_customization_path,
        })
    }

    /// Whether this addon overrides any base framework files.
    pub fn customizes_base(&self) -> bool {
        self.base_customization_path.is_some()
    }
}
