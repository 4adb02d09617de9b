//! `package.json` manifest parsing.
//!
//! Only the handful of keys the overlay cares about are modelled; the rest
//! of the manifest is ignored.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::resolver::errors::OverlayError;

/// The parsed package manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    /// Package name
    #[serde(default)]
    pub name: Option<String>,

    /// Package-relative folder holding the addon's overrides of base files
    #[serde(default, rename = "voltoCustomizationPath")]
    pub base_customization_path: Option<PathBuf>,

    /// Project-relative folder holding the project's overrides of addons
    #[serde(default, rename = "addonsCustomizationPath")]
    pub addons_customization_path: Option<PathBuf>,
}

impl PackageManifest {
    /// Parse a manifest from its JSON text.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, OverlayError> {
        parse_json(contents, path)
    }
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<PackageManifest, OverlayError> {
    read_json(path)
}

pub(crate) fn parse_json<T: DeserializeOwned>(contents: &str, path: &Path) -> Result<T, OverlayError> {
    serde_json::from_str(contents).map_err(|source| OverlayError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a JSON document, mapping failures onto the manifest errors.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, OverlayError> {
    let contents = std::fs::read_to_string(path).map_err(|source| OverlayError::ManifestIo {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&contents, path)
}
