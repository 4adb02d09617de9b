//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.addon-overlay/config.toml` - User-wide defaults
//! - Project: `.addon-overlay/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Every key is
//! optional; [`Config::settings`] fills the gaps with the defaults used by
//! a stock Volto project.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".addon-overlay";

pub const DEFAULT_BASE_PACKAGE: &str = "@plone/volto";
pub const DEFAULT_BASE_SOURCE_DIR: &str = "src";
pub const DEFAULT_MANIFEST_FILE: &str = "package.json";
pub const DEFAULT_PATH_MAPPING_FILE: &str = "jsconfig.json";
pub const DEFAULT_DEPENDENCY_DIR: &str = "node_modules";
pub const DEFAULT_CUSTOMIZATIONS_DIR: &str = "src/customizations";
pub const DEFAULT_MAX_DEPTH: usize = 32;
pub const DEFAULT_PROJECT_ALIAS: &str = "~";
pub const DEFAULT_THEME_ALIAS: &str = "volto-themes";

/// Tool configuration as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolution settings
    pub resolve: ResolveConfig,
}

/// The `[resolve]` section. Unset keys fall back to the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Canonical package name of the base framework
    pub base_package: Option<String>,

    /// Folder of the base framework that addons customize
    pub base_source_dir: Option<String>,

    /// Package manifest file name
    pub manifest_file: Option<String>,

    /// Compiler path mapping file name
    pub path_mapping_file: Option<String>,

    /// Dependency tree folder name
    pub dependency_dir: Option<String>,

    /// Default project override folder, relative to the project root
    pub customizations_dir: Option<PathBuf>,

    /// Upper bound on the upward walk looking for a package manifest
    pub max_depth: Option<usize>,

    /// Alias pointing at the project's own sources
    pub project_alias: Option<String>,

    /// Alias pointing at the base framework themes
    pub theme_alias: Option<String>,

    /// Treat customizations of missing base files as errors
    pub strict_targets: Option<bool>,
}

/// Fully resolved settings consumed by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveSettings {
    pub base_package: String,
    pub base_source_dir: String,
    pub manifest_file: String,
    pub path_mapping_file: String,
    pub dependency_dir: String,
    pub customizations_dir: PathBuf,
    pub max_depth: usize,
    pub project_alias: String,
    pub theme_alias: String,
    pub strict_targets: bool,
}

impl Default for ResolveSettings {
    fn default() -> Self {
        ResolveSettings {
            base_package: DEFAULT_BASE_PACKAGE.to_string(),
            base_source_dir: DEFAULT_BASE_SOURCE_DIR.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            path_mapping_file: DEFAULT_PATH_MAPPING_FILE.to_string(),
            dependency_dir: DEFAULT_DEPENDENCY_DIR.to_string(),
            customizations_dir: PathBuf::from(DEFAULT_CUSTOMIZATIONS_DIR),
            max_depth: DEFAULT_MAX_DEPTH,
            project_alias: DEFAULT_PROJECT_ALIAS.to_string(),
            theme_alias: DEFAULT_THEME_ALIAS.to_string(),
            strict_targets: false,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let ours = &mut self.resolve;
        let theirs = other.resolve;

        if theirs.base_package.is_some() {
            ours.base_package = theirs.base_package;
        }
        if theirs.base_source_dir.is_some() {
            ours.base_source_dir = theirs.base_source_dir;
        }
        if theirs.manifest_file.is_some() {
            ours.manifest_file = theirs.manifest_file;
        }
        if theirs.path_mapping_file.is_some() {
            ours.path_mapping_file = theirs.path_mapping_file;
        }
        if theirs.dependency_dir.is_some() {
            ours.dependency_dir = theirs.dependency_dir;
        }
        if theirs.customizations_dir.is_some() {
            ours.customizations_dir = theirs.customizations_dir;
        }
        if theirs.max_depth.is_some() {
            ours.max_depth = theirs.max_depth;
        }
        if theirs.project_alias.is_some() {
            ours.project_alias = theirs.project_alias;
        }
        if theirs.theme_alias.is_some() {
            ours.theme_alias = theirs.theme_alias;
        }
        if theirs.strict_targets.is_some() {
            ours.strict_targets = theirs.strict_targets;
        }
    }

    /// Resolve the settings, filling unset keys with defaults.
    pub fn settings(&self) -> ResolveSettings {
        let defaults = ResolveSettings::default();
        let r = &self.resolve;

        ResolveSettings {
            base_package: r.base_package.clone().unwrap_or(defaults.base_package),
            base_source_dir: r.base_source_dir.clone().unwrap_or(defaults.base_source_dir),
            manifest_file: r.manifest_file.clone().unwrap_or(defaults.manifest_file),
            path_mapping_file: r
                .path_mapping_file
                .clone()
                .unwrap_or(defaults.path_mapping_file),
            dependency_dir: r.dependency_dir.clone().unwrap_or(defaults.dependency_dir),
            customizations_dir: r
                .customizations_dir
                .clone()
                .unwrap_or(defaults.customizations_dir),
            // A zero bound would never even inspect the start directory.
            max_depth: r.max_depth.unwrap_or(defaults.max_depth).max(1),
            project_alias: r.project_alias.clone().unwrap_or(defaults.project_alias),
            theme_alias: r.theme_alias.clone().unwrap_or(defaults.theme_alias),
            strict_targets: r.strict_targets.unwrap_or(defaults.strict_targets),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.addon-overlay/config.toml)
/// 2. Global config (~/.addon-overlay/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global config directory (~/.addon-overlay).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the project config path (.addon-overlay/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join("config.toml")
}
