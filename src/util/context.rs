//! Global context for overlay operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::package::find_package_root;
use crate::resolver::errors::OverlayError;
use crate::util::config::{global_config_dir, load_config, project_config_path, ResolveSettings};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global data (~/.addon-overlay/)
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::at(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        Ok(Self::at(cwd))
    }

    fn at(cwd: PathBuf) -> Self {
        let home = global_config_dir().unwrap_or_else(|| cwd.join(".addon-overlay"));
        GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        }
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Load the merged settings for a project rooted at `project_root`.
    pub fn settings_for(&self, project_root: &Path) -> ResolveSettings {
        load_config(&self.config_path(), &project_config_path(project_root)).settings()
    }

    /// Find the project root: the nearest directory, starting at cwd, that
    /// holds the path mapping file.
    pub fn find_project_root(&self) -> Result<PathBuf, OverlayError> {
        let defaults = self.settings_for(&self.cwd);
        find_package_root(&self.cwd, &defaults.path_mapping_file, defaults.max_depth)
    }
}
