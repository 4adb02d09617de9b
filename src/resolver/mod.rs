//! Customization resolution.
//!
//! Two mappers turn files on disk into alias writes:
//! - [`customize_base_by_addon`]: an addon's overrides of base framework
//!   modules, keyed by `<base package>/<module>`
//! - [`customize_addon_by_project`]: the project's overrides of an addon's
//!   declared files, keyed by `<addon>/<module>`
//!
//! The two key namespaces never overlap. Neither mapper touches the alias
//! table; the composer in [`crate::ops::compose`] merges their output.

pub mod customize_addon;
pub mod customize_base;
pub mod errors;

pub use customize_addon::customize_addon_by_project;
pub use customize_base::customize_base_by_addon;
pub use errors::{OverlayError, Warning};

use std::path::PathBuf;

use crate::core::alias::Layer;
use crate::core::project::Project;

/// One proposed alias write, produced by a mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideCandidate {
    /// File that should be imported instead
    pub source_path: PathBuf,
    /// Module specifier being redirected
    pub module_name: String,
    /// Mapper that produced the candidate
    pub layer: Layer,
}

/// The base framework as seen by the addon mapper.
#[derive(Debug, Clone)]
pub struct BaseFramework {
    /// Canonical package name, the prefix of every base module specifier
    pub name: String,
    /// Folder whose layout addon overrides mirror
    pub source_root: PathBuf,
    /// Fail instead of warning when an override has no base counterpart
    pub strict_targets: bool,
}

impl BaseFramework {
    pub fn for_project(project: &Project) -> Self {
        let settings = project.settings();
        BaseFramework {
            name: settings.base_package.clone(),
            source_root: project.base_source_root(),
            strict_targets: settings.strict_targets,
        }
    }
}
