//! Resolution error types and diagnostics.
//!
//! Fatal problems are [`OverlayError`]s and abort the pass. Everything else
//! is a [`Warning`]: it is collected, reported, and the pass carries on.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal error raised while resolving customizations.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum OverlayError {
    #[error(
        "could not find `{manifest}` within {max_depth} directories upward from {}",
        start.display()
    )]
    #[diagnostic(
        code(addon_overlay::package::not_found),
        help("check that the package is installed or mounted in the path mapping")
    )]
    PackageNotFound {
        start: PathBuf,
        manifest: String,
        max_depth: usize,
    },

    #[error("addon `{name}` is not installed: {} does not exist", location.display())]
    #[diagnostic(
        code(addon_overlay::package::missing),
        help("install the addon or mount it in the path mapping")
    )]
    PackageMissing { name: String, location: PathBuf },

    #[error("unexpected build configuration shape: {what}")]
    #[diagnostic(
        code(addon_overlay::config::shape),
        help("the host build tool may have changed its default rules")
    )]
    ConfigurationShape { what: String },

    #[error("failed to read manifest {}", path.display())]
    #[diagnostic(code(addon_overlay::manifest::io))]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {}", path.display())]
    #[diagnostic(code(addon_overlay::manifest::parse))]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("addon `{addon}` customizes missing base file `{module}`")]
    #[diagnostic(
        code(addon_overlay::customize::missing_target),
        help("remove the stale customization or disable `strict_targets`")
    )]
    MissingCustomizationTarget {
        addon: String,
        module: String,
        expected: PathBuf,
    },
}

/// Non-fatal problem found while composing the alias table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An addon ships an override for a base file that does not exist.
    /// The alias is still registered but has no effect at run time.
    MissingCustomizationTarget {
        addon: String,
        module: String,
        expected: PathBuf,
    },

    /// A write targets an alias key that an earlier write already defined.
    /// The later write wins.
    AliasCollision {
        addon: String,
        key: String,
        previous: PathBuf,
        replacement: PathBuf,
    },
}

impl Warning {
    /// The addon that triggered this warning.
    pub fn addon(&self) -> &str {
        match self {
            Warning::MissingCustomizationTarget { addon, .. } => addon,
            Warning::AliasCollision { addon, .. } => addon,
        }
    }

    /// Short machine-friendly kind tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Warning::MissingCustomizationTarget { .. } => "missing-customization-target",
            Warning::AliasCollision { .. } => "alias-collision",
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::MissingCustomizationTarget {
                addon,
                module,
                expected,
            } => Diagnostic::warning(format!(
                "addon `{}` customizes non-existing base file `{}`",
                addon, module
            ))
            .with_location(expected)
            .with_context("the alias is registered but will never be imported")
            .with_suggestion(suggestions::STALE_CUSTOMIZATION),

            Warning::AliasCollision {
                addon,
                key,
                previous,
                replacement,
            } => Diagnostic::warning(format!(
                "alias `{}` already exists; the override from `{}` replaces it",
                key, addon
            ))
            .with_context(format!("previously set to {}", previous.display()))
            .with_context(format!("now set to {}", replacement.display()))
            .with_suggestion(suggestions::ADDON_ORDER),
        }
    }
}
