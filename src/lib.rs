//! addon-overlay - module alias composition for addon-based frontends
//!
//! This crate computes the module alias table that lets addons override
//! files of a base framework and lets a project override files of its
//! addons, and applies it to a host build configuration.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It writes complete project trees to temporary
/// directories.
#[cfg(test)]
pub mod test_support;

pub use core::{
    alias::AliasTable, build_config::BuildConfiguration, package::PackageDescriptor,
    project::Project,
};

pub use ops::{compose, configure, Composition, ConfigureOptions};
pub use resolver::{OverlayError, Warning};
pub use util::context::GlobalContext;
