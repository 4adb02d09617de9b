//! Core data structures.
//!
//! This module contains the foundational types used throughout the crate:
//! - Package manifests and the project's path mapping
//! - Package discovery and descriptors
//! - The layered alias table
//! - The host build configuration

pub mod alias;
pub mod build_config;
pub mod manifest;
pub mod package;
pub mod path_mapping;
pub mod project;
pub mod source_files;

pub use alias::{AliasTable, Layer, ResolvedAliases};
pub use build_config::BuildConfiguration;
pub use manifest::PackageManifest;
pub use package::PackageDescriptor;
pub use path_mapping::PathMapping;
pub use project::Project;
