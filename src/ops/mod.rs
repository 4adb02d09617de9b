//! High-level operations.
//!
//! This module contains the implementation of the overlay commands.

pub mod compose;
pub mod configure;

pub use compose::{compose, seed_path_mappings, Composition};
pub use configure::{configure, default_plugins, ConfigureOptions};
