//! Test utilities for unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::ProjectFixture;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = ProjectFixture::new(&["addon-a"])
//!         .base_file("views/View.jsx")
//!         .addon("addon-a", Some("src/customizations"))
//!         .addon_file("addon-a", "src/customizations/views/View.jsx")
//!         .build();
//!
//!     let project = fixture.load().unwrap();
//!     // Compose against the fixture...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
