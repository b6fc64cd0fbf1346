//! # Spillway Testkit
//!
//! Test utilities for Spillway.
//!
//! This crate provides:
//! - Temp-dir backed list fixtures
//! - Property-based test generators using proptest
//! - Test logging setup
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spillway_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_list() {
//!     with_temp_list::<u32, _>(2, |list| {
//!         list.push(1).unwrap();
//!         assert_eq!(list.len(), 1);
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod logging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::logging::*;
}

pub use fixtures::*;
pub use generators::*;
pub use logging::*;
