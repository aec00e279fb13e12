//! Common types module for the feature factory system.
//!
//! This module defines the data types shared by every crate in the workspace:
//! the configuration mapping handed to constructors, the registry that maps
//! type tags to constructors, and the schema framework implementations use to
//! check their configuration.

/// Feature configuration mapping and the reserved type tag key.
pub mod config;
/// Type tag registry and the trait each implementation declares itself with.
pub mod registry;
/// Configuration validation types for implementation-specific fields.
pub mod validation;

pub use config::*;
pub use registry::*;
pub use validation::*;
