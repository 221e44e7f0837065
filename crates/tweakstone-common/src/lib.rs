//! # Tweakstone Common
//!
//! Common types and utilities shared across the Tweakstone toolkit.
//!
//! This crate provides foundational types used by every subsystem:
//! - Resource identifiers (`namespace:path`) with charset validation
//! - The autogenerated-name scheme for rewritten recipes
//! - The name-fixing pass that turns arbitrary user input into a legal path
//! - Common error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;
pub mod names;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::names::*;
}

pub use prelude::*;
