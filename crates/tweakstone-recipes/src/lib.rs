//! # Tweakstone Recipes
//!
//! The recipe data model consumed by the replacement engine.
//!
//! This crate provides:
//! - Item stacks with counts and metadata
//! - Tag identifiers and the tag-membership registry
//! - The recursive ingredient algebra (stacks, tags, unions, empty)
//! - Opaque recipes, concrete recipe shapes, and per-type adapters
//! - Recipe managers and the manager registry

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ingredient;
pub mod manager;
pub mod recipe;
pub mod stack;
pub mod tags;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ingredient::*;
    pub use crate::manager::*;
    pub use crate::recipe::*;
    pub use crate::stack::*;
    pub use crate::tags::*;
}

pub use prelude::*;
