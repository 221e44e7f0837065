//! # Tweakstone Replacer
//!
//! The batched recipe ingredient replacement engine.
//!
//! A script configures a [`Replacer`](builder::Replacer) with targets,
//! replacement rules, exclusions, and renames; `execute()` snapshots
//! the configuration into a [`ReplacerAction`](action::ReplacerAction)
//! on an [`ActionQueue`](queue::ActionQueue). Nothing is applied until
//! the host's reload pass drains the queue, at which point each action
//! rewrites every targeted recipe in one deterministic sweep.
//!
//! This crate provides:
//! - The three replacement rule variants (recursive, stack-targeting,
//!   exact)
//! - The post-replacement name generator and its fixing pass
//! - The fluent replacer builder
//! - The process-wide default-exclusion cache
//! - The action, the staged rewrite batch, and the action queue

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod builder;
pub mod exclusions;
pub mod naming;
pub mod position;
pub mod queue;
pub mod rules;


/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::*;
    pub use crate::builder::*;
    pub use crate::exclusions::*;
    pub use crate::naming::*;
    pub use crate::position::*;
    pub use crate::queue::*;
    pub use crate::rules::*;
}

pub use prelude::*;
