//! Tag identifiers and the tag-membership registry.
//!
//! Tags are named groups of items resolved by the host game. The engine
//! only consumes membership queries; the registry here is populated at
//! startup and read-only afterwards.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;

use tweakstone_common::ResourceId;

use crate::stack::ItemStack;

/// Identifier of a named item group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TagId(ResourceId);

impl TagId {
    /// Wraps a resource identifier as a tag identifier.
    #[must_use]
    pub const fn new(id: ResourceId) -> Self {
        Self(id)
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub fn id(&self) -> &ResourceId {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<tag:{}>", self.0)
    }
}

/// Registry mapping tags to their member items.
///
/// Built once at startup from the host's tag data; all engine queries
/// are read-only. Unknown tags resolve to the empty set.
#[derive(Debug, Default)]
pub struct TagRegistry {
    tags: AHashMap<TagId, AHashSet<ResourceId>>,
}

impl TagRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the member items of a tag, replacing any previous set.
    pub fn register(&mut self, tag: TagId, items: impl IntoIterator<Item = ResourceId>) {
        self.tags.insert(tag, items.into_iter().collect());
    }

    /// Checks whether `stack`'s item is a member of `tag`.
    #[must_use]
    pub fn contains(&self, tag: &TagId, stack: &ItemStack) -> bool {
        self.tags
            .get(tag)
            .is_some_and(|items| items.contains(&stack.item))
    }

    /// Returns the member items of a tag, if known.
    #[must_use]
    pub fn get(&self, tag: &TagId) -> Option<&AHashSet<ResourceId>> {
        self.tags.get(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ResourceId {
        s.parse().expect("valid id")
    }

    #[test]
    fn test_membership() {
        let mut registry = TagRegistry::new();
        let stones = TagId::new(id("minecraft:stones"));
        registry.register(stones.clone(), [id("minecraft:stone"), id("minecraft:andesite")]);

        assert!(registry.contains(&stones, &ItemStack::of(id("minecraft:stone"))));
        assert!(!registry.contains(&stones, &ItemStack::of(id("minecraft:diamond"))));
    }

    #[test]
    fn test_unknown_tag_is_empty() {
        let registry = TagRegistry::new();
        let tag = TagId::new(id("forge:storage_blocks/redstone"));
        assert!(!registry.contains(&tag, &ItemStack::of(id("minecraft:redstone_block"))));
        assert!(registry.get(&tag).is_none());
    }

    #[test]
    fn test_display() {
        let tag = TagId::new(id("minecraft:anvil"));
        assert_eq!(tag.to_string(), "<tag:minecraft:anvil>");
    }
}
