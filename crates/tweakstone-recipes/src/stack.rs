//! Item stacks: a concrete item with a count and optional metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use tweakstone_common::ResourceId;

/// A concrete quantity of one item, with optional metadata such as
/// damage or custom data attached by the host game.
///
/// Equality is structural: item, count, and metadata all participate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item identifier
    pub item: ResourceId,
    /// Stack size
    pub count: u32,
    /// Metadata entries, ordered for stable equality
    pub metadata: BTreeMap<String, String>,
}

impl ItemStack {
    /// Creates a stack of `count` items.
    #[must_use]
    pub fn new(item: ResourceId, count: u32) -> Self {
        Self {
            item,
            count,
            metadata: BTreeMap::new(),
        }
    }

    /// Creates a stack of a single item.
    #[must_use]
    pub fn of(item: ResourceId) -> Self {
        Self::new(item, 1)
    }

    /// Attaches a metadata entry, builder style.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Checks whether `other` holds the same item, ignoring count and
    /// metadata.
    #[must_use]
    pub fn same_item(&self, other: &Self) -> bool {
        self.item == other.item
    }

    /// Checks whether `candidate` satisfies this stack when used as a
    /// pattern: same item, same metadata, and at least as many items.
    #[must_use]
    pub fn accepts(&self, candidate: &Self) -> bool {
        self.item == candidate.item
            && self.metadata == candidate.metadata
            && candidate.count >= self.count
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            write!(f, "<item:{}>", self.item)
        } else {
            write!(f, "<item:{}> * {}", self.item, self.count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> ResourceId {
        ResourceId::new("minecraft", name).expect("valid id")
    }

    #[test]
    fn test_same_item_ignores_count() {
        let a = ItemStack::new(item("stone"), 3);
        let b = ItemStack::of(item("stone"));
        assert!(a.same_item(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_accepts_requires_count_and_metadata() {
        let pattern = ItemStack::new(item("stone"), 2);
        assert!(pattern.accepts(&ItemStack::new(item("stone"), 2)));
        assert!(pattern.accepts(&ItemStack::new(item("stone"), 5)));
        assert!(!pattern.accepts(&ItemStack::new(item("stone"), 1)));
        assert!(!pattern.accepts(&ItemStack::new(item("diamond"), 2)));

        let damaged = ItemStack::new(item("stone"), 2).with_metadata("damage", "3");
        assert!(!pattern.accepts(&damaged));
        assert!(damaged.accepts(&damaged.clone()));
    }

    #[test]
    fn test_display() {
        assert_eq!(ItemStack::of(item("stone")).to_string(), "<item:minecraft:stone>");
        assert_eq!(
            ItemStack::new(item("stone"), 4).to_string(),
            "<item:minecraft:stone> * 4"
        );
    }
}
