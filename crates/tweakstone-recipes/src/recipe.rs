//! Recipe types and concrete recipe shapes.
//!
//! Recipes are opaque to the replacement engine: only the adapter for a
//! recipe's type knows how to read its ingredient slots and rebuild it.
//! The shapes here mirror the vanilla recipe families the host game
//! ships (shaped and shapeless crafting, smelting, stonecutting); mods
//! contribute their own shapes together with an adapter.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

use tweakstone_common::ResourceId;

use crate::ingredient::Ingredient;
use crate::stack::ItemStack;

/// Identifier of a recipe type, such as `minecraft:crafting`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecipeTypeId(ResourceId);

impl RecipeTypeId {
    /// Wraps a resource identifier as a recipe type.
    #[must_use]
    pub const fn new(id: ResourceId) -> Self {
        Self(id)
    }

    /// Returns the underlying identifier.
    #[must_use]
    pub fn id(&self) -> &ResourceId {
        &self.0
    }

    /// The crafting recipe type (shaped and shapeless).
    #[must_use]
    pub fn crafting() -> Self {
        Self(ResourceId::new("minecraft", "crafting").expect("legal literal"))
    }

    /// The smelting recipe type.
    #[must_use]
    pub fn smelting() -> Self {
        Self(ResourceId::new("minecraft", "smelting").expect("legal literal"))
    }

    /// The stonecutting recipe type.
    #[must_use]
    pub fn stonecutting() -> Self {
        Self(ResourceId::new("minecraft", "stonecutting").expect("legal literal"))
    }
}

impl fmt::Display for RecipeTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An externally owned recipe.
///
/// The engine never mutates a recipe in place; rewrites always produce
/// a new one through the type's adapter.
pub trait Recipe: fmt::Debug + Send + Sync {
    /// The identifier uniquely naming this recipe.
    fn id(&self) -> &ResourceId;

    /// The recipe-type tag used for manager and adapter lookup.
    fn recipe_type(&self) -> RecipeTypeId;

    /// Downcast support for adapters.
    fn as_any(&self) -> &dyn Any;
}

/// A shaped crafting recipe: a fixed grid of ingredient slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapedRecipe {
    /// Recipe identifier
    pub id: ResourceId,
    /// Grid width
    pub width: u8,
    /// Grid height
    pub height: u8,
    /// Slots in row-major order; empty grid positions hold
    /// `Ingredient::Empty`
    pub slots: Vec<Ingredient>,
    /// Crafting result
    pub output: ItemStack,
    /// Recipe-book group
    pub group: Option<String>,
}

impl ShapedRecipe {
    /// Creates a shaped recipe. `slots` must be row-major with
    /// `width * height` entries.
    #[must_use]
    pub fn new(
        id: ResourceId,
        width: u8,
        height: u8,
        slots: Vec<Ingredient>,
        output: ItemStack,
    ) -> Self {
        debug_assert_eq!(slots.len(), usize::from(width) * usize::from(height));
        Self {
            id,
            width,
            height,
            slots,
            output,
            group: None,
        }
    }

    /// Sets the recipe-book group, builder style.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl Recipe for ShapedRecipe {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn recipe_type(&self) -> RecipeTypeId {
        RecipeTypeId::crafting()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A shapeless crafting recipe: an unordered bag of ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapelessRecipe {
    /// Recipe identifier
    pub id: ResourceId,
    /// Required ingredients
    pub slots: Vec<Ingredient>,
    /// Crafting result
    pub output: ItemStack,
    /// Recipe-book group
    pub group: Option<String>,
}

impl ShapelessRecipe {
    /// Creates a shapeless recipe.
    #[must_use]
    pub fn new(id: ResourceId, slots: Vec<Ingredient>, output: ItemStack) -> Self {
        Self {
            id,
            slots,
            output,
            group: None,
        }
    }

    /// Sets the recipe-book group, builder style.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl Recipe for ShapelessRecipe {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn recipe_type(&self) -> RecipeTypeId {
        RecipeTypeId::crafting()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A smelting recipe: one input slot, a cooking time, and experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmeltingRecipe {
    /// Recipe identifier
    pub id: ResourceId,
    /// Input slot
    pub slot: Ingredient,
    /// Smelting result
    pub output: ItemStack,
    /// Experience granted per smelt
    pub experience: f32,
    /// Cooking time in ticks
    pub cooking_time: u32,
}

impl SmeltingRecipe {
    /// Creates a smelting recipe.
    #[must_use]
    pub fn new(
        id: ResourceId,
        slot: Ingredient,
        output: ItemStack,
        experience: f32,
        cooking_time: u32,
    ) -> Self {
        Self {
            id,
            slot,
            output,
            experience,
            cooking_time,
        }
    }
}

impl Recipe for SmeltingRecipe {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn recipe_type(&self) -> RecipeTypeId {
        RecipeTypeId::smelting()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A stonecutting recipe: one input slot and a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StonecuttingRecipe {
    /// Recipe identifier
    pub id: ResourceId,
    /// Input slot
    pub slot: Ingredient,
    /// Cutting result
    pub output: ItemStack,
}

impl StonecuttingRecipe {
    /// Creates a stonecutting recipe.
    #[must_use]
    pub fn new(id: ResourceId, slot: Ingredient, output: ItemStack) -> Self {
        Self { id, slot, output }
    }
}

impl Recipe for StonecuttingRecipe {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn recipe_type(&self) -> RecipeTypeId {
        RecipeTypeId::stonecutting()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ResourceId {
        s.parse().expect("valid id")
    }

    fn stone() -> Ingredient {
        Ingredient::stack(ItemStack::of(id("minecraft:stone")))
    }

    #[test]
    fn test_shaped_recipe_type() {
        let recipe = ShapedRecipe::new(
            id("minecraft:piston"),
            1,
            1,
            vec![stone()],
            ItemStack::of(id("minecraft:piston")),
        );
        assert_eq!(recipe.recipe_type(), RecipeTypeId::crafting());
        assert_eq!(recipe.id(), &id("minecraft:piston"));
    }

    #[test]
    fn test_shapeless_shares_crafting_type() {
        let recipe = ShapelessRecipe::new(
            id("minecraft:flint"),
            vec![stone()],
            ItemStack::of(id("minecraft:flint")),
        );
        assert_eq!(recipe.recipe_type(), RecipeTypeId::crafting());
    }

    #[test]
    fn test_downcast_through_trait_object() {
        let recipe: Box<dyn Recipe> = Box::new(StonecuttingRecipe::new(
            id("minecraft:stone_slab"),
            stone(),
            ItemStack::new(id("minecraft:stone_slab"), 2),
        ));
        let concrete = recipe
            .as_any()
            .downcast_ref::<StonecuttingRecipe>()
            .expect("downcasts");
        assert_eq!(concrete.output.count, 2);
        assert!(recipe.as_any().downcast_ref::<ShapedRecipe>().is_none());
    }
}
