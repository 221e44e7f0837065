//! Recipe managers and the per-type adapter registry.
//!
//! Each recipe type maps to one manager, which stores that type's
//! recipes in identifier order and carries the adapter that knows how
//! to read and rebuild them. Replacement is opt-in: a manager without
//! an adapter, or an adapter that cannot faithfully rebuild a shape,
//! is skipped by the engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use tweakstone_common::ResourceId;

use crate::ingredient::Ingredient;
use crate::recipe::{
    Recipe, RecipeTypeId, ShapedRecipe, ShapelessRecipe, SmeltingRecipe, StonecuttingRecipe,
};

/// Exposes a recipe's ingredient slots and rebuilds modified recipes.
///
/// `rebuild` must preserve every non-ingredient attribute of the
/// original: output, group, cooking time, and so on. Adapters that
/// cannot do so faithfully must report `supports_replacement` as
/// `false` for the shape in question. Both `slots` and `rebuild`
/// return `None` for shapes the adapter does not understand.
pub trait RecipeAdapter: Send + Sync {
    /// Returns the recipe's ingredient slots as an ordered sequence.
    fn slots(&self, recipe: &dyn Recipe) -> Option<Vec<Ingredient>>;

    /// Rebuilds the recipe with new slots under a new identifier.
    fn rebuild(
        &self,
        recipe: &dyn Recipe,
        slots: Vec<Ingredient>,
        new_id: ResourceId,
    ) -> Option<Arc<dyn Recipe>>;

    /// Whether this adapter can faithfully rebuild the given recipe.
    fn supports_replacement(&self, recipe: &dyn Recipe) -> bool;
}

/// Adapter for the crafting type: shaped and shapeless recipes.
#[derive(Debug, Default)]
pub struct CraftingAdapter;

impl RecipeAdapter for CraftingAdapter {
    fn slots(&self, recipe: &dyn Recipe) -> Option<Vec<Ingredient>> {
        if let Some(shaped) = recipe.as_any().downcast_ref::<ShapedRecipe>() {
            return Some(shaped.slots.clone());
        }
        if let Some(shapeless) = recipe.as_any().downcast_ref::<ShapelessRecipe>() {
            return Some(shapeless.slots.clone());
        }
        None
    }

    fn rebuild(
        &self,
        recipe: &dyn Recipe,
        slots: Vec<Ingredient>,
        new_id: ResourceId,
    ) -> Option<Arc<dyn Recipe>> {
        if let Some(shaped) = recipe.as_any().downcast_ref::<ShapedRecipe>() {
            if slots.len() != shaped.slots.len() {
                return None;
            }
            let mut rebuilt = shaped.clone();
            rebuilt.id = new_id;
            rebuilt.slots = slots;
            return Some(Arc::new(rebuilt));
        }
        if let Some(shapeless) = recipe.as_any().downcast_ref::<ShapelessRecipe>() {
            let mut rebuilt = shapeless.clone();
            rebuilt.id = new_id;
            rebuilt.slots = slots;
            return Some(Arc::new(rebuilt));
        }
        None
    }

    fn supports_replacement(&self, recipe: &dyn Recipe) -> bool {
        recipe.as_any().downcast_ref::<ShapedRecipe>().is_some()
            || recipe.as_any().downcast_ref::<ShapelessRecipe>().is_some()
    }
}

/// Adapter for smelting recipes.
#[derive(Debug, Default)]
pub struct SmeltingAdapter;

impl RecipeAdapter for SmeltingAdapter {
    fn slots(&self, recipe: &dyn Recipe) -> Option<Vec<Ingredient>> {
        let smelting = recipe.as_any().downcast_ref::<SmeltingRecipe>()?;
        Some(vec![smelting.slot.clone()])
    }

    fn rebuild(
        &self,
        recipe: &dyn Recipe,
        mut slots: Vec<Ingredient>,
        new_id: ResourceId,
    ) -> Option<Arc<dyn Recipe>> {
        let smelting = recipe.as_any().downcast_ref::<SmeltingRecipe>()?;
        if slots.len() != 1 {
            return None;
        }
        let mut rebuilt = smelting.clone();
        rebuilt.id = new_id;
        rebuilt.slot = slots.remove(0);
        Some(Arc::new(rebuilt))
    }

    fn supports_replacement(&self, recipe: &dyn Recipe) -> bool {
        recipe.as_any().downcast_ref::<SmeltingRecipe>().is_some()
    }
}

/// Adapter for stonecutting recipes.
#[derive(Debug, Default)]
pub struct StonecuttingAdapter;

impl RecipeAdapter for StonecuttingAdapter {
    fn slots(&self, recipe: &dyn Recipe) -> Option<Vec<Ingredient>> {
        let cutting = recipe.as_any().downcast_ref::<StonecuttingRecipe>()?;
        Some(vec![cutting.slot.clone()])
    }

    fn rebuild(
        &self,
        recipe: &dyn Recipe,
        mut slots: Vec<Ingredient>,
        new_id: ResourceId,
    ) -> Option<Arc<dyn Recipe>> {
        let cutting = recipe.as_any().downcast_ref::<StonecuttingRecipe>()?;
        if slots.len() != 1 {
            return None;
        }
        let mut rebuilt = cutting.clone();
        rebuilt.id = new_id;
        rebuilt.slot = slots.remove(0);
        Some(Arc::new(rebuilt))
    }

    fn supports_replacement(&self, recipe: &dyn Recipe) -> bool {
        recipe.as_any().downcast_ref::<StonecuttingRecipe>().is_some()
    }
}

/// Handler for one recipe type: ordered recipe store plus adapter.
pub struct RecipeManager {
    recipe_type: RecipeTypeId,
    adapter: Option<Arc<dyn RecipeAdapter>>,
    recipes: BTreeMap<ResourceId, Arc<dyn Recipe>>,
}

impl RecipeManager {
    /// Creates a manager without replacement support.
    #[must_use]
    pub fn new(recipe_type: RecipeTypeId) -> Self {
        Self {
            recipe_type,
            adapter: None,
            recipes: BTreeMap::new(),
        }
    }

    /// Attaches the adapter enabling replacement, builder style.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn RecipeAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// The recipe type this manager handles.
    #[must_use]
    pub fn recipe_type(&self) -> &RecipeTypeId {
        &self.recipe_type
    }

    /// The adapter, if this manager supports replacement at all.
    #[must_use]
    pub fn adapter(&self) -> Option<&Arc<dyn RecipeAdapter>> {
        self.adapter.as_ref()
    }

    /// Adds a recipe, replacing any recipe with the same identifier.
    pub fn add(&mut self, recipe: Arc<dyn Recipe>) {
        if self.recipes.insert(recipe.id().clone(), recipe).is_some() {
            debug!("a recipe was overwritten in '{}'", self.recipe_type);
        }
    }

    /// Removes a recipe by identifier.
    pub fn remove(&mut self, id: &ResourceId) -> Option<Arc<dyn Recipe>> {
        self.recipes.remove(id)
    }

    /// Looks up a recipe by identifier.
    #[must_use]
    pub fn get(&self, id: &ResourceId) -> Option<&Arc<dyn Recipe>> {
        self.recipes.get(id)
    }

    /// Iterates recipes in ascending identifier order.
    pub fn recipes(&self) -> impl Iterator<Item = &Arc<dyn Recipe>> {
        self.recipes.values()
    }

    /// Number of stored recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the manager holds no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl std::fmt::Debug for RecipeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeManager")
            .field("recipe_type", &self.recipe_type)
            .field("recipes", &self.recipes.len())
            .field("has_adapter", &self.adapter.is_some())
            .finish()
    }
}

/// Registry of all known recipe managers, keyed by recipe type.
///
/// Read-only after startup as far as the engine is concerned; batch
/// commits mutate the stored recipes on the host's reload thread.
#[derive(Debug, Default)]
pub struct ManagerRegistry {
    managers: BTreeMap<RecipeTypeId, RecipeManager>,
}

impl ManagerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with the vanilla managers and
    /// their adapters: crafting, smelting, and stonecutting.
    #[must_use]
    pub fn with_vanilla_managers() -> Self {
        let mut registry = Self::new();
        registry.register(
            RecipeManager::new(RecipeTypeId::crafting()).with_adapter(Arc::new(CraftingAdapter)),
        );
        registry.register(
            RecipeManager::new(RecipeTypeId::smelting()).with_adapter(Arc::new(SmeltingAdapter)),
        );
        registry.register(
            RecipeManager::new(RecipeTypeId::stonecutting())
                .with_adapter(Arc::new(StonecuttingAdapter)),
        );
        registry
    }

    /// Registers a manager, replacing any manager for the same type.
    pub fn register(&mut self, manager: RecipeManager) {
        self.managers.insert(manager.recipe_type().clone(), manager);
    }

    /// Looks up the manager for a recipe type.
    #[must_use]
    pub fn get(&self, recipe_type: &RecipeTypeId) -> Option<&RecipeManager> {
        self.managers.get(recipe_type)
    }

    /// Mutable manager lookup, used when committing a batch.
    pub fn get_mut(&mut self, recipe_type: &RecipeTypeId) -> Option<&mut RecipeManager> {
        self.managers.get_mut(recipe_type)
    }

    /// Iterates all managers in recipe-type order.
    pub fn all(&self) -> impl Iterator<Item = &RecipeManager> {
        self.managers.values()
    }

    /// All known recipe types in order.
    #[must_use]
    pub fn types(&self) -> Vec<RecipeTypeId> {
        self.managers.keys().cloned().collect()
    }
}
