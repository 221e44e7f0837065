//! The batched replacement executor.
//!
//! A `ReplacerAction` is a by-value snapshot of one replacer's
//! configuration, taken at `execute` time. At apply time it sweeps the
//! targeted recipes in ascending identifier order, rewrites their
//! slots through the rule list, renames the changed ones, and stages
//! the resulting operations into a [`RewriteBatch`]. Nothing touches
//! the managers until the whole sweep has finished and the batch
//! commits, so a per-recipe failure can never leave the registry half
//! rewritten.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, error, warn};

use tweakstone_common::ResourceId;
use tweakstone_recipes::{ManagerRegistry, Recipe, RecipeManager, RecipeTypeId, TagRegistry};

use crate::naming::NameGenerator;
use crate::position::{position_prefix, ScriptPosition};
use crate::rules::{apply_all, ReplacementRule};

/// The staged result of one action: recipes to remove and their
/// replacements to add. Atomic at the action-queue boundary.
#[derive(Debug, Default)]
pub struct RewriteBatch {
    removals: BTreeSet<ResourceId>,
    additions: Vec<(ResourceId, Arc<dyn Recipe>)>,
}

impl RewriteBatch {
    /// Stages `remove(old_id)` followed by `add(new_recipe)`.
    pub fn stage(&mut self, old_id: ResourceId, new_recipe: Arc<dyn Recipe>) {
        self.removals.insert(old_id.clone());
        self.additions.push((old_id, new_recipe));
    }

    /// Identifiers staged for removal.
    #[must_use]
    pub fn removals(&self) -> &BTreeSet<ResourceId> {
        &self.removals
    }

    /// Staged `(old identifier, new recipe)` pairs.
    #[must_use]
    pub fn additions(&self) -> &[(ResourceId, Arc<dyn Recipe>)] {
        &self.additions
    }

    /// Number of staged rewrites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.additions.len()
    }

    /// Whether nothing was staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty()
    }

    /// Commits the batch: for each staged rewrite, the old recipe is
    /// removed and the new one added, in that order.
    pub fn commit(self, registry: &mut ManagerRegistry) {
        for (old_id, recipe) in self.additions {
            let recipe_type = recipe.recipe_type();
            let Some(manager) = registry.get_mut(&recipe_type) else {
                warn!("no manager for recipe type '{recipe_type}'; dropping rewrite of '{old_id}'");
                continue;
            };
            if self.removals.contains(&old_id) {
                manager.remove(&old_id);
            }
            manager.add(recipe);
        }
    }
}

/// A batched replacement pass over a set of recipes.
#[derive(Debug)]
pub struct ReplacerAction {
    targeted_managers: BTreeSet<RecipeTypeId>,
    targeted_recipes: Vec<Arc<dyn Recipe>>,
    rules: Vec<ReplacementRule>,
    default_exclusions: BTreeSet<ResourceId>,
    user_exclusions: BTreeSet<ResourceId>,
    names: NameGenerator,
    position: Option<ScriptPosition>,
}

impl ReplacerAction {
    /// Creates an action from a replacer's configuration snapshot.
    #[must_use]
    pub fn new(
        targeted_managers: BTreeSet<RecipeTypeId>,
        targeted_recipes: Vec<Arc<dyn Recipe>>,
        rules: Vec<ReplacementRule>,
        default_exclusions: BTreeSet<ResourceId>,
        user_exclusions: BTreeSet<ResourceId>,
        names: NameGenerator,
        position: Option<ScriptPosition>,
    ) -> Self {
        Self {
            targeted_managers,
            targeted_recipes,
            rules,
            default_exclusions,
            user_exclusions,
            names,
            position,
        }
    }

    /// Runs the replacement pass and returns the staged batch.
    ///
    /// Per-recipe failures are logged and skipped; they never corrupt
    /// the batch, which the caller commits only after the full sweep.
    #[must_use]
    pub fn apply(&self, registry: &ManagerRegistry, tags: &TagRegistry) -> RewriteBatch {
        let mut batch = RewriteBatch::default();
        let mut warned_types = BTreeSet::new();

        for (id, recipe) in self.working_set(registry) {
            if self.default_exclusions.contains(&id) || self.user_exclusions.contains(&id) {
                continue;
            }
            if let Some((old_id, new_recipe)) =
                self.rewrite_one(&recipe, registry, tags, &mut warned_types)
            {
                batch.stage(old_id, new_recipe);
            }
        }

        debug!(
            "{}replacer action staged {} rewrites across {} rules",
            position_prefix(self.position.as_ref()),
            batch.len(),
            self.rules.len()
        );
        batch
    }

    /// Resolves the recipes this action works on, in ascending
    /// identifier order.
    fn working_set(&self, registry: &ManagerRegistry) -> BTreeMap<ResourceId, Arc<dyn Recipe>> {
        let mut recipes = BTreeMap::new();
        if self.targeted_recipes.is_empty() {
            for recipe_type in &self.targeted_managers {
                if let Some(manager) = registry.get(recipe_type) {
                    for recipe in manager.recipes() {
                        recipes.insert(recipe.id().clone(), Arc::clone(recipe));
                    }
                }
            }
        } else {
            for recipe in &self.targeted_recipes {
                recipes.insert(recipe.id().clone(), Arc::clone(recipe));
            }
        }
        recipes
    }

    fn rewrite_one(
        &self,
        recipe: &Arc<dyn Recipe>,
        registry: &ManagerRegistry,
        tags: &TagRegistry,
        warned_types: &mut BTreeSet<RecipeTypeId>,
    ) -> Option<(ResourceId, Arc<dyn Recipe>)> {
        let prefix = position_prefix(self.position.as_ref());
        let id = recipe.id();
        let recipe_type = recipe.recipe_type();

        let adapter = registry
            .get(&recipe_type)
            .and_then(RecipeManager::adapter)
            .filter(|adapter| adapter.supports_replacement(recipe.as_ref()));
        let Some(adapter) = adapter else {
            if warned_types.insert(recipe_type.clone()) {
                warn!("{prefix}recipes of type '{recipe_type}' do not support replacement; skipping them");
            }
            return None;
        };

        let Some(slots) = adapter.slots(recipe.as_ref()) else {
            error!("{prefix}adapter for '{recipe_type}' could not read the slots of '{id}'; skipping it");
            return None;
        };

        let mut new_slots = Vec::with_capacity(slots.len());
        for slot in &slots {
            match apply_all(&self.rules, slot, tags) {
                Ok(rewritten) => new_slots.push(rewritten),
                Err(e) => {
                    error!("{prefix}skipping '{id}': {e}");
                    return None;
                }
            }
        }

        let changed = slots
            .iter()
            .zip(&new_slots)
            .any(|(old, new)| old.canonicalize() != new.canonicalize());
        if !changed {
            return None;
        }

        let new_id = self.names.generate(id);
        match adapter.rebuild(recipe.as_ref(), new_slots, new_id) {
            Some(new_recipe) => Some((id.clone(), new_recipe)),
            None => {
                error!("{prefix}adapter for '{recipe_type}' failed to rebuild '{id}'; skipping it");
                None
            }
        }
    }
}
