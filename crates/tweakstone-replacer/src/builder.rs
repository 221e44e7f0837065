//! The user-facing replacer builder.
//!
//! The scripting front-end parses user commands into calls against
//! this type. Replacements accumulate and nothing runs until
//! `execute()`, which snapshots the configuration into an action on
//! the queue; a single reload pass then rewrites everything at once.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use tweakstone_common::{fix_name, ResourceId};
use tweakstone_recipes::{Ingredient, ItemStack, ManagerRegistry, Recipe, RecipeTypeId};

use crate::action::ReplacerAction;
use crate::exclusions::default_exclusions_for;
use crate::naming::{NameGenerator, RenameFn};
use crate::position::{position_prefix, ScriptPosition};
use crate::queue::ActionQueue;
use crate::rules::{ReplacementRule, RuleError};

/// Errors raised while configuring a replacer. Builder-time errors
/// fail fast to the scripting thread.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplacerError {
    /// A factory was called with nothing to target
    #[error("unable to create a replacer without any targeted {0}")]
    EmptyTarget(&'static str),

    /// A rule constructor rejected its ingredients
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Result type alias for replacer configuration.
pub type ReplacerResult<T> = Result<T, ReplacerError>;

/// Accumulates targets, rules, exclusions, and renames for one batched
/// replacement.
///
/// Built through the `for_*` factories, configured through chained
/// mutators, and consumed by [`Replacer::execute`]. Executing twice is
/// permitted and produces two independent actions with the same
/// configuration snapshot.
pub struct Replacer {
    targeted_managers: BTreeSet<RecipeTypeId>,
    targeted_recipes: Vec<Arc<dyn Recipe>>,
    rules: Vec<ReplacementRule>,
    user_renames: BTreeMap<ResourceId, String>,
    user_exclusions: BTreeSet<ResourceId>,
    rename_fn: Option<Arc<RenameFn>>,
    position: Option<ScriptPosition>,
}

impl Replacer {
    fn new(targeted_managers: BTreeSet<RecipeTypeId>, targeted_recipes: Vec<Arc<dyn Recipe>>) -> Self {
        Self {
            targeted_managers,
            targeted_recipes,
            rules: Vec::new(),
            user_renames: BTreeMap::new(),
            user_exclusions: BTreeSet::new(),
            rename_fn: None,
            position: None,
        }
    }

    /// Targets only the given recipes.
    pub fn for_recipes(recipes: Vec<Arc<dyn Recipe>>) -> ReplacerResult<Self> {
        if recipes.is_empty() {
            return Err(ReplacerError::EmptyTarget("recipes"));
        }
        Ok(Self::new(BTreeSet::new(), recipes))
    }

    /// Targets all recipes of the given types.
    pub fn for_types(
        types: impl IntoIterator<Item = RecipeTypeId>,
    ) -> ReplacerResult<Self> {
        let types: BTreeSet<_> = types.into_iter().collect();
        if types.is_empty() {
            return Err(ReplacerError::EmptyTarget("recipe types"));
        }
        Ok(Self::new(types, Vec::new()))
    }

    /// Targets every known recipe type.
    #[must_use]
    pub fn for_all_types(registry: &ManagerRegistry) -> Self {
        Self::for_all_types_excluding(registry, &[])
    }

    /// Targets every known recipe type except the given ones.
    #[must_use]
    pub fn for_all_types_excluding(
        registry: &ManagerRegistry,
        excluded: &[RecipeTypeId],
    ) -> Self {
        let types = registry
            .types()
            .into_iter()
            .filter(|t| !excluded.contains(t))
            .collect();
        Self::new(types, Vec::new())
    }

    /// Records the script position for diagnostics, builder style.
    #[must_use]
    pub fn at_position(mut self, position: ScriptPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Excludes recipes, by identifier, from undergoing replacement.
    #[must_use]
    pub fn excluding(mut self, ids: impl IntoIterator<Item = ResourceId>) -> Self {
        self.user_exclusions.extend(ids);
        self
    }

    /// Appends a recursive rule replacing every match of `from` with
    /// `to`. A stack-valued `from` dispatches to the stack-targeting
    /// specialization; output is identical either way.
    pub fn replace(self, from: Ingredient, to: Ingredient) -> ReplacerResult<Self> {
        if let Ingredient::Stack(stack) = from {
            return self.replace_stack(stack, to);
        }
        let rule = ReplacementRule::recursive(from, to)?;
        Ok(self.with_rule(rule))
    }

    /// Appends a stack-targeting recursive rule.
    pub fn replace_stack(self, from: ItemStack, to: Ingredient) -> ReplacerResult<Self> {
        let rule = ReplacementRule::stack_targeting(from, to)?;
        Ok(self.with_rule(rule))
    }

    /// Appends an exact rule: only ingredients structurally equal to
    /// `from` are replaced, compound ingredients are never descended
    /// into.
    pub fn replace_fully(self, from: Ingredient, to: Ingredient) -> ReplacerResult<Self> {
        let rule = ReplacementRule::exact(from, to)?;
        Ok(self.with_rule(rule))
    }

    /// Renames the recipe currently called `old_id` to `new_name`,
    /// applied only if a replacement is carried out. The name is fixed
    /// on entry; fixing substitutions are reported as a warning.
    ///
    /// A second rename for the same identifier with a different name is
    /// reported and ignored: the first write wins.
    #[must_use]
    pub fn explicitly_rename(mut self, old_id: ResourceId, new_name: &str) -> Self {
        let prefix = position_prefix(self.position.as_ref());

        let mut mistakes = Vec::new();
        let fixed = match fix_name(new_name, |m| mistakes.push(m)) {
            Ok(fixed) => fixed,
            Err(e) => {
                warn!("{prefix}rename '{new_name}' for '{old_id}' is unusable ({e}) and will be ignored");
                return self;
            }
        };
        if !mistakes.is_empty() {
            warn!(
                "{prefix}invalid recipe rename '{new_name}' from '{old_id}', mistakes:\n{}\nthe new rename '{fixed}' will be used",
                mistakes.join("\n")
            );
        }

        if let Some(existing) = self.user_renames.get(&old_id) {
            if existing != &fixed {
                warn!(
                    "{prefix}the same old name '{old_id}' has been specified twice for renaming \
                     with '{existing}' and '{fixed}': only the former will apply"
                );
            }
            return self;
        }

        self.user_renames.insert(old_id, fixed);
        self
    }

    /// Sets the renaming function applied to every rewritten recipe.
    /// Setting it twice keeps the latest and emits a warning.
    #[must_use]
    pub fn use_for_renaming(mut self, function: Arc<RenameFn>) -> Self {
        if self.rename_fn.is_some() {
            warn!(
                "{}a renaming function has already been specified for this replacer: the old one will be replaced",
                position_prefix(self.position.as_ref())
            );
        }
        self.rename_fn = Some(function);
        self
    }

    /// Enqueues an action carrying this configuration.
    ///
    /// A replacer with no rules is a no-op and enqueues nothing. The
    /// default exclusions of every targeted manager are gathered (and
    /// memoized) here, at execute time.
    pub fn execute(&self, registry: &ManagerRegistry, queue: &mut ActionQueue) {
        if self.rules.is_empty() {
            return;
        }

        let mut default_exclusions = BTreeSet::new();
        for recipe_type in &self.targeted_managers {
            if let Some(manager) = registry.get(recipe_type) {
                default_exclusions.extend(default_exclusions_for(manager).iter().cloned());
            }
        }

        queue.enqueue(ReplacerAction::new(
            self.targeted_managers.clone(),
            self.targeted_recipes.clone(),
            self.rules.clone(),
            default_exclusions,
            self.user_exclusions.clone(),
            NameGenerator::new(
                self.user_renames.clone(),
                self.rename_fn.clone(),
                self.position.clone(),
            ),
            self.position.clone(),
        ));
    }

    fn with_rule(mut self, rule: Option<ReplacementRule>) -> Self {
        // No-op rules are dropped at insertion.
        if let Some(rule) = rule {
            self.rules.push(rule);
        }
        self
    }
}

impl std::fmt::Debug for Replacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Replacer")
            .field("targeted_managers", &self.targeted_managers)
            .field("targeted_recipes", &self.targeted_recipes.len())
            .field("rules", &self.rules.len())
            .field("user_renames", &self.user_renames)
            .field("user_exclusions", &self.user_exclusions)
            .field("has_rename_fn", &self.rename_fn.is_some())
            .field("position", &self.position)
            .finish()
    }
}
