//! Process-wide default-exclusion cache.
//!
//! Before a manager's recipes undergo replacement, registered gather
//! hooks (the stand-in for the host's event bus) are asked which
//! recipes must never be touched. Results are memoized per manager
//! until the host signals a registry reload.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use tweakstone_common::ResourceId;
use tweakstone_recipes::{RecipeManager, RecipeTypeId};

/// A gather hook: given a manager, the recipes of that manager that
/// must be excluded from replacement.
pub type ExclusionHook = dyn Fn(&RecipeManager) -> Vec<ResourceId> + Send + Sync;

static HOOKS: Mutex<Vec<Arc<ExclusionHook>>> = Mutex::new(Vec::new());
static CACHE: Mutex<BTreeMap<RecipeTypeId, Arc<BTreeSet<ResourceId>>>> =
    Mutex::new(BTreeMap::new());

/// Registers a gather hook. Hooks run once per manager, on first use.
pub fn register_exclusion_hook(
    hook: impl Fn(&RecipeManager) -> Vec<ResourceId> + Send + Sync + 'static,
) {
    HOOKS.lock().push(Arc::new(hook));
}

/// Returns the default exclusions for `manager`, gathering them on
/// first use and memoizing per recipe type. Mutated only under the
/// host's reload lock.
#[must_use]
pub fn default_exclusions_for(manager: &RecipeManager) -> Arc<BTreeSet<ResourceId>> {
    if let Some(cached) = CACHE.lock().get(manager.recipe_type()) {
        return Arc::clone(cached);
    }

    let hooks: Vec<_> = HOOKS.lock().iter().map(Arc::clone).collect();
    let gathered: BTreeSet<ResourceId> =
        hooks.iter().flat_map(|hook| hook(manager)).collect();
    debug!(
        "gathered {} default replacement exclusions for '{}'",
        gathered.len(),
        manager.recipe_type()
    );

    let gathered = Arc::new(gathered);
    CACHE
        .lock()
        .insert(manager.recipe_type().clone(), Arc::clone(&gathered));
    gathered
}

/// Drops every memoized exclusion set. Call when the host signals a
/// registry reload.
pub fn clear_exclusion_cache() {
    CACHE.lock().clear();
}
