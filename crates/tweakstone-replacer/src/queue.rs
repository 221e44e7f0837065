//! The action queue.
//!
//! `execute()` on a replacer only enqueues; the host's reload pass
//! drains the queue on its single reload thread. Actions apply in
//! enqueue order, and each action's batch commits before the next
//! action runs, so later replacers observe earlier rewrites.

use std::collections::VecDeque;

use tracing::debug;

use tweakstone_recipes::{ManagerRegistry, TagRegistry};

use crate::action::ReplacerAction;

/// FIFO queue of pending replacement actions.
#[derive(Debug, Default)]
pub struct ActionQueue {
    actions: VecDeque<ReplacerAction>,
}

impl ActionQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues an action for the next reload pass.
    pub fn enqueue(&mut self, action: ReplacerAction) {
        self.actions.push_back(action);
    }

    /// Number of pending actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no actions are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Drains the queue in enqueue order, applying and committing each
    /// action's batch in turn. Returns the number of recipes
    /// rewritten.
    pub fn apply_all(&mut self, registry: &mut ManagerRegistry, tags: &TagRegistry) -> usize {
        let mut rewritten = 0;
        while let Some(action) = self.actions.pop_front() {
            let batch = action.apply(registry, tags);
            rewritten += batch.len();
            batch.commit(registry);
        }
        debug!("reload pass rewrote {rewritten} recipes");
        rewritten
    }
}
