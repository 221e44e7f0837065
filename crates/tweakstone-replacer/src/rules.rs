//! Replacement rules: a `from → to` rewrite with a matching semantics.
//!
//! Rules share one contract: given an ingredient, produce either an
//! unchanged ingredient or its replacement. The matching semantics
//! lives with the rule variant, not with the ingredient, so the
//! algebra's `map` combinator stays trivial.

use thiserror::Error;
use tracing::debug;

use tweakstone_recipes::{Ingredient, IngredientResult, ItemStack, TagRegistry};

/// Errors raised while constructing replacement rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The empty ingredient appeared on either side of a rule
    #[error("the empty ingredient cannot appear in a replacement rule")]
    InvalidRule,
}

/// A single `from → to` rewrite.
///
/// Rules apply in the order they were appended to a replacer; the
/// output of one rule is the input of the next. A rule whose sides are
/// structurally equal is a no-op and is dropped at insertion (the
/// constructors return `Ok(None)`). Applying a well-formed rule never
/// fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplacementRule {
    /// Rewrites matches within compound ingredients by descending into
    /// children. A `Tag` is never descended into; only structural
    /// identity with `from` rewrites it.
    Recursive {
        /// Pattern to match
        from: Ingredient,
        /// Replacement
        to: Ingredient,
    },
    /// Recursive rewrite specialized for a stack-valued left-hand
    /// side. A `Tag` child that merely contains the stack is left
    /// alone; membership is not identity.
    StackTargeting {
        /// Stack to match
        from: ItemStack,
        /// Replacement
        to: Ingredient,
    },
    /// Replaces only ingredients structurally equal to `from`; never
    /// descends.
    Exact {
        /// Pattern to match
        from: Ingredient,
        /// Replacement
        to: Ingredient,
    },
}

impl ReplacementRule {
    /// Creates a recursive rule. Returns `Ok(None)` for a no-op rule.
    pub fn recursive(from: Ingredient, to: Ingredient) -> Result<Option<Self>, RuleError> {
        let (from, to) = check_sides(from, to)?;
        Ok(if from == to {
            None
        } else {
            Some(Self::Recursive { from, to })
        })
    }

    /// Creates a stack-targeting rule. Returns `Ok(None)` for a no-op
    /// rule.
    pub fn stack_targeting(from: ItemStack, to: Ingredient) -> Result<Option<Self>, RuleError> {
        if to.is_empty() {
            return Err(RuleError::InvalidRule);
        }
        let to = to.canonicalize();
        Ok(if Ingredient::stack(from.clone()) == to {
            None
        } else {
            Some(Self::StackTargeting { from, to })
        })
    }

    /// Creates an exact rule. Returns `Ok(None)` for a no-op rule.
    pub fn exact(from: Ingredient, to: Ingredient) -> Result<Option<Self>, RuleError> {
        let (from, to) = check_sides(from, to)?;
        Ok(if from == to {
            None
        } else {
            Some(Self::Exact { from, to })
        })
    }

    /// Applies this rule to one ingredient.
    ///
    /// The input is canonicalized on entry, so matching is insensitive
    /// to non-canonical slots handed back by an adapter. The error case
    /// only fires when a rewrite produces a malformed ingredient, which
    /// a rule built through the constructors cannot do; callers treat
    /// it as an adapter bug and skip the recipe.
    pub fn apply(
        &self,
        ingredient: &Ingredient,
        tags: &TagRegistry,
    ) -> IngredientResult<Ingredient> {
        let ingredient = ingredient.canonicalize();
        match self {
            Self::Exact { from, to } => Ok(if &ingredient == from {
                to.clone()
            } else {
                ingredient
            }),
            Self::Recursive { from, to } => {
                if &ingredient == from {
                    return Ok(to.clone());
                }
                ingredient.map(&|child| {
                    if child == from {
                        to.clone()
                    } else {
                        child.clone()
                    }
                })
            }
            Self::StackTargeting { from, to } => {
                let from_ingredient = Ingredient::stack(from.clone());
                if ingredient == from_ingredient {
                    return Ok(to.clone());
                }
                ingredient.map(&|child| {
                    if *child == from_ingredient {
                        return to.clone();
                    }
                    if let Ingredient::Tag(tag) = child {
                        if tags.contains(tag, from) {
                            debug!(
                                "{tag} contains {from} but is not rewritten: \
                                 membership is not structural identity"
                            );
                        }
                    }
                    child.clone()
                })
            }
        }
    }
}

fn check_sides(from: Ingredient, to: Ingredient) -> Result<(Ingredient, Ingredient), RuleError> {
    if from.is_empty() || to.is_empty() {
        return Err(RuleError::InvalidRule);
    }
    Ok((from.canonicalize(), to.canonicalize()))
}

/// Applies a rule list in order to one ingredient.
pub fn apply_all(
    rules: &[ReplacementRule],
    ingredient: &Ingredient,
    tags: &TagRegistry,
) -> IngredientResult<Ingredient> {
    let mut current = ingredient.clone();
    for rule in rules {
        current = rule.apply(&current, tags)?;
    }
    Ok(current)
}
