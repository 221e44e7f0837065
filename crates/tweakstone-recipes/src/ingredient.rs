//! The recursive ingredient algebra.
//!
//! An ingredient is a pattern matching zero or more item stacks:
//! a single stack, a tag reference, a union of alternatives, or the
//! empty sentinel. Ingredients are kept in canonical form: no `List`
//! inside `List`, no `Empty` children, and a single-child list
//! collapses to the child. Structural equality is defined on canonical
//! forms.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::stack::ItemStack;
use crate::tags::{TagId, TagRegistry};

/// Errors produced while rewriting ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngredientError {
    /// A rewrite produced a structurally invalid ingredient, such as a
    /// list containing the empty sentinel. Indicates a bug in the
    /// caller-supplied rewrite, never in well-formed rules.
    #[error("malformed ingredient produced by a rewrite: {0}")]
    Malformed(String),
}

/// Result type alias for ingredient operations.
pub type IngredientResult<T> = Result<T, IngredientError>;

/// A pattern matching zero or more item stacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ingredient {
    /// Matches nothing; equal only to itself
    Empty,
    /// Matches stacks of one concrete item
    Stack(ItemStack),
    /// Matches any member of a named group
    Tag(TagId),
    /// Union of alternatives; matches if any child matches.
    ///
    /// Invariant: children are canonical, non-empty, and never lists
    /// themselves. Build through [`Ingredient::list`] to maintain it.
    List(Vec<Ingredient>),
}

impl Ingredient {
    /// Creates a stack ingredient.
    #[must_use]
    pub const fn stack(stack: ItemStack) -> Self {
        Self::Stack(stack)
    }

    /// Creates a tag ingredient.
    #[must_use]
    pub const fn tag(tag: TagId) -> Self {
        Self::Tag(tag)
    }

    /// Creates a union ingredient in canonical form.
    ///
    /// Nested lists are flattened, `Empty` children dropped, a single
    /// survivor collapses to itself, and no survivor at all yields
    /// `Empty`.
    #[must_use]
    pub fn list(children: Vec<Self>) -> Self {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            flatten_into(&mut flat, child);
        }
        match flat.len() {
            0 => Self::Empty,
            1 => flat.remove(0),
            _ => Self::List(flat),
        }
    }

    /// Re-derives canonical form. Idempotent.
    #[must_use]
    pub fn canonicalize(&self) -> Self {
        match self {
            Self::List(children) => Self::list(children.iter().map(Self::canonicalize).collect()),
            other => other.clone(),
        }
    }

    /// Checks whether `stack` satisfies this pattern.
    #[must_use]
    pub fn matches(&self, stack: &ItemStack, tags: &TagRegistry) -> bool {
        match self {
            Self::Empty => false,
            Self::Stack(pattern) => pattern.accepts(stack),
            Self::Tag(tag) => tags.contains(tag, stack),
            Self::List(children) => children.iter().any(|c| c.matches(stack, tags)),
        }
    }

    /// Checks whether this is the empty sentinel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Applies `f` to every sub-ingredient bottom-up and refreshes
    /// canonical form.
    ///
    /// Leaves are visited first; a `List` returned by `f` is
    /// re-flattened before its parent sees it. Fails with
    /// [`IngredientError::Malformed`] only when `f` returns a
    /// structurally invalid value, such as a list containing `Empty`.
    pub fn map<F>(&self, f: &F) -> IngredientResult<Self>
    where
        F: Fn(&Self) -> Self,
    {
        let inner = match self {
            Self::List(children) => {
                let mapped = children
                    .iter()
                    .map(|child| child.map(f))
                    .collect::<IngredientResult<Vec<_>>>()?;
                Self::list(mapped)
            }
            other => other.clone(),
        };
        validate_rewrite(f(&inner))
    }
}

fn flatten_into(flat: &mut Vec<Ingredient>, ingredient: Ingredient) {
    match ingredient {
        Ingredient::Empty => {}
        Ingredient::List(children) => {
            for child in children {
                flatten_into(flat, child);
            }
        }
        other => flat.push(other),
    }
}

fn validate_rewrite(out: Ingredient) -> IngredientResult<Ingredient> {
    if let Ingredient::List(children) = &out {
        if children.iter().any(Ingredient::is_empty) {
            return Err(IngredientError::Malformed(out.to_string()));
        }
    }
    Ok(out.canonicalize())
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "<empty>"),
            Self::Stack(stack) => write!(f, "{stack}"),
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::List(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{child}")?;
                }
                Ok(())
            }
        }
    }
}
