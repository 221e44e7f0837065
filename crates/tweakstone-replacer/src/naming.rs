//! Post-replacement name generation.
//!
//! Every rewritten recipe gets a fresh identifier under the script
//! namespace. Explicit renames beat the default autogeneration scheme
//! on the base value; a user-supplied renaming function still sees the
//! original identifier and can override either, with its output run
//! through the same fixing pass as explicit renames.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{error, warn};

use tweakstone_common::{autogenerate, fixed_id, is_autogenerated, ResourceId};

use crate::position::{position_prefix, ScriptPosition};

/// User-supplied renaming function: `(original id, default name) → new
/// name`.
pub type RenameFn = dyn Fn(&ResourceId, &str) -> String + Send + Sync;

/// Maps an original recipe identifier to its post-replacement
/// identifier.
///
/// Snapshot of a replacer's rename configuration, captured by value at
/// `execute` time.
#[derive(Clone, Default)]
pub struct NameGenerator {
    renames: BTreeMap<ResourceId, String>,
    custom: Option<Arc<RenameFn>>,
    position: Option<ScriptPosition>,
}

impl NameGenerator {
    /// Creates a generator from a replacer's rename configuration.
    ///
    /// Values in `renames` must already be name-fixed; the builder
    /// fixes them at insertion.
    #[must_use]
    pub fn new(
        renames: BTreeMap<ResourceId, String>,
        custom: Option<Arc<RenameFn>>,
        position: Option<ScriptPosition>,
    ) -> Self {
        Self {
            renames,
            custom,
            position,
        }
    }

    /// Computes the post-replacement identifier for `id`.
    ///
    /// Never fails: a rename that cannot be honored is logged and the
    /// default identifier is kept.
    #[must_use]
    pub fn generate(&self, id: &ResourceId) -> ResourceId {
        let prefix = position_prefix(self.position.as_ref());

        let base = self
            .renames
            .get(id)
            .cloned()
            .unwrap_or_else(|| autogenerate(id).path().to_owned());
        let base_id = match ResourceId::scripted(base.clone()) {
            Ok(base_id) => base_id,
            Err(e) => {
                // Renames are fixed at insertion, so this is unreachable
                // short of a corrupted rename map.
                error!("{prefix}rename '{base}' for '{id}' is not a legal path ({e}); using the default name");
                return autogenerate(id);
            }
        };

        let Some(custom) = &self.custom else {
            return base_id;
        };

        let name = custom(id, &base);
        if name == base || is_autogenerated(id) {
            return base_id;
        }

        let mut mistakes = Vec::new();
        match fixed_id(&name, |m| mistakes.push(m)) {
            Ok(fixed) => {
                if !mistakes.is_empty() {
                    warn!(
                        "{prefix}invalid recipe rename '{name}' from the custom renaming function, mistakes:\n{}\nthe new rename will be '{}'",
                        mistakes.join("\n"),
                        fixed.path()
                    );
                }
                fixed
            }
            Err(e) => {
                error!("{prefix}custom renaming function produced '{name}' for '{id}' ({e}); keeping '{base_id}'");
                base_id
            }
        }
    }
}

impl fmt::Debug for NameGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameGenerator")
            .field("renames", &self.renames)
            .field("has_custom", &self.custom.is_some())
            .field("position", &self.position)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ResourceId {
        s.parse().expect("valid id")
    }

    fn generator_with_rename(old: &str, fixed_new: &str) -> NameGenerator {
        let mut renames = BTreeMap::new();
        renames.insert(id(old), fixed_new.to_owned());
        NameGenerator::new(renames, None, None)
    }

    #[test]
    fn test_default_is_autogenerated() {
        let generator = NameGenerator::default();
        assert_eq!(
            generator.generate(&id("minecraft:piston")),
            id("tweakstone:autogenerated/minecraft.piston")
        );
    }

    #[test]
    fn test_explicit_rename_beats_default() {
        let generator = generator_with_rename("minecraft:birch_sign", "damn_hard_birch_sign");
        assert_eq!(
            generator.generate(&id("minecraft:birch_sign")),
            id("tweakstone:damn_hard_birch_sign")
        );
        // Other identifiers still autogenerate.
        assert_eq!(
            generator.generate(&id("minecraft:piston")),
            id("tweakstone:autogenerated/minecraft.piston")
        );
    }

    #[test]
    fn test_custom_function_sees_original_id_and_base() {
        let custom: Arc<RenameFn> = Arc::new(|original, base| {
            assert_eq!(original, &"minecraft:piston".parse::<ResourceId>().expect("valid id"));
            assert_eq!(base, "autogenerated/minecraft.piston");
            "sticky_piston".to_owned()
        });
        let generator = NameGenerator::new(BTreeMap::new(), Some(custom), None);
        assert_eq!(
            generator.generate(&id("minecraft:piston")),
            id("tweakstone:sticky_piston")
        );
    }

    #[test]
    fn test_custom_function_echoing_base_is_untouched() {
        let custom: Arc<RenameFn> = Arc::new(|_, base| base.to_owned());
        let generator = NameGenerator::new(BTreeMap::new(), Some(custom), None);
        assert_eq!(
            generator.generate(&id("minecraft:piston")),
            id("tweakstone:autogenerated/minecraft.piston")
        );
    }

    #[test]
    fn test_already_autogenerated_ids_skip_custom_function() {
        let custom: Arc<RenameFn> = Arc::new(|_, _| "renamed_again".to_owned());
        let generator = NameGenerator::new(BTreeMap::new(), Some(custom), None);
        let auto = id("tweakstone:autogenerated/minecraft.piston");
        assert_eq!(generator.generate(&auto), auto);
    }

    #[test]
    fn test_custom_output_is_name_fixed() {
        let custom: Arc<RenameFn> = Arc::new(|_, _| "My Fancy Name".to_owned());
        let generator = NameGenerator::new(BTreeMap::new(), Some(custom), None);
        assert_eq!(
            generator.generate(&id("minecraft:piston")),
            id("tweakstone:my_fancy_name")
        );
    }

    #[test]
    fn test_empty_custom_output_keeps_default() {
        let custom: Arc<RenameFn> = Arc::new(|_, _| "???".to_owned());
        let generator = NameGenerator::new(BTreeMap::new(), Some(custom), None);
        assert_eq!(
            generator.generate(&id("minecraft:piston")),
            id("tweakstone:autogenerated/minecraft.piston")
        );
    }

    #[test]
    fn test_custom_function_overrides_explicit_rename() {
        let custom: Arc<RenameFn> = Arc::new(|_, base| {
            // The explicit rename is the base the function receives.
            assert_eq!(base, "damn_hard_birch_sign");
            "overridden".to_owned()
        });
        let mut renames = BTreeMap::new();
        renames.insert(id("minecraft:birch_sign"), "damn_hard_birch_sign".to_owned());
        let generator = NameGenerator::new(renames, Some(custom), None);
        assert_eq!(
            generator.generate(&id("minecraft:birch_sign")),
            id("tweakstone:overridden")
        );
    }
}
