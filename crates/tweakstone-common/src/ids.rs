//! Resource identifiers for recipes, items, and tags.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{NameError, NameResult};

/// Namespace under which every generated recipe identifier lives.
pub const SCRIPT_NAMESPACE: &str = "tweakstone";

/// Reserved path prefix marking identifiers produced by the default
/// naming scheme.
pub const AUTOGENERATED_PREFIX: &str = "autogenerated/";

/// A namespaced identifier of the form `namespace:path`.
///
/// Identifiers order by namespace then path, which drives the
/// deterministic traversal order of batched rewrites.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId {
    namespace: String,
    path: String,
}

impl ResourceId {
    /// Creates an identifier, validating both components.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> NameResult<Self> {
        let namespace = namespace.into();
        let path = path.into();
        if namespace.is_empty() || !namespace.chars().all(is_legal_namespace_char) {
            return Err(NameError::InvalidNamespace(namespace));
        }
        if path.is_empty() || !path.chars().all(is_legal_path_char) {
            return Err(NameError::InvalidPath(path));
        }
        Ok(Self { namespace, path })
    }

    /// Creates an identifier under the script namespace.
    pub fn scripted(path: impl Into<String>) -> NameResult<Self> {
        Self::new(SCRIPT_NAMESPACE, path)
    }

    /// Returns the namespace component.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

// Serialized as the `namespace:path` string so identifiers stay
// readable in script data, with validation on the way back in.
impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for ResourceId {
    type Err = NameError;

    fn from_str(s: &str) -> NameResult<Self> {
        let (namespace, path) = s
            .split_once(':')
            .ok_or_else(|| NameError::MissingSeparator(s.to_owned()))?;
        Self::new(namespace, path)
    }
}

/// Checks whether `id` was produced by the default naming scheme.
#[must_use]
pub fn is_autogenerated(id: &ResourceId) -> bool {
    id.path().starts_with(AUTOGENERATED_PREFIX)
}

/// Computes the default post-replacement identifier for `id`.
///
/// Identifiers that already carry the autogeneration marker pass through
/// unchanged; anything else becomes
/// `tweakstone:autogenerated/<namespace>.<path>`. Both components of a
/// valid identifier are already path-legal, so no further sanitization
/// is needed here.
#[must_use]
pub fn autogenerate(id: &ResourceId) -> ResourceId {
    if is_autogenerated(id) {
        return id.clone();
    }
    ResourceId {
        namespace: SCRIPT_NAMESPACE.to_owned(),
        path: format!("{AUTOGENERATED_PREFIX}{}.{}", id.namespace(), id.path()),
    }
}

fn is_legal_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_legal_path_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '/' | '-')
}

/// Checks whether every character of `path` is legal in an identifier
/// path.
#[must_use]
pub fn is_legal_path(path: &str) -> bool {
    !path.is_empty() && path.chars().all(is_legal_path_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifier() {
        let id = ResourceId::new("minecraft", "piston").expect("valid id");
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.path(), "piston");
        assert_eq!(id.to_string(), "minecraft:piston");
    }

    #[test]
    fn test_invalid_namespace_rejected() {
        assert!(matches!(
            ResourceId::new("Mine/craft", "piston"),
            Err(NameError::InvalidNamespace(_))
        ));
        assert!(matches!(
            ResourceId::new("", "piston"),
            Err(NameError::InvalidNamespace(_))
        ));
    }

    #[test]
    fn test_invalid_path_rejected() {
        assert!(matches!(
            ResourceId::new("minecraft", "Birch Sign"),
            Err(NameError::InvalidPath(_))
        ));
        assert!(matches!(
            ResourceId::new("minecraft", ""),
            Err(NameError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_parse_round_trip() {
        let id: ResourceId = "forge:storage_blocks/redstone".parse().expect("parses");
        assert_eq!(id.namespace(), "forge");
        assert_eq!(id.path(), "storage_blocks/redstone");
        assert_eq!(id.to_string().parse::<ResourceId>().expect("parses"), id);
    }

    #[test]
    fn test_parse_missing_separator() {
        assert!(matches!(
            "no_separator".parse::<ResourceId>(),
            Err(NameError::MissingSeparator(_))
        ));
    }

    #[test]
    fn test_ordering_namespace_then_path() {
        let a: ResourceId = "alpha:zzz".parse().expect("parses");
        let b: ResourceId = "beta:aaa".parse().expect("parses");
        let c: ResourceId = "beta:bbb".parse().expect("parses");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_autogenerate_prefixes_and_is_stable() {
        let id: ResourceId = "minecraft:piston".parse().expect("parses");
        let auto = autogenerate(&id);
        assert_eq!(auto.namespace(), SCRIPT_NAMESPACE);
        assert_eq!(auto.path(), "autogenerated/minecraft.piston");
        assert!(is_autogenerated(&auto));
        assert_eq!(autogenerate(&auto), auto);
    }

    #[test]
    fn test_serde_uses_string_form() {
        let id: ResourceId = "minecraft:piston".parse().expect("parses");
        assert_eq!(
            serde_json::to_value(&id).expect("serializes"),
            serde_json::json!("minecraft:piston")
        );
        assert_eq!(
            serde_json::from_str::<ResourceId>("\"minecraft:piston\"").expect("deserializes"),
            id
        );
        assert!(serde_json::from_str::<ResourceId>("\"Not An Id\"").is_err());
    }

    #[test]
    fn test_is_autogenerated_only_on_prefix() {
        let id: ResourceId = "tweakstone:some/other".parse().expect("parses");
        assert!(!is_autogenerated(&id));
    }
}
