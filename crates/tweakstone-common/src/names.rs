//! The name-fixing pass.
//!
//! Turns arbitrary user input into a legal identifier path, reporting
//! every substitution through a caller-supplied mistake sink. The same
//! pass serves explicit renames and the output of custom renaming
//! functions, so their warnings stay consistent.

use crate::error::{NameError, NameResult};
use crate::ids::{is_legal_path, ResourceId};

/// Fixes `input` into a legal identifier path.
///
/// The pass lower-cases letters, replaces every other illegal character
/// with `_`, collapses runs of `_`, and strips leading and trailing
/// `_`. Each substitution is reported as a human-readable line through
/// `sink`. Fails with [`NameError::EmptyAfterFixing`] when nothing
/// legal remains.
///
/// The pass is idempotent: fixing an already-fixed name reports no
/// mistakes and returns it unchanged.
pub fn fix_name(input: &str, mut sink: impl FnMut(String)) -> NameResult<String> {
    let mut fixed = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_uppercase() {
            let lower = c.to_ascii_lowercase();
            sink(format!("'{c}' is an upper-case letter and became '{lower}'"));
            fixed.push(lower);
        } else if matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '/' | '-') {
            fixed.push(c);
        } else {
            sink(format!("'{c}' is not allowed in a name and became '_'"));
            fixed.push('_');
        }
    }

    let collapsed = collapse_underscores(&fixed);
    if collapsed.len() != fixed.len() {
        sink("runs of '_' have been collapsed".to_owned());
    }

    let stripped = collapsed.trim_matches('_');
    if stripped.len() != collapsed.len() {
        sink("leading or trailing '_' have been stripped".to_owned());
    }

    if stripped.is_empty() {
        return Err(NameError::EmptyAfterFixing(input.to_owned()));
    }
    debug_assert!(is_legal_path(stripped));
    Ok(stripped.to_owned())
}

/// Fixes `input` and wraps the result under the script namespace.
pub fn fixed_id(input: &str, sink: impl FnMut(String)) -> NameResult<ResourceId> {
    ResourceId::scripted(fix_name(input, sink)?)
}

fn collapse_underscores(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_underscore = false;
    for c in s.chars() {
        if c == '_' {
            if !last_underscore {
                out.push(c);
            }
            last_underscore = true;
        } else {
            out.push(c);
            last_underscore = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fix_collecting(input: &str) -> (NameResult<String>, Vec<String>) {
        let mut mistakes = Vec::new();
        let result = fix_name(input, |m| mistakes.push(m));
        (result, mistakes)
    }

    #[test]
    fn test_fix_spaces_and_case() {
        let (result, mistakes) = fix_collecting("Damn Hard Birch Sign");
        assert_eq!(result.expect("fixable"), "damn_hard_birch_sign");
        // 'D', 'H', 'B', 'S' lower-cased, three spaces replaced.
        assert_eq!(mistakes.len(), 7);
    }

    #[test]
    fn test_fix_legal_input_reports_nothing() {
        let (result, mistakes) = fix_collecting("storage_blocks/redstone");
        assert_eq!(result.expect("fixable"), "storage_blocks/redstone");
        assert!(mistakes.is_empty());
    }

    #[test]
    fn test_fix_collapses_and_strips() {
        let (result, _) = fix_collecting("__so--many___underscores__");
        assert_eq!(result.expect("fixable"), "so--many_underscores");
    }

    #[test]
    fn test_fix_empty_after_fixing() {
        let (result, _) = fix_collecting("!!! ???");
        assert!(matches!(result, Err(NameError::EmptyAfterFixing(_))));
        let (result, _) = fix_collecting("");
        assert!(matches!(result, Err(NameError::EmptyAfterFixing(_))));
    }

    #[test]
    fn test_fixed_id_lands_in_script_namespace() {
        let id = fixed_id("My Recipe", |_| {}).expect("fixable");
        assert_eq!(id.to_string(), "tweakstone:my_recipe");
    }

    proptest! {
        #[test]
        fn prop_fix_is_idempotent(input in ".{0,64}") {
            if let Ok(once) = fix_name(&input, |_| {}) {
                let mut mistakes = Vec::new();
                let twice = fix_name(&once, |m| mistakes.push(m)).expect("fixed names stay fixable");
                prop_assert_eq!(&twice, &once);
                prop_assert!(mistakes.is_empty());
            }
        }

        #[test]
        fn prop_fixed_names_are_legal_paths(input in ".{0,64}") {
            if let Ok(fixed) = fix_name(&input, |_| {}) {
                prop_assert!(is_legal_path(&fixed));
            }
        }
    }
}
