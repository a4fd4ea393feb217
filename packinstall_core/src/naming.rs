//! Collision-free profile and directory names.

use std::collections::HashSet;

/// Returns `desired` if unused, otherwise the first free `"<desired> (n)"`
/// for n = 2, 3, ...
pub fn allocate_name(desired: &str, existing_names: &HashSet<String>) -> String {
    if !existing_names.contains(desired) {
        return desired.to_string();
    }
    let mut index = 2;
    loop {
        let candidate = format!("{desired} ({index})");
        if !existing_names.contains(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// Turns a profile name into a single, non-hidden path component.
pub fn sanitize_dir_name(profile_name: &str) -> String {
    let replaced = profile_name.replace(['/', '\\'], "_");
    let stripped = replaced.trim_start_matches('.');
    let sanitized = if stripped.len() != replaced.len() {
        format!("_{stripped}")
    } else {
        replaced
    };
    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

/// Sanitizes `profile_name` and appends `_1`, `_2`, ... until the result is
/// absent from `existing_dir_names`.
pub fn allocate_dir_name(profile_name: &str, existing_dir_names: &HashSet<String>) -> String {
    let base = sanitize_dir_name(profile_name);
    let mut index = 0;
    loop {
        let candidate = if index > 0 {
            format!("{base}_{index}")
        } else {
            base.clone()
        };
        if !existing_dir_names.contains(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn unused_name_is_kept() {
        assert_eq!(allocate_name("Test", &set(&[])), "Test");
        assert_eq!(allocate_name("Test", &set(&["Other", "Test (2)"])), "Test");
    }

    #[test]
    fn taken_name_gets_first_free_suffix() {
        assert_eq!(allocate_name("Test", &set(&["Test"])), "Test (2)");
        assert_eq!(allocate_name("Test", &set(&["Test", "Test (2)", "Test (4)"])), "Test (3)");
    }

    #[test]
    fn name_matching_is_exact() {
        assert_eq!(allocate_name("Test", &set(&["Testing", "test", "Test "])), "Test");
        assert_eq!(allocate_name("Test (2)", &set(&["Test (2)"])), "Test (2) (2)");
    }

    #[test]
    fn sequential_allocation_never_repeats() {
        let mut used = set(&["Pack", "Pack (3)"]);
        let mut produced = Vec::new();
        for desired in ["Pack", "Pack", "Other", "Pack", "Other"] {
            let name = allocate_name(desired, &used);
            assert!(!used.contains(&name));
            used.insert(name.clone());
            produced.push(name);
        }
        assert_eq!(produced, ["Pack (2)", "Pack (4)", "Other", "Pack (5)", "Other (2)"]);
    }

    #[test]
    fn allocation_is_deterministic() {
        let used = set(&["A", "A (2)"]);
        assert_eq!(allocate_name("A", &used), allocate_name("A", &used));
        assert_eq!(allocate_dir_name("A", &used), allocate_dir_name("A", &used));
    }

    #[test]
    fn sanitize_replaces_separators_and_leading_dots() {
        assert_eq!(sanitize_dir_name("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_dir_name("...hidden"), "_hidden");
        assert_eq!(sanitize_dir_name(".."), "_");
        assert_eq!(sanitize_dir_name("../escape"), "__escape");
        assert_eq!(sanitize_dir_name("v1.2.3"), "v1.2.3");
        assert_eq!(sanitize_dir_name(""), "_");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for name in ["a/b", "...x", "..", "", "Test (2)", "./../x", "plain", "_.x"] {
            let once = sanitize_dir_name(name);
            assert_eq!(sanitize_dir_name(&once), once, "input {name:?}");
        }
    }

    #[test]
    fn dir_names_get_numeric_suffixes() {
        assert_eq!(allocate_dir_name("Test", &set(&[])), "Test");
        assert_eq!(allocate_dir_name("Test", &set(&["Test"])), "Test_1");
        assert_eq!(allocate_dir_name("Test", &set(&["Test", "Test_1"])), "Test_2");
        assert_eq!(allocate_dir_name("a/b", &set(&["a_b"])), "a_b_1");
    }

    #[test]
    fn dir_names_never_start_with_a_dot() {
        for name in [".", "..", ".minecraft", "...", "./x", ""] {
            let dir = allocate_dir_name(name, &set(&["_", "_minecraft"]));
            assert!(!dir.starts_with('.'), "{name:?} -> {dir:?}");
        }
    }
}
