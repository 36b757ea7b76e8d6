//! Lexical path resolution tests

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use rstest::rstest;
use seneca_fs::resolve_path;

#[rstest]
#[case("/work", "scripts", "/work/scripts")]
#[case("/work", "./scripts", "/work/scripts")]
#[case("/work/a", "../scripts", "/work/scripts")]
#[case("/work", "../../../scripts", "/scripts")]
#[case("/work", "a/./b//c", "/work/a/b/c")]
#[case("/work", "/abs/pkg", "/abs/pkg")]
#[case("/work", "/abs/pkg/../other", "/abs/other")]
#[case("/work", "", "/work")]
fn test_resolve_cases(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
    assert_eq!(resolve_path(Path::new(base), path), PathBuf::from(expected));
}

#[test]
fn test_relative_base_keeps_leading_parent() {
    assert_eq!(
        resolve_path(Path::new("work"), "../../x"),
        PathBuf::from("../x")
    );
}

proptest! {
    #[test]
    fn test_resolved_path_is_absolute_and_clean(segments in prop::collection::vec("[a-z.]{1,6}", 0..6)) {
        let relative = segments.join("/");
        let resolved = resolve_path(Path::new("/base"), &relative);

        prop_assert!(resolved.is_absolute());
        for component in resolved.components() {
            prop_assert!(!matches!(
                component,
                std::path::Component::CurDir | std::path::Component::ParentDir
            ));
        }
    }

    #[test]
    fn test_relative_and_absolute_forms_agree(segments in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let relative = segments.join("/");
        let absolute = format!("/base/{relative}");

        prop_assert_eq!(
            resolve_path(Path::new("/base"), &relative),
            resolve_path(Path::new("/elsewhere"), &absolute)
        );
    }
}
