use msgdraft_schema::{FieldPath, PathSegment};
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = PathSegment> {
    (
        "[a-z][a-z0-9_]{0,7}",
        prop::option::of(0..16usize),
    )
        .prop_map(|(name, index)| match index {
            Some(i) => PathSegment::indexed(name, i),
            None => PathSegment::new(name),
        })
}

fn path_strategy() -> impl Strategy<Value = FieldPath> {
    prop::collection::vec(segment_strategy(), 0..6).prop_map(FieldPath::new)
}

proptest! {
    #[test]
    fn prop_display_parse_roundtrip(path in path_strategy()) {
        let rendered = path.to_string();
        let parsed: FieldPath = rendered.parse().unwrap();
        prop_assert_eq!(parsed, path);
    }

    #[test]
    fn prop_canonical_is_idempotent(path in path_strategy()) {
        let canonical = path.canonical();
        prop_assert_eq!(canonical.canonical(), canonical.clone());
        prop_assert!(canonical.iter().all(|seg| seg.index().is_none()));
    }

    #[test]
    fn prop_child_parent_inverse(path in path_strategy(), name in "[a-z][a-z0-9_]{0,7}") {
        let child = path.child(name);
        prop_assert_eq!(child.parent().unwrap(), path);
    }

    #[test]
    fn prop_prefixes_are_prefixes(path in path_strategy(), depth in 0..6usize) {
        let prefix = path.prefix(depth);
        prop_assert!(prefix.is_prefix_of(&path));
        prop_assert_eq!(prefix.len(), depth.min(path.len()));
    }
}
