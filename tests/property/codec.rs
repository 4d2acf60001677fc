//! Property-based tests for the manifest text format

use fixity::fingerprint::FingerprintSet;
use fixity::manifest;
use fixity::tree::path::is_valid_relative_path;
use proptest::prelude::*;

fn relative_path() -> impl Strategy<Value = String> {
    // Interior spaces and tabs are legal; edges and line breaks are not
    "[a-zA-Z0-9_][a-zA-Z0-9 ._\t-]{0,10}[a-zA-Z0-9_](/[a-zA-Z0-9_][a-zA-Z0-9._-]{0,7}){0,3}"
}

proptest! {
    #[test]
    fn rendered_manifest_parses_to_the_same_set(
        entries in proptest::collection::btree_map(relative_path(), any::<[u8; 32]>(), 0..16)
    ) {
        let set: FingerprintSet = entries.into_iter().collect();
        for path in set.paths() {
            prop_assert!(is_valid_relative_path(path));
        }

        let text = manifest::render(&set);
        prop_assert_eq!(text.lines().count(), set.len());
        prop_assert_eq!(manifest::parse(&text), set);
    }

    #[test]
    fn parse_never_panics_and_yields_valid_entries(text in "\\PC{0,200}") {
        let set = manifest::parse(&text);
        for (path, _) in set.iter() {
            prop_assert!(is_valid_relative_path(path));
        }
    }
}
