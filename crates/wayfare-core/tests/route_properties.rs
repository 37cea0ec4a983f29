//! Property-based tests for route trees and deep-link matching.
//!
//! Invariants checked over arbitrary inputs:
//! - a `:param` pattern binds exactly the path segment it matched,
//! - a resolved path always names a screen that exists in the tree,
//! - subtree selection is total over every (reset flag, role) combination.

use proptest::prelude::*;
use wayfare_core::{
    role::{Role, SubtreeKey, effective_subtree},
    route::{RouteTable, Screen},
};

fn segment_strategy() -> impl Strategy<Value = String> {
    // Path segments as they arrive from a URL: no separators, non-empty.
    "[a-zA-Z0-9_-]{1,12}"
}

fn role_strategy() -> impl Strategy<Value = Option<Role>> {
    prop_oneof![
        Just(None),
        Just(Some(Role::Client)),
        Just(Some(Role::Agent)),
        Just(Some(Role::Company)),
        Just(Some(Role::Admin)),
    ]
}

proptest! {
    #[test]
    fn param_pattern_binds_the_matched_segment(id in segment_strategy()) {
        let screen = Screen::lazy("request-detail").with_path("requests/:id");
        let params = screen.match_path(&format!("requests/{id}"));
        prop_assert_eq!(params, Some(vec![("id".to_string(), id)]));
    }

    #[test]
    fn literal_prefix_mismatch_never_binds(prefix in segment_strategy(), id in segment_strategy()) {
        prop_assume!(prefix != "requests");
        let screen = Screen::lazy("request-detail").with_path("requests/:id");
        prop_assert_eq!(screen.match_path(&format!("{prefix}/{id}")), None);
    }

    #[test]
    fn resolved_screen_exists_in_its_tree(
        role in role_strategy(),
        first in segment_strategy(),
        second in segment_strategy(),
    ) {
        let table = RouteTable::marketplace();
        let tree = table.subtree(effective_subtree(false, role));

        for path in [first.clone(), format!("{first}/{second}")] {
            if let Some((screen, _)) = tree.resolve_path(&path) {
                prop_assert!(tree.contains(screen.name));
            }
        }
    }

    #[test]
    fn subtree_selection_is_total(resetting in any::<bool>(), role in role_strategy()) {
        let table = RouteTable::marketplace();
        let key = effective_subtree(resetting, role);

        if resetting {
            prop_assert_eq!(key, SubtreeKey::Unauthenticated);
        }
        // Every selected subtree has a default entry to reset history to.
        prop_assert!(!table.subtree(key).default_screen().name.is_empty());
    }
}
