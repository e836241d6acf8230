//! Property-based tests using proptest
//!
//! These tests check that composite share IDs and access levels survive a
//! round trip through their encodings.

use gitlab_share::access_level::{shareable_access_levels, AccessLevel};
use gitlab_share::resource::id::{project_and_group_from_id, project_group_id};
use proptest::prelude::*;

/// Project IDs: numeric IDs or namespace/path strings without the separator
fn arb_project_id() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u64..10_000_000).prop_map(|n| n.to_string()),
        "[a-z][a-z0-9-]{0,20}(/[a-z][a-z0-9_.-]{0,20}){1,3}",
    ]
}

proptest! {
    /// Decomposing a composed ID gives back its parts
    #[test]
    fn share_id_round_trips(project_id in arb_project_id(), group_id in any::<i64>()) {
        let id = project_group_id(&project_id, group_id);
        let (project, group) = project_and_group_from_id(&id).unwrap();
        prop_assert_eq!(project, project_id);
        prop_assert_eq!(group, group_id);
    }

    /// IDs without a separator never decode
    #[test]
    fn ids_without_separator_fail(id in "[a-z0-9/]{0,30}") {
        prop_assert!(project_and_group_from_id(&id).is_err());
    }

    /// A non-numeric group segment never decodes
    #[test]
    fn non_numeric_group_fails(project_id in arb_project_id(), group in "[a-z][a-z0-9]{0,10}") {
        let id = format!("{}:{}", project_id, group);
        prop_assert!(project_and_group_from_id(&id).is_err());
    }

    /// Codes outside the table are never mistaken for a level
    #[test]
    fn unknown_codes_have_no_level(code in any::<i64>()) {
        prop_assume!(![10, 20, 30, 40, 50].contains(&code));
        prop_assert!(AccessLevel::from_code(code).is_none());
    }
}

/// Every shareable level maps to a code and back to the same name
#[test]
fn shareable_levels_round_trip_through_codes() {
    for name in shareable_access_levels() {
        let level = AccessLevel::from_name(name).expect("known level");
        let back = AccessLevel::from_code(level.code()).expect("known code");
        assert_eq!(back.name(), name);
    }
}
