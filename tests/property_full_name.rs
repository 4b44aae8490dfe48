use proptest::prelude::*;
use repodex::domain::models::split_full_name;

proptest! {
    /// Property: a well-formed `owner/name` splits back into its parts
    #[test]
    fn prop_well_formed_names_split(
        owner in "[A-Za-z0-9][A-Za-z0-9-]{0,38}",
        name in "[A-Za-z0-9._-]{1,100}",
    ) {
        let full_name = format!("{owner}/{name}");
        prop_assert_eq!(split_full_name(&full_name), Some((owner.as_str(), name.as_str())));
    }

    /// Property: names without exactly one separator are rejected
    #[test]
    fn prop_slashless_names_rejected(name in "[^/]{0,50}") {
        prop_assert_eq!(split_full_name(&name), None);
    }

    #[test]
    fn prop_extra_segments_rejected(
        parts in prop::collection::vec("[a-z]{1,10}", 3..6),
    ) {
        let joined = parts.join("/");
        prop_assert_eq!(split_full_name(&joined), None);
    }

    /// Property: an empty owner or repository name is rejected
    #[test]
    fn prop_empty_component_rejected(part in "[a-z]{1,20}") {
        let leading = format!("/{part}");
        let trailing = format!("{part}/");
        prop_assert_eq!(split_full_name(&leading), None);
        prop_assert_eq!(split_full_name(&trailing), None);
    }
}
