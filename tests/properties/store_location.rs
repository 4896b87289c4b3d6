//! Property tests for bucket naming.

use proptest::prelude::*;

use stackship::StoreLocation;

proptest! {
    /// PROPERTY: bucket names are stable and only use characters S3 accepts.
    #[test]
    fn property_bucket_name_is_stable_and_valid(
        account in "[0-9]{12}",
        app in "[A-Za-z0-9_.-]{1,40}",
    ) {
        let first = StoreLocation::bucket_name(&account, &app);
        let second = StoreLocation::bucket_name(&account, &app);

        prop_assert_eq!(&first, &second);
        let prefix = format!("{}-", account);
        prop_assert!(first.starts_with(&prefix));
        prop_assert!(first
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-'));
    }
}
