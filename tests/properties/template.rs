//! Property tests for template rendering.

use proptest::prelude::*;

use stackship::domain::services::TemplateBuilder;
use stackship::{ContentDigest, StoreLocation};

fn render(app: &str, digest: &str, subnets: &[String]) -> String {
    TemplateBuilder::new(app, StoreLocation::new("123456789012-app", ContentDigest::new(digest)))
        .subnets(subnets.to_vec())
        .build()
        .unwrap()
        .to_json()
}

proptest! {
    /// PROPERTY: identical inputs render byte-identical bodies (the no-op update path depends on it).
    #[test]
    fn property_render_is_byte_stable(
        app in "[a-z][a-z0-9-]{0,20}",
        digest in "[0-9a-f]{64}",
        subnets in proptest::collection::vec("subnet-[0-9a-f]{8}", 1..4),
    ) {
        prop_assert_eq!(render(&app, &digest, &subnets), render(&app, &digest, &subnets));
    }

    /// PROPERTY: a different artifact digest always changes the rendered body.
    #[test]
    fn property_digest_change_changes_body(
        a in "[0-9a-f]{64}",
        b in "[0-9a-f]{64}",
    ) {
        prop_assume!(a != b);
        let subnets = vec!["subnet-1".to_string()];
        prop_assert_ne!(render("app", &a, &subnets), render("app", &b, &subnets));
    }
}
