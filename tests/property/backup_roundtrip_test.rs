//! Property-based tests for the backup envelope codec.
//!
//! Any collection, site config and optional password survives
//! `create_backup` followed by `process_backup` unchanged.

use nebula_nav::services::backup_codec::{create_backup, process_backup};
use nebula_nav::types::link::Link;
use nebula_nav::types::site::SiteConfig;
use proptest::prelude::*;

fn arb_link() -> impl Strategy<Value = Link> {
    (
        "[0-9]{1,13}",
        "\\PC{1,30}",
        "https://[a-z]{3,12}\\.(com|org|io)(/[a-z0-9]{1,8})?",
        prop_oneof![Just("General"), Just("Dev"), Just("Media"), Just("新闻")],
        proptest::option::of("\\PC{0,40}"),
        proptest::option::of(prop_oneof![Just("🚀".to_string()), "https://[a-z]{3,8}\\.com/i\\.png"]),
        0i64..=4_102_444_800_000,
    )
        .prop_map(|(id, title, url, category, description, icon, created_at)| Link {
            id,
            title,
            url,
            category: category.to_string(),
            description,
            icon,
            created_at,
        })
}

/// Collections with unique ids, as every stored collection has.
fn arb_links() -> impl Strategy<Value = Vec<Link>> {
    proptest::collection::vec(arb_link(), 0..12).prop_map(|mut links| {
        for (i, link) in links.iter_mut().enumerate() {
            link.id = format!("{}-{}", i, link.id);
        }
        links
    })
}

fn arb_site() -> impl Strategy<Value = SiteConfig> {
    ("\\PC{1,20}", prop_oneof![Just(String::new()), "https://[a-z]{3,8}\\.com/logo\\.png"])
        .prop_map(|(title, logo_url)| SiteConfig { title, logo_url })
}

// Round-trip: decode(encode(x)) preserves links, config and credential.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn backup_roundtrip_preserves_content(
        links in arb_links(),
        site in arb_site(),
        secret in proptest::option::of("[!-~]{1,24}"),
    ) {
        let text = create_backup(&links, &site, secret.as_deref());
        let envelope = process_backup(&text).expect("own output must decode");

        prop_assert_eq!(envelope.links, links);
        prop_assert_eq!(envelope.site_config, site);
        prop_assert_eq!(envelope.auth_check, secret);
    }

    // Arbitrary text never panics the decoder.
    #[test]
    fn process_backup_never_panics(text in "\\PC{0,200}") {
        let _ = process_backup(&text);
    }
}
