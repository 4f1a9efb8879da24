//! Tag helpers for ingestion.
//!
//! Provides helpers to:
//! - collect key/value pairs into a [`Tags`] map; and
//! - decide whether a way is a navigable road.
use bearmaps_core::Tags;

pub(super) fn collect_tags<'a, T>(tags: T) -> Tags
where
    T: IntoIterator<Item = (&'a str, &'a str)>,
{
    tags.into_iter()
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
}

/// Returns true when the `highway` tag names a road class cars can follow.
///
/// Footways, cycleways, service roads and untagged ways are not part of the
/// road graph.
pub(super) fn is_navigable(tags: &Tags) -> bool {
    tags.get("highway").is_some_and(|class| {
        matches!(
            class.strip_suffix("_link").unwrap_or(class),
            "motorway"
                | "trunk"
                | "primary"
                | "secondary"
                | "tertiary"
                | "unclassified"
                | "residential"
                | "living_street"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("residential", true)]
    #[case("primary_link", true)]
    #[case("living_street", true)]
    #[case("footway", false)]
    #[case("cycleway", false)]
    #[case("service", false)]
    fn classifies_highways(#[case] class: &str, #[case] expected: bool) {
        let tags = collect_tags([("highway", class)]);
        assert_eq!(is_navigable(&tags), expected);
    }

    #[rstest]
    fn untagged_ways_are_not_roads() {
        assert!(!is_navigable(&collect_tags([("name", "Sproul Plaza")])));
    }
}
