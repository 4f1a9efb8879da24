use crate::{PrefixIndex, SpatialGraph};

/// A named location resolved from an exact-name query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// The point's `name` tag.
    pub name: Option<String>,
    /// Point identifier.
    pub id: u64,
}

/// Read-only handle over a finished graph and its name index.
///
/// Build it once at startup and share it (e.g. behind an `Arc`) with every
/// query handler; nothing in it is mutable.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bearmaps_core::{GraphBuilder, MapIndex, Point, PrefixIndex};
///
/// let mut builder = GraphBuilder::default();
/// builder.add_point(Point::new(7, Coord { x: -122.26, y: 37.87 }).with_tag("name", "Top Dog"));
/// let mut names = PrefixIndex::default();
/// names.insert("Top Dog", 7);
///
/// let index = MapIndex::new(builder.finish(), names);
/// // Point 7 was pruned from the graph but still resolves by name.
/// assert_eq!(index.locations("top dog")[0].lat, 37.87);
/// ```
#[derive(Debug)]
pub struct MapIndex {
    graph: SpatialGraph,
    names: PrefixIndex,
}

impl MapIndex {
    /// Bundle a finished graph with its name index.
    #[must_use]
    pub const fn new(graph: SpatialGraph, names: PrefixIndex) -> Self {
        Self { graph, names }
    }

    /// The road graph.
    #[must_use]
    pub const fn graph(&self) -> &SpatialGraph {
        &self.graph
    }

    /// Display names starting with `prefix`, ignoring case and punctuation.
    #[must_use]
    pub fn search_prefix(&self, prefix: &str) -> Vec<String> {
        self.names.search_prefix(prefix)
    }

    /// Every location whose cleaned name equals the cleaned `name`.
    ///
    /// Resolved against all ingested points, so locations pruned from the
    /// road graph are still reported. Identifiers with no backing point are
    /// skipped.
    #[must_use]
    pub fn locations(&self, name: &str) -> Vec<Location> {
        self.names
            .lookup_exact(name)
            .iter()
            .filter_map(|&id| self.graph.any_point(id))
            .map(|point| Location {
                lat: point.lat(),
                lon: point.lon(),
                name: point.name().map(str::to_owned),
                id: point.id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphBuilder, Point, Tags, Way};
    use geo::Coord;
    use rstest::{fixture, rstest};

    #[fixture]
    fn index() -> MapIndex {
        let mut builder = GraphBuilder::default();
        let mut names = PrefixIndex::default();
        let named = [
            (1, -122.2600, 37.8700, "Safeway"),
            (2, -122.2500, 37.8600, "Safeway"),
            (3, -122.2700, 37.8800, "Berkeley Bowl"),
        ];
        for (id, lon, lat, name) in named {
            builder.add_point(Point::new(id, Coord { x: lon, y: lat }).with_tag("name", name));
            names.insert(name, id);
        }
        builder.add_point(Point::new(4, Coord { x: -122.2601, y: 37.8701 }));
        builder.add_way(Way::new(10, vec![1, 4], Tags::new()));
        builder.build_edges(10).expect("points were added");
        // Dangling identifier with no point behind it.
        names.insert("Ghost Town", 99);
        MapIndex::new(builder.finish(), names)
    }

    #[rstest]
    fn resolves_connected_and_pruned_locations(index: MapIndex) {
        let found = index.locations("SAFEWAY");
        assert_eq!(
            found,
            vec![
                Location {
                    lat: 37.87,
                    lon: -122.26,
                    name: Some(String::from("Safeway")),
                    id: 1,
                },
                Location {
                    lat: 37.86,
                    lon: -122.25,
                    name: Some(String::from("Safeway")),
                    id: 2,
                },
            ]
        );
        assert!(index.graph().point(2).is_none(), "point 2 was pruned");
    }

    #[rstest]
    fn skips_identifiers_without_points(index: MapIndex) {
        assert!(index.locations("ghost town").is_empty());
        assert_eq!(index.search_prefix("gh"), vec!["Ghost Town"]);
    }

    #[rstest]
    fn unknown_names_resolve_to_nothing(index: MapIndex) {
        assert!(index.locations("Cheese Board").is_empty());
        assert!(index.search_prefix("cheese").is_empty());
    }

    #[rstest]
    fn handle_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MapIndex>();
    }
}
