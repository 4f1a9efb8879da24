//! Mutable build phase of the road graph.

use std::collections::HashMap;

use log::debug;

use super::{GraphError, SpatialGraph};
use crate::{Point, Way};

/// Collects points and ways, expands ways into edges and finally freezes
/// into a [`SpatialGraph`].
///
/// Ingestion is single-producer: points arrive first, then each way is added
/// and expanded with [`GraphBuilder::build_edges`]. [`GraphBuilder::finish`]
/// consumes the builder, so pruning can only ever run once.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bearmaps_core::{GraphBuilder, Point, Tags, Way};
///
/// # fn main() -> Result<(), bearmaps_core::GraphError> {
/// let mut builder = GraphBuilder::default();
/// builder.add_point(Point::new(1, Coord { x: 0.0, y: 0.0 }));
/// builder.add_point(Point::new(2, Coord { x: 0.0, y: 0.001 }));
/// builder.add_point(Point::new(3, Coord { x: 5.0, y: 5.0 }));
/// builder.add_way(Way::new(10, vec![1, 2], Tags::new()));
/// builder.build_edges(10)?;
///
/// let graph = builder.finish();
/// assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![1, 2]);
/// assert_eq!(graph.adjacent(2)?, &[1]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    points: HashMap<u64, Point>,
    order: Vec<u64>,
    ways: HashMap<u64, Way>,
    adjacency: HashMap<u64, Vec<u64>>,
    edge_ways: HashMap<(u64, u64), u64>,
}

impl GraphBuilder {
    /// Add a point, returning the point it replaced.
    ///
    /// Duplicate identifiers follow last-write-wins; the replaced point keeps
    /// its original position in iteration order.
    pub fn add_point(&mut self, point: Point) -> Option<Point> {
        let id = point.id;
        let previous = self.points.insert(id, point);
        if previous.is_some() {
            debug!("Replaced duplicate point {id}");
        } else {
            self.order.push(id);
        }
        previous
    }

    /// Store a way for later expansion, returning the way it replaced.
    pub fn add_way(&mut self, way: Way) -> Option<Way> {
        self.ways.insert(way.id, way)
    }

    /// Look up a point added so far.
    #[must_use]
    pub fn point(&self, id: u64) -> Option<&Point> {
        self.points.get(&id)
    }

    /// Expand a stored way into edges between consecutive points.
    ///
    /// Oneway ways only link `refs[i - 1] -> refs[i]`; all others link both
    /// directions. Every endpoint is marked connected and each produced
    /// direction remembers `way_id`. Returns the number of directed edges
    /// added.
    ///
    /// # Errors
    ///
    /// [`GraphError::WayNotFound`] when `way_id` was never added, and
    /// [`GraphError::MissingPoint`] when the way references a point that has
    /// not been added. Nothing is modified in either case.
    pub fn build_edges(&mut self, way_id: u64) -> Result<usize, GraphError> {
        let way = self
            .ways
            .get(&way_id)
            .ok_or(GraphError::WayNotFound { id: way_id })?;
        if let Some(&point_id) = way
            .node_refs
            .iter()
            .find(|id| !self.points.contains_key(id))
        {
            return Err(GraphError::MissingPoint { way_id, point_id });
        }

        let oneway = way.is_oneway();
        let mut added = 0;
        for pair in way.node_refs.windows(2) {
            let &[from, to] = pair else { continue };
            self.adjacency.entry(from).or_default().push(to);
            self.edge_ways.insert((from, to), way_id);
            added += 1;
            if !oneway {
                self.adjacency.entry(to).or_default().push(from);
                self.edge_ways.insert((to, from), way_id);
                added += 1;
            }
            for id in [from, to] {
                if let Some(point) = self.points.get_mut(&id) {
                    point.connected = true;
                }
            }
        }
        Ok(added)
    }

    /// Prune disconnected points and freeze the graph.
    ///
    /// The complete point set survives as a read-only snapshot so names and
    /// coordinates of pruned points can still be resolved.
    #[must_use]
    pub fn finish(self) -> SpatialGraph {
        let Self {
            points: all_points,
            order: all_order,
            ways,
            adjacency,
            edge_ways,
        } = self;

        let order: Vec<u64> = all_order
            .iter()
            .copied()
            .filter(|id| all_points.get(id).is_some_and(|point| point.connected))
            .collect();
        debug!(
            "Pruned {} disconnected points, {} vertices remain",
            all_order.len() - order.len(),
            order.len()
        );

        SpatialGraph {
            order,
            all_points,
            ways,
            adjacency,
            edge_ways,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tags;
    use geo::Coord;
    use rstest::{fixture, rstest};

    fn road(id: u64, refs: &[u64], oneway: bool) -> Way {
        let mut tags = Tags::from([(String::from("highway"), String::from("residential"))]);
        if oneway {
            tags.insert(String::from("oneway"), String::from("yes"));
        }
        Way::new(id, refs.to_vec(), tags)
    }

    #[fixture]
    fn builder() -> GraphBuilder {
        let mut builder = GraphBuilder::default();
        for (id, lon) in [(1, 0.0), (2, 0.001), (3, 0.002), (4, 1.0)] {
            builder.add_point(Point::new(id, Coord { x: lon, y: 0.0 }));
        }
        builder
    }

    #[rstest]
    fn rejects_unknown_way(mut builder: GraphBuilder) {
        let err = builder.build_edges(99).expect_err("way was never added");
        assert_eq!(err, GraphError::WayNotFound { id: 99 });
    }

    #[rstest]
    fn rejects_way_with_missing_point_without_side_effects(mut builder: GraphBuilder) {
        builder.add_way(road(10, &[1, 2, 42], false));
        let err = builder.build_edges(10).expect_err("point 42 is missing");
        assert_eq!(
            err,
            GraphError::MissingPoint {
                way_id: 10,
                point_id: 42
            }
        );
        assert!(builder.adjacency.is_empty());
        assert!(builder.point(1).is_some_and(|point| !point.connected));
    }

    #[rstest]
    #[case(false, 4)]
    #[case(true, 2)]
    fn counts_directed_edges(
        mut builder: GraphBuilder,
        #[case] oneway: bool,
        #[case] expected: usize,
    ) {
        builder.add_way(road(10, &[1, 2, 3], oneway));
        assert_eq!(builder.build_edges(10), Ok(expected));
    }

    #[rstest]
    fn single_point_way_adds_no_edges(mut builder: GraphBuilder) {
        builder.add_way(road(10, &[1], false));
        assert_eq!(builder.build_edges(10), Ok(0));
        assert!(builder.point(1).is_some_and(|point| !point.connected));
    }

    #[rstest]
    fn duplicate_point_replaces_but_keeps_order(mut builder: GraphBuilder) {
        let replaced = builder.add_point(Point::new(1, Coord { x: 9.0, y: 9.0 }));
        assert!(replaced.is_some());
        assert_eq!(builder.order, vec![1, 2, 3, 4]);
        assert_eq!(builder.point(1).map(Point::lon), Some(9.0));
    }

    #[rstest]
    fn finish_prunes_unreferenced_points(mut builder: GraphBuilder) {
        builder.add_way(road(10, &[1, 2, 3], false));
        builder.build_edges(10).expect("points exist");
        let graph = builder.finish();

        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(graph.point(4).is_none());
        assert!(graph.any_point(4).is_some());
    }
}
