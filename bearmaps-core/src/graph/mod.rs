//! Road graph built from map-extract points and ways.
//!
//! The graph has two phases. [`GraphBuilder`] is mutable and fed by a single
//! ingestion producer. [`GraphBuilder::finish`] prunes every point no way
//! touches and yields a [`SpatialGraph`], which only offers read access and
//! can be shared across threads without synchronisation.

mod builder;
mod error;

use std::collections::HashMap;

use geo::Coord;

pub use builder::GraphBuilder;
pub use error::GraphError;

use crate::{Point, Way, geo_math};

/// Frozen road graph answering vertex, adjacency and distance queries.
#[derive(Debug, Clone)]
pub struct SpatialGraph {
    /// Active vertex identifiers in insertion order.
    order: Vec<u64>,
    /// Every point ever added, including pruned ones.
    all_points: HashMap<u64, Point>,
    ways: HashMap<u64, Way>,
    adjacency: HashMap<u64, Vec<u64>>,
    edge_ways: HashMap<(u64, u64), u64>,
}

impl SpatialGraph {
    /// Active vertex identifiers in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = u64> + '_ {
        self.order.iter().copied()
    }

    /// Number of active vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether pruning left no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identifiers of every stored way.
    pub fn way_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.ways.keys().copied()
    }

    /// An active vertex.
    #[must_use]
    pub fn point(&self, id: u64) -> Option<&Point> {
        self.all_points.get(&id).filter(|point| point.connected)
    }

    /// Any ingested point, including those pruned as disconnected.
    #[must_use]
    pub fn any_point(&self, id: u64) -> Option<&Point> {
        self.all_points.get(&id)
    }

    /// Neighbours reachable from `id` in edge insertion order.
    ///
    /// # Errors
    ///
    /// [`GraphError::PointNotFound`] when `id` has no outgoing edge. This
    /// covers pruned points and the last node of a oneway way, which stays a
    /// vertex but has nowhere to go.
    pub fn adjacent(&self, id: u64) -> Result<&[u64], GraphError> {
        self.adjacency
            .get(&id)
            .map(Vec::as_slice)
            .ok_or(GraphError::PointNotFound { id })
    }

    /// Longitude of an active vertex.
    ///
    /// # Errors
    ///
    /// [`GraphError::PointNotFound`] when `id` is not an active vertex.
    pub fn lon(&self, id: u64) -> Result<f64, GraphError> {
        self.location(id).map(|location| location.x)
    }

    /// Latitude of an active vertex.
    ///
    /// # Errors
    ///
    /// [`GraphError::PointNotFound`] when `id` is not an active vertex.
    pub fn lat(&self, id: u64) -> Result<f64, GraphError> {
        self.location(id).map(|location| location.y)
    }

    /// Great-circle distance in miles between two active vertices.
    ///
    /// # Errors
    ///
    /// [`GraphError::PointNotFound`] when either vertex is unknown or pruned.
    pub fn distance(&self, from: u64, to: u64) -> Result<f64, GraphError> {
        Ok(geo_math::distance(self.location(from)?, self.location(to)?))
    }

    /// Initial bearing in degrees from one active vertex to another.
    ///
    /// # Errors
    ///
    /// [`GraphError::PointNotFound`] when either vertex is unknown or pruned.
    pub fn bearing(&self, from: u64, to: u64) -> Result<f64, GraphError> {
        Ok(geo_math::bearing(self.location(from)?, self.location(to)?))
    }

    /// The active vertex nearest to `target`.
    ///
    /// Scans every vertex; ties go to the vertex inserted first.
    ///
    /// # Errors
    ///
    /// [`GraphError::EmptyGraph`] when there are no active vertices.
    pub fn closest(&self, target: Coord<f64>) -> Result<u64, GraphError> {
        let mut best: Option<(u64, f64)> = None;
        for point in self.order.iter().filter_map(|id| self.all_points.get(id)) {
            let miles = geo_math::distance(point.location, target);
            if best.is_none_or(|(_, nearest)| miles < nearest) {
                best = Some((point.id, miles));
            }
        }
        best.map(|(id, _)| id).ok_or(GraphError::EmptyGraph)
    }

    /// The `name` tag of a way, `None` when the way is unnamed.
    ///
    /// # Errors
    ///
    /// [`GraphError::WayNotFound`] when no such way was added.
    pub fn way_name(&self, way_id: u64) -> Result<Option<&str>, GraphError> {
        self.ways
            .get(&way_id)
            .map(Way::name)
            .ok_or(GraphError::WayNotFound { id: way_id })
    }

    /// The way that produced the directed edge `from -> to`.
    ///
    /// # Errors
    ///
    /// [`GraphError::EdgeNotFound`] when the points are not directly linked
    /// in that direction.
    pub fn edge_way_id(&self, from: u64, to: u64) -> Result<u64, GraphError> {
        self.edge_ways
            .get(&(from, to))
            .copied()
            .ok_or(GraphError::EdgeNotFound { from, to })
    }

    fn location(&self, id: u64) -> Result<Coord<f64>, GraphError> {
        self.point(id)
            .map(|point| point.location)
            .ok_or(GraphError::PointNotFound { id })
    }
}
