use thiserror::Error;

/// Errors raised while building or querying the road graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The point is unknown or was pruned as disconnected.
    #[error("point {id} is not part of the graph")]
    PointNotFound {
        /// Identifier that was looked up.
        id: u64,
    },
    /// No way with this identifier was added.
    #[error("way {id} is not part of the graph")]
    WayNotFound {
        /// Identifier that was looked up.
        id: u64,
    },
    /// The two points are not joined by a direct edge in this direction.
    #[error("no edge leads from point {from} to point {to}")]
    EdgeNotFound {
        /// Start of the queried edge.
        from: u64,
        /// End of the queried edge.
        to: u64,
    },
    /// A way was expanded before one of its points was added.
    ///
    /// Ingestion must deliver every point a way references before the way
    /// itself. The way is left unexpanded.
    #[error("way {way_id} references point {point_id}, which has not been added")]
    MissingPoint {
        /// Way whose expansion was rejected.
        way_id: u64,
        /// First referenced point that was absent.
        point_id: u64,
    },
    /// A nearest-vertex query ran against a graph with no vertices.
    #[error("the graph has no vertices")]
    EmptyGraph,
}

impl GraphError {
    /// Whether the error reports a missing point, way or edge.
    ///
    /// Lookups failing this way are ordinary query outcomes rather than
    /// ingestion bugs.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PointNotFound { .. }
                | Self::WayNotFound { .. }
                | Self::EdgeNotFound { .. }
                | Self::EmptyGraph
        )
    }
}
