use std::fmt;

use super::IngestError;

/// Kind of OSM element an event or issue refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A node: a point with coordinates.
    Node,
    /// A way: an ordered list of node references.
    Way,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Node => "node",
            Self::Way => "way",
        })
    }
}

/// Convert a signed OSM identifier into a graph identifier.
pub(super) fn graph_id(kind: ElementKind, raw_id: i64) -> Result<u64, IngestError> {
    u64::try_from(raw_id).map_err(|_| IngestError::NegativeId { kind, raw_id })
}
