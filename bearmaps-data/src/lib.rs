//! Ingestion of OpenStreetMap data into the BearMaps query structures.
//!
//! Responsibilities:
//! - Turn node and way records into graph points, road edges and
//!   autocomplete entries.
//! - Read OSM PBF extracts in document order.
//!
//! Boundaries:
//! - Graph, trie and tile rules live in `bearmaps-core`.
//! - Ingestion is single-threaded; the finished [`MapIndex`] is what gets
//!   shared.
//!
//! Invariants:
//! - A malformed or dangling record never aborts a load; it is logged and
//!   reported.
//!
//! [`MapIndex`]: bearmaps_core::MapIndex

pub mod ingest;

pub use ingest::{
    ElementKind, IngestError, IngestIssue, IngestReport, MapIngestor, NodeEvent, OsmEvent,
    OsmLoadError, WayEvent, load_osm_pbf,
};
