//! Facade crate for the BearMaps backend.
//!
//! This crate re-exports the query structures from `bearmaps-core` and, behind
//! the `osm-pbf` feature, the ingestion entry points from `bearmaps-data`.
//!
//! # Examples
//! ```
//! # #[cfg(feature = "osm-pbf")]
//! # {
//! use bearmaps::{
//!     CharSlot, ElementKind, GraphError, IngestError, MapIngestor, NodeEvent, OsmEvent, Tags,
//!     Way, WayEvent, clean_name,
//! };
//!
//! let mut ingestor = MapIngestor::default();
//! ingestor.accept(OsmEvent::Node(
//!     NodeEvent::new(1, -122.2590, 37.8690).with_tag("name", "Caffe Strada"),
//! ));
//! ingestor.accept(OsmEvent::Node(NodeEvent::new(2, -122.2580, 37.8690)));
//! let street = WayEvent::new(7, vec![1, 2]).with_tag("highway", "residential");
//! ingestor.accept(OsmEvent::Way(street));
//! ingestor.accept(OsmEvent::Way(
//!     WayEvent::new(8, vec![2, 9]).with_tag("highway", "residential"),
//! ));
//!
//! let (index, report) = ingestor.finish();
//! assert_eq!(report.ways, 1);
//! let issue = &report.issues[0];
//! assert_eq!(issue.kind, ElementKind::Way);
//! assert!(matches!(
//!     issue.error,
//!     IngestError::Rejected { source: GraphError::MissingPoint { point_id: 9, .. }, .. }
//! ));
//! assert_eq!(index.search_prefix("caf"), vec![String::from("Caffe Strada")]);
//!
//! assert_eq!(clean_name("Caffe Strada!"), "caffe strada");
//! assert_eq!(CharSlot::of(' '), CharSlot::Other);
//! assert!(!Way::new(7, vec![1, 2], Tags::new()).is_oneway());
//! # }
//! ```

#![forbid(unsafe_code)]

pub use bearmaps_core::{
    CharSlot, GraphBuilder, GraphError, Location, MapIndex, Point, PrefixIndex, RasterRequest,
    RasterResponse, SpatialGraph, Tags, TileId, TilePyramid, TilePyramidError, Way, clean_name,
    geo_math, select_tiles,
};

#[cfg(feature = "osm-pbf")]
pub use bearmaps_data::{
    ElementKind, IngestError, IngestIssue, IngestReport, MapIngestor, NodeEvent, OsmEvent,
    OsmLoadError, WayEvent, load_osm_pbf,
};
