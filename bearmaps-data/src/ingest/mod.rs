//! Event-driven construction of a [`MapIndex`].
//!
//! [`MapIngestor`] receives node and way events in document order: every node
//! a way references must arrive before the way. [`load_osm_pbf`] drives it
//! from an OSM PBF file.

use std::path::{Path, PathBuf};

use bearmaps_core::{GraphBuilder, GraphError, MapIndex, Point, PrefixIndex, Tags, Way};
use geo::Coord;
use log::{info, warn};
use osmpbf::{Element, ElementReader};
use thiserror::Error;

mod ids;
mod tags;

pub use ids::ElementKind;
use ids::graph_id;
use tags::{collect_tags, is_navigable};

/// A node record: a location with optional tags.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeEvent {
    /// Source identifier; must not be negative.
    pub id: i64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Source tags. Only `name` is kept.
    pub tags: Tags,
}

impl NodeEvent {
    /// Construct an untagged node event.
    #[must_use]
    pub fn new(id: i64, lon: f64, lat: f64) -> Self {
        Self {
            id,
            lon,
            lat,
            tags: Tags::new(),
        }
    }

    /// Attach a tag, replacing any previous value for `key`.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// A way record: an ordered chain of node references.
#[derive(Debug, Clone, PartialEq)]
pub struct WayEvent {
    /// Source identifier; must not be negative.
    pub id: i64,
    /// Referenced node identifiers in travel order.
    pub node_refs: Vec<i64>,
    /// Source tags, including `highway`, `oneway` and `name`.
    pub tags: Tags,
}

impl WayEvent {
    /// Construct an untagged way event.
    #[must_use]
    pub fn new(id: i64, node_refs: Vec<i64>) -> Self {
        Self {
            id,
            node_refs,
            tags: Tags::new(),
        }
    }

    /// Attach a tag, replacing any previous value for `key`.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Any event the ingestor understands.
#[derive(Debug, Clone, PartialEq)]
pub enum OsmEvent {
    /// A node record.
    Node(NodeEvent),
    /// A way record.
    Way(WayEvent),
}

impl OsmEvent {
    /// Convert a decoded PBF element. Relations carry nothing routable.
    fn from_element(element: &Element<'_>) -> Option<Self> {
        match element {
            Element::Node(node) => Some(Self::Node(NodeEvent {
                id: node.id(),
                lon: node.lon(),
                lat: node.lat(),
                tags: collect_tags(node.tags()),
            })),
            Element::DenseNode(node) => Some(Self::Node(NodeEvent {
                id: node.id(),
                lon: node.lon(),
                lat: node.lat(),
                tags: collect_tags(node.tags()),
            })),
            Element::Way(way) => Some(Self::Way(WayEvent {
                id: way.id(),
                node_refs: way.refs().collect(),
                tags: collect_tags(way.tags()),
            })),
            Element::Relation(_) => None,
        }
    }

    const fn kind(&self) -> ElementKind {
        match self {
            Self::Node(_) => ElementKind::Node,
            Self::Way(_) => ElementKind::Way,
        }
    }

    const fn raw_id(&self) -> i64 {
        match self {
            Self::Node(node) => node.id,
            Self::Way(way) => way.id,
        }
    }
}

/// Errors raised for a single ingested record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    /// The record's identifier, or one of its references, is negative.
    #[error("{kind} identifier {raw_id} is negative")]
    NegativeId {
        /// Kind of the offending identifier.
        kind: ElementKind,
        /// Identifier as read from the source.
        raw_id: i64,
    },
    /// Node coordinates are not finite WGS84 degrees.
    #[error("node {id} has invalid coordinates (lon {lon}, lat {lat})")]
    InvalidCoordinate {
        /// Node identifier.
        id: u64,
        /// Longitude as read from the source.
        lon: f64,
        /// Latitude as read from the source.
        lat: f64,
    },
    /// The graph refused the way, typically for a dangling node reference.
    #[error("way {way_id} could not be added to the graph")]
    Rejected {
        /// Way identifier.
        way_id: u64,
        /// Graph-level cause.
        #[source]
        source: GraphError,
    },
}

impl IngestError {
    /// Whether the record itself is malformed, as opposed to inconsistent
    /// with earlier records.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::NegativeId { .. } | Self::InvalidCoordinate { .. }
        )
    }
}

/// A record that was skipped during ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestIssue {
    /// Kind of the skipped record.
    pub kind: ElementKind,
    /// Source identifier of the skipped record.
    pub raw_id: i64,
    /// Why it was skipped.
    pub error: IngestError,
}

/// Counts and issues gathered while ingesting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngestReport {
    /// Nodes stored as points.
    pub nodes: u64,
    /// Navigable ways expanded into edges.
    pub ways: u64,
    /// Ways skipped because they are not navigable roads.
    pub ignored_ways: u64,
    /// Records rejected as malformed or dangling.
    pub issues: Vec<IngestIssue>,
}

/// Builds the graph and name index from a stream of node and way events.
///
/// # Examples
/// ```
/// use bearmaps_data::{MapIngestor, NodeEvent, OsmEvent, WayEvent};
///
/// let mut ingestor = MapIngestor::default();
/// ingestor.accept(OsmEvent::Node(NodeEvent::new(1, -122.26, 37.87)));
/// ingestor.accept(OsmEvent::Node(
///     NodeEvent::new(2, -122.26, 37.871).with_tag("name", "Top Dog"),
/// ));
/// ingestor.accept(OsmEvent::Way(
///     WayEvent::new(10, vec![1, 2]).with_tag("highway", "residential"),
/// ));
///
/// let (index, report) = ingestor.finish();
/// assert_eq!(index.graph().len(), 2);
/// assert_eq!(index.search_prefix("top"), vec!["Top Dog"]);
/// assert!(report.issues.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MapIngestor {
    builder: GraphBuilder,
    names: PrefixIndex,
    report: IngestReport,
}

impl MapIngestor {
    /// Store a node as a graph point and index its name.
    ///
    /// # Errors
    ///
    /// [`IngestError::NegativeId`] or [`IngestError::InvalidCoordinate`] when
    /// the node is malformed; nothing is stored.
    pub fn node(&mut self, event: NodeEvent) -> Result<(), IngestError> {
        let id = graph_id(ElementKind::Node, event.id)?;
        let location = validated_coord(event.lon, event.lat).ok_or(
            IngestError::InvalidCoordinate {
                id,
                lon: event.lon,
                lat: event.lat,
            },
        )?;

        let mut point = Point::new(id, location);
        if let Some(name) = event.tags.get("name") {
            self.names.insert(name, id);
            point = point.with_tag("name", name.as_str());
        }
        self.builder.add_point(point);
        self.report.nodes += 1;
        Ok(())
    }

    /// Store and expand a way if it is a navigable road.
    ///
    /// Returns whether the way became part of the graph.
    ///
    /// # Errors
    ///
    /// [`IngestError::NegativeId`] when the way or any reference is negative,
    /// and [`IngestError::Rejected`] when it references a node that has not
    /// been ingested. A rejected way is not stored and contributes no edges.
    pub fn way(&mut self, event: WayEvent) -> Result<bool, IngestError> {
        if !is_navigable(&event.tags) {
            self.report.ignored_ways += 1;
            return Ok(false);
        }
        let way_id = graph_id(ElementKind::Way, event.id)?;
        let node_refs = event
            .node_refs
            .into_iter()
            .map(|raw_id| graph_id(ElementKind::Node, raw_id))
            .collect::<Result<Vec<_>, _>>()?;

        let missing = node_refs
            .iter()
            .find(|&&id| self.builder.point(id).is_none());
        if let Some(&point_id) = missing {
            return Err(IngestError::Rejected {
                way_id,
                source: GraphError::MissingPoint { way_id, point_id },
            });
        }

        self.builder.add_way(Way::new(way_id, node_refs, event.tags));
        self.builder
            .build_edges(way_id)
            .map_err(|source| IngestError::Rejected { way_id, source })?;
        self.report.ways += 1;
        Ok(true)
    }

    /// Apply an event, recording and logging it as an issue if it fails.
    pub fn accept(&mut self, event: OsmEvent) {
        let kind = event.kind();
        let raw_id = event.raw_id();
        let outcome = match event {
            OsmEvent::Node(node) => self.node(node),
            OsmEvent::Way(way) => self.way(way).map(|_| ()),
        };
        if let Err(error) = outcome {
            warn!("Skipped {kind} {raw_id}: {error}");
            self.report.issues.push(IngestIssue {
                kind,
                raw_id,
                error,
            });
        }
    }

    /// Prune the graph and hand over the finished index with the report.
    #[must_use]
    pub fn finish(self) -> (MapIndex, IngestReport) {
        let graph = self.builder.finish();
        (MapIndex::new(graph, self.names), self.report)
    }
}

/// Errors returned when loading an OSM PBF file.
#[derive(Debug, Error)]
pub enum OsmLoadError {
    /// The file could not be opened.
    #[error("failed to open OSM PBF file at {path:?}")]
    Open {
        /// Underlying reader error.
        #[source]
        source: osmpbf::Error,
        /// File that was requested.
        path: PathBuf,
    },
    /// The file was opened but its contents could not be decoded.
    #[error("failed to decode OSM PBF data at {path:?}")]
    Decode {
        /// Underlying decoder error.
        #[source]
        source: osmpbf::Error,
        /// File being decoded.
        path: PathBuf,
    },
}

/// Build a [`MapIndex`] from an OSM PBF extract.
///
/// Elements are read sequentially so nodes precede the ways that use them.
/// Records that fail validation are skipped and listed in the report.
///
/// # Errors
///
/// [`OsmLoadError::Open`] when the file cannot be opened and
/// [`OsmLoadError::Decode`] when its contents are not valid PBF.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
/// use bearmaps_data::load_osm_pbf;
///
/// # fn main() -> Result<(), bearmaps_data::OsmLoadError> {
/// let (index, report) = load_osm_pbf(Path::new("berkeley.osm.pbf"))?;
/// println!("{} vertices, {} issues", index.graph().len(), report.issues.len());
/// # Ok(())
/// # }
/// ```
pub fn load_osm_pbf(path: &Path) -> Result<(MapIndex, IngestReport), OsmLoadError> {
    let reader = ElementReader::from_path(path).map_err(|source| OsmLoadError::Open {
        source,
        path: path.to_path_buf(),
    })?;

    let mut ingestor = MapIngestor::default();
    reader
        .for_each(|element| {
            if let Some(event) = OsmEvent::from_element(&element) {
                ingestor.accept(event);
            }
        })
        .map_err(|source| OsmLoadError::Decode {
            source,
            path: path.to_path_buf(),
        })?;

    let (index, report) = ingestor.finish();
    info!(
        "Loaded {} nodes and {} roads from {} ({} vertices kept, {} ways ignored, {} issues)",
        report.nodes,
        report.ways,
        path.display(),
        index.graph().len(),
        report.ignored_ways,
        report.issues.len()
    );
    Ok((index, report))
}

fn validated_coord(lon: f64, lat: f64) -> Option<Coord<f64>> {
    (lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat))
    .then_some(Coord { x: lon, y: lat })
}
