use std::collections::HashMap;

use geo::Coord;

/// OpenStreetMap-style free-form key/value tags.
pub type Tags = HashMap<String, String>;

/// A navigable location: a vertex of the road graph.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bearmaps_core::Point;
///
/// let point = Point::new(1, Coord { x: -122.25, y: 37.87 })
///     .with_tag("name", "Sather Gate");
///
/// assert_eq!(point.name(), Some("Sather Gate"));
/// assert!(!point.connected);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Unique identifier.
    pub id: u64,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Set once any road segment references this point.
    pub connected: bool,
    /// Free-form metadata such as a display `name`.
    pub tags: Tags,
}

impl Point {
    /// Construct an untagged, not yet connected point.
    #[must_use]
    pub fn new(id: u64, location: Coord<f64>) -> Self {
        Self {
            id,
            location,
            connected: false,
            tags: Tags::new(),
        }
    }

    /// Attach a tag, replacing any earlier value for `key`.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.location.x
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// The `name` tag, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }
}

/// An ordered path through previously added points.
///
/// A way tagged `oneway=yes` only permits travel in node order.
#[derive(Debug, Clone, PartialEq)]
pub struct Way {
    /// Unique identifier.
    pub id: u64,
    /// Point identifiers in travel order.
    pub node_refs: Vec<u64>,
    /// Free-form metadata such as `name`, `highway` and `oneway`.
    pub tags: Tags,
}

impl Way {
    /// Construct a way from its node references and tags.
    #[must_use]
    pub const fn new(id: u64, node_refs: Vec<u64>, tags: Tags) -> Self {
        Self {
            id,
            node_refs,
            tags,
        }
    }

    /// Whether travel is restricted to node order.
    #[must_use]
    pub fn is_oneway(&self) -> bool {
        self.tags.get("oneway").is_some_and(|value| value == "yes")
    }

    /// The `name` tag, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }
}
