//! Core domain types for the `BearMaps` viewer backend.
//!
//! Responsibilities:
//! - Great-circle maths on WGS84 coordinates ([`geo_math`]).
//! - The road graph, built once through [`GraphBuilder`] and then frozen into
//!   a read-only [`SpatialGraph`].
//! - Autocomplete over location names ([`PrefixIndex`]).
//! - Choosing which pre-rendered tiles cover a viewport ([`TilePyramid`]).
//!
//! Boundaries:
//! - No I/O. Parsing map extracts lives in `bearmaps-data`.
//! - Coordinates are WGS84 with `x = longitude`, `y = latitude`.

#![forbid(unsafe_code)]

pub mod geo_math;
pub mod graph;
mod index;
mod point;
pub mod raster;
pub mod trie;

pub use graph::{GraphBuilder, GraphError, SpatialGraph};
pub use index::{Location, MapIndex};
pub use point::{Point, Tags, Way};
pub use raster::{RasterRequest, RasterResponse, TileId, TilePyramid, TilePyramidError, select_tiles};
pub use trie::{CharSlot, PrefixIndex, clean_name};
