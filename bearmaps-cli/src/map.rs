//! Loading the map index a query runs against.

use bearmaps_core::MapIndex;
use bearmaps_data::load_osm_pbf;
use camino::Utf8Path;

use crate::CliError;

/// Produces the [`MapIndex`] for a query invocation.
pub(crate) trait MapLoader {
    fn load(&self, path: &Utf8Path) -> Result<MapIndex, CliError>;
}

/// Reads the index from an OSM PBF extract on disk.
pub(crate) struct PbfMapLoader;

impl MapLoader for PbfMapLoader {
    fn load(&self, path: &Utf8Path) -> Result<MapIndex, CliError> {
        let (index, _report) = load_osm_pbf(path.as_std_path())?;
        Ok(index)
    }
}
