//! Test helpers: stub map loaders and scratch files.

use super::*;
use bearmaps_core::MapIndex;
use bearmaps_data::{MapIngestor, NodeEvent, OsmEvent, WayEvent};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn scratch_dir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Three connected corners on one street plus two named places off it.
pub(super) fn sample_index() -> MapIndex {
    let mut ingestor = MapIngestor::default();
    let nodes = [
        NodeEvent::new(1, -122.2590, 37.8680),
        NodeEvent::new(2, -122.2590, 37.8690),
        NodeEvent::new(3, -122.2580, 37.8690),
        NodeEvent::new(4, -122.2595, 37.8703).with_tag("name", "Sather Gate"),
        NodeEvent::new(5, -122.2500, 37.8600).with_tag("name", "Safeway"),
    ];
    for node in nodes {
        ingestor.accept(OsmEvent::Node(node));
    }
    ingestor.accept(OsmEvent::Way(
        WayEvent::new(10, vec![1, 2, 3]).with_tag("highway", "residential"),
    ));
    ingestor.finish().0
}

/// Serves [`sample_index`] regardless of the requested path.
pub(super) struct StubMapLoader;

impl MapLoader for StubMapLoader {
    fn load(&self, _path: &Utf8Path) -> Result<MapIndex, CliError> {
        Ok(sample_index())
    }
}

/// Serves an index without any vertices or names.
pub(super) struct EmptyMapLoader;

impl MapLoader for EmptyMapLoader {
    fn load(&self, _path: &Utf8Path) -> Result<MapIndex, CliError> {
        Ok(MapIngestor::default().finish().0)
    }
}

/// Parse `argv` and dispatch it, capturing stdout in `buffer`.
pub(super) fn run_captured(
    argv: &[String],
    loader: &dyn MapLoader,
    buffer: &mut Vec<u8>,
) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(argv).map_err(CliError::from)?;
    dispatch(cli.command, loader, buffer)
}
