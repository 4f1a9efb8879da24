//! Error types emitted by the BearMaps CLI.

use std::sync::Arc;

use bearmaps_core::GraphError;
use bearmaps_data::OsmLoadError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the BearMaps CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the raster request file failed.
    #[error("failed to read raster request at {path:?}: {source}")]
    OpenRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Raster request JSON could not be decoded.
    #[error("failed to parse raster request JSON at {path:?}: {source}")]
    ParseRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Loading the OSM extract failed.
    #[error("failed to load map data: {0}")]
    LoadMap(#[from] OsmLoadError),
    /// The nearest-vertex query had nothing to search.
    #[error("no vertex near ({lon}, {lat}): {source}")]
    NearestVertex {
        lon: f64,
        lat: f64,
        #[source]
        source: GraphError,
    },
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
