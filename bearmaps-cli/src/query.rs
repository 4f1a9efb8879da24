//! Map queries: prefix search, exact-name lookup and nearest vertex.

use std::io::Write;

use bearmaps_core::MapIndex;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::map::MapLoader;
use crate::{
    ARG_LAT, ARG_LON, ARG_NAME, ARG_OSM_PBF, ARG_PREFIX, CliError, ENV_LOCATE_NAME,
    ENV_LOCATE_OSM_PBF, ENV_NEAREST_LAT, ENV_NEAREST_LON, ENV_NEAREST_OSM_PBF, ENV_SEARCH_OSM_PBF,
    ENV_SEARCH_PREFIX, require_existing, required, write_json,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List place names starting with a prefix")]
#[ortho_config(prefix = "BEARMAPS")]
pub(crate) struct SearchArgs {
    /// Name prefix; case and punctuation are ignored.
    #[arg(value_name = ARG_PREFIX)]
    #[serde(default)]
    pub(crate) prefix: Option<String>,
    /// Path to the OpenStreetMap PBF extract.
    #[arg(long = ARG_OSM_PBF, value_name = "path")]
    #[serde(default)]
    pub(crate) osm_pbf: Option<Utf8PathBuf>,
}

/// CLI arguments for the `locate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print every place with exactly this name")]
#[ortho_config(prefix = "BEARMAPS")]
pub(crate) struct LocateArgs {
    /// Full place name; case and punctuation are ignored.
    #[arg(value_name = ARG_NAME)]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// Path to the OpenStreetMap PBF extract.
    #[arg(long = ARG_OSM_PBF, value_name = "path")]
    #[serde(default)]
    pub(crate) osm_pbf: Option<Utf8PathBuf>,
}

/// CLI arguments for the `nearest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    about = "Find the road vertex closest to a coordinate",
    allow_negative_numbers = true
)]
#[ortho_config(prefix = "BEARMAPS")]
pub(crate) struct NearestArgs {
    /// Longitude in degrees.
    #[arg(long = ARG_LON, value_name = "degrees")]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Latitude in degrees.
    #[arg(long = ARG_LAT, value_name = "degrees")]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Path to the OpenStreetMap PBF extract.
    #[arg(long = ARG_OSM_PBF, value_name = "path")]
    #[serde(default)]
    pub(crate) osm_pbf: Option<Utf8PathBuf>,
}

/// Resolved `search` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    pub(crate) prefix: String,
    pub(crate) osm_pbf: Utf8PathBuf,
}

/// Resolved `locate` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LocateConfig {
    pub(crate) name: String,
    pub(crate) osm_pbf: Utf8PathBuf,
}

/// Resolved `nearest` configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearestConfig {
    pub(crate) target: Coord<f64>,
    pub(crate) osm_pbf: Utf8PathBuf,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            prefix: required(args.prefix, ARG_PREFIX, ENV_SEARCH_PREFIX)?,
            osm_pbf: required(args.osm_pbf, ARG_OSM_PBF, ENV_SEARCH_OSM_PBF)?,
        })
    }
}

impl TryFrom<LocateArgs> for LocateConfig {
    type Error = CliError;

    fn try_from(args: LocateArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required(args.name, ARG_NAME, ENV_LOCATE_NAME)?,
            osm_pbf: required(args.osm_pbf, ARG_OSM_PBF, ENV_LOCATE_OSM_PBF)?,
        })
    }
}

impl TryFrom<NearestArgs> for NearestConfig {
    type Error = CliError;

    fn try_from(args: NearestArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            target: Coord {
                x: required(args.lon, ARG_LON, ENV_NEAREST_LON)?,
                y: required(args.lat, ARG_LAT, ENV_NEAREST_LAT)?,
            },
            osm_pbf: required(args.osm_pbf, ARG_OSM_PBF, ENV_NEAREST_OSM_PBF)?,
        })
    }
}

/// The closest road vertex to a queried coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct NearestVertex {
    pub(crate) id: u64,
    pub(crate) lon: f64,
    pub(crate) lat: f64,
}

fn load_map(
    loader: &dyn MapLoader,
    path: &Utf8Path,
) -> Result<MapIndex, CliError> {
    require_existing(path, ARG_OSM_PBF)?;
    loader.load(path)
}

pub(crate) fn run_search(
    args: SearchArgs,
    loader: &dyn MapLoader,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = SearchConfig::try_from(merged)?;
    let index = load_map(loader, &config.osm_pbf)?;
    write_json(writer, &index.search_prefix(&config.prefix))
}

pub(crate) fn run_locate(
    args: LocateArgs,
    loader: &dyn MapLoader,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = LocateConfig::try_from(merged)?;
    let index = load_map(loader, &config.osm_pbf)?;
    write_json(writer, &index.locations(&config.name))
}

pub(crate) fn run_nearest(
    args: NearestArgs,
    loader: &dyn MapLoader,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = NearestConfig::try_from(merged)?;
    let index = load_map(loader, &config.osm_pbf)?;
    write_json(writer, &nearest_vertex(&index, config.target)?)
}

pub(crate) fn nearest_vertex(
    index: &MapIndex,
    target: Coord<f64>,
) -> Result<NearestVertex, CliError> {
    let graph = index.graph();
    let located = graph.closest(target).and_then(|id| {
        Ok(NearestVertex {
            id,
            lon: graph.lon(id)?,
            lat: graph.lat(id)?,
        })
    });
    located.map_err(|source| CliError::NearestVertex {
        lon: target.x,
        lat: target.y,
        source,
    })
}
