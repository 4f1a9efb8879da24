//! Command-line interface for querying BearMaps data.
//!
//! Every subcommand prints a single JSON document on stdout so the output can
//! be piped straight into the web front end or `jq`.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod map;
mod query;
mod raster;

pub use error::CliError;
use map::{MapLoader, PbfMapLoader};
use query::{LocateArgs, NearestArgs, SearchArgs};
use raster::RasterArgs;

const ARG_OSM_PBF: &str = "osm-pbf";
const ARG_REQUEST: &str = "request";
const ARG_ULLON: &str = "ullon";
const ARG_ULLAT: &str = "ullat";
const ARG_LRLON: &str = "lrlon";
const ARG_LRLAT: &str = "lrlat";
const ARG_WIDTH: &str = "w";
const ARG_HEIGHT: &str = "h";
const ARG_PREFIX: &str = "prefix";
const ARG_NAME: &str = "name";
const ARG_LON: &str = "lon";
const ARG_LAT: &str = "lat";
const ENV_RASTER_ULLON: &str = "BEARMAPS_CMDS_RASTER_ULLON";
const ENV_RASTER_ULLAT: &str = "BEARMAPS_CMDS_RASTER_ULLAT";
const ENV_RASTER_LRLON: &str = "BEARMAPS_CMDS_RASTER_LRLON";
const ENV_RASTER_LRLAT: &str = "BEARMAPS_CMDS_RASTER_LRLAT";
const ENV_RASTER_WIDTH: &str = "BEARMAPS_CMDS_RASTER_W";
const ENV_RASTER_HEIGHT: &str = "BEARMAPS_CMDS_RASTER_H";
const ENV_SEARCH_PREFIX: &str = "BEARMAPS_CMDS_SEARCH_PREFIX";
const ENV_SEARCH_OSM_PBF: &str = "BEARMAPS_CMDS_SEARCH_OSM_PBF";
const ENV_LOCATE_NAME: &str = "BEARMAPS_CMDS_LOCATE_NAME";
const ENV_LOCATE_OSM_PBF: &str = "BEARMAPS_CMDS_LOCATE_OSM_PBF";
const ENV_NEAREST_LON: &str = "BEARMAPS_CMDS_NEAREST_LON";
const ENV_NEAREST_LAT: &str = "BEARMAPS_CMDS_NEAREST_LAT";
const ENV_NEAREST_OSM_PBF: &str = "BEARMAPS_CMDS_NEAREST_OSM_PBF";

/// Run the BearMaps CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, configuration merging,
/// input loading or writing the JSON output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &PbfMapLoader, &mut stdout)
}

fn dispatch(
    command: Command,
    loader: &dyn MapLoader,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Raster(args) => raster::run_raster(args, writer),
        Command::Search(args) => query::run_search(args, loader, writer),
        Command::Locate(args) => query::run_locate(args, loader, writer),
        Command::Nearest(args) => query::run_nearest(args, loader, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "bearmaps",
    about = "Query map tiles, place names and road vertices for BearMaps",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Select the tiles covering a viewport.
    Raster(RasterArgs),
    /// Autocomplete place names from a prefix.
    Search(SearchArgs),
    /// Resolve every place with an exact name.
    Locate(LocateArgs),
    /// Find the road vertex closest to a coordinate.
    Nearest(NearestArgs),
}

/// Unwrap a merged option or report which flag and variable can supply it.
fn required<T>(value: Option<T>, field: &'static str, env: &'static str) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match bearmaps_fs::is_regular_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
