//! Raster command: pick the tiles covering a viewport.

use std::io::Write;

use bearmaps_core::{RasterRequest, select_tiles};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_HEIGHT, ARG_LRLAT, ARG_LRLON, ARG_REQUEST, ARG_ULLAT, ARG_ULLON, ARG_WIDTH, CliError,
    ENV_RASTER_HEIGHT, ENV_RASTER_LRLAT, ENV_RASTER_LRLON, ENV_RASTER_ULLAT, ENV_RASTER_ULLON,
    ENV_RASTER_WIDTH, require_existing, required, write_json,
};

/// CLI arguments for the `raster` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Select the tiles covering a viewport. Give either the six \
                 viewport parameters or a JSON request file with the same \
                 field names; the response is printed as JSON.",
    about = "Select the tiles covering a viewport",
    allow_negative_numbers = true
)]
#[ortho_config(prefix = "BEARMAPS")]
pub(crate) struct RasterArgs {
    /// Path to a JSON file holding a complete raster request.
    #[arg(long = ARG_REQUEST, value_name = "path")]
    #[serde(default)]
    pub(crate) request: Option<Utf8PathBuf>,
    /// Longitude of the viewport's upper-left corner.
    #[arg(long = ARG_ULLON, value_name = "degrees")]
    #[serde(default)]
    pub(crate) ullon: Option<f64>,
    /// Latitude of the viewport's upper-left corner.
    #[arg(long = ARG_ULLAT, value_name = "degrees")]
    #[serde(default)]
    pub(crate) ullat: Option<f64>,
    /// Longitude of the viewport's lower-right corner.
    #[arg(long = ARG_LRLON, value_name = "degrees")]
    #[serde(default)]
    pub(crate) lrlon: Option<f64>,
    /// Latitude of the viewport's lower-right corner.
    #[arg(long = ARG_LRLAT, value_name = "degrees")]
    #[serde(default)]
    pub(crate) lrlat: Option<f64>,
    /// Viewport width in pixels.
    #[arg(long = ARG_WIDTH, value_name = "pixels")]
    #[serde(default)]
    pub(crate) w: Option<f64>,
    /// Viewport height in pixels.
    #[arg(long = ARG_HEIGHT, value_name = "pixels")]
    #[serde(default)]
    pub(crate) h: Option<f64>,
}

/// Where the raster request comes from once configuration is merged.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RasterSource {
    /// A JSON request file; wins over individual parameters.
    File(Utf8PathBuf),
    /// Parameters given as flags, config or environment.
    Inline(RasterRequest),
}

impl TryFrom<RasterArgs> for RasterSource {
    type Error = CliError;

    fn try_from(args: RasterArgs) -> Result<Self, Self::Error> {
        if let Some(path) = args.request {
            return Ok(Self::File(path));
        }
        Ok(Self::Inline(RasterRequest {
            ullon: required(args.ullon, ARG_ULLON, ENV_RASTER_ULLON)?,
            ullat: required(args.ullat, ARG_ULLAT, ENV_RASTER_ULLAT)?,
            lrlon: required(args.lrlon, ARG_LRLON, ENV_RASTER_LRLON)?,
            lrlat: required(args.lrlat, ARG_LRLAT, ENV_RASTER_LRLAT)?,
            w: required(args.w, ARG_WIDTH, ENV_RASTER_WIDTH)?,
            h: required(args.h, ARG_HEIGHT, ENV_RASTER_HEIGHT)?,
        }))
    }
}

impl RasterSource {
    fn into_request(self) -> Result<RasterRequest, CliError> {
        match self {
            Self::File(path) => {
                require_existing(&path, ARG_REQUEST)?;
                load_raster_request(&path)
            }
            Self::Inline(request) => Ok(request),
        }
    }
}

pub(crate) fn run_raster(args: RasterArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let request = RasterSource::try_from(merged)?.into_request()?;
    write_json(writer, &select_tiles(&request))
}

/// Loads a JSON-encoded [`RasterRequest`] from disk.
pub(crate) fn load_raster_request(path: &Utf8Path) -> Result<RasterRequest, CliError> {
    let payload = bearmaps_fs::read_utf8(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&payload).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}
