//! Choosing the pre-rendered tiles that cover a viewport.
//!
//! Tiles form an image quadtree over a fixed root box: depth `d` splits the
//! root into `2^d x 2^d` tiles of `tile_pixels` square pixels each. A query
//! picks the shallowest depth whose resolution is finer than the viewport's,
//! then the rectangle of tiles overlapping the viewport at that depth.

use std::fmt;

use geo::Coord;
use thiserror::Error;

/// Deepest level the reference pyramid provides.
pub const MAX_DEPTH: u8 = 7;

/// Upper-left corner of the reference pyramid.
pub const ROOT_UPPER_LEFT: Coord<f64> = Coord {
    x: -122.299_804_687_5,
    y: 37.892_195_547_244_356,
};

/// Lower-right corner of the reference pyramid.
pub const ROOT_LOWER_RIGHT: Coord<f64> = Coord {
    x: -122.211_914_062_5,
    y: 37.822_802_433_527_56,
};

/// Edge length of every tile image, in pixels.
pub const TILE_PIXELS: u32 = 256;

/// Largest number of levels a pyramid may declare.
const LEVEL_LIMIT: u8 = 31;

/// A viewport query: bounding box in degrees plus the viewport's size in
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterRequest {
    /// Upper-left longitude.
    pub ullon: f64,
    /// Upper-left latitude.
    pub ullat: f64,
    /// Lower-right longitude.
    pub lrlon: f64,
    /// Lower-right latitude.
    pub lrlat: f64,
    /// Viewport width in pixels.
    pub w: f64,
    /// Viewport height in pixels.
    pub h: f64,
}

/// Tiles covering a viewport, laid out for concatenation.
///
/// When `query_success` is `false` the viewport misses the pyramid entirely
/// and the remaining fields carry no meaning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterResponse {
    /// Tile file names, one row per tile row from north to south.
    pub render_grid: Vec<Vec<String>>,
    /// Upper-left longitude of the returned tiles.
    pub raster_ul_lon: f64,
    /// Upper-left latitude of the returned tiles.
    pub raster_ul_lat: f64,
    /// Lower-right longitude of the returned tiles.
    pub raster_lr_lon: f64,
    /// Lower-right latitude of the returned tiles.
    pub raster_lr_lat: f64,
    /// Pyramid depth of every returned tile.
    pub depth: u8,
    /// Whether the viewport overlaps the pyramid at all.
    pub query_success: bool,
}

/// Position of one tile within the pyramid.
///
/// # Examples
/// ```
/// use bearmaps_core::TileId;
///
/// let tile = TileId { depth: 3, x: 4, y: 1 };
/// assert_eq!(tile.to_string(), "d3_x4_y1.png");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    /// Pyramid depth.
    pub depth: u8,
    /// Column, counted eastwards from the root's western edge.
    pub x: i64,
    /// Row, counted southwards from the root's northern edge.
    pub y: i64,
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}_x{}_y{}.png", self.depth, self.x, self.y)
    }
}

/// Errors returned by [`TilePyramid::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TilePyramidError {
    /// A root corner was NaN or infinite.
    #[error("root corners must be finite")]
    NonFiniteRoot,
    /// The upper-left corner is not north-west of the lower-right corner.
    #[error("upper-left corner {upper_left:?} must lie north-west of {lower_right:?}")]
    InvertedRoot {
        /// Supplied upper-left corner.
        upper_left: Coord<f64>,
        /// Supplied lower-right corner.
        lower_right: Coord<f64>,
    },
    /// The level count was zero or too large to index.
    #[error("a pyramid needs between 1 and {max} levels, got {levels}")]
    InvalidLevels {
        /// Supplied level count.
        levels: u8,
        /// Largest supported level count.
        max: u8,
    },
    /// Tiles must be at least one pixel wide.
    #[error("tile size must be positive")]
    EmptyTiles,
}

/// Geometry of a tile pyramid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePyramid {
    upper_left: Coord<f64>,
    lower_right: Coord<f64>,
    levels: u8,
    tile_pixels: u32,
}

impl Default for TilePyramid {
    /// The eight-level pyramid of 256-pixel tiles over Berkeley.
    fn default() -> Self {
        Self {
            upper_left: ROOT_UPPER_LEFT,
            lower_right: ROOT_LOWER_RIGHT,
            levels: MAX_DEPTH + 1,
            tile_pixels: TILE_PIXELS,
        }
    }
}

impl TilePyramid {
    /// Describe a pyramid over a custom root box.
    ///
    /// # Errors
    ///
    /// Returns a [`TilePyramidError`] when the root box is not finite or
    /// inverted, the level count is outside `1..=31`, or tiles are empty.
    pub fn new(
        upper_left: Coord<f64>,
        lower_right: Coord<f64>,
        levels: u8,
        tile_pixels: u32,
    ) -> Result<Self, TilePyramidError> {
        let corners = [upper_left.x, upper_left.y, lower_right.x, lower_right.y];
        if !corners.iter().all(|value| value.is_finite()) {
            return Err(TilePyramidError::NonFiniteRoot);
        }
        if upper_left.x >= lower_right.x || upper_left.y <= lower_right.y {
            return Err(TilePyramidError::InvertedRoot {
                upper_left,
                lower_right,
            });
        }
        if levels == 0 || levels > LEVEL_LIMIT {
            return Err(TilePyramidError::InvalidLevels {
                levels,
                max: LEVEL_LIMIT,
            });
        }
        if tile_pixels == 0 {
            return Err(TilePyramidError::EmptyTiles);
        }
        Ok(Self {
            upper_left,
            lower_right,
            levels,
            tile_pixels,
        })
    }

    /// Deepest available depth.
    #[must_use]
    pub const fn deepest(&self) -> u8 {
        self.levels - 1
    }

    /// Number of tiles along each axis at `depth`.
    ///
    /// Depths past the deepest level are clamped to it.
    #[must_use]
    pub const fn tiles_per_side(&self, depth: u8) -> i64 {
        let deepest = self.deepest();
        let depth = if depth > deepest { deepest } else { depth };
        1_i64 << depth
    }

    /// Tile width in degrees of longitude at `depth`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "tile extents are fractional degrees")]
    pub fn tile_width(&self, depth: u8) -> f64 {
        (self.lower_right.x - self.upper_left.x) / 2_f64.powi(i32::from(depth))
    }

    /// Tile height in degrees of latitude at `depth`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "tile extents are fractional degrees")]
    pub fn tile_height(&self, depth: u8) -> f64 {
        (self.upper_left.y - self.lower_right.y) / 2_f64.powi(i32::from(depth))
    }

    /// Longitude degrees covered by one pixel at `depth`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "resolution is a float ratio")]
    pub fn lon_dpp(&self, depth: u8) -> f64 {
        self.tile_width(depth) / f64::from(self.tile_pixels)
    }

    /// Shallowest depth whose resolution is strictly finer than
    /// `required_lon_dpp`, or the deepest depth when none is.
    #[must_use]
    pub fn depth_for(&self, required_lon_dpp: f64) -> u8 {
        (0..self.levels)
            .find(|&depth| self.lon_dpp(depth) < required_lon_dpp)
            .unwrap_or_else(|| self.deepest())
    }

    /// Whether `request` overlaps the root box at all.
    #[must_use]
    pub fn covers(&self, request: &RasterRequest) -> bool {
        !(request.lrlon <= self.upper_left.x
            || request.ullon >= self.lower_right.x
            || request.lrlat >= self.upper_left.y
            || request.ullat <= self.lower_right.y)
    }

    /// Pick the depth and tile grid that render `request`.
    ///
    /// Never fails: viewports outside the root box report
    /// `query_success = false` instead.
    ///
    /// # Examples
    /// ```
    /// use bearmaps_core::{RasterRequest, TilePyramid};
    /// use bearmaps_core::raster::{ROOT_LOWER_RIGHT, ROOT_UPPER_LEFT};
    ///
    /// let request = RasterRequest {
    ///     ullon: ROOT_UPPER_LEFT.x,
    ///     ullat: ROOT_UPPER_LEFT.y,
    ///     lrlon: ROOT_LOWER_RIGHT.x,
    ///     lrlat: ROOT_LOWER_RIGHT.y,
    ///     w: 128.0,
    ///     h: 128.0,
    /// };
    /// let response = TilePyramid::default().select_tiles(&request);
    /// assert_eq!(response.depth, 0);
    /// assert_eq!(response.render_grid, vec![vec!["d0_x0_y0.png".to_owned()]]);
    /// assert!(response.query_success);
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "tile bounds are fractional degrees")]
    pub fn select_tiles(&self, request: &RasterRequest) -> RasterResponse {
        let required_lon_dpp = (request.lrlon - request.ullon) / request.w;
        let depth = self.depth_for(required_lon_dpp);
        let width = self.tile_width(depth);
        let height = self.tile_height(depth);
        let last = self.tiles_per_side(depth) - 1;

        let ul_x = floor_index((request.ullon - self.upper_left.x) / width).max(0);
        let ul_y = floor_index((self.upper_left.y - request.ullat) / height).max(0);
        let lr_x = floor_index((request.lrlon - self.upper_left.x) / width).min(last);
        let lr_y = floor_index((self.upper_left.y - request.lrlat) / height).min(last);

        let render_grid = (ul_y..=lr_y)
            .map(|y| {
                (ul_x..=lr_x)
                    .map(|x| TileId { depth, x, y }.to_string())
                    .collect()
            })
            .collect();

        RasterResponse {
            render_grid,
            raster_ul_lon: self.upper_left.x + index_to_f64(ul_x) * width,
            raster_ul_lat: self.upper_left.y - index_to_f64(ul_y) * height,
            raster_lr_lon: self.upper_left.x + index_to_f64(lr_x + 1) * width,
            raster_lr_lat: self.upper_left.y - index_to_f64(lr_y + 1) * height,
            depth,
            query_success: self.covers(request),
        }
    }
}

/// Select tiles from the reference pyramid.
#[must_use]
pub fn select_tiles(request: &RasterRequest) -> RasterResponse {
    TilePyramid::default().select_tiles(request)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float-to-int casts saturate and indices are clamped to the pyramid"
)]
fn floor_index(offset: f64) -> i64 {
    offset.floor() as i64
}

#[expect(
    clippy::cast_precision_loss,
    reason = "clamped tile indices stay far below 2^52"
)]
fn index_to_f64(index: i64) -> f64 {
    index as f64
}
