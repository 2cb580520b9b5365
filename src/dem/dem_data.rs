//! DEM data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in dem_operations.rs

/// Gridded elevation samples with lower-left-corner georeferencing.
///
/// Fields are crate-private: the affine constants are derived from the
/// metadata once in `create_elevation_grid`, and a grid is only ever
/// replaced wholesale, never edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElevationGrid {
    pub(crate) cols: u64,
    pub(crate) rows: u64,

    /// Geographic X of the lower-left corner of the lower-left cell
    pub(crate) lower_left_x: f32,

    /// Geographic Y of the lower-left corner of the lower-left cell
    pub(crate) lower_left_y: f32,

    /// Cell edge length (map units)
    pub(crate) cell_size: f32,

    /// Marker value for cells without data
    pub(crate) no_data: f32,

    /// Row-major samples, `row * cols + col`
    pub(crate) samples: Vec<f32>,

    /// `lower_left_x + cell_size * (rows - 0.5)`
    pub(crate) affine_constant_x: f32,

    /// `lower_left_y + cell_size * 0.5`
    pub(crate) affine_constant_y: f32,
}

/// Kind of source a grid is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Whitespace-delimited ASCII grid
    Text,
    /// Binary raster, rejected before any I/O
    Binary,
}
