//! DEM operations - Pure DOP functions
//!
//! Sample lookups and the grid-index to geographic coordinate transform.
//! Geographic axes are north-east-up: X north, Y east, Z elevation.

use super::dem_data::ElevationGrid;
use crate::error::{ViewerError, ViewerResult};
use cgmath::Vector3;

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Build a grid and precompute its affine constants.
///
/// Fails if `samples` does not hold exactly `cols * rows` values.
pub fn create_elevation_grid(
    cols: u64,
    rows: u64,
    lower_left_x: f32,
    lower_left_y: f32,
    cell_size: f32,
    no_data: f32,
    samples: Vec<f32>,
) -> ViewerResult<ElevationGrid> {
    let expected = cols.saturating_mul(rows);
    if samples.len() as u64 != expected {
        return Err(ViewerError::StateError {
            expected: format!("{} samples for a {}x{} grid", expected, cols, rows),
            actual: format!("{} samples", samples.len()),
        });
    }

    Ok(ElevationGrid {
        cols,
        rows,
        lower_left_x,
        lower_left_y,
        cell_size,
        no_data,
        samples,
        affine_constant_x: lower_left_x + cell_size * (rows as f32 - 0.5),
        affine_constant_y: lower_left_y + cell_size * 0.5,
    })
}

/// The canonical "no data" grid
pub fn empty_grid() -> ElevationGrid {
    ElevationGrid::default()
}

// ============================================================================
// ACCESSORS
// ============================================================================

pub fn is_empty(grid: &ElevationGrid) -> bool {
    grid.cols * grid.rows == 0
}

pub fn cols(grid: &ElevationGrid) -> u64 {
    grid.cols
}

pub fn rows(grid: &ElevationGrid) -> u64 {
    grid.rows
}

pub fn cell_count(grid: &ElevationGrid) -> u64 {
    grid.cols * grid.rows
}

pub fn cell_size(grid: &ElevationGrid) -> f32 {
    grid.cell_size
}

/// Lower-left corner `(x, y)`
pub fn lower_left(grid: &ElevationGrid) -> (f32, f32) {
    (grid.lower_left_x, grid.lower_left_y)
}

pub fn no_data_value(grid: &ElevationGrid) -> f32 {
    grid.no_data
}

pub fn samples(grid: &ElevationGrid) -> &[f32] {
    &grid.samples
}

// ============================================================================
// LOOKUPS
// ============================================================================

fn in_bounds(grid: &ElevationGrid, row: u64, col: u64) -> bool {
    !is_empty(grid) && row < grid.rows && col < grid.cols
}

/// Elevation of cell `(row, col)`.
///
/// # Panics
/// Panics if the grid is empty or the cell is out of range.
pub fn elevation_at(grid: &ElevationGrid, row: u64, col: u64) -> f32 {
    assert!(
        in_bounds(grid, row, col),
        "cell ({}, {}) outside {}x{} grid",
        row,
        col,
        grid.rows,
        grid.cols
    );
    grid.samples[(row * grid.cols + col) as usize]
}

/// Geographic coordinate of cell `(row, col)`.
///
/// Row 0 is the northernmost row, so X falls as `row` grows; column 0 is the
/// westernmost, so Y grows with `col`. Z is the sample itself.
///
/// # Panics
/// Panics if the grid is empty or the cell is out of range.
pub fn geo_coord_at(grid: &ElevationGrid, row: u64, col: u64) -> Vector3<f32> {
    let z = elevation_at(grid, row, col);
    Vector3::new(
        grid.affine_constant_x - grid.cell_size * row as f32,
        grid.cell_size * col as f32 + grid.affine_constant_y,
        z,
    )
}

/// `elevation_at` returning an error instead of panicking
pub fn checked_elevation_at(grid: &ElevationGrid, row: u64, col: u64) -> ViewerResult<f32> {
    if is_empty(grid) {
        return Err(ViewerError::EmptyGrid);
    }
    if !in_bounds(grid, row, col) {
        return Err(ViewerError::GridIndexOutOfBounds {
            row,
            col,
            rows: grid.rows,
            cols: grid.cols,
        });
    }
    Ok(elevation_at(grid, row, col))
}

/// `geo_coord_at` returning an error instead of panicking
pub fn checked_geo_coord_at(
    grid: &ElevationGrid,
    row: u64,
    col: u64,
) -> ViewerResult<Vector3<f32>> {
    checked_elevation_at(grid, row, col)?;
    Ok(geo_coord_at(grid, row, col))
}
