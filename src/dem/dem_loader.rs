//! ASCII elevation grid reader
//!
//! Format: six `label value` pairs (cols, rows, lower-left x, lower-left y,
//! cell size, no-data marker) followed by `cols * rows` samples, all
//! whitespace-delimited. Labels are read and discarded.

use super::dem_data::{ElevationGrid, SourceType};
use super::dem_operations::{create_elevation_grid, empty_grid};
use crate::error::{ErrorContext, ViewerError, ViewerResult};
use std::path::Path;
use std::str::FromStr;

/// Failures while parsing grid text
#[derive(Debug, thiserror::Error)]
pub enum GridParseError {
    #[error("Missing header value for {field}")]
    MissingHeader { field: &'static str },

    #[error("Invalid header value for {field}: '{value}'")]
    InvalidHeader { field: &'static str, value: String },

    #[error("Invalid grid dimensions {cols}x{rows}")]
    InvalidDimensions { cols: i64, rows: i64 },
}

fn read_header<'a, T, I>(tokens: &mut I, field: &'static str) -> Result<T, GridParseError>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    // label, then value
    tokens.next().ok_or(GridParseError::MissingHeader { field })?;
    let value = tokens.next().ok_or(GridParseError::MissingHeader { field })?;
    value.parse().map_err(|_| GridParseError::InvalidHeader {
        field,
        value: value.to_string(),
    })
}

/// Parse grid text.
///
/// Samples are consumed with the column index in the outer loop and the row
/// index in the inner loop, and appended in that order to the row-major
/// sample array. For non-square grids this stores a transposed read; existing
/// datasets depend on the exact order, so it is kept.
///
/// Once a sample token is missing or fails to parse, it and every later
/// sample read as `0.0`.
pub fn parse_ascii_grid(text: &str) -> Result<ElevationGrid, GridParseError> {
    let mut tokens = text.split_whitespace();

    let cols: i64 = read_header(&mut tokens, "cols")?;
    let rows: i64 = read_header(&mut tokens, "rows")?;
    let lower_left_x: f64 = read_header(&mut tokens, "lower_left_x")?;
    let lower_left_y: f64 = read_header(&mut tokens, "lower_left_y")?;
    let cell_size: f64 = read_header(&mut tokens, "cell_size")?;
    let no_data: f64 = read_header(&mut tokens, "no_data")?;

    if cols <= 0 || rows <= 0 {
        return Err(GridParseError::InvalidDimensions { cols, rows });
    }
    // Mesh indices are u32; reject before padding allocates the samples
    match cols.checked_mul(rows) {
        Some(cells) if cells <= u32::MAX as i64 => {}
        _ => return Err(GridParseError::InvalidDimensions { cols, rows }),
    }
    let (cols, rows) = (cols as u64, rows as u64);

    let count = cols.saturating_mul(rows) as usize;
    let mut samples = Vec::with_capacity(count.min(text.len()));
    let mut stream_failed = false;

    for _x in 0..cols {
        for _y in 0..rows {
            let value = if stream_failed {
                0.0
            } else {
                match tokens.next().map(str::parse::<f32>) {
                    Some(Ok(v)) => v,
                    _ => {
                        stream_failed = true;
                        log::warn!(
                            "[parse_ascii_grid] Sample stream ended at {} of {}, padding with 0",
                            samples.len(),
                            count
                        );
                        0.0
                    }
                }
            };
            samples.push(value);
        }
    }

    create_elevation_grid(
        cols,
        rows,
        lower_left_x as f32,
        lower_left_y as f32,
        cell_size as f32,
        no_data as f32,
        samples,
    )
    .map_err(|_| GridParseError::InvalidDimensions {
        cols: cols as i64,
        rows: rows as i64,
    })
}

/// Load a grid from disk.
///
/// A binary source is rejected before the file is touched. A file that
/// cannot be read or parsed yields an empty grid; callers check
/// `dem::is_empty`.
pub fn load_from_file<P: AsRef<Path>>(path: P, source: SourceType) -> ViewerResult<ElevationGrid> {
    let path = path.as_ref();

    if source == SourceType::Binary {
        return Err(ViewerError::UnsupportedSource {
            kind: "Binary".to_string(),
        });
    }

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!(
                "[load_from_file] Could not read {}: {}",
                path.display(),
                e
            );
            return Ok(empty_grid());
        }
    };

    match parse_ascii_grid(&text) {
        Ok(grid) => {
            log::info!(
                "[load_from_file] Loaded {} ({}x{} cells, cell size {})",
                path.display(),
                grid.cols,
                grid.rows,
                grid.cell_size
            );
            Ok(grid)
        }
        Err(e) => {
            log::warn!("[load_from_file] Could not parse {}: {}", path.display(), e);
            Ok(empty_grid())
        }
    }
}

/// Strict variant of `load_from_file`: read and parse failures come back as
/// errors instead of an empty grid
pub fn try_load_from_file<P: AsRef<Path>>(
    path: P,
    source: SourceType,
) -> ViewerResult<ElevationGrid> {
    let path = path.as_ref();

    if source == SourceType::Binary {
        return Err(ViewerError::UnsupportedSource {
            kind: "Binary".to_string(),
        });
    }

    let text = std::fs::read_to_string(path).with_path(&path.display().to_string())?;
    let grid = parse_ascii_grid(&text)?;
    log::info!(
        "[try_load_from_file] Loaded {} ({}x{} cells)",
        path.display(),
        grid.cols,
        grid.rows
    );
    Ok(grid)
}
