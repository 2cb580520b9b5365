/// DEM Module - Data-Oriented Programming (DOP) style
///
/// - dem_data.rs: the elevation grid and its metadata
/// - dem_operations.rs: lookups and the grid-to-geographic transform
/// - dem_loader.rs: ASCII grid reader

pub mod dem_data;
pub mod dem_loader;
pub mod dem_operations;

pub use dem_data::{ElevationGrid, SourceType};
pub use dem_loader::{load_from_file, parse_ascii_grid, try_load_from_file, GridParseError};

pub use dem_operations::{
    cell_count, cell_size, checked_elevation_at, checked_geo_coord_at, cols, create_elevation_grid,
    elevation_at, empty_grid, geo_coord_at, is_empty, lower_left, no_data_value, rows, samples,
};
