//! Mesh operations - Pure DOP functions
//!
//! Turns an elevation grid into a colored vertex buffer plus a row-by-row
//! triangle-strip index buffer.

use super::mesh_data::{
    BoundingStats, MeshMemoryStats, MeshOptions, StripRange, TerrainMesh, TerrainVertex,
    TEXTURED_STRIDE, UNTEXTURED_STRIDE,
};
use crate::dem::{self, ElevationGrid};
use crate::error::{OptionExt, ViewerError, ViewerResult};
use crate::gradient::{self, ColorStop};
use cgmath::Vector2;

// ============================================================================
// STATISTICS
// ============================================================================

/// `(min, max)` in one pass, seeded from the first sample
pub fn elevation_range(samples: &[f32]) -> Option<(f32, f32)> {
    let (&first, rest) = samples.split_first()?;
    let mut min = first;
    let mut max = first;
    for &v in rest {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    Some((min, max))
}

/// Map an elevation onto [0, 1]; a flat range maps everything to 0
pub fn normalized_elevation(elevation: f32, min_elev: f32, max_elev: f32) -> f32 {
    let span = max_elev - min_elev;
    if span == 0.0 {
        return 0.0;
    }
    (elevation - min_elev) / span
}

/// Bounding statistics for a `cols x rows` grid of `cell_size` cells
pub fn compute_bounding_stats(
    min_elev: f32,
    max_elev: f32,
    cols: u64,
    rows: u64,
    cell_size: f32,
) -> BoundingStats {
    let elev_span = max_elev - min_elev;
    let bbox_x_span = cols as f32 * cell_size;
    let bbox_y_span = rows as f32 * cell_size;

    BoundingStats {
        min_elev,
        max_elev,
        bbox_x_span,
        bbox_y_span,
        bbox_min_edge: elev_span.min(bbox_x_span).min(bbox_y_span),
        bbox_max_edge: elev_span.max(bbox_x_span).max(bbox_y_span),
        bbox_diagonal: (elev_span * elev_span
            + bbox_x_span * bbox_x_span
            + bbox_y_span * bbox_y_span)
            .sqrt(),
        grid_diagonal: (bbox_x_span * bbox_x_span + bbox_y_span * bbox_y_span).sqrt(),
    }
}

// ============================================================================
// INDICES
// ============================================================================

/// Zig-zag strip indices for every row pair, concatenated in row order.
///
/// Row `r` contributes `(idx + cols, idx)` for each column, where
/// `idx = r * cols + col`, so strip `r` occupies `[r * 2 * cols, (r + 1) * 2 * cols)`.
pub fn build_strip_indices(cols: u32, rows: u32) -> Vec<u32> {
    let strips = rows.saturating_sub(1);
    let mut indices = Vec::with_capacity(2 * cols as usize * strips as usize);

    for row in 0..strips {
        for col in 0..cols {
            let index = row * cols + col;
            indices.push(index + cols);
            indices.push(index);
        }
    }

    indices
}

/// Per-row draw ranges matching `build_strip_indices`
pub fn strip_draw_ranges(mesh: &TerrainMesh) -> Vec<StripRange> {
    let per_strip = 2 * mesh.cols as usize;
    (0..mesh.rows.saturating_sub(1) as usize)
        .map(|row| StripRange {
            offset: row * per_strip,
            count: per_strip,
        })
        .collect()
}

// ============================================================================
// BUILD
// ============================================================================

/// Build the terrain mesh for `grid`.
///
/// World positions swap the geographic axes (geographic Y east becomes world
/// X, geographic X north becomes world Y) so the north-east-up source frame
/// lands right-handed without mirroring the surface.
pub fn build_terrain_mesh(
    grid: &ElevationGrid,
    gradient: &[ColorStop],
    options: MeshOptions,
) -> ViewerResult<TerrainMesh> {
    if dem::is_empty(grid) {
        return Err(ViewerError::EmptyGrid);
    }
    if gradient.is_empty() {
        return Err(ViewerError::EmptyGradient);
    }

    let cols = dem::cols(grid);
    let rows = dem::rows(grid);
    if cols * rows > u32::MAX as u64 {
        return Err(ViewerError::StateError {
            expected: format!("at most {} cells", u32::MAX),
            actual: format!("{} cells", cols * rows),
        });
    }

    let (min_elev, max_elev) =
        elevation_range(dem::samples(grid)).ok_or_viewer(|| ViewerError::EmptyGrid)?;
    if min_elev == max_elev {
        log::warn!(
            "[build_terrain_mesh] Flat grid at elevation {}, coloring with the lowest stop",
            min_elev
        );
    }

    let mut vertices = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let geo = dem::geo_coord_at(grid, row, col);

            let color = gradient::interpolate(
                gradient,
                normalized_elevation(geo.z, min_elev, max_elev),
            );

            let tex_coord = if options.generate_tex_coords {
                [col as f32 / cols as f32, 1.0 - row as f32 / rows as f32]
            } else {
                [0.0, 0.0]
            };

            vertices.push(TerrainVertex {
                position: [geo.y, geo.x, geo.z],
                color,
                tex_coord,
            });
        }
    }

    let indices = build_strip_indices(cols as u32, rows as u32);

    let center = dem::geo_coord_at(grid, rows / 2, cols / 2);
    let stats = compute_bounding_stats(min_elev, max_elev, cols, rows, dem::cell_size(grid));

    log::info!(
        "[build_terrain_mesh] Built {}x{} mesh: {} vertices, {} indices, elevation {}..{}",
        cols,
        rows,
        vertices.len(),
        indices.len(),
        min_elev,
        max_elev
    );

    Ok(TerrainMesh {
        vertices,
        indices,
        cols,
        rows,
        textured: options.generate_tex_coords,
        stats,
        geo_center: Vector2::new(center.y, center.x),
    })
}

// ============================================================================
// UPLOAD HELPERS
// ============================================================================

/// Floats per vertex in `flatten_vertex_attributes`
pub fn vertex_stride(mesh: &TerrainMesh) -> usize {
    if mesh.textured {
        TEXTURED_STRIDE
    } else {
        UNTEXTURED_STRIDE
    }
}

/// Interleaved `[pos3, color4, (uv2)]` floats
pub fn flatten_vertex_attributes(mesh: &TerrainMesh) -> Vec<f32> {
    if mesh.textured {
        return bytemuck::cast_slice::<TerrainVertex, f32>(&mesh.vertices).to_vec();
    }

    let mut attribs = Vec::with_capacity(mesh.vertices.len() * UNTEXTURED_STRIDE);
    for vertex in &mesh.vertices {
        attribs.extend_from_slice(&vertex.position);
        attribs.extend_from_slice(&vertex.color);
    }
    attribs
}

pub fn vertex_count(mesh: &TerrainMesh) -> usize {
    mesh.vertices.len()
}

pub fn index_count(mesh: &TerrainMesh) -> usize {
    mesh.indices.len()
}

/// Get memory statistics
pub fn mesh_memory_stats(mesh: &TerrainMesh) -> MeshMemoryStats {
    MeshMemoryStats {
        vertex_count: vertex_count(mesh),
        index_count: index_count(mesh),
        vertex_bytes: mesh.vertices.len() * vertex_stride(mesh) * std::mem::size_of::<f32>(),
        index_bytes: mesh.indices.len() * std::mem::size_of::<u32>(),
    }
}
