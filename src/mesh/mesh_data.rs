//! Mesh data structures - Pure DOP
//!
//! NO METHODS beyond trivial size math. All transformations happen in
//! mesh_operations.rs

use cgmath::Vector2;
use static_assertions::const_assert_eq;

/// Floats per vertex when texture coordinates are uploaded
pub const TEXTURED_STRIDE: usize = 9;

/// Floats per vertex without texture coordinates
pub const UNTEXTURED_STRIDE: usize = 7;

/// One terrain vertex, one per grid cell
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    /// World-space position (x east, y north, z elevation)
    pub position: [f32; 3],

    /// RGBA, all channels in [0, 1]
    pub color: [f32; 4],

    /// Orthophoto texture coordinate, (0, 0) when untextured
    pub tex_coord: [f32; 2],
}

const_assert_eq!(
    std::mem::size_of::<TerrainVertex>(),
    TEXTURED_STRIDE * std::mem::size_of::<f32>()
);

/// Extents of the bound dataset, used for clip planes, camera reset and
/// interaction scaling
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingStats {
    pub min_elev: f32,
    pub max_elev: f32,
    pub bbox_x_span: f32,
    pub bbox_y_span: f32,

    /// min(elevation span, x span, y span)
    pub bbox_min_edge: f32,

    /// max(elevation span, x span, y span)
    pub bbox_max_edge: f32,

    /// Norm of (x span, y span, elevation span)
    pub bbox_diagonal: f32,

    /// Norm of (x span, y span)
    pub grid_diagonal: f32,
}

/// Build options
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshOptions {
    /// Emit `(col/cols, 1 - row/rows)` texture coordinates
    pub generate_tex_coords: bool,
}

/// CPU-side terrain mesh ready for upload
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    /// Row-major, `row * cols + col`
    pub vertices: Vec<TerrainVertex>,

    /// Zig-zag strips, `2 * cols` indices per row pair
    pub indices: Vec<u32>,

    pub cols: u64,
    pub rows: u64,

    /// Whether `tex_coord` was generated
    pub textured: bool,

    pub stats: BoundingStats,

    /// World-space XY of the center cell
    pub geo_center: Vector2<f32>,
}

/// One strip draw call: `count` indices starting at index `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripRange {
    pub offset: usize,
    pub count: usize,
}

/// Memory usage statistics for a built mesh
#[derive(Debug, Clone)]
pub struct MeshMemoryStats {
    pub vertex_count: usize,
    pub index_count: usize,
    pub vertex_bytes: usize,
    pub index_bytes: usize,
}

impl MeshMemoryStats {
    pub fn total_bytes(&self) -> usize {
        self.vertex_bytes + self.index_bytes
    }
}
