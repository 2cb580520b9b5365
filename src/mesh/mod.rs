/// Mesh Module - Data-Oriented Programming (DOP) style
///
/// - mesh_data.rs: vertex layout, mesh output and bounding statistics
/// - mesh_operations.rs: grid to triangle-strip mesh conversion

pub mod mesh_data;
pub mod mesh_operations;

pub use mesh_data::{
    BoundingStats, MeshMemoryStats, MeshOptions, StripRange, TerrainMesh, TerrainVertex,
    TEXTURED_STRIDE, UNTEXTURED_STRIDE,
};

pub use mesh_operations::{
    build_strip_indices, build_terrain_mesh, compute_bounding_stats, elevation_range,
    flatten_vertex_attributes, index_count, mesh_memory_stats, normalized_elevation,
    strip_draw_ranges, vertex_count, vertex_stride,
};
