/// Projection Module - Data-Oriented Programming (DOP) style
///
/// - projection_data.rs: projection settings and cached matrix state
/// - projection_operations.rs: clip planes, projection matrices and the
///   demand-driven view-projection composition

pub mod projection_data;
pub mod projection_operations;

pub use projection_data::{ClipPlanes, ProjectionConfig, ProjectionState, ProjectionType};

pub use projection_operations::{
    adjust_ortho_zoom, aspect_ratio, auto_fit_elevation_scale, build_projection_matrix,
    compose_view_projection, create_projection_state, mark_dirty, orthographic_clip_planes,
    orthographic_extent, perspective_clip_planes, refresh_view_projection, resize_viewport,
    set_elevation_scale, set_projection_type, step_elevation_scale,
};
