//! Projection operations
//!
//! Clip planes scale with the dataset's bounding box so the frustum brackets
//! the terrain whatever its absolute units. The composed matrix is cached and
//! only rebuilt after something marks the state dirty.

use super::projection_data::{ClipPlanes, ProjectionConfig, ProjectionState, ProjectionType};
use crate::camera::{self, OrbitCameraData};
use crate::constants::projection::{DEGENERATE_NEAR_SCALE, ORTHO_ZOOM_DEFAULT};
use crate::mesh::BoundingStats;
use cgmath::{Deg, Matrix4};

// ============================================================================
// STATE
// ============================================================================

pub fn create_projection_state(config: ProjectionConfig, width: u32, height: u32) -> ProjectionState {
    ProjectionState {
        config,
        viewport_width: width,
        viewport_height: height,
        ..Default::default()
    }
}

pub fn mark_dirty(state: &mut ProjectionState) {
    state.dirty = true;
}

/// Viewport width over height; a collapsed viewport reports 1
pub fn aspect_ratio(state: &ProjectionState) -> f32 {
    if state.viewport_width == 0 || state.viewport_height == 0 {
        return 1.0;
    }
    state.viewport_width as f32 / state.viewport_height as f32
}

pub fn resize_viewport(state: &mut ProjectionState, width: u32, height: u32) {
    if state.viewport_width == width && state.viewport_height == height {
        return;
    }
    log::debug!("[resize_viewport] {}x{}", width, height);
    state.viewport_width = width;
    state.viewport_height = height;
    state.dirty = true;
}

/// Switch projection type; returns to the default orthographic zoom
pub fn set_projection_type(state: &mut ProjectionState, projection_type: ProjectionType) {
    state.projection_type = projection_type;
    state.ortho_zoom = ORTHO_ZOOM_DEFAULT;
    state.dirty = true;
}

/// Step the orthographic zoom by `direction` notches, clamped to the
/// configured range
pub fn adjust_ortho_zoom(state: &mut ProjectionState, direction: f32) {
    let config = &state.config;
    let zoom = state.ortho_zoom + direction * config.ortho_zoom_step;
    state.ortho_zoom = zoom.clamp(config.ortho_zoom_min, config.ortho_zoom_max);
    state.dirty = true;
}

// ============================================================================
// ELEVATION SCALE
// ============================================================================

/// Set vertical exaggeration, floored at the configured minimum
pub fn set_elevation_scale(state: &mut ProjectionState, scale: f32) {
    state.elevation_scale = scale.max(state.config.min_elevation_scale);
    state.dirty = true;
}

/// Nudge vertical exaggeration by `steps` increments
pub fn step_elevation_scale(state: &mut ProjectionState, steps: i32) {
    let scale = state.elevation_scale + steps as f32 * state.config.elevation_scale_step;
    set_elevation_scale(state, scale);
}

/// Exaggeration that makes the elevation span half the planar diagonal.
/// A flat dataset gets 1.
pub fn auto_fit_elevation_scale(stats: &BoundingStats) -> f32 {
    let span = stats.max_elev - stats.min_elev;
    if span == 0.0 {
        return 1.0;
    }
    stats.grid_diagonal / 2.0 / span
}

// ============================================================================
// CLIP PLANES
// ============================================================================

pub fn perspective_clip_planes(config: &ProjectionConfig, stats: &BoundingStats) -> ClipPlanes {
    let mut near = stats.bbox_min_edge * config.near_plane_scale;
    if near <= 0.0 {
        near = stats.bbox_max_edge * DEGENERATE_NEAR_SCALE;
    }
    let near = near.max(f32::EPSILON);
    let far = (stats.bbox_max_edge * config.far_plane_scale).max(near * 2.0);
    ClipPlanes { near, far }
}

pub fn orthographic_clip_planes(config: &ProjectionConfig, stats: &BoundingStats) -> ClipPlanes {
    ClipPlanes {
        near: 0.0,
        far: (stats.bbox_diagonal * config.ortho_far_scale).max(f32::EPSILON),
    }
}

/// Visible `(width, height)` of the orthographic volume
pub fn orthographic_extent(stats: &BoundingStats, zoom: f32, aspect: f32) -> (f32, f32) {
    let height = stats.bbox_max_edge * zoom;
    (height * aspect, height)
}

// ============================================================================
// MATRICES
// ============================================================================

pub fn build_projection_matrix(state: &ProjectionState, stats: &BoundingStats) -> Matrix4<f32> {
    let aspect = aspect_ratio(state);
    match state.projection_type {
        ProjectionType::Perspective => {
            let planes = perspective_clip_planes(&state.config, stats);
            cgmath::perspective(Deg(state.config.fov_degrees), aspect, planes.near, planes.far)
        }
        ProjectionType::Orthographic => {
            let planes = orthographic_clip_planes(&state.config, stats);
            let (width, height) = orthographic_extent(stats, state.ortho_zoom, aspect);
            cgmath::ortho(
                -width / 2.0,
                width / 2.0,
                -height / 2.0,
                height / 2.0,
                planes.near,
                planes.far,
            )
        }
    }
}

/// `projection * view * scale(1, 1, elevation_scale)`
pub fn compose_view_projection(
    projection: Matrix4<f32>,
    view: Matrix4<f32>,
    elevation_scale: f32,
) -> Matrix4<f32> {
    projection * view * Matrix4::from_nonuniform_scale(1.0, 1.0, elevation_scale)
}

/// Return the view-projection matrix, rebuilding it only when dirty
pub fn refresh_view_projection(
    state: &mut ProjectionState,
    camera: &OrbitCameraData,
    stats: &BoundingStats,
) -> Matrix4<f32> {
    if state.dirty {
        let projection = build_projection_matrix(state, stats);
        let view = camera::build_view_matrix(camera);
        state.cached_view_projection =
            compose_view_projection(projection, view, state.elevation_scale);
        state.dirty = false;
        log::trace!(
            "[refresh_view_projection] Rebuilt {:?} matrix",
            state.projection_type
        );
    }
    state.cached_view_projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::create_orbit_camera;
    use cgmath::{Point3, SquareMatrix, Transform};

    fn stats() -> BoundingStats {
        crate::mesh::compute_bounding_stats(0.0, 110.0, 3, 4, 5.0)
    }

    #[test]
    fn test_perspective_planes_follow_bbox() {
        let planes = perspective_clip_planes(&ProjectionConfig::default(), &stats());
        assert!((planes.near - 0.15).abs() < 1e-6);
        assert!((planes.far - 11000.0).abs() < 1e-2);
    }

    #[test]
    fn test_flat_dataset_keeps_valid_frustum() {
        let flat = crate::mesh::compute_bounding_stats(5.0, 5.0, 10, 10, 1.0);
        let planes = perspective_clip_planes(&ProjectionConfig::default(), &flat);
        assert!(planes.near > 0.0);
        assert!(planes.far > planes.near);
    }

    #[test]
    fn test_orthographic_volume() {
        let s = stats();
        let planes = orthographic_clip_planes(&ProjectionConfig::default(), &s);
        assert_eq!(planes.near, 0.0);
        assert!((planes.far - s.bbox_diagonal * 100.0).abs() < 1e-2);

        let (w, h) = orthographic_extent(&s, 0.5, 2.0);
        assert_eq!(h, 55.0);
        assert_eq!(w, 110.0);
    }

    #[test]
    fn test_perspective_matrix_uses_viewport_aspect() {
        let mut state = create_projection_state(ProjectionConfig::default(), 800, 400);
        state.projection_type = ProjectionType::Perspective;
        let s = stats();
        let planes = perspective_clip_planes(&state.config, &s);
        let expected = cgmath::perspective(Deg(60.0), 2.0, planes.near, planes.far);
        assert_eq!(build_projection_matrix(&state, &s), expected);
    }

    #[test]
    fn test_compose_applies_elevation_scale_first() {
        let m = compose_view_projection(Matrix4::identity(), Matrix4::identity(), 3.0);
        let p = m.transform_point(Point3::new(1.0, 2.0, 4.0));
        assert_eq!(p, Point3::new(1.0, 2.0, 12.0));
    }

    #[test]
    fn test_auto_fit() {
        let s = stats();
        assert!((auto_fit_elevation_scale(&s) - 12.5 / 110.0).abs() < 1e-6);

        let flat = crate::mesh::compute_bounding_stats(5.0, 5.0, 10, 10, 1.0);
        assert_eq!(auto_fit_elevation_scale(&flat), 1.0);
    }

    #[test]
    fn test_elevation_scale_floor() {
        let mut state = ProjectionState::default();
        set_elevation_scale(&mut state, 0.01);
        assert_eq!(state.elevation_scale, 0.05);

        set_elevation_scale(&mut state, 0.2);
        step_elevation_scale(&mut state, -1);
        assert!((state.elevation_scale - 0.1).abs() < 1e-6);
        step_elevation_scale(&mut state, -1);
        assert_eq!(state.elevation_scale, 0.05);
        step_elevation_scale(&mut state, 3);
        assert!((state.elevation_scale - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_ortho_zoom_clamped() {
        let mut state = ProjectionState::default();
        for _ in 0..100 {
            adjust_ortho_zoom(&mut state, 1.0);
        }
        assert_eq!(state.ortho_zoom, 2.0);
        for _ in 0..100 {
            adjust_ortho_zoom(&mut state, -1.0);
        }
        assert_eq!(state.ortho_zoom, 0.1);

        set_projection_type(&mut state, ProjectionType::Orthographic);
        assert_eq!(state.ortho_zoom, 1.0);
    }

    #[test]
    fn test_refresh_is_demand_driven() {
        let s = stats();
        let mut state = create_projection_state(ProjectionConfig::default(), 640, 480);
        let camera = create_orbit_camera(Point3::new(0.0, 0.0, 0.0), 0.0, 1.0, 50.0, 0.1);
        let first = refresh_view_projection(&mut state, &camera, &s);
        assert!(!state.dirty);

        let moved = create_orbit_camera(Point3::new(0.0, 0.0, 0.0), 1.0, 1.0, 80.0, 0.1);
        assert_eq!(refresh_view_projection(&mut state, &moved, &s), first);

        mark_dirty(&mut state);
        assert_ne!(refresh_view_projection(&mut state, &moved, &s), first);
    }

    #[test]
    fn test_resize_marks_dirty_only_on_change() {
        let mut state = create_projection_state(ProjectionConfig::default(), 640, 480);
        state.dirty = false;
        resize_viewport(&mut state, 640, 480);
        assert!(!state.dirty);
        resize_viewport(&mut state, 1024, 768);
        assert!(state.dirty);
        assert!((aspect_ratio(&state) - 4.0 / 3.0).abs() < 1e-6);
    }
}
