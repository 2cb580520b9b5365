//! Projection data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in projection_operations.rs

use crate::constants::{elevation, projection};
use cgmath::{Matrix4, SquareMatrix};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionType {
    Orthographic,
    #[default]
    Perspective,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlanes {
    pub near: f32,
    pub far: f32,
}

/// Projection tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    pub fov_degrees: f32,
    pub near_plane_scale: f32,
    pub far_plane_scale: f32,
    pub ortho_far_scale: f32,
    pub ortho_zoom_min: f32,
    pub ortho_zoom_max: f32,
    pub ortho_zoom_step: f32,
    pub elevation_scale_step: f32,
    pub min_elevation_scale: f32,
}

/// Projection state for one viewport
#[derive(Debug, Clone)]
pub struct ProjectionState {
    pub config: ProjectionConfig,
    pub projection_type: ProjectionType,

    /// Orthographic visible height as a fraction of the longest bbox edge
    pub ortho_zoom: f32,

    /// Vertical exaggeration applied before the view transform
    pub elevation_scale: f32,

    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Last composed view-projection matrix
    pub cached_view_projection: Matrix4<f32>,

    /// Set by anything that invalidates `cached_view_projection`
    pub dirty: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: projection::FOV_DEGREES,
            near_plane_scale: projection::NEAR_PLANE_SCALE,
            far_plane_scale: projection::FAR_PLANE_SCALE,
            ortho_far_scale: projection::ORTHO_FAR_SCALE,
            ortho_zoom_min: projection::ORTHO_ZOOM_MIN,
            ortho_zoom_max: projection::ORTHO_ZOOM_MAX,
            ortho_zoom_step: projection::ORTHO_ZOOM_STEP,
            elevation_scale_step: elevation::SCALE_STEP,
            min_elevation_scale: elevation::MIN_SCALE,
        }
    }
}

impl Default for ProjectionState {
    fn default() -> Self {
        Self {
            config: ProjectionConfig::default(),
            projection_type: ProjectionType::default(),
            ortho_zoom: projection::ORTHO_ZOOM_DEFAULT,
            elevation_scale: elevation::DEFAULT_SCALE,
            viewport_width: 1,
            viewport_height: 1,
            cached_view_projection: Matrix4::identity(),
            dirty: true,
        }
    }
}
