//! Camera data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in camera_operations.rs

use crate::constants::camera::DEFAULT_POLAR_SAFE_ZONE;
use cgmath::Point3;

/// Orbit camera - spherical coordinates around a movable center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCameraData {
    /// Azimuth (radians, from +X toward +Y)
    pub phi: f32,

    /// Polar angle (radians, from +Z), kept within the safe zone by `set_theta`
    pub theta: f32,

    /// Distance from the center, never negative after `set_radius`
    pub radius: f32,

    /// Orbit center in world space
    pub center: Point3<f32>,

    /// Minimum distance of `theta` from either pole
    pub polar_safe_zone: f32,
}

/// Per-frame uniform data for the draw adapter
/// Must match shader layout exactly
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// View-projection matrix (4x4, column-major)
    pub view_projection_matrix: [[f32; 4]; 4],

    /// Nonzero when the orthophoto texture should be sampled
    pub texture_enabled: u32,

    /// Padding to align to 16 bytes
    pub _padding: [u32; 3],
}

impl Default for OrbitCameraData {
    fn default() -> Self {
        Self {
            phi: 0.0,
            theta: DEFAULT_POLAR_SAFE_ZONE,
            radius: 0.0,
            center: Point3::new(0.0, 0.0, 0.0),
            polar_safe_zone: DEFAULT_POLAR_SAFE_ZONE,
        }
    }
}
