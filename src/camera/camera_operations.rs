//! Camera operations - Pure DOP functions
//!
//! All functions are pure: they take data, return new data, no side effects.
//! No methods, no self, just transformations.

use super::camera_data::{CameraUniform, OrbitCameraData};
use crate::constants::camera::{RESET_PHI, RESET_THETA};
use crate::mesh::BoundingStats;
use cgmath::{Matrix, Matrix4, Point3, Vector2, Vector3, Vector4};
use std::f32::consts::PI;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Create an orbit camera; angles and radius go through the clamping setters
pub fn create_orbit_camera(
    center: Point3<f32>,
    phi: f32,
    theta: f32,
    radius: f32,
    polar_safe_zone: f32,
) -> OrbitCameraData {
    let camera = OrbitCameraData {
        center,
        polar_safe_zone,
        ..Default::default()
    };
    let camera = set_phi(&camera, phi);
    let camera = set_theta(&camera, theta);
    set_radius(&camera, radius)
}

/// Frame the dataset: orbit the middle of the (scaled) elevation range at the
/// grid center, from the south, at 45 degrees, one bounding diagonal away
pub fn reset_orbit_camera(
    camera: &OrbitCameraData,
    stats: &BoundingStats,
    geo_center: Vector2<f32>,
    elevation_scale: f32,
) -> OrbitCameraData {
    let mid_elevation = (stats.min_elev + stats.max_elev) * 0.5 * elevation_scale;
    create_orbit_camera(
        Point3::new(geo_center.x, geo_center.y, mid_elevation),
        RESET_PHI,
        RESET_THETA,
        stats.bbox_diagonal,
        camera.polar_safe_zone,
    )
}

// ============================================================================
// SETTERS
// ============================================================================

/// Wrap azimuth into (-2π, 2π); sign is kept
pub fn set_phi(camera: &OrbitCameraData, phi: f32) -> OrbitCameraData {
    let mut new_camera = *camera;
    new_camera.phi = phi % (2.0 * PI);
    new_camera
}

/// Clamp the polar angle to `[safe_zone, π - safe_zone]`
pub fn set_theta(camera: &OrbitCameraData, theta: f32) -> OrbitCameraData {
    let mut new_camera = *camera;
    let safe_zone = camera.polar_safe_zone;
    new_camera.theta = if theta > PI - safe_zone {
        PI - safe_zone
    } else if theta < safe_zone {
        safe_zone
    } else {
        theta
    };
    new_camera
}

/// Clamp the radius to be non-negative
pub fn set_radius(camera: &OrbitCameraData, radius: f32) -> OrbitCameraData {
    let mut new_camera = *camera;
    new_camera.radius = radius.max(0.0);
    new_camera
}

pub fn set_center(camera: &OrbitCameraData, center: Point3<f32>) -> OrbitCameraData {
    let mut new_camera = *camera;
    new_camera.center = center;
    new_camera
}

// ============================================================================
// MOVEMENT
// ============================================================================

/// Raw additive move on the sphere. Unlike the setters, nothing is clamped
/// or wrapped here.
pub fn move_orbit(
    camera: &OrbitCameraData,
    delta_phi: f32,
    delta_theta: f32,
    delta_radius: f32,
) -> OrbitCameraData {
    let mut new_camera = *camera;
    new_camera.phi += delta_phi;
    new_camera.theta += delta_theta;
    new_camera.radius += delta_radius;
    new_camera
}

// ============================================================================
// MATRICES
// ============================================================================

/// Camera position on the sphere (polar angle measured from +Z)
pub fn camera_eye_position(camera: &OrbitCameraData) -> Point3<f32> {
    let (sin_t, cos_t) = camera.theta.sin_cos();
    let (sin_p, cos_p) = camera.phi.sin_cos();
    Point3::new(
        camera.center.x + camera.radius * sin_t * cos_p,
        camera.center.y + camera.radius * sin_t * sin_p,
        camera.center.z + camera.radius * cos_t,
    )
}

/// Camera orientation (camera space to world space, no translation).
///
/// Columns are the camera's right, up and backward axes in world space; the
/// camera looks down its local -Z toward the center.
pub fn build_rotation_matrix(camera: &OrbitCameraData) -> Matrix4<f32> {
    let (sin_t, cos_t) = camera.theta.sin_cos();
    let (sin_p, cos_p) = camera.phi.sin_cos();

    Matrix4::from_cols(
        Vector4::new(-sin_p, cos_p, 0.0, 0.0),
        Vector4::new(-cos_p * cos_t, -sin_p * cos_t, sin_t, 0.0),
        Vector4::new(cos_p * sin_t, sin_p * sin_t, cos_t, 0.0),
        Vector4::new(0.0, 0.0, 0.0, 1.0),
    )
}

/// View matrix: inverse of `translate(eye) * rotation`.
///
/// The rotation is orthonormal, so the inverse is `Rᵀ * translate(-eye)` and
/// never fails.
pub fn build_view_matrix(camera: &OrbitCameraData) -> Matrix4<f32> {
    let eye = camera_eye_position(camera);
    build_rotation_matrix(camera).transpose()
        * Matrix4::from_translation(Vector3::new(-eye.x, -eye.y, -eye.z))
}

/// Pack a view-projection matrix for the draw adapter
pub fn build_camera_uniform(view_projection: Matrix4<f32>, texture_enabled: bool) -> CameraUniform {
    CameraUniform {
        view_projection_matrix: view_projection.into(),
        texture_enabled: texture_enabled as u32,
        _padding: [0; 3],
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Log camera context for debugging
pub fn log_camera_context(camera: &OrbitCameraData) {
    log::debug!(
        "[Camera] Phi: {:.3}rad ({:.1}°) | Theta: {:.3}rad ({:.1}°) | Radius: {:.1} | Center: ({:.1}, {:.1}, {:.1})",
        camera.phi,
        camera.phi.to_degrees(),
        camera.theta,
        camera.theta.to_degrees(),
        camera.radius,
        camera.center.x,
        camera.center.y,
        camera.center.z
    );
}
