/// Camera Module - Data-Oriented Programming (DOP) style
///
/// This module follows pure DOP principles:
/// - camera_data.rs: Pure data structures with NO methods
/// - camera_operations.rs: Pure functions that operate on data
///

pub mod camera_data;
pub mod camera_operations;

// Re-export data structures
pub use camera_data::{CameraUniform, OrbitCameraData};

// Re-export all operations
pub use camera_operations::{
    // Initialization
    create_orbit_camera,
    reset_orbit_camera,

    // Setters
    set_center,
    set_phi,
    set_radius,
    set_theta,

    // Movement
    move_orbit,

    // Matrices
    build_camera_uniform,
    build_rotation_matrix,
    build_view_matrix,
    camera_eye_position,

    // Diagnostics
    log_camera_context,
};
