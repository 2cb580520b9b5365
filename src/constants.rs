//! Tuning constants shared by the camera, projection and interaction code.

/// Orbit camera constants
pub mod camera {
    /// Polar angle kept away from the poles by this much (radians)
    pub const DEFAULT_POLAR_SAFE_ZONE: f32 = std::f32::consts::PI / 24.0;

    /// Azimuth after a reset: camera south of the center, looking north
    pub const RESET_PHI: f32 = -std::f32::consts::FRAC_PI_2;

    /// Polar angle after a reset
    pub const RESET_THETA: f32 = std::f32::consts::FRAC_PI_4;
}

/// Projection constants
pub mod projection {
    /// Vertical field of view for perspective projection
    pub const FOV_DEGREES: f32 = 60.0;

    /// Multiplied with the shortest bounding box edge to get the near plane
    pub const NEAR_PLANE_SCALE: f32 = 0.01;

    /// Multiplied with the longest bounding box edge to get the far plane
    pub const FAR_PLANE_SCALE: f32 = 100.0;

    /// Near plane fallback (times the longest edge) when the shortest edge is 0
    pub const DEGENERATE_NEAR_SCALE: f32 = 1.0e-4;

    /// Multiplied with the bounding diagonal to get the orthographic far plane
    pub const ORTHO_FAR_SCALE: f32 = 100.0;

    pub const ORTHO_ZOOM_DEFAULT: f32 = 1.0;
    pub const ORTHO_ZOOM_MIN: f32 = 0.1;
    pub const ORTHO_ZOOM_MAX: f32 = 2.0;
    pub const ORTHO_ZOOM_STEP: f32 = 0.05;
}

/// Vertical exaggeration constants
pub mod elevation {
    pub const DEFAULT_SCALE: f32 = 1.0;
    pub const SCALE_STEP: f32 = 0.10;
    pub const MIN_SCALE: f32 = 0.05;
}

/// Pointer interaction constants
pub mod interaction {
    /// Fraction of the bounding diagonal travelled per wheel notch
    pub const DOLLY_FRACTION: f32 = 0.05;
}
