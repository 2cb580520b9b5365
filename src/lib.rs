// DEM Viewer - terrain geometry and orbit camera core
//
// Data-Oriented layout, same as the rest of the codebase:
// - *_data.rs modules hold plain data
// - *_operations.rs modules hold the functions that transform it
//
// Pipeline: ASCII grid -> dem -> mesh (+ gradient colors) -> renderer ->
// DrawAdapter upload, then per frame camera + projection -> matrix -> draw.

// Constants module
pub mod constants;

pub mod error;

// Core pipeline
pub mod camera;
pub mod dem;
pub mod gradient;
pub mod interaction;
pub mod mesh;
pub mod projection;
pub mod renderer;

use serde::Deserialize;
use std::path::Path;

pub use camera::{CameraUniform, OrbitCameraData};
pub use dem::{ElevationGrid, SourceType};
pub use error::{ErrorContext, OptionExt, ViewerError, ViewerResult};
pub use gradient::{ColorGradient, ColorStop};
pub use interaction::{PointerButton, PointerEvent, Viewport};
pub use mesh::{BoundingStats, MeshOptions, TerrainMesh, TerrainVertex};
pub use projection::{ProjectionConfig, ProjectionType};
pub use renderer::{DrawAdapter, TerrainRenderer, ViewerCommand};

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Polar angle margin kept from either pole (radians)
    pub polar_safe_zone: f32,

    pub fov_degrees: f32,
    pub near_plane_scale: f32,
    pub far_plane_scale: f32,
    pub ortho_far_scale: f32,

    pub ortho_zoom_min: f32,
    pub ortho_zoom_max: f32,
    pub ortho_zoom_step: f32,

    pub elevation_scale_step: f32,
    pub min_elevation_scale: f32,

    /// Fraction of the bounding diagonal moved per wheel notch
    pub dolly_fraction: f32,

    /// Seed for randomized gradients; entropy when unset
    pub gradient_seed: Option<u64>,
}

impl ViewerConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> ViewerResult<Self> {
        let config: ViewerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> ViewerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_path(&path.display().to_string())?;
        let config = Self::from_toml_str(&text)?;
        log::info!("[ViewerConfig] Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> ViewerResult<()> {
        fn invalid(field: &str, value: impl ToString, reason: &str) -> ViewerError {
            ViewerError::InvalidConfig {
                field: field.to_string(),
                value: value.to_string(),
                reason: reason.to_string(),
            }
        }

        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(invalid(
                "viewport",
                format!("{}x{}", self.viewport_width, self.viewport_height),
                "viewport dimensions must be non-zero",
            ));
        }

        let half_pi = std::f32::consts::FRAC_PI_2;
        if !(self.polar_safe_zone >= 0.0 && self.polar_safe_zone < half_pi) {
            return Err(invalid(
                "polar_safe_zone",
                self.polar_safe_zone,
                "must lie in [0, pi/2)",
            ));
        }

        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid("fov_degrees", self.fov_degrees, "must lie in (0, 180)"));
        }

        if self.near_plane_scale <= 0.0 {
            return Err(invalid("near_plane_scale", self.near_plane_scale, "must be positive"));
        }
        if self.far_plane_scale <= 0.0 || self.ortho_far_scale <= 0.0 {
            return Err(invalid(
                "far_plane_scale",
                self.far_plane_scale.min(self.ortho_far_scale),
                "far plane scales must be positive",
            ));
        }

        if !(self.ortho_zoom_min > 0.0 && self.ortho_zoom_min <= self.ortho_zoom_max) {
            return Err(invalid(
                "ortho_zoom_min",
                self.ortho_zoom_min,
                "must be positive and not above ortho_zoom_max",
            ));
        }

        if self.min_elevation_scale <= 0.0 {
            return Err(invalid(
                "min_elevation_scale",
                self.min_elevation_scale,
                "must be positive",
            ));
        }

        for (field, value) in [
            ("ortho_zoom_step", self.ortho_zoom_step),
            ("elevation_scale_step", self.elevation_scale_step),
            ("dolly_fraction", self.dolly_fraction),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, value, "must be finite and positive"));
            }
        }

        log::debug!("[ViewerConfig] Configuration validated successfully");
        Ok(())
    }

    /// Projection settings carried by this config
    pub fn projection_config(&self) -> ProjectionConfig {
        ProjectionConfig {
            fov_degrees: self.fov_degrees,
            near_plane_scale: self.near_plane_scale,
            far_plane_scale: self.far_plane_scale,
            ortho_far_scale: self.ortho_far_scale,
            ortho_zoom_min: self.ortho_zoom_min,
            ortho_zoom_max: self.ortho_zoom_max,
            ortho_zoom_step: self.ortho_zoom_step,
            elevation_scale_step: self.elevation_scale_step,
            min_elevation_scale: self.min_elevation_scale,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let projection = ProjectionConfig::default();
        Self {
            viewport_width: 1280,
            viewport_height: 720,
            polar_safe_zone: constants::camera::DEFAULT_POLAR_SAFE_ZONE,
            fov_degrees: projection.fov_degrees,
            near_plane_scale: projection.near_plane_scale,
            far_plane_scale: projection.far_plane_scale,
            ortho_far_scale: projection.ortho_far_scale,
            ortho_zoom_min: projection.ortho_zoom_min,
            ortho_zoom_max: projection.ortho_zoom_max,
            ortho_zoom_step: projection.ortho_zoom_step,
            elevation_scale_step: projection.elevation_scale_step,
            min_elevation_scale: projection.min_elevation_scale,
            dolly_fraction: constants::interaction::DOLLY_FRACTION,
            gradient_seed: None,
        }
    }
}
