//! Renderer Data - Pure DOP
//!
//! Everything one viewer instance renders with. Nothing here is global: the
//! active gradient and texture belong to the renderer that set them up.

use crate::camera::OrbitCameraData;
use crate::dem::ElevationGrid;
use crate::gradient::ColorGradient;
use crate::interaction::{InteractionState, PointerEvent};
use crate::mesh::{StripRange, TerrainMesh};
use crate::projection::{ProjectionState, ProjectionType};
use image::RgbaImage;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// Requests from the UI shell, applied synchronously by
/// `process_command_queue`
#[derive(Debug, Clone)]
pub enum ViewerCommand {
    SetupRenderer {
        grid: ElevationGrid,
        texture: Option<RgbaImage>,
        randomize_gradient: bool,
    },
    RandomizeGradient,
    SwitchProjection(ProjectionType),
    SetElevationScale(f32),
    StepElevationScale(i32),
    AutoFitElevation,
    ResetCamera,
    EnableTextureRender(bool),
    Resize { width: u32, height: u32 },
    Pointer(PointerEvent),
}

pub struct TerrainRenderer {
    /// Grid the current mesh was built from, kept for gradient rebuilds
    pub grid: Option<ElevationGrid>,
    pub mesh: Option<TerrainMesh>,
    pub strip_ranges: Vec<StripRange>,

    pub camera: OrbitCameraData,
    pub projection: ProjectionState,
    pub interaction: InteractionState,

    pub default_gradient: ColorGradient,
    pub active_gradient: ColorGradient,

    pub texture: Option<RgbaImage>,
    pub render_texture: bool,

    /// Mesh changed since the last upload
    pub buffers_dirty: bool,

    /// Something visible changed since the last draw
    pub needs_redraw: bool,

    pub commands: VecDeque<ViewerCommand>,
    pub rng: StdRng,
}
