//! Renderer Operations - Pure DOP Functions
//!
//! Functions that operate on TerrainRenderer. This is the control surface a
//! UI shell drives, either by calling these directly or by queueing
//! `ViewerCommand`s and draining them once per frame.

use super::draw_adapter::DrawAdapter;
use super::renderer_data::{TerrainRenderer, ViewerCommand};
use crate::camera::{self, OrbitCameraData};
use crate::dem::{self, ElevationGrid};
use crate::error::{ViewerError, ViewerResult};
use crate::gradient::{self, ColorGradient};
use crate::interaction::{self, Viewport};
use crate::mesh::{self, MeshOptions, TerrainMesh};
use crate::projection::{self, ProjectionType};
use crate::ViewerConfig;
use cgmath::Matrix4;
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Create a renderer with no mesh bound. The config is validated first.
pub fn create_terrain_renderer(config: &ViewerConfig) -> ViewerResult<TerrainRenderer> {
    config.validate()?;

    let rng = match config.gradient_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let default_gradient = gradient::default_terrain_gradient();

    Ok(TerrainRenderer {
        grid: None,
        mesh: None,
        strip_ranges: Vec::new(),
        camera: OrbitCameraData {
            theta: config.polar_safe_zone,
            polar_safe_zone: config.polar_safe_zone,
            ..Default::default()
        },
        projection: projection::create_projection_state(
            config.projection_config(),
            config.viewport_width,
            config.viewport_height,
        ),
        interaction: interaction::create_interaction_state(config.dolly_fraction),
        active_gradient: default_gradient.clone(),
        default_gradient,
        texture: None,
        render_texture: false,
        buffers_dirty: false,
        needs_redraw: false,
        commands: VecDeque::new(),
        rng,
    })
}

/// True once a mesh is bound
pub fn ready(renderer: &TerrainRenderer) -> bool {
    renderer.mesh.is_some()
}

/// Bind a new grid: build its mesh, frame the camera and schedule an upload.
///
/// On error nothing changes and the previous mesh stays bound.
pub fn setup_renderer(
    renderer: &mut TerrainRenderer,
    grid: &ElevationGrid,
    texture: Option<RgbaImage>,
    randomize_gradient: bool,
) -> ViewerResult<()> {
    if dem::is_empty(grid) {
        log::warn!("[setup_renderer] Refusing to bind an empty grid");
        return Err(ViewerError::EmptyGrid);
    }

    let gradient = if randomize_gradient {
        gradient::randomized_gradient(&mut renderer.rng)
    } else {
        renderer.default_gradient.clone()
    };

    let options = MeshOptions {
        generate_tex_coords: texture.is_some(),
    };
    let mesh = mesh::build_terrain_mesh(grid, &gradient, options)?;

    renderer.active_gradient = gradient;
    renderer.grid = Some(grid.clone());
    renderer.texture = texture;
    renderer.render_texture = false;
    bind_mesh(renderer, mesh);

    renderer.interaction = interaction::create_interaction_state(renderer.interaction.dolly_fraction);
    reset_camera(renderer);

    log::info!(
        "[setup_renderer] Bound {}x{} grid (textured: {}, random gradient: {})",
        dem::cols(grid),
        dem::rows(grid),
        renderer.texture.is_some(),
        randomize_gradient
    );
    Ok(())
}

fn bind_mesh(renderer: &mut TerrainRenderer, mesh: TerrainMesh) {
    renderer.strip_ranges = mesh::strip_draw_ranges(&mesh);
    renderer.mesh = Some(mesh);
    renderer.buffers_dirty = true;
    projection::mark_dirty(&mut renderer.projection);
    renderer.needs_redraw = true;
}

/// Recolor the bound grid with a fresh random gradient. The camera is kept.
pub fn randomize_gradient(renderer: &mut TerrainRenderer) -> ViewerResult<()> {
    let gradient = gradient::randomized_gradient(&mut renderer.rng);

    let Some(grid) = renderer.grid.as_ref() else {
        renderer.active_gradient = gradient;
        return Ok(());
    };

    let options = MeshOptions {
        generate_tex_coords: renderer.texture.is_some(),
    };
    let mesh = mesh::build_terrain_mesh(grid, &gradient, options)?;

    log::debug!(
        "[randomize_gradient] Rebuilt colors with {} stops",
        gradient.len()
    );
    renderer.active_gradient = gradient;
    bind_mesh(renderer, mesh);
    Ok(())
}

// ============================================================================
// VIEW CONTROLS
// ============================================================================

/// Switch perspective/orthographic; the camera is reframed
pub fn switch_projection_type(renderer: &mut TerrainRenderer, projection_type: ProjectionType) {
    projection::set_projection_type(&mut renderer.projection, projection_type);
    reset_camera(renderer);
    log::info!("[switch_projection_type] Now {:?}", projection_type);
}

pub fn set_elevation_scale(renderer: &mut TerrainRenderer, scale: f32) {
    projection::set_elevation_scale(&mut renderer.projection, scale);
    renderer.needs_redraw = true;
}

/// Nudge the vertical exaggeration by `steps` configured increments
pub fn step_elevation_scale(renderer: &mut TerrainRenderer, steps: i32) {
    projection::step_elevation_scale(&mut renderer.projection, steps);
    renderer.needs_redraw = true;
    log::debug!(
        "[step_elevation_scale] Elevation scale {:.2}",
        renderer.projection.elevation_scale
    );
}

pub fn elevation_scale(renderer: &TerrainRenderer) -> f32 {
    renderer.projection.elevation_scale
}

/// Scale the relief so its span matches half the grid diagonal, then reframe.
/// Returns false when no mesh is bound.
pub fn set_auto_fit_elevation(renderer: &mut TerrainRenderer) -> bool {
    let Some(stats) = renderer.mesh.as_ref().map(|m| m.stats) else {
        return false;
    };

    let scale = projection::auto_fit_elevation_scale(&stats);
    projection::set_elevation_scale(&mut renderer.projection, scale);
    reset_camera(renderer);

    log::info!(
        "[set_auto_fit_elevation] Elevation scale {:.3}",
        renderer.projection.elevation_scale
    );
    true
}

/// Frame the bound mesh. No-op without one.
pub fn reset_camera(renderer: &mut TerrainRenderer) {
    let Some(mesh) = renderer.mesh.as_ref() else {
        return;
    };

    renderer.camera = camera::reset_orbit_camera(
        &renderer.camera,
        &mesh.stats,
        mesh.geo_center,
        renderer.projection.elevation_scale,
    );
    camera::log_camera_context(&renderer.camera);

    projection::mark_dirty(&mut renderer.projection);
    renderer.needs_redraw = true;
}

/// Toggle orthophoto rendering. Only takes effect when a texture was bound
/// with the mesh; returns the resulting state.
pub fn enable_texture_render(renderer: &mut TerrainRenderer, enabled: bool) -> bool {
    let available = renderer.texture.is_some()
        && renderer.mesh.as_ref().is_some_and(|m| m.textured);

    if enabled && !available {
        log::warn!("[enable_texture_render] No texture bound, staying on gradient colors");
    }

    let next = enabled && available;
    if next != renderer.render_texture {
        renderer.render_texture = next;
        renderer.needs_redraw = true;
    }
    next
}

pub fn texture_enabled(renderer: &TerrainRenderer) -> bool {
    renderer.render_texture
}

pub fn resize_viewport(renderer: &mut TerrainRenderer, width: u32, height: u32) {
    projection::resize_viewport(&mut renderer.projection, width, height);
    if renderer.projection.dirty {
        renderer.needs_redraw = true;
    }
}

/// Feed one pointer event through the interaction state machine
pub fn handle_pointer_event(
    renderer: &mut TerrainRenderer,
    event: interaction::PointerEvent,
) -> bool {
    let viewport = Viewport {
        width: renderer.projection.viewport_width as f32,
        height: renderer.projection.viewport_height as f32,
    };
    let stats = renderer.mesh.as_ref().map(|m| m.stats);

    let changed = interaction::handle_pointer_event(
        &mut renderer.interaction,
        &mut renderer.camera,
        &mut renderer.projection,
        stats.as_ref(),
        viewport,
        event,
    );

    if changed {
        projection::mark_dirty(&mut renderer.projection);
        renderer.needs_redraw = true;
    }
    changed
}

// ============================================================================
// FRAME
// ============================================================================

fn current_view_projection(renderer: &mut TerrainRenderer) -> Option<Matrix4<f32>> {
    let stats = renderer.mesh.as_ref()?.stats;
    Some(projection::refresh_view_projection(
        &mut renderer.projection,
        &renderer.camera,
        &stats,
    ))
}

/// Column-major view-projection matrix, `None` while no mesh is bound
pub fn view_projection_matrix(renderer: &mut TerrainRenderer) -> Option<[f32; 16]> {
    let matrix = current_view_projection(renderer)?;
    let columns: [[f32; 4]; 4] = matrix.into();

    let mut flat = [0.0; 16];
    for (i, column) in columns.iter().enumerate() {
        flat[i * 4..i * 4 + 4].copy_from_slice(column);
    }
    Some(flat)
}

pub fn request_redraw(renderer: &mut TerrainRenderer) {
    renderer.needs_redraw = true;
}

/// Upload pending buffers and draw. Returns true when a draw was issued.
pub fn render_frame(renderer: &mut TerrainRenderer, adapter: &mut dyn DrawAdapter) -> bool {
    if !ready(renderer) || !renderer.needs_redraw {
        return false;
    }

    if renderer.buffers_dirty {
        if let Some(mesh) = renderer.mesh.as_ref() {
            let vertices = mesh::flatten_vertex_attributes(mesh);
            adapter.release_buffers();
            adapter.upload_mesh(
                &vertices,
                mesh::vertex_stride(mesh),
                &mesh.indices,
                renderer.texture.as_ref(),
            );

            let memory = mesh::mesh_memory_stats(mesh);
            log::debug!(
                "[render_frame] Uploaded {} vertices, {} indices ({} bytes)",
                mesh::vertex_count(mesh),
                mesh::index_count(mesh),
                memory.total_bytes()
            );
        }
        renderer.buffers_dirty = false;
    }

    let Some(matrix) = current_view_projection(renderer) else {
        return false;
    };
    let uniform = camera::build_camera_uniform(matrix, renderer.render_texture);
    adapter.draw_strips(&renderer.strip_ranges, &uniform);

    renderer.needs_redraw = false;
    true
}

/// Release GPU buffers. The mesh stays bound and is re-uploaded on the next
/// frame.
pub fn shutdown_renderer(renderer: &mut TerrainRenderer, adapter: &mut dyn DrawAdapter) {
    adapter.release_buffers();
    renderer.buffers_dirty = renderer.mesh.is_some();
    renderer.commands.clear();
    log::info!("[shutdown_renderer] Released GPU buffers");
}

// ============================================================================
// COMMAND QUEUE
// ============================================================================

pub fn queue_command(renderer: &mut TerrainRenderer, command: ViewerCommand) {
    renderer.commands.push_back(command);
}

/// Apply a single command immediately
pub fn apply_command(renderer: &mut TerrainRenderer, command: ViewerCommand) -> ViewerResult<()> {
    match command {
        ViewerCommand::SetupRenderer {
            grid,
            texture,
            randomize_gradient,
        } => setup_renderer(renderer, &grid, texture, randomize_gradient)?,
        ViewerCommand::RandomizeGradient => randomize_gradient(renderer)?,
        ViewerCommand::SwitchProjection(projection_type) => {
            switch_projection_type(renderer, projection_type)
        }
        ViewerCommand::SetElevationScale(scale) => set_elevation_scale(renderer, scale),
        ViewerCommand::StepElevationScale(steps) => step_elevation_scale(renderer, steps),
        ViewerCommand::AutoFitElevation => {
            set_auto_fit_elevation(renderer);
        }
        ViewerCommand::ResetCamera => reset_camera(renderer),
        ViewerCommand::EnableTextureRender(enabled) => {
            enable_texture_render(renderer, enabled);
        }
        ViewerCommand::Resize { width, height } => resize_viewport(renderer, width, height),
        ViewerCommand::Pointer(event) => {
            handle_pointer_event(renderer, event);
        }
    }
    Ok(())
}

/// Drain queued commands in order (call once per frame).
///
/// Stops at the first failing command; the ones after it stay queued.
pub fn process_command_queue(renderer: &mut TerrainRenderer) -> ViewerResult<usize> {
    let mut applied = 0;
    while let Some(command) = renderer.commands.pop_front() {
        if let Err(e) = apply_command(renderer, command) {
            log::warn!(
                "[process_command_queue] Command failed after {} applied: {}",
                applied,
                e
            );
            return Err(e);
        }
        applied += 1;
    }
    Ok(applied)
}

/// Gradient currently coloring the mesh
pub fn active_gradient(renderer: &TerrainRenderer) -> &ColorGradient {
    &renderer.active_gradient
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraUniform;
    use crate::constants::camera::{RESET_PHI, RESET_THETA};
    use crate::dem::create_elevation_grid;
    use crate::interaction::{PointerButton, PointerEvent};
    use crate::mesh::StripRange;

    #[derive(Default)]
    struct RecordingAdapter {
        releases: usize,
        uploads: Vec<(usize, usize, usize, bool)>,
        draws: Vec<(usize, CameraUniform)>,
    }

    impl DrawAdapter for RecordingAdapter {
        fn release_buffers(&mut self) {
            self.releases += 1;
        }

        fn upload_mesh(
            &mut self,
            vertices: &[f32],
            stride: usize,
            indices: &[u32],
            texture: Option<&RgbaImage>,
        ) {
            self.uploads
                .push((vertices.len(), stride, indices.len(), texture.is_some()));
        }

        fn draw_strips(&mut self, ranges: &[StripRange], uniform: &CameraUniform) {
            self.draws.push((ranges.len(), *uniform));
        }
    }

    fn test_config() -> ViewerConfig {
        ViewerConfig {
            viewport_width: 800,
            viewport_height: 600,
            gradient_seed: Some(7),
            ..Default::default()
        }
    }

    fn ramp_grid() -> ElevationGrid {
        let samples = (0..12).map(|i| i as f32 * 10.0).collect();
        create_elevation_grid(4, 3, 0.0, 0.0, 10.0, -9999.0, samples).expect("valid grid")
    }

    fn bound_renderer() -> TerrainRenderer {
        let mut renderer = create_terrain_renderer(&test_config()).expect("renderer");
        setup_renderer(&mut renderer, &ramp_grid(), None, false).expect("setup");
        renderer
    }

    #[test]
    fn test_invalid_config_rejected() {
        for fov_degrees in [0.0, 180.0, -30.0] {
            let config = ViewerConfig {
                fov_degrees,
                ..test_config()
            };
            assert!(matches!(
                create_terrain_renderer(&config),
                Err(ViewerError::InvalidConfig { .. })
            ));
        }
    }

    #[test]
    fn test_not_ready_until_setup() {
        let mut renderer = create_terrain_renderer(&test_config()).expect("renderer");
        let mut adapter = RecordingAdapter::default();

        assert!(!ready(&renderer));
        request_redraw(&mut renderer);
        assert!(!render_frame(&mut renderer, &mut adapter));
        assert!(view_projection_matrix(&mut renderer).is_none());
        assert!(adapter.draws.is_empty());
    }

    #[test]
    fn test_empty_grid_leaves_state_unchanged() {
        let mut renderer = bound_renderer();
        let before = renderer.camera;

        let result = setup_renderer(&mut renderer, &dem::empty_grid(), None, true);
        assert!(matches!(result, Err(ViewerError::EmptyGrid)));
        assert!(ready(&renderer));
        assert_eq!(renderer.camera, before);
        assert_eq!(renderer.mesh.as_ref().map(|m| m.cols), Some(4));
    }

    #[test]
    fn test_setup_frames_camera() {
        let renderer = bound_renderer();
        let mesh = renderer.mesh.as_ref().expect("mesh");

        assert_eq!(renderer.camera.phi, RESET_PHI);
        assert_eq!(renderer.camera.theta, RESET_THETA);
        assert_eq!(renderer.camera.radius, mesh.stats.bbox_diagonal);
        assert_eq!(renderer.camera.center.x, mesh.geo_center.x);
        assert_eq!(renderer.camera.center.z, 55.0);
        assert_eq!(renderer.strip_ranges.len(), 2);
    }

    #[test]
    fn test_first_frame_uploads_then_draws() {
        let mut renderer = bound_renderer();
        let mut adapter = RecordingAdapter::default();

        assert!(render_frame(&mut renderer, &mut adapter));
        assert_eq!(adapter.releases, 1);
        assert_eq!(adapter.uploads, vec![(12 * 7, 7, 16, false)]);
        assert_eq!(adapter.draws.len(), 1);
        assert_eq!(adapter.draws[0].0, 2);
        assert_eq!(adapter.draws[0].1.texture_enabled, 0);

        // Nothing changed, nothing drawn
        assert!(!render_frame(&mut renderer, &mut adapter));

        request_redraw(&mut renderer);
        assert!(render_frame(&mut renderer, &mut adapter));
        assert_eq!(adapter.uploads.len(), 1);
        assert_eq!(adapter.draws.len(), 2);
    }

    #[test]
    fn test_rebind_releases_before_upload() {
        let mut renderer = bound_renderer();
        let mut adapter = RecordingAdapter::default();
        render_frame(&mut renderer, &mut adapter);

        let texture = RgbaImage::new(4, 4);
        setup_renderer(&mut renderer, &ramp_grid(), Some(texture), false).expect("setup");
        render_frame(&mut renderer, &mut adapter);

        assert_eq!(adapter.releases, 2);
        assert_eq!(adapter.uploads[1], (12 * 9, 9, 16, true));
    }

    #[test]
    fn test_texture_toggle_requires_texture() {
        let mut renderer = bound_renderer();
        assert!(!enable_texture_render(&mut renderer, true));
        assert!(!texture_enabled(&renderer));

        setup_renderer(&mut renderer, &ramp_grid(), Some(RgbaImage::new(2, 2)), false)
            .expect("setup");
        assert!(enable_texture_render(&mut renderer, true));

        let mut adapter = RecordingAdapter::default();
        render_frame(&mut renderer, &mut adapter);
        assert_eq!(adapter.draws[0].1.texture_enabled, 1);
    }

    #[test]
    fn test_matrix_cached_until_change() {
        let mut renderer = bound_renderer();
        let first = view_projection_matrix(&mut renderer).expect("matrix");
        assert!(!renderer.projection.dirty);
        assert_eq!(view_projection_matrix(&mut renderer), Some(first));

        step_elevation_scale(&mut renderer, 1);
        assert!(renderer.projection.dirty);
        let scaled = view_projection_matrix(&mut renderer).expect("matrix");
        assert_ne!(first, scaled);
    }

    #[test]
    fn test_auto_fit_and_projection_switch() {
        let mut renderer = create_terrain_renderer(&test_config()).expect("renderer");
        assert!(!set_auto_fit_elevation(&mut renderer));

        setup_renderer(&mut renderer, &ramp_grid(), None, false).expect("setup");
        assert!(set_auto_fit_elevation(&mut renderer));
        let stats = renderer.mesh.as_ref().expect("mesh").stats;
        let expected = stats.grid_diagonal / 2.0 / 110.0;
        assert!((elevation_scale(&renderer) - expected).abs() < 1e-5);

        renderer.camera = camera::set_phi(&renderer.camera, 1.0);
        switch_projection_type(&mut renderer, ProjectionType::Orthographic);
        assert_eq!(renderer.projection.projection_type, ProjectionType::Orthographic);
        assert_eq!(renderer.camera.phi, RESET_PHI);
    }

    #[test]
    fn test_pointer_drag_marks_dirty() {
        let mut renderer = bound_renderer();
        view_projection_matrix(&mut renderer);
        let start_phi = renderer.camera.phi;

        handle_pointer_event(
            &mut renderer,
            PointerEvent::Press {
                button: PointerButton::Left,
                x: 0.0,
                y: 0.0,
            },
        );
        assert!(handle_pointer_event(
            &mut renderer,
            PointerEvent::Move { x: 400.0, y: 0.0 }
        ));
        assert!(renderer.projection.dirty);
        assert!((renderer.camera.phi - (start_phi - 0.5 * std::f32::consts::PI)).abs() < 1e-5);
    }

    #[test]
    fn test_randomize_keeps_camera() {
        let mut renderer = bound_renderer();
        renderer.camera = camera::set_radius(&renderer.camera, 3.0);
        let colors_before: Vec<[f32; 4]> = renderer
            .mesh
            .as_ref()
            .expect("mesh")
            .vertices
            .iter()
            .map(|v| v.color)
            .collect();

        randomize_gradient(&mut renderer).expect("recolor");
        assert_eq!(renderer.camera.radius, 3.0);
        assert!(renderer.buffers_dirty);
        assert_ne!(active_gradient(&renderer), &renderer.default_gradient);

        let colors_after: Vec<[f32; 4]> = renderer
            .mesh
            .as_ref()
            .expect("mesh")
            .vertices
            .iter()
            .map(|v| v.color)
            .collect();
        assert_ne!(colors_before, colors_after);
    }

    #[test]
    fn test_command_queue_applies_in_order() {
        let mut renderer = create_terrain_renderer(&test_config()).expect("renderer");
        queue_command(
            &mut renderer,
            ViewerCommand::SetupRenderer {
                grid: ramp_grid(),
                texture: None,
                randomize_gradient: false,
            },
        );
        queue_command(&mut renderer, ViewerCommand::SetElevationScale(2.0));
        queue_command(&mut renderer, ViewerCommand::Resize { width: 320, height: 200 });

        assert_eq!(process_command_queue(&mut renderer).expect("drain"), 3);
        assert!(ready(&renderer));
        assert_eq!(elevation_scale(&renderer), 2.0);
        assert_eq!(renderer.projection.viewport_width, 320);
        assert!(renderer.commands.is_empty());
    }

    #[test]
    fn test_command_queue_stops_on_error() {
        let mut renderer = create_terrain_renderer(&test_config()).expect("renderer");
        queue_command(
            &mut renderer,
            ViewerCommand::SetupRenderer {
                grid: dem::empty_grid(),
                texture: None,
                randomize_gradient: false,
            },
        );
        queue_command(&mut renderer, ViewerCommand::ResetCamera);

        assert!(process_command_queue(&mut renderer).is_err());
        assert_eq!(renderer.commands.len(), 1);
    }

    #[test]
    fn test_shutdown_forces_reupload() {
        let mut renderer = bound_renderer();
        let mut adapter = RecordingAdapter::default();
        render_frame(&mut renderer, &mut adapter);

        shutdown_renderer(&mut renderer, &mut adapter);
        assert!(renderer.buffers_dirty);
        request_redraw(&mut renderer);
        render_frame(&mut renderer, &mut adapter);
        assert_eq!(adapter.uploads.len(), 2);
    }
}
