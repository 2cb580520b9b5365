//! Example: load an ASCII elevation grid and drive the viewer core headless
//!
//! Usage: cargo run --example inspect_dem -- [path/to/grid.asc] [viewer.toml]
//!
//! Without a path a synthetic hill is generated. Draw calls go to a logging
//! adapter instead of a GPU.

use anyhow::Context;
use dem_viewer::{
    camera::CameraUniform,
    dem::{self, SourceType},
    mesh::{self, StripRange},
    renderer::{self, DrawAdapter, ViewerCommand},
    ElevationGrid, PointerButton, PointerEvent, ProjectionType, ViewerConfig,
};
use image::RgbaImage;

/// Counts what a real GPU backend would have been asked to do
#[derive(Default)]
struct LoggingAdapter {
    uploads: usize,
    draws: usize,
}

impl DrawAdapter for LoggingAdapter {
    fn release_buffers(&mut self) {
        log::info!("[LoggingAdapter] release_buffers");
    }

    fn upload_mesh(
        &mut self,
        vertices: &[f32],
        stride: usize,
        indices: &[u32],
        texture: Option<&RgbaImage>,
    ) {
        self.uploads += 1;
        log::info!(
            "[LoggingAdapter] upload_mesh: {} vertices (stride {}), {} indices, texture: {}",
            vertices.len() / stride,
            stride,
            indices.len(),
            texture.map(|t| format!("{}x{}", t.width(), t.height())).unwrap_or_else(|| "none".into())
        );
    }

    fn draw_strips(&mut self, ranges: &[StripRange], uniform: &CameraUniform) {
        self.draws += 1;
        log::info!(
            "[LoggingAdapter] draw_strips: {} strips, texture flag {}",
            ranges.len(),
            uniform.texture_enabled
        );
    }
}

/// Radially symmetric hill on a 64x48 grid
fn synthetic_grid() -> anyhow::Result<ElevationGrid> {
    let (cols, rows) = (64u64, 48u64);
    let mut samples = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let dx = col as f32 - cols as f32 / 2.0;
            let dy = row as f32 - rows as f32 / 2.0;
            samples.push(400.0 + 250.0 * (-(dx * dx + dy * dy) / 300.0).exp());
        }
    }
    Ok(dem::create_elevation_grid(
        cols, rows, 500_000.0, 4_000_000.0, 25.0, -9999.0, samples,
    )?)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let grid = match args.next() {
        Some(path) => dem::try_load_from_file(&path, SourceType::Text)
            .with_context(|| format!("loading {}", path))?,
        None => synthetic_grid()?,
    };
    let config = match args.next() {
        Some(path) => ViewerConfig::load(&path).with_context(|| format!("config {}", path))?,
        None => ViewerConfig::default(),
    };

    println!("DEM Inspector");
    println!("=============");
    println!(
        "Grid: {} cols x {} rows, cell size {}, {} cells",
        dem::cols(&grid),
        dem::rows(&grid),
        dem::cell_size(&grid),
        dem::cell_count(&grid)
    );
    let (lower_left_x, lower_left_y) = dem::lower_left(&grid);
    println!(
        "Lower-left corner: ({}, {}), no-data marker {}",
        lower_left_x,
        lower_left_y,
        dem::no_data_value(&grid)
    );

    let mut viewer = renderer::create_terrain_renderer(&config)?;
    let mut adapter = LoggingAdapter::default();

    renderer::queue_command(
        &mut viewer,
        ViewerCommand::SetupRenderer {
            grid,
            texture: None,
            randomize_gradient: false,
        },
    );
    renderer::queue_command(&mut viewer, ViewerCommand::AutoFitElevation);
    renderer::process_command_queue(&mut viewer)?;
    renderer::render_frame(&mut viewer, &mut adapter);

    if let Some(terrain) = viewer.mesh.as_ref() {
        let stats = terrain.stats;
        let memory = mesh::mesh_memory_stats(terrain);
        println!(
            "Elevation {:.1}..{:.1}, bbox diagonal {:.1}, mesh {} bytes",
            stats.min_elev,
            stats.max_elev,
            stats.bbox_diagonal,
            memory.total_bytes()
        );
    }
    println!("Auto-fit elevation scale: {:.3}", renderer::elevation_scale(&viewer));

    // Orbit a quarter turn, pan, then dolly in
    let drags = [
        (PointerButton::Left, 400.0, 300.0),
        (PointerButton::Right, 200.0, 100.0),
    ];
    for (button, x, y) in drags {
        renderer::handle_pointer_event(&mut viewer, PointerEvent::Press { button, x: 0.0, y: 0.0 });
        renderer::handle_pointer_event(&mut viewer, PointerEvent::Move { x, y });
        renderer::handle_pointer_event(&mut viewer, PointerEvent::Release { button });
        renderer::render_frame(&mut viewer, &mut adapter);
    }
    for _ in 0..3 {
        renderer::handle_pointer_event(&mut viewer, PointerEvent::Wheel { delta: 120.0 });
    }
    renderer::render_frame(&mut viewer, &mut adapter);

    println!(
        "Camera: phi {:.3}, theta {:.3}, radius {:.1}",
        viewer.camera.phi, viewer.camera.theta, viewer.camera.radius
    );

    renderer::switch_projection_type(&mut viewer, ProjectionType::Orthographic);
    renderer::handle_pointer_event(&mut viewer, PointerEvent::Wheel { delta: 120.0 });
    renderer::render_frame(&mut viewer, &mut adapter);
    if let Some(matrix) = renderer::view_projection_matrix(&mut viewer) {
        println!("Orthographic view-projection: {:?}", matrix);
    }

    renderer::randomize_gradient(&mut viewer)?;
    renderer::render_frame(&mut viewer, &mut adapter);

    renderer::shutdown_renderer(&mut viewer, &mut adapter);
    println!("Uploads: {}, draws: {}", adapter.uploads, adapter.draws);
    Ok(())
}
