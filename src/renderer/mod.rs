//! Renderer Module - per-viewer render state and the control surface
//!
//! GPU upload and draw calls stay outside the crate behind `DrawAdapter`.

pub mod draw_adapter;
pub mod renderer_data;
pub mod renderer_operations;

pub use draw_adapter::DrawAdapter;
pub use renderer_data::{TerrainRenderer, ViewerCommand};
pub use renderer_operations::{
    active_gradient, apply_command, create_terrain_renderer, elevation_scale, enable_texture_render,
    handle_pointer_event, process_command_queue, queue_command, randomize_gradient, ready,
    render_frame, request_redraw, reset_camera, resize_viewport, set_auto_fit_elevation,
    set_elevation_scale, setup_renderer, shutdown_renderer, step_elevation_scale,
    switch_projection_type, texture_enabled, view_projection_matrix,
};
