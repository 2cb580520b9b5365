//! Seam between the viewer core and whatever owns the GPU.

use crate::camera::CameraUniform;
use crate::mesh::StripRange;
use image::RgbaImage;

/// GPU-side collaborator.
///
/// Buffers are single-generation: `release_buffers` is always called before
/// a new `upload_mesh`, and the core never holds two meshes at once.
pub trait DrawAdapter {
    /// Drop the currently uploaded vertex/index buffers and texture, if any
    fn release_buffers(&mut self);

    /// Upload interleaved vertex floats (`stride` floats per vertex), strip
    /// indices and the optional orthophoto
    fn upload_mesh(
        &mut self,
        vertices: &[f32],
        stride: usize,
        indices: &[u32],
        texture: Option<&RgbaImage>,
    );

    /// Issue one triangle-strip draw per range
    fn draw_strips(&mut self, ranges: &[StripRange], uniform: &CameraUniform);
}
