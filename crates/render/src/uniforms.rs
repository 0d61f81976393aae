use bytemuck::{Pod, Zeroable};
use dirtjam_common::ShadingParams;
use glam::Mat4;

/// Uniform block consumed by the terrain shader.
///
/// Field order and sizes mirror `TerrainUniforms` in the WGSL source; the
/// struct is 16-byte aligned throughout so no explicit padding is needed.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TerrainUniforms {
    pub mvp: [[f32; 4]; 4],
    pub low_color: [f32; 4],
    pub high_color: [f32; 4],
    pub amplitude: f32,
    pub frequency: f32,
    pub octaves: u32,
    pub shading_mode: u32,
}

impl TerrainUniforms {
    pub fn new(mvp: Mat4, shading: &ShadingParams) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            low_color: shading.low_color,
            high_color: shading.high_color,
            amplitude: shading.amplitude,
            frequency: shading.frequency,
            octaves: shading.octaves.min(ShadingParams::MAX_OCTAVES),
            shading_mode: shading.mode.index(),
        }
    }
}
