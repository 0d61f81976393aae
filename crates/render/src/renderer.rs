use std::fmt::Write;

use dirtjam_common::{DrawMode, ShadingParams};
use glam::Vec3;

use crate::composer::{FrameMatrices, Viewport};
use crate::uniforms::TerrainUniforms;

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameData {
    pub matrices: FrameMatrices,
    /// Drawable size the matrices were composed for.
    pub viewport: Viewport,
    pub uniforms: TerrainUniforms,
    pub shading: ShadingParams,
    pub draw_mode: DrawMode,
    pub index_count: u32,
    pub instance_count: u32,
    pub camera_position: Vec3,
    pub camera_front: Vec3,
    pub spin_degrees: f32,
}

/// Renderer-agnostic interface. Backends read a [`FrameData`] and produce output.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &FrameData) -> Self::Output;
}

/// Headless renderer that describes the frame as text.
///
/// Used by the CLI and in tests where no GPU is available.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameData) -> String {
        let mut out = String::new();
        let p = frame.camera_position;
        let f = frame.camera_front;
        let s = &frame.shading;
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Frame (mode={}, indices={}, instances={}) ===",
            frame.draw_mode.label(),
            frame.index_count,
            frame.instance_count
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) front=({:.3}, {:.3}, {:.3})",
            p.x, p.y, p.z, f.x, f.y, f.z
        );
        let _ = writeln!(
            out,
            "Viewport: {}x{} @{:.2}x",
            frame.viewport.width, frame.viewport.height, frame.viewport.dpi_scale
        );
        let _ = writeln!(out, "Spin: {:.1} deg", frame.spin_degrees);
        let _ = writeln!(
            out,
            "Shading: {} amplitude={:.2} frequency={:.2} octaves={}",
            s.mode.label(),
            s.amplitude,
            s.frequency,
            frame.uniforms.octaves
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    fn frame(draw_mode: DrawMode) -> FrameData {
        let shading = ShadingParams::default();
        FrameData {
            matrices: FrameMatrices {
                view_proj: Mat4::IDENTITY,
                model: Mat4::IDENTITY,
                mvp: Mat4::IDENTITY,
            },
            viewport: Viewport::new(1280, 720, 2.0),
            uniforms: TerrainUniforms::new(Mat4::IDENTITY, &shading),
            shading,
            draw_mode,
            index_count: 6,
            instance_count: 1,
            camera_position: Vec3::new(1.0, 2.0, 3.0),
            camera_front: Vec3::NEG_Z,
            spin_degrees: 12.0,
        }
    }

    #[test]
    fn debug_renderer_reports_draw_call() {
        let output = DebugTextRenderer::new().render(&frame(DrawMode::Solid));
        assert!(output.contains("mode=solid"));
        assert!(output.contains("indices=6"));
        assert!(output.contains("instances=1"));
        assert!(output.contains("eye=(1.00, 2.00, 3.00)"));
    }

    #[test]
    fn debug_renderer_reports_wireframe() {
        let output = DebugTextRenderer::new().render(&frame(DrawMode::Wireframe));
        assert!(output.contains("mode=wireframe"));
        assert!(output.contains("Spin: 12.0 deg"));
    }

    #[test]
    fn debug_renderer_reports_viewport_scale() {
        let output = DebugTextRenderer::new().render(&frame(DrawMode::Solid));
        assert!(output.contains("Viewport: 1280x720 @2.00x"));
    }
}
