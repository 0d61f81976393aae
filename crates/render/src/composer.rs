use dirtjam_camera::FlyCamera;
use dirtjam_common::ProjectionConfig;
use glam::{Mat4, Vec3};

/// Perspective projection parameters (right-handed, depth in `[0, 1]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// Current drawable size as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpi_scale: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, dpi_scale: f32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            dpi_scale,
        }
    }

    /// Width over height; a minimized window still yields a usable ratio.
    pub fn aspect(&self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }
}

/// Matrices produced for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub view_proj: Mat4,
    pub model: Mat4,
    pub mvp: Mat4,
}

/// Builds the per-frame transforms and owns the cosmetic model spin.
#[derive(Debug, Clone)]
pub struct FrameComposer {
    pub projection: Projection,
    /// Degrees added per 1/60 s.
    pub spin_per_tick: f32,
    spin_degrees: f32,
}

impl Default for FrameComposer {
    fn default() -> Self {
        Self::new(Projection::default(), 0.5)
    }
}

impl FrameComposer {
    pub fn new(projection: Projection, spin_per_tick: f32) -> Self {
        Self {
            projection,
            spin_per_tick,
            spin_degrees: 0.0,
        }
    }

    pub fn from_config(config: &ProjectionConfig) -> Self {
        Self::new(
            Projection {
                fov_y_degrees: config.fov_y_degrees,
                near: config.near,
                far: config.far,
            },
            config.spin_per_tick,
        )
    }

    /// Accumulated spin around Y, in `[0, 360)`.
    pub fn spin_degrees(&self) -> f32 {
        self.spin_degrees
    }

    pub fn advance_spin(&mut self, dt: f32) {
        let ticks = dt * 60.0;
        self.spin_degrees = (self.spin_degrees + self.spin_per_tick * ticks).rem_euclid(360.0);
    }

    pub fn model_matrix(&self, origin: Vec3) -> Mat4 {
        Mat4::from_translation(origin) * Mat4::from_rotation_y(self.spin_degrees.to_radians())
    }

    /// Advance the spin by `dt` and build view-projection, model and MVP.
    pub fn compose(
        &mut self,
        camera: &FlyCamera,
        origin: Vec3,
        viewport: Viewport,
        dt: f32,
    ) -> FrameMatrices {
        self.advance_spin(dt);
        let view_proj = self.projection.matrix(viewport.aspect()) * camera.view_matrix();
        let model = self.model_matrix(origin);
        FrameMatrices {
            view_proj,
            model,
            mvp: view_proj * model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_runs_at_thirty_degrees_per_second() {
        let mut composer = FrameComposer::default();
        for _ in 0..60 {
            composer.advance_spin(1.0 / 60.0);
        }
        assert!((composer.spin_degrees() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn spin_wraps() {
        let mut composer = FrameComposer::default();
        composer.advance_spin(13.0); // 390 degrees
        assert!((composer.spin_degrees() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn zero_dt_leaves_translation_only_model() {
        let mut composer = FrameComposer::default();
        let camera = FlyCamera::default();
        let origin = Vec3::new(1.0, 0.0, -2.0);
        let m = composer.compose(&camera, origin, Viewport::new(1280, 720, 1.0), 0.0);
        assert_eq!(m.model, Mat4::from_translation(origin));
        assert_eq!(m.mvp, m.view_proj * Mat4::from_translation(origin));
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let mut composer = FrameComposer::default();
        let camera = FlyCamera::new(Vec3::new(0.0, 0.0, 5.0));
        let m = composer.compose(&camera, Vec3::ZERO, Viewport::new(800, 600, 1.0), 0.0);
        let clip = m.mvp * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn viewport_aspect_survives_zero_height() {
        assert_eq!(Viewport::new(1280, 0, 1.0).aspect(), 1280.0);
        assert!((Viewport::new(1280, 720, 2.0).aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn from_config_copies_projection() {
        let config = ProjectionConfig {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 50.0,
            spin_per_tick: 0.0,
        };
        let mut composer = FrameComposer::from_config(&config);
        assert_eq!(composer.projection.fov_y_degrees, 45.0);
        composer.advance_spin(10.0);
        assert_eq!(composer.spin_degrees(), 0.0);
    }
}
