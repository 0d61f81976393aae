use dirtjam_camera::FlyCamera;
use dirtjam_common::{DrawMode, SceneConfig, ShadingParams};
use dirtjam_input::{Action, InputEvent, map_event};
use dirtjam_mesh::{GridMesh, MeshError};
use glam::Vec3;

use crate::composer::{FrameComposer, Viewport};
use crate::renderer::FrameData;
use crate::uniforms::TerrainUniforms;

/// Errors from building the scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("mesh generation failed: {0}")]
    Mesh(#[from] MeshError),
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event had no effect.
    Ignored,
    /// Camera state changed.
    Handled,
    /// Pointer lock changed; the host should grab or release the cursor.
    PointerLockChanged(bool),
    /// Overlay visibility changed.
    OverlayToggled(bool),
    /// The host should close the window.
    QuitRequested,
}

/// Per-application state threaded through the host callbacks.
///
/// The host owns exactly one `Scene` and calls [`init`](Scene::init) once,
/// [`on_event`](Scene::on_event) for each input event, [`frame`](Scene::frame)
/// once per redraw, and [`cleanup`](Scene::cleanup) on shutdown.
pub struct Scene {
    pub camera: FlyCamera,
    pub composer: FrameComposer,
    pub shading: ShadingParams,
    pub draw_mode: DrawMode,
    pub show_overlay: bool,
    mesh_origin: Vec3,
    vertex_count: u32,
    index_count: u32,
    /// Duration of the last completed frame; scales movement events.
    frame_dt: f32,
    frame_count: u64,
    quit_requested: bool,
}

impl Scene {
    /// Frame duration assumed for events that arrive before the first frame.
    pub const INITIAL_FRAME_DT: f32 = 1.0 / 60.0;

    /// Build the scene and generate its mesh.
    ///
    /// The mesh is handed back to the caller for upload; the scene only keeps
    /// its origin and counts.
    pub fn init(config: &SceneConfig) -> Result<(Self, GridMesh), SceneError> {
        let mesh = GridMesh::generate(
            config.mesh.origin,
            config.mesh.divisions,
            config.mesh.width,
        )?;

        let camera = FlyCamera::new(config.camera.position)
            .with_speed(config.camera.speed)
            .with_smoothness(config.camera.smoothness)
            .with_sensitivity(config.camera.sensitivity);

        tracing::info!(
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            divisions = mesh.divisions(),
            "scene initialized"
        );

        let scene = Self {
            camera,
            composer: FrameComposer::from_config(&config.projection),
            shading: config.shading,
            draw_mode: config.draw_mode,
            show_overlay: true,
            mesh_origin: mesh.origin(),
            vertex_count: mesh.vertex_count(),
            index_count: mesh.index_count(),
            frame_dt: Self::INITIAL_FRAME_DT,
            frame_count: 0,
            quit_requested: false,
        };
        Ok((scene, mesh))
    }

    /// Dispatch one input event to the camera channels.
    pub fn on_event(&mut self, event: &InputEvent) -> EventOutcome {
        let Some(action) = map_event(event) else {
            return EventOutcome::Ignored;
        };
        match action {
            Action::Look { dx, dy } => {
                if self.camera.look(dx, dy) {
                    EventOutcome::Handled
                } else {
                    EventOutcome::Ignored
                }
            }
            Action::Move(direction) => {
                self.camera.move_in(direction, self.frame_dt);
                EventOutcome::Handled
            }
            Action::TogglePointerLock => {
                EventOutcome::PointerLockChanged(self.camera.toggle_pointer_lock())
            }
            Action::ToggleOverlay => {
                self.show_overlay = !self.show_overlay;
                EventOutcome::OverlayToggled(self.show_overlay)
            }
            Action::Quit => {
                tracing::info!("quit requested");
                self.quit_requested = true;
                EventOutcome::QuitRequested
            }
        }
    }

    /// Run the smoothing step and compose this frame's draw.
    pub fn frame(&mut self, dt: f32, viewport: Viewport) -> FrameData {
        self.frame_dt = dt;
        self.frame_count += 1;
        self.camera.smooth(dt);

        let matrices = self
            .composer
            .compose(&self.camera, self.mesh_origin, viewport, dt);

        tracing::trace!(frame = self.frame_count, dt, "frame composed");

        FrameData {
            matrices,
            viewport,
            uniforms: TerrainUniforms::new(matrices.mvp, &self.shading),
            shading: self.shading,
            draw_mode: self.draw_mode,
            index_count: self.index_count,
            instance_count: 1,
            camera_position: self.camera.position(),
            camera_front: self.camera.front(),
            spin_degrees: self.composer.spin_degrees(),
        }
    }

    /// Tear the scene down. GPU resources are released by their owner.
    pub fn cleanup(self) {
        tracing::info!(frames = self.frame_count, "scene shut down");
    }

    pub fn mesh_origin(&self) -> Vec3 {
        self.mesh_origin
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn frame_dt(&self) -> f32 {
        self.frame_dt
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirtjam_input::Key;

    fn small_config() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.mesh.divisions = 4;
        config.mesh.width = 2.0;
        config.camera.position = Vec3::new(0.0, 1.0, 5.0);
        config.camera.speed = 3.0;
        config
    }

    fn viewport() -> Viewport {
        Viewport::new(1280, 720, 1.0)
    }

    #[test]
    fn init_generates_mesh_and_camera() {
        let (scene, mesh) = Scene::init(&small_config()).unwrap();
        assert_eq!(scene.vertex_count(), 25);
        assert_eq!(scene.index_count(), 96);
        assert_eq!(mesh.index_count(), scene.index_count());
        assert_eq!(scene.camera.position(), Vec3::new(0.0, 1.0, 5.0));
        assert_eq!(scene.camera.speed, 3.0);
        assert_eq!(scene.frame_dt(), Scene::INITIAL_FRAME_DT);
        mesh.release();
    }

    #[test]
    fn init_rejects_zero_divisions() {
        let mut config = small_config();
        config.mesh.divisions = 0;
        let err = Scene::init(&config).err().unwrap();
        assert!(matches!(err, SceneError::Mesh(MeshError::ZeroDivisions)));
    }

    #[test]
    fn movement_uses_last_frame_duration() {
        let (mut scene, _mesh) = Scene::init(&small_config()).unwrap();
        scene.frame(0.1, viewport());
        let before = scene.camera.target_position();

        let outcome = scene.on_event(&InputEvent::KeyDown(Key::W));
        assert_eq!(outcome, EventOutcome::Handled);
        let step = scene.camera.target_position() - before;
        assert!((step.length() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn events_apply_before_frame_smoothing() {
        let (mut scene, _mesh) = Scene::init(&small_config()).unwrap();
        let start = scene.camera.position();
        scene.on_event(&InputEvent::KeyDown(Key::W));
        let data = scene.frame(1.0 / 60.0, viewport());
        assert!(data.camera_position.z < start.z);
        assert_ne!(data.camera_position, scene.camera.target_position());
    }

    #[test]
    fn look_requires_pointer_lock() {
        let (mut scene, _mesh) = Scene::init(&small_config()).unwrap();
        let look = InputEvent::PointerMove { dx: 40.0, dy: 0.0 };
        assert_eq!(scene.on_event(&look), EventOutcome::Ignored);

        assert_eq!(
            scene.on_event(&InputEvent::KeyUp(Key::Space)),
            EventOutcome::PointerLockChanged(true)
        );
        assert_eq!(scene.on_event(&look), EventOutcome::Handled);
        assert!((scene.camera.yaw() - (-88.0)).abs() < 1e-4);

        assert_eq!(
            scene.on_event(&InputEvent::KeyUp(Key::Space)),
            EventOutcome::PointerLockChanged(false)
        );
    }

    #[test]
    fn escape_requests_quit() {
        let (mut scene, _mesh) = Scene::init(&small_config()).unwrap();
        assert!(!scene.quit_requested());
        assert_eq!(
            scene.on_event(&InputEvent::KeyDown(Key::Escape)),
            EventOutcome::QuitRequested
        );
        assert!(scene.quit_requested());
    }

    #[test]
    fn overlay_toggle() {
        let (mut scene, _mesh) = Scene::init(&small_config()).unwrap();
        assert!(scene.show_overlay);
        assert_eq!(
            scene.on_event(&InputEvent::KeyDown(Key::F1)),
            EventOutcome::OverlayToggled(false)
        );
        assert!(!scene.show_overlay);
    }

    #[test]
    fn frame_places_mesh_at_configured_origin() {
        let mut config = small_config();
        config.mesh.origin = Vec3::new(2.0, -1.0, 3.0);
        let (mut scene, _mesh) = Scene::init(&config).unwrap();
        assert_eq!(scene.mesh_origin(), config.mesh.origin);

        let viewport = Viewport::new(800, 600, 1.5);
        let data = scene.frame(1.0 / 60.0, viewport);
        assert_eq!(data.viewport, viewport);
        assert_eq!(data.matrices.model.w_axis.truncate(), config.mesh.origin);
    }

    #[test]
    fn frame_submits_full_index_range_once() {
        let (mut scene, _mesh) = Scene::init(&small_config()).unwrap();
        scene.draw_mode = DrawMode::Wireframe;
        let data = scene.frame(1.0 / 60.0, viewport());
        assert_eq!(data.index_count, 96);
        assert_eq!(data.instance_count, 1);
        assert_eq!(data.draw_mode, DrawMode::Wireframe);
        assert_eq!(data.uniforms.mvp, data.matrices.mvp.to_cols_array_2d());
        assert_eq!(scene.frame_count(), 1);
    }

    #[test]
    fn idle_frames_keep_camera_still() {
        let (mut scene, _mesh) = Scene::init(&small_config()).unwrap();
        let start = scene.camera.position();
        for _ in 0..120 {
            scene.frame(1.0 / 60.0, viewport());
        }
        assert_eq!(scene.camera.position(), start);
        assert!((scene.composer.spin_degrees() - 60.0).abs() < 1e-2);
        scene.cleanup();
    }
}
