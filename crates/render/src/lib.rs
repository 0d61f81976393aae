//! Frame composition: camera + mesh + shading parameters → what the GPU draws.
//!
//! # Invariants
//! - Input events for a tick are applied before that tick's smoothing and projection.
//! - Exactly `index_count` indices are submitted for one instance per frame.
//! - Nothing here owns GPU resources; backends consume [`FrameData`].

mod composer;
mod renderer;
mod scene;
mod uniforms;

pub use composer::{FrameComposer, FrameMatrices, Projection, Viewport};
pub use renderer::{DebugTextRenderer, FrameData, Renderer};
pub use scene::{EventOutcome, Scene, SceneError};
pub use uniforms::TerrainUniforms;

pub fn crate_info() -> &'static str {
    "dirtjam-render v0.1.0"
}
