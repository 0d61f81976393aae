//! wgpu render backend for the terrain viewer.
//!
//! Uploads the grid mesh once, keeps one pipeline per draw mode, and draws
//! the whole index buffer each frame with the terrain shader.
//!
//! # Invariants
//! - The renderer never mutates scene or camera state.
//! - Vertex layout is a single `Float32x3` position at location 0.
//! - Indices are `Uint16`, matching the mesh generator.

mod gpu;
mod shaders;

pub use gpu::{PipelineSet, WgpuRenderer};
