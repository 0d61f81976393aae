//! Shared types and configuration for the dirtjam terrain viewer.
//!
//! Everything here is plain data: no GPU handles, no window state. The
//! renderer, the desktop shell and the CLI all read the same [`SceneConfig`].

pub mod config;
pub mod types;

pub use config::{
    CameraConfig, ConfigError, ConfigOverrides, MeshConfig, ProjectionConfig, SceneConfig,
    WindowConfig,
};
pub use types::{DrawMode, ShadingMode, ShadingParams};

pub fn crate_info() -> &'static str {
    "dirtjam-common v0.1.0"
}
