use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{DrawMode, ShadingParams};

/// Errors from loading a scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Window and swapchain settings for the desktop shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Clear colour of the main pass (linear RGBA).
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Dirt Jam".into(),
            width: 1280,
            height: 720,
            clear_color: [0x28 as f32 / 255.0, 0x29 as f32 / 255.0, 0x23 as f32 / 255.0, 1.0],
        }
    }
}

/// Grid mesh generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub origin: Vec3,
    pub divisions: u32,
    pub width: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            divisions: 128,
            width: 10.0,
        }
    }
}

/// Fly camera start position and tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Damping rate of the position smoothing, per second.
    pub smoothness: f32,
    /// Degrees of rotation per unit of pointer motion.
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 6.0),
            speed: 5.0,
            smoothness: 8.0,
            sensitivity: 0.05,
        }
    }
}

/// Perspective projection and cosmetic model spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Degrees of model spin per 1/60 s.
    pub spin_per_tick: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.01,
            far: 100.0,
            spin_per_tick: 0.5,
        }
    }
}

/// Complete scene configuration.
///
/// Every section falls back to its defaults, so a YAML file only needs the
/// keys it wants to change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub mesh: MeshConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub shading: ShadingParams,
    pub draw_mode: DrawMode,
}

impl SceneConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Serialize this configuration to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Command-line values that take precedence over the loaded configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub divisions: Option<u32>,
    pub width: Option<f32>,
    pub speed: Option<f32>,
    pub smoothness: Option<f32>,
}

impl SceneConfig {
    /// Load `path` if given (defaults otherwise), then apply `overrides`.
    pub fn resolve(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(divisions) = overrides.divisions {
            self.mesh.divisions = divisions;
        }
        if let Some(width) = overrides.width {
            self.mesh.width = width;
        }
        if let Some(speed) = overrides.speed {
            self.camera.speed = speed;
        }
        if let Some(smoothness) = overrides.smoothness {
            self.camera.smoothness = smoothness;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShadingMode;
    use std::io::Write;

    #[test]
    fn defaults_match_desktop_window() {
        let config = SceneConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.projection.fov_y_degrees, 60.0);
        assert_eq!(config.camera.sensitivity, 0.05);
        assert_eq!(config.draw_mode, DrawMode::Solid);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = SceneConfig::from_yaml_str(
            "mesh:\n  divisions: 16\ncamera:\n  speed: 2.5\ndraw_mode: wireframe\n",
        )
        .unwrap();
        assert_eq!(config.mesh.divisions, 16);
        assert_eq!(config.mesh.width, MeshConfig::default().width);
        assert_eq!(config.camera.speed, 2.5);
        assert_eq!(config.camera.smoothness, CameraConfig::default().smoothness);
        assert_eq!(config.draw_mode, DrawMode::Wireframe);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn vectors_and_enums_parse() {
        let config = SceneConfig::from_yaml_str(
            "mesh:\n  origin: [1.0, 2.0, 3.0]\nshading:\n  mode: normals\n  octaves: 3\n",
        )
        .unwrap();
        assert_eq!(config.mesh.origin, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.shading.mode, ShadingMode::Normals);
        assert_eq!(config.shading.octaves, 3);
    }

    #[test]
    fn file_round_trip() {
        let mut config = SceneConfig::default();
        config.mesh.divisions = 64;
        config.window.title = "Test".into();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();

        let loaded = SceneConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"mesh:\n  divisions: 16\n  width: 4.0\n").unwrap();

        let overrides = ConfigOverrides {
            divisions: Some(32),
            speed: Some(1.5),
            ..ConfigOverrides::default()
        };
        let config = SceneConfig::resolve(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.mesh.divisions, 32);
        assert_eq!(config.mesh.width, 4.0);
        assert_eq!(config.camera.speed, 1.5);
    }

    #[test]
    fn resolve_without_file_uses_defaults() {
        let config = SceneConfig::resolve(None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let err = SceneConfig::from_yaml_str("mesh: [not, a, map").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
