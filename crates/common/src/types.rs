use serde::{Deserialize, Serialize};

/// How the terrain mesh is rasterized.
///
/// Each variant owns exactly one pipeline on the GPU side, so there is no
/// "mode count" sentinel and no way to index past the last pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    #[default]
    Solid,
    Wireframe,
}

impl DrawMode {
    pub fn from_wireframe(wireframe: bool) -> Self {
        if wireframe {
            Self::Wireframe
        } else {
            Self::Solid
        }
    }

    pub fn is_wireframe(self) -> bool {
        self == Self::Wireframe
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Wireframe => "wireframe",
        }
    }
}

/// Fragment colouring selected in the overlay combo box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Height gradient with a single directional light.
    #[default]
    Lit,
    /// Surface normals mapped to RGB.
    Normals,
    /// Unlit height gradient.
    Height,
}

impl ShadingMode {
    pub const ALL: [ShadingMode; 3] = [Self::Lit, Self::Normals, Self::Height];

    /// Value written into the uniform block; must match the shader's switch.
    pub fn index(self) -> u32 {
        match self {
            Self::Lit => 0,
            Self::Normals => 1,
            Self::Height => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Lit => "Lit",
            Self::Normals => "Normals",
            Self::Height => "Height",
        }
    }
}

/// Tunable parameters forwarded to the terrain shader every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingParams {
    pub low_color: [f32; 4],
    pub high_color: [f32; 4],
    /// Peak displacement in world units.
    pub amplitude: f32,
    /// Noise frequency in cycles per world unit.
    pub frequency: f32,
    pub octaves: u32,
    pub mode: ShadingMode,
}

impl ShadingParams {
    pub const MAX_OCTAVES: u32 = 8;
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            low_color: [0.32, 0.24, 0.16, 1.0],
            high_color: [0.62, 0.55, 0.42, 1.0],
            amplitude: 0.6,
            frequency: 0.35,
            octaves: 5,
            mode: ShadingMode::Lit,
        }
    }
}
