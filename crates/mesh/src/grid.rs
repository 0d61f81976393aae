use glam::Vec3;

/// Largest division count whose vertex indices still fit in a `u16`.
///
/// `(255 + 1)^2 - 1 == u16::MAX`.
pub const MAX_DIVISIONS: u32 = 255;

/// Errors from grid mesh generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("grid needs at least one division")]
    ZeroDivisions,
    #[error("{divisions} divisions exceed the 16-bit index limit of {max}")]
    TooManyDivisions { divisions: u32, max: u32 },
    #[error("grid width must be finite and positive, got {0}")]
    InvalidWidth(f32),
}

/// A flat, subdivided plane ready for upload.
///
/// Vertices live in local space on the XZ plane (Y = 0), centered on the
/// local origin. `origin` is where the plane sits in the world and is applied
/// by the model transform, not baked into the vertices.
///
/// The buffers are owned by the mesh and freed when it is dropped or
/// [`released`](GridMesh::release).
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    origin: Vec3,
    divisions: u32,
    width: f32,
    vertices: Vec<Vec3>,
    indices: Vec<u16>,
}

impl GridMesh {
    /// Generate a `divisions x divisions` cell grid spanning `width` units.
    ///
    /// Vertices are emitted row-major over a `(divisions + 1)^2` lattice; the
    /// index pass depends on that order. Each cell yields two triangles,
    /// both clockwise when seen from +Y.
    pub fn generate(origin: Vec3, divisions: u32, width: f32) -> Result<Self, MeshError> {
        if divisions == 0 {
            return Err(MeshError::ZeroDivisions);
        }
        if divisions > MAX_DIVISIONS {
            return Err(MeshError::TooManyDivisions {
                divisions,
                max: MAX_DIVISIONS,
            });
        }
        if !width.is_finite() || width <= 0.0 {
            return Err(MeshError::InvalidWidth(width));
        }

        let cell_size = width / divisions as f32;
        let center = width * 0.5;
        let side = divisions + 1;

        let mut vertices = Vec::with_capacity((side * side) as usize);
        for row in 0..side {
            for col in 0..side {
                vertices.push(Vec3::new(
                    col as f32 * cell_size - center,
                    0.0,
                    row as f32 * cell_size - center,
                ));
            }
        }

        let mut indices = Vec::with_capacity((divisions * divisions * 6) as usize);
        for row in 0..divisions {
            for col in 0..divisions {
                let base = row * side + col;
                let below = base + side;
                #[rustfmt::skip]
                let cell = [
                    // top-left triangle
                    base, below + 1, below,
                    // bottom-right triangle
                    base, base + 1, below + 1,
                ];
                // divisions <= MAX_DIVISIONS keeps every index within u16.
                indices.extend(cell.iter().map(|&i| i as u16));
            }
        }

        tracing::debug!(
            divisions,
            width,
            vertices = vertices.len(),
            indices = indices.len(),
            "generated grid mesh"
        );

        Ok(Self {
            origin,
            divisions,
            width,
            vertices,
            indices,
        })
    }

    /// World position the plane is centered on.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Edge length of one grid cell.
    pub fn cell_size(&self) -> f32 {
        self.width / self.divisions as f32
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Vertex positions flattened to `x, y, z, x, y, z, ...`.
    pub fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Iterate the index buffer one triangle at a time.
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Raw vertex bytes: one tightly packed `Float32x3` per vertex.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw `u16` index bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Release the CPU-side buffers once they have been uploaded.
    pub fn release(self) {
        tracing::debug!(
            vertices = self.vertices.len(),
            indices = self.indices.len(),
            "released grid mesh buffers"
        );
    }
}
