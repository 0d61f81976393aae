//! Grid mesh generation: a subdivided plane as vertex + index buffers.
//!
//! # Invariants
//! - `vertex_count == (divisions + 1)^2` and `index_count == 6 * divisions^2`.
//! - Every index is below `vertex_count`; every triangle has three distinct corners.
//! - Generation is pure: same inputs, same buffers.

mod grid;

pub use grid::{GridMesh, MAX_DIVISIONS, MeshError};

pub fn crate_info() -> &'static str {
    "dirtjam-mesh v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("mesh"));
    }
}
