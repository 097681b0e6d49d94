//! Procedural grid generators for scenarios and tests.
//!
//! Grids are laid out row-major: vertex `(i, j)` (column `i`, row `j`)
//! lives at index `j * width + i`, matching the node order a spring
//! system uses when it registers a rectangular field.

use serde::{Deserialize, Serialize};

use drape_math::Vec3;

use crate::buffers::MeshBuffers;

/// Plane a generated grid is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPlane {
    /// Columns along +X, rows along +Y (a hanging sheet, facing +Z).
    #[default]
    Xy,
    /// Columns along +X, rows along +Z (a horizontal sheet).
    Xz,
}

impl GridPlane {
    /// Offset of grid point `(i, j)` from the origin for the given spacing.
    #[inline]
    pub fn point(self, i: usize, j: usize, spacing: f32) -> Vec3 {
        let u = i as f32 * spacing;
        let v = j as f32 * spacing;
        match self {
            GridPlane::Xy => Vec3::new(u, v, 0.0),
            GridPlane::Xz => Vec3::new(u, 0.0, v),
        }
    }

    /// Unit normal of a grid in this plane as seen by the spring system's
    /// counter-clockwise neighbor fan (`+X` cross `+row`).
    pub fn fan_normal(self) -> Vec3 {
        match self {
            GridPlane::Xy => Vec3::Z,
            GridPlane::Xz => Vec3::NEG_Y,
        }
    }
}

/// Generates a `width × height` grid of points with uniform spacing.
///
/// Normals are zero-filled; a spring system's normal pass populates them.
///
/// # Example
/// ```
/// use drape_mesh::generators::{planar_grid, GridPlane};
/// use drape_math::Vec3;
/// let buffers = planar_grid(3, 2, 0.5, Vec3::ZERO, GridPlane::Xy);
/// assert_eq!(buffers.vertex_count(), 6);
/// assert_eq!(buffers.position(5), Vec3::new(1.0, 0.5, 0.0));
/// ```
pub fn planar_grid(
    width: usize,
    height: usize,
    spacing: f32,
    origin: Vec3,
    plane: GridPlane,
) -> MeshBuffers {
    let mut buffers = MeshBuffers::zeroed(width * height);
    for j in 0..height {
        for i in 0..width {
            buffers.set_position(j * width + i, origin + plane.point(i, j, spacing));
        }
    }
    buffers
}

/// Triangle indices for a row-major `width × height` grid starting at
/// `first_vertex`. Two triangles per cell, wound to agree with
/// [`GridPlane::fan_normal`].
pub fn grid_indices(width: usize, height: usize, first_vertex: u32) -> Vec<u32> {
    if width < 2 || height < 2 {
        return Vec::new();
    }
    let mut indices = Vec::with_capacity((width - 1) * (height - 1) * 6);
    for j in 0..height - 1 {
        for i in 0..width - 1 {
            let a = first_vertex + (j * width + i) as u32;
            let b = a + 1;
            let c = a + width as u32;
            let d = c + 1;

            indices.extend_from_slice(&[a, b, c]);
            indices.extend_from_slice(&[b, d, c]);
        }
    }
    indices
}
