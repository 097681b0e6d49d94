//! Interleaved vertex arena shared between the simulator and a renderer.
//!
//! Layout is AoS with three floats per vertex:
//! - `positions: [x0, y0, z0, x1, y1, z1, ...]`
//! - `normals:   [nx0, ny0, nz0, ...]`
//!
//! This is the layout render APIs consume directly, so the buffers can be
//! uploaded each frame without conversion.

use serde::{Deserialize, Serialize};

use drape_math::interleaved::{add_vec3, read_vec3, try_read_vec3, write_vec3};
use drape_math::Vec3;
use drape_types::constants::COMPONENTS;
use drape_types::{DrapeError, DrapeResult};

/// Position and normal storage for a set of vertices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    /// Interleaved vertex positions.
    pub positions: Vec<f32>,
    /// Interleaved vertex normals.
    pub normals: Vec<f32>,
}

impl MeshBuffers {
    /// Creates zero-filled buffers for `vertex_count` vertices.
    pub fn zeroed(vertex_count: usize) -> Self {
        Self {
            positions: vec![0.0; vertex_count * COMPONENTS],
            normals: vec![0.0; vertex_count * COMPONENTS],
        }
    }

    /// Wraps existing interleaved data. Both buffers must hold whole vertices.
    pub fn from_interleaved(positions: Vec<f32>, normals: Vec<f32>) -> DrapeResult<Self> {
        if positions.len() % COMPONENTS != 0 {
            return Err(DrapeError::BufferSizeMismatch {
                buffer: "position",
                required: positions.len().next_multiple_of(COMPONENTS),
                actual: positions.len(),
            });
        }
        if normals.len() % COMPONENTS != 0 {
            return Err(DrapeError::BufferSizeMismatch {
                buffer: "normal",
                required: normals.len().next_multiple_of(COMPONENTS),
                actual: normals.len(),
            });
        }
        Ok(Self { positions, normals })
    }

    /// Returns the number of whole vertices in the position buffer.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / COMPONENTS
    }

    /// Checks that both buffers hold at least `required` floats.
    pub fn ensure_len(&self, required: usize) -> DrapeResult<()> {
        if self.positions.len() < required {
            return Err(DrapeError::BufferSizeMismatch {
                buffer: "position",
                required,
                actual: self.positions.len(),
            });
        }
        if self.normals.len() < required {
            return Err(DrapeError::BufferSizeMismatch {
                buffer: "normal",
                required,
                actual: self.normals.len(),
            });
        }
        Ok(())
    }

    /// Position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        read_vec3(&self.positions, i * COMPONENTS)
    }

    /// Normal of vertex `i`.
    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        read_vec3(&self.normals, i * COMPONENTS)
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        write_vec3(&mut self.positions, i * COMPONENTS, p);
    }

    /// Position stored at float `offset`.
    #[inline]
    pub fn position_at(&self, offset: usize) -> Vec3 {
        read_vec3(&self.positions, offset)
    }

    /// Normal stored at float `offset`.
    #[inline]
    pub fn normal_at(&self, offset: usize) -> Vec3 {
        read_vec3(&self.normals, offset)
    }

    /// Bounds-checked position lookup at float `offset`.
    pub fn try_position_at(&self, offset: usize) -> DrapeResult<Vec3> {
        try_read_vec3(&self.positions, offset).ok_or(DrapeError::BufferSizeMismatch {
            buffer: "position",
            required: offset.saturating_add(COMPONENTS),
            actual: self.positions.len(),
        })
    }

    /// Bounds-checked normal lookup at float `offset`.
    pub fn try_normal_at(&self, offset: usize) -> DrapeResult<Vec3> {
        try_read_vec3(&self.normals, offset).ok_or(DrapeError::BufferSizeMismatch {
            buffer: "normal",
            required: offset.saturating_add(COMPONENTS),
            actual: self.normals.len(),
        })
    }

    /// Overwrites the position at float `offset`.
    #[inline]
    pub fn set_position_at(&mut self, offset: usize, p: Vec3) {
        write_vec3(&mut self.positions, offset, p);
    }

    /// Overwrites the normal at float `offset`.
    #[inline]
    pub fn set_normal_at(&mut self, offset: usize, n: Vec3) {
        write_vec3(&mut self.normals, offset, n);
    }

    /// Moves the position at float `offset` by `delta`.
    #[inline]
    pub fn translate_at(&mut self, offset: usize, delta: Vec3) {
        add_vec3(&mut self.positions, offset, delta);
    }

    /// Sets every normal component to zero.
    pub fn clear_normals(&mut self) {
        self.normals.fill(0.0);
    }
}
