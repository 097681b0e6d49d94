//! JSON frame recorder for visual inspection of a run.
//!
//! Captures interleaved positions at chosen steps and writes the whole
//! animation, with the grid's triangle indices, as one JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use drape_mesh::MeshBuffers;
use drape_types::{DrapeError, DrapeResult};

use crate::scenarios::Scenario;

/// One captured frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameData {
    pub step: u32,
    /// Interleaved `[x0, y0, z0, x1, ...]`.
    pub positions: Vec<f32>,
}

/// Complete animation document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationData {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub indices: Vec<u32>,
    pub frames: Vec<FrameData>,
}

/// Accumulates frames in memory until written.
#[derive(Debug, Clone)]
pub struct FrameRecorder {
    data: AnimationData,
}

impl FrameRecorder {
    /// Creates a recorder for `vertex_count` vertices rendered with
    /// `indices` (three per triangle).
    pub fn new(vertex_count: usize, indices: Vec<u32>) -> Self {
        Self {
            data: AnimationData {
                vertex_count,
                triangle_count: indices.len() / 3,
                indices,
                frames: Vec::new(),
            },
        }
    }

    pub fn for_scenario(scenario: &Scenario) -> Self {
        Self::new(scenario.vertex_count(), scenario.triangle_indices())
    }

    /// Captures the first `vertex_count` positions of `buffers`.
    pub fn record(&mut self, step: u32, buffers: &MeshBuffers) -> DrapeResult<()> {
        let floats = self.data.vertex_count * 3;
        let positions = buffers
            .positions
            .get(..floats)
            .ok_or(DrapeError::BufferSizeMismatch {
                buffer: "position",
                required: floats,
                actual: buffers.positions.len(),
            })?;
        self.data.frames.push(FrameData {
            step,
            positions: positions.to_vec(),
        });
        Ok(())
    }

    pub fn frame_count(&self) -> usize {
        self.data.frames.len()
    }

    pub fn data(&self) -> &AnimationData {
        &self.data
    }

    pub fn to_json(&self) -> DrapeResult<String> {
        serde_json::to_string(&self.data)
            .map_err(|e| DrapeError::Serialization(format!("JSON serialization failed: {e}")))
    }

    pub fn write(&self, path: impl AsRef<Path>) -> DrapeResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
