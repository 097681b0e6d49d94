//! Binary state snapshots for replay and debugging.

use std::path::Path;

use serde::{Deserialize, Serialize};

use drape_math::Vec3;
use drape_mesh::MeshBuffers;
use drape_solver::SpringSystem;
use drape_types::{DrapeError, DrapeResult, NodeId};

/// Dynamic state of a spring system and its arena at one step.
///
/// Topology is not stored; restoring requires a system built the same way
/// as the one that was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Step index when this snapshot was taken.
    pub step: u32,
    /// Simulation time in seconds.
    pub sim_time: f64,
    /// Interleaved positions `[x0, y0, z0, ...]`.
    pub positions: Vec<f32>,
    /// Interleaved normals.
    pub normals: Vec<f32>,
    /// Per-node direction vectors, interleaved, in node order.
    pub directions: Vec<f32>,
    /// Per-node lock flags, in node order.
    pub locked: Vec<bool>,
}

/// Summary statistics of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotStats {
    pub vertex_count: usize,
    pub node_count: usize,
    pub locked_count: usize,
    pub bounds_min: [f32; 3],
    pub bounds_max: [f32; 3],
    /// Largest direction magnitude over all nodes.
    pub max_speed: f32,
    pub mean_speed: f32,
    /// Whether every stored float is finite.
    pub finite: bool,
}

impl SystemSnapshot {
    /// Captures the state of `system` over `buffers`.
    pub fn capture(
        step: u32,
        sim_time: f64,
        system: &SpringSystem,
        buffers: &MeshBuffers,
    ) -> DrapeResult<Self> {
        buffers.ensure_len(system.required_floats())?;

        let mut directions = Vec::with_capacity(system.node_count() * 3);
        let mut locked = Vec::with_capacity(system.node_count());
        for node in system.nodes() {
            directions.extend_from_slice(&node.direction().to_array());
            locked.push(node.is_locked());
        }

        Ok(Self {
            step,
            sim_time,
            positions: buffers.positions.clone(),
            normals: buffers.normals.clone(),
            directions,
            locked,
        })
    }

    /// Writes the captured state back into `system` and `buffers`.
    ///
    /// # Errors
    /// [`DrapeError::InvalidConfig`] if the node count differs from the
    /// captured one, or [`DrapeError::BufferSizeMismatch`] if the stored
    /// arena is too small for the system.
    pub fn restore(&self, system: &mut SpringSystem, buffers: &mut MeshBuffers) -> DrapeResult<()> {
        if self.locked.len() != system.node_count() || self.directions.len() != self.locked.len() * 3 {
            return Err(DrapeError::InvalidConfig(format!(
                "snapshot holds {} nodes but the system has {}",
                self.locked.len(),
                system.node_count()
            )));
        }
        let restored = MeshBuffers::from_interleaved(self.positions.clone(), self.normals.clone())?;
        restored.ensure_len(system.required_floats())?;

        for (k, locked) in self.locked.iter().enumerate() {
            let node = system.node_mut(NodeId(k as u32))?;
            let d = &self.directions[k * 3..k * 3 + 3];
            node.set_direction(Vec3::new(d[0], d[1], d[2]));
            node.set_locked(*locked);
        }
        *buffers = restored;
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn node_count(&self) -> usize {
        self.locked.len()
    }

    /// Largest per-component position difference to `other`, or `None` if
    /// the arenas differ in size.
    pub fn max_position_delta(&self, other: &SystemSnapshot) -> Option<f32> {
        if self.positions.len() != other.positions.len() {
            return None;
        }
        Some(
            self.positions
                .iter()
                .zip(&other.positions)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f32::max),
        )
    }

    pub fn stats(&self) -> SnapshotStats {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in self.positions.chunks_exact(3) {
            let p = Vec3::new(p[0], p[1], p[2]);
            min = min.min(p);
            max = max.max(p);
        }
        if self.positions.len() < 3 {
            min = Vec3::ZERO;
            max = Vec3::ZERO;
        }

        let speeds: Vec<f32> = self
            .directions
            .chunks_exact(3)
            .map(|d| Vec3::new(d[0], d[1], d[2]).length())
            .collect();
        let max_speed = speeds.iter().copied().fold(0.0, f32::max);
        let mean_speed = if speeds.is_empty() {
            0.0
        } else {
            speeds.iter().sum::<f32>() / speeds.len() as f32
        };

        let finite = self
            .positions
            .iter()
            .chain(&self.normals)
            .chain(&self.directions)
            .all(|v| v.is_finite());

        SnapshotStats {
            vertex_count: self.vertex_count(),
            node_count: self.node_count(),
            locked_count: self.locked.iter().filter(|&&l| l).count(),
            bounds_min: min.to_array(),
            bounds_max: max.to_array(),
            max_speed,
            mean_speed,
            finite,
        }
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> DrapeResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| DrapeError::Serialization(e.to_string()))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> DrapeResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| DrapeError::Serialization(format!("snapshot deserialization failed: {e}")))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> DrapeResult<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> DrapeResult<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }
}
