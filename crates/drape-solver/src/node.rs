//! Simulation node: one mass point of the spring mesh.
//!
//! A node does not own its coordinates. It stores the float offset of its
//! vertex inside the caller's [`MeshBuffers`] and reads/writes through it.
//! Neighbors are referenced by [`NodeId`], never by pointer.

use serde::{Deserialize, Serialize};

use drape_math::Vec3;
use drape_mesh::MeshBuffers;
use drape_types::constants::CONNECTION_GROWTH;
use drape_types::{DrapeResult, NodeId};

/// A spring from one node to another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// The node at the far end of the spring.
    pub target: NodeId,
    /// Float offset of the target's vertex in the arena.
    pub target_offset: usize,
    /// Rest length of the spring.
    pub natural_length: f32,
}

/// One mass point of the simulated mesh.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    offset: usize,
    direction: Vec3,
    /// Structural springs first, then bend springs.
    connections: Vec<Connection>,
    structural_count: usize,
    locked: bool,
}

impl Node {
    pub(crate) fn new(id: NodeId, offset: usize) -> Self {
        Self {
            id,
            offset,
            direction: Vec3::ZERO,
            connections: Vec::with_capacity(CONNECTION_GROWTH),
            structural_count: 0,
            locked: false,
        }
    }

    /// This node's identifier within its system.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Float offset of this node's vertex (always a multiple of 3).
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Accumulated, not yet integrated, velocity-like vector.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    /// Whether the node is pinned in place.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// All springs, structural first.
    #[inline]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[inline]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of connection slots currently allocated.
    #[inline]
    pub fn connection_capacity(&self) -> usize {
        self.connections.capacity()
    }

    /// Number of leading connections that go to distance-1 neighbors.
    #[inline]
    pub fn structural_count(&self) -> usize {
        self.structural_count
    }

    /// Springs to distance-1 neighbors, in counter-clockwise fan order.
    #[inline]
    pub fn structural(&self) -> &[Connection] {
        &self.connections[..self.structural_count]
    }

    /// Springs to distance-2 neighbors.
    #[inline]
    pub fn bend(&self) -> &[Connection] {
        &self.connections[self.structural_count..]
    }

    /// Rest lengths, parallel to [`connections`](Self::connections).
    pub fn natural_lengths(&self) -> impl Iterator<Item = f32> + '_ {
        self.connections.iter().map(|c| c.natural_length)
    }

    /// Current position, read from the arena.
    pub fn position(&self, buffers: &MeshBuffers) -> DrapeResult<Vec3> {
        buffers.try_position_at(self.offset)
    }

    /// Current normal, read from the arena.
    pub fn normal(&self, buffers: &MeshBuffers) -> DrapeResult<Vec3> {
        buffers.try_normal_at(self.offset)
    }

    /// Appends a spring to `target`, using the current separation as its
    /// natural length. Returns that length.
    ///
    /// Duplicate springs are not detected; each one is evaluated.
    pub(crate) fn add_spring(
        &mut self,
        target: NodeId,
        target_offset: usize,
        buffers: &MeshBuffers,
    ) -> DrapeResult<f32> {
        let here = buffers.try_position_at(self.offset)?;
        let there = buffers.try_position_at(target_offset)?;
        let natural_length = here.distance(there);

        if self.connections.len() == self.connections.capacity() {
            self.connections.reserve_exact(CONNECTION_GROWTH);
        }
        self.connections.push(Connection {
            target,
            target_offset,
            natural_length,
        });
        Ok(natural_length)
    }

    pub(crate) fn set_structural_count(&mut self, count: usize) {
        debug_assert!(count <= self.connections.len());
        self.structural_count = count;
    }

    /// Re-baselines every spring's rest length from current positions and
    /// zeroes the direction vector.
    pub fn reset_natural_lengths(&mut self, buffers: &MeshBuffers) -> DrapeResult<()> {
        let here = buffers.try_position_at(self.offset)?;
        for connection in &mut self.connections {
            let there = buffers.try_position_at(connection.target_offset)?;
            connection.natural_length = here.distance(there);
        }
        self.direction = Vec3::ZERO;
        Ok(())
    }
}
