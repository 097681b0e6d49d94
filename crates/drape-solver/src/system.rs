//! The spring system: node ownership, topology construction, the
//! per-frame step and normal reconstruction.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use drape_math::rsqrt::{fast_normalize, fast_rsqrt};
use drape_math::Vec3;
use drape_mesh::MeshBuffers;
use drape_types::constants::{COMPONENTS, DIRECTION_DECAY, STRAIN_FACTOR};
use drape_types::{DrapeError, DrapeResult, FieldId, NodeId};

use crate::config::SpringConfig;
use crate::evaluator::{NoOpEvaluator, NodeEvaluator};
use crate::node::Node;
use crate::topology::{window_targets, FieldLayout, BEND_REACH, STRUCTURAL_REACH};

/// Summary of one [`SpringSystem::update`] call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Unlocked nodes that went through the force and integration passes.
    pub nodes_updated: usize,
    /// Springs evaluated during the force pass.
    pub springs_evaluated: usize,
    /// Springs shorter than `min_spring_length` whose length was clamped.
    pub clamped_springs: usize,
    /// Largest `|strain|` seen this step.
    pub max_strain: f32,
    /// Wall-clock time for the step (seconds).
    pub wall_time: f64,
}

/// A collection of spring-connected nodes laid over a caller-owned
/// [`MeshBuffers`] arena.
///
/// The system never stores the arena. Every call that touches geometry takes
/// it as an argument and first checks it is large enough for every node, so
/// the per-node loops never index out of range.
#[derive(Debug, Clone, Default)]
pub struct SpringSystem {
    config: SpringConfig,
    nodes: Vec<Node>,
    fields: Vec<FieldLayout>,
    /// Minimum arena length (in floats) that covers every node.
    required_floats: usize,
}

impl SpringSystem {
    /// Creates an empty system with default gravity (-9.8 on Y) and a
    /// spring constant of 200.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty system with the given configuration.
    ///
    /// # Errors
    /// [`DrapeError::InvalidConfig`] if `config` fails
    /// [`SpringConfig::validate`].
    pub fn with_config(config: SpringConfig) -> DrapeResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Default::default()
        })
    }

    // ─── Topology ────────────────────────────────────────────

    /// Registers a `width × height` grid whose first point is arena vertex 0.
    ///
    /// See [`add_rect_field_at`](Self::add_rect_field_at).
    pub fn add_rect_field(
        &mut self,
        width: usize,
        height: usize,
        buffers: &MeshBuffers,
    ) -> DrapeResult<FieldId> {
        self.add_rect_field_at(width, height, 0, buffers)
    }

    /// Registers a `width × height` grid of nodes over arena vertices
    /// `first_vertex .. first_vertex + width * height`, row-major.
    ///
    /// Every node is connected outward to its in-bounds distance-1
    /// neighbors (structural) and then its distance-2 neighbors (bend).
    /// Natural lengths come from the arena's current positions.
    ///
    /// # Errors
    /// - [`DrapeError::InvalidGridDimensions`] if either dimension is zero or
    ///   the field does not fit the address space.
    /// - [`DrapeError::BufferSizeMismatch`] if either arena buffer is shorter
    ///   than `(first_vertex + width * height) * 3` floats.
    pub fn add_rect_field_at(
        &mut self,
        width: usize,
        height: usize,
        first_vertex: usize,
        buffers: &MeshBuffers,
    ) -> DrapeResult<FieldId> {
        let invalid = || DrapeError::InvalidGridDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let count = width.checked_mul(height).ok_or_else(invalid)?;
        let required = first_vertex
            .checked_add(count)
            .and_then(|end| end.checked_mul(COMPONENTS))
            .ok_or_else(invalid)?;
        let first_node = self.nodes.len();
        let node_end = first_node.checked_add(count).ok_or_else(invalid)?;
        if u32::try_from(node_end).is_err() || u32::try_from(self.fields.len()).is_err() {
            return Err(invalid());
        }
        buffers.ensure_len(required)?;

        self.nodes.reserve_exact(count);
        for local in 0..count {
            let id = NodeId((first_node + local) as u32);
            self.nodes.push(Node::new(id, (first_vertex + local) * COMPONENTS));
        }

        let mut springs = 0usize;
        for j in 0..height {
            for i in 0..width {
                let index = first_node + j * width + i;

                let mut structural = 0;
                for target in window_targets(i, j, width, height, STRUCTURAL_REACH) {
                    self.connect(index, first_node + target, buffers)?;
                    structural += 1;
                }
                self.nodes[index].set_structural_count(structural);

                for target in window_targets(i, j, width, height, BEND_REACH) {
                    self.connect(index, first_node + target, buffers)?;
                }
                springs += self.nodes[index].connection_count();
            }
        }

        self.required_floats = self.required_floats.max(required);
        let field = FieldId(self.fields.len() as u32);
        self.fields.push(FieldLayout {
            width,
            height,
            first_vertex,
            first_node: NodeId(first_node as u32),
        });

        debug!(
            field = field.0,
            width,
            height,
            first_vertex,
            springs,
            "registered rectangular spring field"
        );
        Ok(field)
    }

    /// Adds a single spring from `from` to `to`, with the current separation
    /// as its natural length. Duplicates are allowed and each is evaluated.
    pub fn add_spring(&mut self, from: NodeId, to: NodeId, buffers: &MeshBuffers) -> DrapeResult<()> {
        self.check_id(from)?;
        self.check_id(to)?;
        self.connect(from.index(), to.index(), buffers)
    }

    fn connect(&mut self, from: usize, to: usize, buffers: &MeshBuffers) -> DrapeResult<()> {
        let target = self.nodes[to].id();
        let target_offset = self.nodes[to].offset();
        self.nodes[from].add_spring(target, target_offset, buffers)?;
        Ok(())
    }

    /// Re-baselines every spring from current positions and zeroes all
    /// direction vectors.
    pub fn reset_natural_lengths(&mut self, buffers: &MeshBuffers) -> DrapeResult<()> {
        buffers.ensure_len(self.required_floats)?;
        for node in &mut self.nodes {
            node.reset_natural_lengths(buffers)?;
        }
        Ok(())
    }

    // ─── Simulation ──────────────────────────────────────────

    /// Advances the simulation by `dt` seconds without a per-node hook.
    pub fn update(&mut self, dt: f32, buffers: &mut MeshBuffers) -> DrapeResult<StepReport> {
        self.update_with(dt, buffers, &mut NoOpEvaluator, &mut ())
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// 1. Force pass, positions read-only. For each unlocked node: decay the
    ///    direction by `0.5^dt`, add `k·dt·3·strain·separation` per spring
    ///    (the raw separation, not its unit vector), add `dt·gravity`, then
    ///    call `evaluator` once.
    /// 2. Integration pass: `position += dt · direction` for each unlocked
    ///    node, only after every node's forces are in.
    ///
    /// Locked nodes are untouched by both passes.
    pub fn update_with<A, E>(
        &mut self,
        dt: f32,
        buffers: &mut MeshBuffers,
        evaluator: &mut E,
        attribs: &mut A,
    ) -> DrapeResult<StepReport>
    where
        A: ?Sized,
        E: NodeEvaluator<A> + ?Sized,
    {
        let start = Instant::now();
        buffers.ensure_len(self.required_floats)?;

        let decay = DIRECTION_DECAY.powf(dt);
        let k_dt = self.config.spring_constant * dt;
        let gravity_dt = Vec3::from_array(self.config.gravity) * dt;
        let min_length = self.config.min_spring_length;

        let mut report = StepReport::default();

        for node in self.nodes.iter_mut().filter(|n| !n.is_locked()) {
            let here = buffers.position_at(node.offset());
            let mut direction = node.direction() * decay;

            for connection in node.connections() {
                let separation = buffers.position_at(connection.target_offset) - here;
                let mut length = separation.length();
                if length < min_length {
                    length = min_length;
                    report.clamped_springs += 1;
                }
                let strain = (length - connection.natural_length) / length;
                direction += separation * STRAIN_FACTOR * strain * k_dt;

                report.max_strain = report.max_strain.max(strain.abs());
                report.springs_evaluated += 1;
            }

            direction += gravity_dt;
            node.set_direction(direction);

            evaluator.process_node(node, &buffers.positions, attribs);
            report.nodes_updated += 1;
        }

        for node in self.nodes.iter().filter(|n| !n.is_locked()) {
            buffers.translate_at(node.offset(), node.direction() * dt);
        }

        if report.clamped_springs > 0 {
            warn!(
                clamped = report.clamped_springs,
                "springs shorter than the minimum length were clamped"
            );
        }

        report.wall_time = start.elapsed().as_secs_f64();
        trace!(
            dt,
            nodes = report.nodes_updated,
            springs = report.springs_evaluated,
            max_strain = report.max_strain,
            "spring step"
        );
        Ok(report)
    }

    /// Rebuilds every node's normal from its structural neighbors.
    ///
    /// For consecutive fan edges `v0`, `v1` the weighted cross product
    /// `cross(v0, v1) / (|v0| |v1|)` is accumulated and the sum normalized,
    /// both using [`fast_rsqrt`]. A fan whose sum vanishes (collinear
    /// neighbors) yields a zero normal.
    ///
    /// Nodes with fewer than two structural connections (1×1 fields,
    /// single rows or columns) cannot form a fan. Their normals are left
    /// untouched while every other node is still written.
    ///
    /// # Errors
    /// [`DrapeError::DegenerateNormalField`] naming the first such node,
    /// returned after all valid normals have been written.
    pub fn evaluate_normals(&self, buffers: &mut MeshBuffers) -> DrapeResult<()> {
        buffers.ensure_len(self.required_floats)?;

        let mut degenerate = None;
        for node in &self.nodes {
            if node.structural_count() < 2 {
                degenerate.get_or_insert(node.id());
                continue;
            }
            let normal = fan_normal(node, buffers);
            buffers.set_normal_at(node.offset(), normal);
        }

        match degenerate {
            Some(id) => Err(DrapeError::DegenerateNormalField { node: id.index() }),
            None => Ok(()),
        }
    }

    // ─── Accessors ───────────────────────────────────────────

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Replaces the configuration. An invalid one is rejected and the
    /// current configuration is kept.
    pub fn set_config(&mut self, config: SpringConfig) -> DrapeResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.config.gravity)
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity.to_array();
    }

    pub fn spring_constant(&self) -> f32 {
        self.config.spring_constant
    }

    /// Any value is accepted; negative constants destabilize the mesh.
    pub fn set_spring_constant(&mut self, spring_constant: f32) {
        self.config.spring_constant = spring_constant;
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> DrapeResult<&Node> {
        let count = self.nodes.len();
        self.nodes.get(id.index()).ok_or(DrapeError::NodeOutOfBounds {
            index: id.index(),
            count,
        })
    }

    pub fn node_mut(&mut self, id: NodeId) -> DrapeResult<&mut Node> {
        let count = self.nodes.len();
        self.nodes
            .get_mut(id.index())
            .ok_or(DrapeError::NodeOutOfBounds {
                index: id.index(),
                count,
            })
    }

    /// Minimum arena length, in floats, that covers every node.
    #[inline]
    pub fn required_floats(&self) -> usize {
        self.required_floats
    }

    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    pub fn field(&self, field: FieldId) -> DrapeResult<&FieldLayout> {
        self.fields.get(field.index()).ok_or(DrapeError::UnknownField {
            index: field.index(),
            count: self.fields.len(),
        })
    }

    /// Node at column `i`, row `j` of `field`.
    pub fn node_at(&self, field: FieldId, i: usize, j: usize) -> DrapeResult<NodeId> {
        self.field(field)?.node_at(i, j)
    }

    // ─── Pinning ─────────────────────────────────────────────

    /// Locks or unlocks a single node.
    pub fn lock(&mut self, id: NodeId, locked: bool) -> DrapeResult<()> {
        self.node_mut(id)?.set_locked(locked);
        Ok(())
    }

    /// Locks every node on the outer ring of `field`. Returns how many.
    pub fn lock_border(&mut self, field: FieldId) -> DrapeResult<usize> {
        let layout = *self.field(field)?;
        let mut locked = 0;
        for j in 0..layout.height {
            for i in 0..layout.width {
                if layout.is_border(i, j) {
                    self.nodes[layout.node_at(i, j)?.index()].set_locked(true);
                    locked += 1;
                }
            }
        }
        Ok(locked)
    }

    /// Locks every node of row `row` in `field`. Returns how many.
    pub fn lock_row(&mut self, field: FieldId, row: usize) -> DrapeResult<usize> {
        let layout = *self.field(field)?;
        for i in 0..layout.width {
            self.nodes[layout.node_at(i, row)?.index()].set_locked(true);
        }
        Ok(layout.width)
    }

    /// Unlocks every node.
    pub fn unlock_all(&mut self) {
        for node in &mut self.nodes {
            node.set_locked(false);
        }
    }

    pub fn locked_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_locked()).count()
    }

    fn check_id(&self, id: NodeId) -> DrapeResult<()> {
        self.node(id).map(|_| ())
    }
}

/// Approximate unit normal from a node's structural fan.
fn fan_normal(node: &Node, buffers: &MeshBuffers) -> Vec3 {
    let here = buffers.position_at(node.offset());
    let mut edges = node
        .structural()
        .iter()
        .map(|c| buffers.position_at(c.target_offset) - here);

    let Some(mut v1) = edges.next() else {
        return Vec3::ZERO;
    };
    let mut sum = Vec3::ZERO;
    for edge in edges {
        let v0 = v1;
        v1 = edge;
        let weight = fast_rsqrt(v0.length_squared() * v1.length_squared());
        sum += v0.cross(v1) * weight;
    }

    if !sum.is_finite() || sum.length_squared() < f32::MIN_POSITIVE {
        return Vec3::ZERO;
    }
    fast_normalize(sum)
}
