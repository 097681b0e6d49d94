//! Simulation event types.
//!
//! Events are small value types tagged with the step that produced them.

use serde::{Deserialize, Serialize};

/// A simulation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub step: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A rectangular spring field was registered.
    FieldAdded {
        field: u32,
        width: usize,
        height: usize,
        /// Springs created for the field (structural and bend).
        springs: usize,
    },

    /// Step started.
    StepBegin {
        /// Simulation time at the start of the step (seconds).
        sim_time: f64,
        /// Step size (seconds).
        dt: f32,
    },

    /// Force and integration passes finished.
    Springs {
        nodes_updated: usize,
        springs_evaluated: usize,
        /// Springs whose length fell below the minimum and was clamped.
        clamped_springs: usize,
        max_strain: f32,
    },

    /// Normals were rebuilt for `nodes` nodes.
    NormalsEvaluated { nodes: usize },

    /// Step completed.
    StepEnd {
        /// Wall-clock time for the whole step (seconds).
        wall_time: f64,
    },

    /// Custom event for extensibility.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u32, kind: EventKind) -> Self {
        Self { step, kind }
    }

    /// Short, stable name of the payload variant.
    pub fn name(&self) -> &'static str {
        match self.kind {
            EventKind::FieldAdded { .. } => "field_added",
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::Springs { .. } => "springs",
            EventKind::NormalsEvaluated { .. } => "normals_evaluated",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::Custom { .. } => "custom",
        }
    }
}
