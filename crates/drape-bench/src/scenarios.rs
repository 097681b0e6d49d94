//! Scenarios: a grid, a pinning pattern, solver settings and a step count.
//!
//! Three canonical scenarios for regression tracking:
//! 1. **Hanging sheet**: vertical sheet held along its top row
//! 2. **Framed sheet**: horizontal sheet held along its whole border, sags in the middle
//! 3. **Corner pinned**: vertical sheet held only at its two top corners
//!
//! Custom scenarios are described by a [`ScenarioConfig`], usually loaded
//! from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use drape_math::Vec3;
use drape_mesh::generators::{grid_indices, planar_grid, GridPlane};
use drape_mesh::MeshBuffers;
use drape_solver::{SpringConfig, SpringSystem};
use drape_types::constants::DEFAULT_DT;
use drape_types::{DrapeError, DrapeResult, FieldId};

/// Which canonical scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    HangingSheet,
    FramedSheet,
    CornerPinned,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingSheet,
            ScenarioKind::FramedSheet,
            ScenarioKind::CornerPinned,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingSheet => "hanging_sheet",
            ScenarioKind::FramedSheet => "framed_sheet",
            ScenarioKind::CornerPinned => "corner_pinned",
        }
    }

    /// Looks a scenario up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// Which nodes of the field are locked before the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pinning {
    /// Nothing locked; the sheet free-falls.
    None,
    /// Row `height - 1`, the highest row of an `xy` grid.
    #[default]
    TopRow,
    /// The outer ring of the grid.
    Border,
    /// Both ends of row `height - 1`.
    TopCorners,
}

/// Serializable description of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    /// Grid columns.
    pub width: usize,
    /// Grid rows.
    pub height: usize,
    /// Distance between neighboring grid points.
    pub spacing: f32,
    pub plane: GridPlane,
    /// Position of grid point (0, 0).
    pub origin: [f32; 3],
    pub pinning: Pinning,
    /// Number of steps to simulate.
    pub steps: u32,
    /// Step size (seconds).
    pub dt: f32,
    /// Record a frame every this many steps when recording.
    pub record_every: u32,
    pub solver: SpringConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::preset(ScenarioKind::HangingSheet)
    }
}

impl ScenarioConfig {
    /// Configuration of a canonical scenario.
    pub fn preset(kind: ScenarioKind) -> Self {
        let base = Self {
            name: kind.name().to_string(),
            width: 16,
            height: 16,
            spacing: 0.1,
            plane: GridPlane::Xy,
            origin: [-0.75, 0.0, 0.0],
            pinning: Pinning::TopRow,
            steps: 120, // 2 seconds at 60fps
            dt: DEFAULT_DT,
            record_every: 1,
            solver: SpringConfig::default(),
        };
        match kind {
            ScenarioKind::HangingSheet => base,
            ScenarioKind::FramedSheet => Self {
                plane: GridPlane::Xz,
                origin: [-0.75, 1.0, -0.75],
                pinning: Pinning::Border,
                ..base
            },
            ScenarioKind::CornerPinned => Self {
                width: 20,
                height: 10,
                origin: [-0.95, 0.0, 0.0],
                pinning: Pinning::TopCorners,
                steps: 180,
                ..base
            },
        }
    }

    /// Parses a TOML document. Missing keys take their default values.
    pub fn from_toml_str(source: &str) -> DrapeResult<Self> {
        toml::from_str(source)
            .map_err(|e| DrapeError::InvalidConfig(format!("failed to parse scenario config: {e}")))
    }

    /// Reads and parses a TOML file. The result is not validated.
    pub fn load(path: impl AsRef<Path>) -> DrapeResult<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn to_toml_string(&self) -> DrapeResult<String> {
        toml::to_string(self).map_err(|e| DrapeError::Serialization(e.to_string()))
    }

    /// Checks that the scenario can be built and stepped.
    ///
    /// Grids must be at least 2×2 so every node has a normal fan.
    pub fn validate(&self) -> DrapeResult<()> {
        if self.width < 2 || self.height < 2 {
            return Err(DrapeError::InvalidConfig(format!(
                "grid must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(DrapeError::InvalidConfig(format!(
                "spacing must be positive, got {}",
                self.spacing
            )));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(DrapeError::InvalidConfig(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if self.steps == 0 {
            return Err(DrapeError::InvalidConfig("steps must be at least 1".into()));
        }
        if self.record_every == 0 {
            return Err(DrapeError::InvalidConfig(
                "record_every must be at least 1".into(),
            ));
        }
        if !self.origin.iter().all(|v| v.is_finite()) {
            return Err(DrapeError::InvalidConfig(format!(
                "origin must be finite, got {:?}",
                self.origin
            )));
        }
        self.solver.validate()
    }
}

/// A built scenario: the spring system, its arena and the run settings.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub config: ScenarioConfig,
    pub system: SpringSystem,
    pub buffers: MeshBuffers,
    pub field: FieldId,
}

impl Scenario {
    /// Validates `config`, generates the grid, registers it and applies
    /// the pinning.
    pub fn from_config(config: ScenarioConfig) -> DrapeResult<Self> {
        config.validate()?;

        let buffers = planar_grid(
            config.width,
            config.height,
            config.spacing,
            Vec3::from_array(config.origin),
            config.plane,
        );
        let mut system = SpringSystem::with_config(config.solver.clone())?;
        let field = system.add_rect_field(config.width, config.height, &buffers)?;

        let top = config.height - 1;
        let locked = match config.pinning {
            Pinning::None => 0,
            Pinning::TopRow => system.lock_row(field, top)?,
            Pinning::Border => system.lock_border(field)?,
            Pinning::TopCorners => {
                let left = system.node_at(field, 0, top)?;
                let right = system.node_at(field, config.width - 1, top)?;
                system.lock(left, true)?;
                system.lock(right, true)?;
                2
            }
        };

        debug!(
            scenario = %config.name,
            nodes = system.node_count(),
            locked,
            "built scenario"
        );
        Ok(Self {
            config,
            system,
            buffers,
            field,
        })
    }

    /// Builds a canonical scenario.
    pub fn from_kind(kind: ScenarioKind) -> DrapeResult<Self> {
        Self::from_config(ScenarioConfig::preset(kind))
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    /// Render triangles for the scenario's field.
    pub fn triangle_indices(&self) -> Vec<u32> {
        match self.system.field(self.field) {
            Ok(layout) => grid_indices(layout.width, layout.height, layout.first_vertex as u32),
            Err(_) => Vec::new(),
        }
    }

    /// Total springs over all nodes.
    pub fn spring_count(&self) -> usize {
        self.system.nodes().iter().map(|n| n.connection_count()).sum()
    }
}
