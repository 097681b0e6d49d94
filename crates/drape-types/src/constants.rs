//! Simulation defaults.

/// Magnitude of the default gravity vector (units/s²). Points along -Y.
pub const GRAVITY: f32 = 9.8;

/// Default spring stiffness multiplier.
pub const DEFAULT_SPRING_CONSTANT: f32 = 200.0;

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Per-second decay applied to every node's direction vector.
/// The direction is scaled by `DIRECTION_DECAY.powf(dt)` each step.
pub const DIRECTION_DECAY: f32 = 0.5;

/// Constant factor applied to the strain-scaled separation vector.
pub const STRAIN_FACTOR: f32 = 3.0;

/// Shortest separation used when evaluating a spring. Separations below
/// this are clamped so coincident points produce a finite force.
pub const MIN_SPRING_LENGTH: f32 = 1.0e-6;

/// Number of connection slots added whenever a node runs out of room.
pub const CONNECTION_GROWTH: usize = 4;

/// Floats stored per vertex in position and normal arenas.
pub const COMPONENTS: usize = 3;
