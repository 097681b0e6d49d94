//! # drape-solver
//!
//! Mass-spring simulation over caller-owned vertex arenas.
//!
//! ## Key Types
//!
//! - [`SpringSystem`]: Owns the nodes, builds grid topology, steps the
//!   simulation and reconstructs normals.
//! - [`Node`]: One mass point: arena offset, direction vector, springs.
//! - [`SpringConfig`]: Per-instance gravity and stiffness.
//! - [`NodeEvaluator`]: Optional per-node hook run during the force pass.
//!
//! ## Frame loop
//!
//! ```
//! use drape_math::Vec3;
//! use drape_mesh::generators::{planar_grid, GridPlane};
//! use drape_solver::SpringSystem;
//!
//! let mut buffers = planar_grid(4, 4, 1.0, Vec3::ZERO, GridPlane::Xz);
//! let mut system = SpringSystem::new();
//! let field = system.add_rect_field(4, 4, &buffers).unwrap();
//! system.lock_border(field).unwrap();
//!
//! for _ in 0..10 {
//!     system.update(1.0 / 60.0, &mut buffers).unwrap();
//!     system.evaluate_normals(&mut buffers).unwrap();
//! }
//! assert!(buffers.position(5).y < 0.0);
//! ```

pub mod config;
pub mod evaluator;
pub mod node;
pub mod system;
pub mod topology;

pub use config::SpringConfig;
pub use evaluator::{NodeEvaluator, NoOpEvaluator};
pub use node::{Connection, Node};
pub use system::{SpringSystem, StepReport};
pub use topology::FieldLayout;
