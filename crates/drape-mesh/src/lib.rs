//! # drape-mesh
//!
//! Caller-owned vertex storage for spring simulations.
//!
//! ## Key Types
//!
//! - [`MeshBuffers`]: Interleaved position and normal arenas. A spring
//!   system never owns these; it stores integer offsets and reads and
//!   writes through bounds-checked accessors.
//! - Procedural generators for planar grids and their triangle indices.

pub mod buffers;
pub mod generators;

pub use buffers::MeshBuffers;
pub use generators::{grid_indices, planar_grid, GridPlane};
