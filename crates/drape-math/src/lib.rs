//! # drape-math
//!
//! Vector math primitives for the drape simulator.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, etc.)
//! - A fast approximate reciprocal square root used by normal reconstruction
//! - Flat `[x, y, z]` slice helpers for interleaved vertex arenas

pub mod interleaved;
pub mod rsqrt;

// Re-export glam types as the canonical math types for drape.
pub use glam::Vec3;

pub use rsqrt::fast_rsqrt;
