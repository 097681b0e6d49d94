//! # drape-types
//!
//! Shared types, identifiers, error types, and simulation defaults
//! for the drape mass-spring simulator.
//!
//! This crate has no domain logic. It defines the vocabulary
//! that all other drape crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{DrapeError, DrapeResult};
pub use ids::{FieldId, NodeId};
