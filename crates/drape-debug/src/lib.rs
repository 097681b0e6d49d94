//! # drape-debug
//!
//! State snapshots for debugging spring simulations. A snapshot captures
//! the arena and every node's dynamic state so a run can be inspected,
//! diffed, or resumed from that point.

pub mod snapshot;

pub use snapshot::{SnapshotStats, SystemSnapshot};
