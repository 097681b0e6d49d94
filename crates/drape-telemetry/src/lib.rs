//! # drape-telemetry
//!
//! Event bus for simulation telemetry. The runner emits structured events
//! (step timing, spring statistics, topology changes) that pluggable sinks
//! collect, log, or forward.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, SharedVecSink, TracingSink, VecSink};
