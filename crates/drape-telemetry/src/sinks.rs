//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends.
    fn finalize(&mut self) {}

    /// Human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events into a `Vec`.
#[derive(Debug, Default)]
pub struct VecSink {
    pub events: Vec<SimulationEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Collects events into a shared `Vec` that stays readable after the sink
/// has been boxed into a bus.
#[derive(Debug, Clone, Default)]
pub struct SharedVecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl SharedVecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out every event received so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(events) => events.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for SharedVecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }

    fn name(&self) -> &str {
        "shared_vec_sink"
    }
}

/// Logs events through `tracing` at a fixed level. Clamped springs are
/// always reported at `WARN`.
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let EventKind::Springs { clamped_springs, .. } = event.kind {
            if clamped_springs > 0 {
                tracing::warn!(step = event.step, clamped_springs, "clamped short springs");
            }
        }

        let name = event.name();
        if self.level == Level::ERROR {
            tracing::error!(step = event.step, kind = name, event = ?event.kind, "simulation_event");
        } else if self.level == Level::WARN {
            tracing::warn!(step = event.step, kind = name, event = ?event.kind, "simulation_event");
        } else if self.level == Level::INFO {
            tracing::info!(step = event.step, kind = name, event = ?event.kind, "simulation_event");
        } else if self.level == Level::DEBUG {
            tracing::debug!(step = event.step, kind = name, event = ?event.kind, "simulation_event");
        } else {
            tracing::trace!(step = event.step, kind = name, event = ?event.kind, "simulation_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
