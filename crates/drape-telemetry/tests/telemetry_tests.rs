//! Integration tests for drape-telemetry.

use drape_telemetry::bus::EventBus;
use drape_telemetry::events::{EventKind, SimulationEvent};
use drape_telemetry::sinks::{EventSink, SharedVecSink, TracingSink, VecSink};

fn springs(step: u32, clamped: usize) -> SimulationEvent {
    SimulationEvent::new(
        step,
        EventKind::Springs {
            nodes_updated: 4,
            springs_evaluated: 44,
            clamped_springs: clamped,
            max_strain: 0.01,
        },
    )
}

#[test]
fn emit_and_flush() {
    let mut bus = EventBus::new();
    let sink = SharedVecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    bus.emit(SimulationEvent::new(0, EventKind::StepBegin { sim_time: 0.0, dt: 0.016 }));
    bus.emit(SimulationEvent::new(0, EventKind::StepEnd { wall_time: 0.001 }));
    assert!(sink.is_empty(), "nothing is delivered before flush");

    assert_eq!(bus.flush(), 2);
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name(), "step_begin");
    assert_eq!(events[1].name(), "step_end");
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let sink = SharedVecSink::new();
    bus.add_sink(Box::new(sink.clone()));
    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    bus.emit(springs(0, 0));
    assert_eq!(bus.flush(), 0);
    assert!(sink.is_empty());
}

#[test]
fn every_sink_sees_every_event() {
    let mut bus = EventBus::new();
    let a = SharedVecSink::new();
    let b = SharedVecSink::new();
    bus.add_sink(Box::new(a.clone()));
    bus.add_sink(Box::new(b.clone()));
    bus.add_sink(Box::new(TracingSink::default()));
    assert_eq!(bus.sink_count(), 3);
    assert_eq!(bus.sink_names(), vec!["shared_vec_sink", "shared_vec_sink", "tracing_sink"]);

    for step in 0..5 {
        bus.emit(springs(step, (step % 2) as usize));
    }
    bus.finalize();

    assert_eq!(a.len(), 5);
    assert_eq!(a.events(), b.events());
}

#[test]
fn sender_delivers_from_another_thread() {
    let mut bus = EventBus::new();
    let sink = SharedVecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    let sender = bus.sender();
    std::thread::spawn(move || {
        sender
            .send(SimulationEvent::new(3, EventKind::NormalsEvaluated { nodes: 16 }))
            .unwrap();
    })
    .join()
    .unwrap();

    bus.flush();
    assert_eq!(sink.events()[0].step, 3);
}

#[test]
fn vec_sink_collects_directly() {
    let mut sink = VecSink::new();
    sink.handle(&springs(1, 0));
    sink.handle(&springs(2, 3));
    assert_eq!(sink.events.len(), 2);
    assert_eq!(sink.name(), "vec_sink");
}

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        5,
        EventKind::FieldAdded {
            field: 0,
            width: 4,
            height: 4,
            springs: 132,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
    assert!(json.contains("FieldAdded"));
}

#[test]
fn event_names() {
    let custom = SimulationEvent::new(
        0,
        EventKind::Custom {
            label: "sag".into(),
            payload: "{\"min_y\":-0.2}".into(),
        },
    );
    assert_eq!(custom.name(), "custom");
    assert_eq!(springs(0, 0).name(), "springs");
}
