//! Integration tests for drape-bench.

use drape_bench::metrics::BenchmarkMetrics;
use drape_bench::recorder::{AnimationData, FrameRecorder};
use drape_bench::runner::BenchmarkRunner;
use drape_bench::scenarios::{Pinning, Scenario, ScenarioConfig, ScenarioKind};
use drape_mesh::generators::GridPlane;
use drape_telemetry::{EventBus, EventKind, SharedVecSink};
use drape_types::DrapeError;

fn small_framed(steps: u32) -> ScenarioConfig {
    ScenarioConfig {
        name: "small_framed".into(),
        width: 6,
        height: 6,
        spacing: 0.2,
        plane: GridPlane::Xz,
        origin: [0.0, 1.0, 0.0],
        pinning: Pinning::Border,
        steps,
        ..Default::default()
    }
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn kinds_by_name() {
    assert_eq!(ScenarioKind::all().len(), 3);
    for &kind in ScenarioKind::all() {
        assert_eq!(ScenarioKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(ScenarioKind::from_name("sphere_drape"), None);
}

#[test]
fn presets_build() {
    let hanging = Scenario::from_kind(ScenarioKind::HangingSheet).unwrap();
    assert_eq!(hanging.vertex_count(), 256);
    assert_eq!(hanging.system.locked_count(), 16);
    assert_eq!(hanging.name(), "hanging_sheet");

    let framed = Scenario::from_kind(ScenarioKind::FramedSheet).unwrap();
    assert_eq!(framed.system.locked_count(), 60);

    let corners = Scenario::from_kind(ScenarioKind::CornerPinned).unwrap();
    assert_eq!(corners.vertex_count(), 200);
    assert_eq!(corners.system.locked_count(), 2);
    assert!(corners.system.nodes()[180].is_locked());
    assert!(corners.system.nodes()[199].is_locked());
}

#[test]
fn triangle_indices_cover_grid() {
    let scenario = Scenario::from_config(small_framed(1)).unwrap();
    let indices = scenario.triangle_indices();
    assert_eq!(indices.len(), 5 * 5 * 6);
    assert!(indices.iter().all(|&i| (i as usize) < scenario.vertex_count()));
}

#[test]
fn validation_rejects_bad_configs() {
    let cases = [
        ScenarioConfig { width: 1, ..Default::default() },
        ScenarioConfig { height: 1, ..Default::default() },
        ScenarioConfig { spacing: 0.0, ..Default::default() },
        ScenarioConfig { dt: -0.1, ..Default::default() },
        ScenarioConfig { steps: 0, ..Default::default() },
        ScenarioConfig { record_every: 0, ..Default::default() },
        ScenarioConfig { origin: [f32::INFINITY, 0.0, 0.0], ..Default::default() },
    ];
    for config in cases {
        assert!(
            matches!(config.validate(), Err(DrapeError::InvalidConfig(_))),
            "{config:?} should be rejected"
        );
        assert!(Scenario::from_config(config).is_err());
    }
    assert!(ScenarioConfig::default().validate().is_ok());
}

#[test]
fn config_from_partial_toml() {
    let source = r#"
        name = "tablecloth"
        width = 5
        height = 4
        plane = "xz"
        pinning = "border"

        [solver]
        spring_constant = 100.0
    "#;
    let config = ScenarioConfig::from_toml_str(source).unwrap();
    assert_eq!(config.name, "tablecloth");
    assert_eq!((config.width, config.height), (5, 4));
    assert_eq!(config.plane, GridPlane::Xz);
    assert_eq!(config.pinning, Pinning::Border);
    assert_eq!(config.solver.spring_constant, 100.0);
    assert_eq!(config.solver.gravity, [0.0, -9.8, 0.0]);
    assert_eq!(config.steps, 120);

    let scenario = Scenario::from_config(config).unwrap();
    assert_eq!(scenario.system.locked_count(), 14);
}

#[test]
fn shipped_configs_are_valid() {
    for source in [
        include_str!("../../../configs/framed_sheet.toml"),
        include_str!("../../../configs/hanging_sheet.toml"),
    ] {
        let config = ScenarioConfig::from_toml_str(source).unwrap();
        config.validate().unwrap();
    }
}

#[test]
fn config_toml_roundtrip() {
    let config = ScenarioConfig::preset(ScenarioKind::CornerPinned);
    let text = config.to_toml_string().unwrap();
    assert_eq!(ScenarioConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn config_parse_errors() {
    assert!(matches!(
        ScenarioConfig::from_toml_str("width = \"wide\""),
        Err(DrapeError::InvalidConfig(_))
    ));
    assert!(matches!(
        ScenarioConfig::from_toml_str("pinning = \"everywhere\""),
        Err(DrapeError::InvalidConfig(_))
    ));
    assert!(matches!(
        ScenarioConfig::load("/nonexistent/drape/scenario.toml"),
        Err(DrapeError::Io(_))
    ));
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn framed_run_sags_and_stays_finite() {
    let mut scenario = Scenario::from_config(small_framed(30)).unwrap();
    let metrics = BenchmarkRunner::run(&mut scenario).unwrap();

    assert_eq!(metrics.scenario, "small_framed");
    assert_eq!(metrics.steps, 30);
    assert_eq!(metrics.vertex_count, 36);
    assert_eq!(metrics.triangle_count, 50);
    assert_eq!(metrics.locked_count, 20);
    assert_eq!(metrics.spring_count, scenario.spring_count());
    assert_eq!(metrics.clamped_springs, 0);
    assert!(metrics.finite);
    assert!(metrics.max_displacement > 0.01);
    assert!(metrics.min_step_time <= metrics.avg_step_time);
    assert!(metrics.avg_step_time <= metrics.max_step_time);

    let lowest = scenario
        .buffers
        .positions
        .chunks_exact(3)
        .map(|p| p[1])
        .fold(f32::INFINITY, f32::min);
    assert!(lowest < 0.99, "lowest point {lowest}");
    assert!(scenario.buffers.normals.iter().any(|&n| n != 0.0));
}

#[test]
fn runner_emits_events_per_step() {
    let mut scenario = Scenario::from_config(small_framed(4)).unwrap();
    let mut bus = EventBus::new();
    let sink = SharedVecSink::new();
    bus.add_sink(Box::new(sink.clone()));

    BenchmarkRunner::run_with(&mut scenario, &mut bus, None).unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 1 + 4 * 4);
    assert_eq!(events[0].name(), "field_added");
    let names: Vec<_> = events[1..5].iter().map(|e| e.name()).collect();
    assert_eq!(names, ["step_begin", "springs", "normals_evaluated", "step_end"]);
    assert_eq!(events.last().map(|e| e.step), Some(3));

    match &events[2].kind {
        EventKind::Springs { nodes_updated, .. } => assert_eq!(*nodes_updated, 16),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn recorder_captures_every_nth_step() {
    let mut config = small_framed(20);
    config.record_every = 5;
    let mut scenario = Scenario::from_config(config).unwrap();
    let mut recorder = FrameRecorder::for_scenario(&scenario);
    let mut bus = EventBus::new();

    BenchmarkRunner::run_with(&mut scenario, &mut bus, Some(&mut recorder)).unwrap();

    assert_eq!(recorder.frame_count(), 5);
    let data: AnimationData = serde_json::from_str(&recorder.to_json().unwrap()).unwrap();
    assert_eq!(data.vertex_count, 36);
    assert_eq!(data.triangle_count, 50);
    assert_eq!(data.indices.len(), 150);
    let steps: Vec<u32> = data.frames.iter().map(|f| f.step).collect();
    assert_eq!(steps, vec![0, 5, 10, 15, 20]);
    assert!(data.frames.iter().all(|f| f.positions.len() == 108));
    assert_eq!(data.frames[4].positions, scenario.buffers.positions);
}

#[test]
fn recorder_writes_file() {
    let scenario = Scenario::from_config(small_framed(1)).unwrap();
    let mut recorder = FrameRecorder::for_scenario(&scenario);
    recorder.record(0, &scenario.buffers).unwrap();

    let path = std::env::temp_dir().join(format!("drape_frames_{}.json", std::process::id()));
    recorder.write(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(text.starts_with("{\"vertex_count\":36"));
}

#[test]
fn recorder_rejects_short_buffers() {
    let scenario = Scenario::from_config(small_framed(1)).unwrap();
    let mut recorder = FrameRecorder::new(100, Vec::new());
    assert!(matches!(
        recorder.record(0, &scenario.buffers),
        Err(DrapeError::BufferSizeMismatch { required: 300, actual: 108, .. })
    ));
}

#[test]
fn run_all_canonical_scenarios() {
    let results = BenchmarkRunner::run_all().unwrap();
    let names: Vec<_> = results.iter().map(|m| m.scenario.as_str()).collect();
    assert_eq!(names, ["hanging_sheet", "framed_sheet", "corner_pinned"]);
    for m in &results {
        assert!(m.finite, "{} produced non-finite state", m.scenario);
        assert!(m.max_displacement > 0.0);
    }
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn csv_formatting() {
    let metrics = BenchmarkMetrics {
        scenario: "test".into(),
        vertex_count: 16,
        triangle_count: 18,
        spring_count: 132,
        locked_count: 12,
        steps: 60,
        total_wall_time: 0.5,
        avg_step_time: 0.002,
        min_step_time: 0.001,
        max_step_time: 0.004,
        max_displacement: 0.25,
        final_max_speed: 0.1,
        max_strain: 0.05,
        clamped_springs: 0,
        finite: true,
    };
    let csv = BenchmarkMetrics::to_csv(&[metrics.clone(), metrics]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("scenario,vertex_count"));
    assert_eq!(lines[0].split(',').count(), lines[1].split(',').count());
    assert!(lines[1].starts_with("test,16,18,132,12,60,0.500000,2.0000,"));
    assert!(lines[1].ends_with(",0,true"));
}
