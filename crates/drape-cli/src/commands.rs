//! CLI command implementations.

use drape_bench::metrics::BenchmarkMetrics;
use drape_bench::recorder::{AnimationData, FrameRecorder};
use drape_bench::runner::BenchmarkRunner;
use drape_bench::scenarios::{Scenario, ScenarioConfig, ScenarioKind};
use drape_debug::snapshot::SystemSnapshot;
use drape_telemetry::{EventBus, SharedVecSink, TracingSink};

/// Run a scenario from a config file.
pub fn simulate(
    config_path: &str,
    output_path: Option<&str>,
    snapshot_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("drape Simulation");
    println!("────────────────");
    println!("Config: {config_path}");
    println!();

    let config = ScenarioConfig::load(config_path)?;
    let mut scenario = Scenario::from_config(config)?;

    println!(
        "Running: {} ({}x{} grid, {} springs, {} locked, {} steps)",
        scenario.name(),
        scenario.config.width,
        scenario.config.height,
        scenario.spring_count(),
        scenario.system.locked_count(),
        scenario.config.steps,
    );

    let mut bus = EventBus::new();
    let events = SharedVecSink::new();
    bus.add_sink(Box::new(events.clone()));
    bus.add_sink(Box::new(TracingSink::default()));

    let mut recorder = output_path.map(|_| FrameRecorder::for_scenario(&scenario));
    let metrics = BenchmarkRunner::run_with(&mut scenario, &mut bus, recorder.as_mut())?;

    println!("  Wall time:     {:.3}s", metrics.total_wall_time);
    println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
    println!("  Max displace:  {:.4}", metrics.max_displacement);
    println!("  Max strain:    {:.4}", metrics.max_strain);
    println!("  Events:        {}", events.len());
    if metrics.clamped_springs > 0 {
        println!("  Clamped:       {} spring evaluations", metrics.clamped_springs);
    }
    if !metrics.finite {
        println!("  ⚠ state became non-finite; try a smaller dt or spring_constant");
    }

    if let (Some(path), Some(recorder)) = (output_path, recorder.as_ref()) {
        recorder.write(path)?;
        println!("Frames written to: {path} ({} frames)", recorder.frame_count());
    }

    if let Some(path) = snapshot_path {
        let steps = scenario.config.steps;
        let sim_time = steps as f64 * scenario.config.dt as f64;
        let snapshot = SystemSnapshot::capture(steps, sim_time, &scenario.system, &scenario.buffers)?;
        snapshot.save(path)?;
        println!("Snapshot written to: {path}");
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("drape Benchmark Suite");
    println!("═════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                eprintln!("Unknown scenario: {scenario_name}");
                eprintln!("Available: {}, all", available.join(", "));
                return Err("Unknown scenario".into());
            }
        }
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let mut scenario = Scenario::from_kind(kind)?;

        println!(
            "Running: {} ({} verts, {} springs, {} steps)",
            kind.name(),
            scenario.vertex_count(),
            scenario.spring_count(),
            scenario.config.steps,
        );

        let metrics = BenchmarkRunner::run(&mut scenario)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final speed:   {:.4}", metrics.final_max_speed);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("drape Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let snapshot = SystemSnapshot::load(path)?;
    let stats = snapshot.stats();

    println!("Step:         {}", snapshot.step);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Vertices:     {}", stats.vertex_count);
    println!("Nodes:        {} ({} locked)", stats.node_count, stats.locked_count);
    println!(
        "Bounds:       [{:.4}, {:.4}, {:.4}] .. [{:.4}, {:.4}, {:.4}]",
        stats.bounds_min[0],
        stats.bounds_min[1],
        stats.bounds_min[2],
        stats.bounds_max[0],
        stats.bounds_max[1],
        stats.bounds_max[2],
    );
    println!("Max speed:    {:.4}", stats.max_speed);
    println!("Mean speed:   {:.4}", stats.mean_speed);
    println!("Finite:       {}", if stats.finite { "yes" } else { "no" });

    Ok(())
}

/// Validate a scenario config or a recorded frame file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("drape Validator");
    println!("───────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let config = ScenarioConfig::load(path)?;
        if let Err(e) = config.validate() {
            println!("❌ Config validation failed: {e}");
            return Err(e.into());
        }
        println!(
            "✅ Config is valid ({}x{} grid, {} steps).",
            config.width, config.height, config.steps
        );
    } else if path.ends_with(".json") {
        println!("Validating frames: {path}");
        let content = std::fs::read_to_string(path)?;
        let data: AnimationData = serde_json::from_str(&content)?;
        if let Err(e) = check_frames(&data) {
            println!("❌ Frame validation failed: {e}");
            return Err(e.into());
        }
        println!(
            "✅ Frames are valid ({} verts, {} tris, {} frames).",
            data.vertex_count,
            data.triangle_count,
            data.frames.len()
        );
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (frames).");
        return Err(format!("unsupported file: {path}").into());
    }

    Ok(())
}

fn check_frames(data: &AnimationData) -> Result<(), String> {
    if data.indices.len() != data.triangle_count * 3 {
        return Err(format!(
            "{} indices for {} triangles",
            data.indices.len(),
            data.triangle_count
        ));
    }
    if let Some(&bad) = data.indices.iter().find(|&&i| i as usize >= data.vertex_count) {
        return Err(format!("index {bad} out of range for {} vertices", data.vertex_count));
    }
    for frame in &data.frames {
        if frame.positions.len() != data.vertex_count * 3 {
            return Err(format!(
                "frame {} holds {} floats, expected {}",
                frame.step,
                frame.positions.len(),
                data.vertex_count * 3
            ));
        }
    }
    Ok(())
}
