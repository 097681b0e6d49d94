//! Scenario runner: steps the spring system and collects metrics.

use std::time::Instant;

use tracing::info;

use drape_telemetry::{EventBus, EventKind, SimulationEvent};
use drape_types::DrapeResult;

use crate::metrics::BenchmarkMetrics;
use crate::recorder::FrameRecorder;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Runs `scenario` to completion without telemetry or recording.
    pub fn run(scenario: &mut Scenario) -> DrapeResult<BenchmarkMetrics> {
        let mut bus = EventBus::new();
        bus.set_enabled(false);
        Self::run_with(scenario, &mut bus, None)
    }

    /// Runs `scenario` to completion.
    ///
    /// Each step updates the system and rebuilds normals. Events go to
    /// `bus`, flushed once per step. When a recorder is given, the initial
    /// state and every `record_every`-th step are captured.
    pub fn run_with(
        scenario: &mut Scenario,
        bus: &mut EventBus,
        mut recorder: Option<&mut FrameRecorder>,
    ) -> DrapeResult<BenchmarkMetrics> {
        let steps = scenario.config.steps;
        let dt = scenario.config.dt;
        let record_every = scenario.config.record_every.max(1);
        let initial = scenario.buffers.positions.clone();

        if let Ok(layout) = scenario.system.field(scenario.field) {
            bus.emit(SimulationEvent::new(
                0,
                EventKind::FieldAdded {
                    field: scenario.field.0,
                    width: layout.width,
                    height: layout.height,
                    springs: scenario.spring_count(),
                },
            ));
        }
        if let Some(recorder) = recorder.as_deref_mut() {
            recorder.record(0, &scenario.buffers)?;
        }

        let mut step_times = Vec::with_capacity(steps as usize);
        let mut max_strain = 0.0f32;
        let mut clamped_springs = 0;
        let mut sim_time = 0.0f64;
        let total_start = Instant::now();

        for step in 0..steps {
            let step_start = Instant::now();
            bus.emit(SimulationEvent::new(step, EventKind::StepBegin { sim_time, dt }));

            let report = scenario.system.update(dt, &mut scenario.buffers)?;
            bus.emit(SimulationEvent::new(
                step,
                EventKind::Springs {
                    nodes_updated: report.nodes_updated,
                    springs_evaluated: report.springs_evaluated,
                    clamped_springs: report.clamped_springs,
                    max_strain: report.max_strain,
                },
            ));

            scenario.system.evaluate_normals(&mut scenario.buffers)?;
            bus.emit(SimulationEvent::new(
                step,
                EventKind::NormalsEvaluated {
                    nodes: scenario.system.node_count(),
                },
            ));

            let wall_time = step_start.elapsed().as_secs_f64();
            bus.emit(SimulationEvent::new(step, EventKind::StepEnd { wall_time }));
            bus.flush();

            sim_time += dt as f64;
            max_strain = max_strain.max(report.max_strain);
            clamped_springs += report.clamped_springs;
            step_times.push(wall_time);

            if (step + 1) % record_every == 0 {
                if let Some(recorder) = recorder.as_deref_mut() {
                    recorder.record(step + 1, &scenario.buffers)?;
                }
            }
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();
        bus.finalize();

        let max_displacement = scenario
            .buffers
            .positions
            .chunks_exact(3)
            .zip(initial.chunks_exact(3))
            .map(|(now, then)| {
                let dx = now[0] - then[0];
                let dy = now[1] - then[1];
                let dz = now[2] - then[2];
                (dx * dx + dy * dy + dz * dz).sqrt()
            })
            .fold(0.0f32, f32::max);

        let final_max_speed = scenario
            .system
            .nodes()
            .iter()
            .map(|n| n.direction().length())
            .fold(0.0f32, f32::max);

        let finite = scenario
            .buffers
            .positions
            .iter()
            .chain(&scenario.buffers.normals)
            .all(|v| v.is_finite());

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        let metrics = BenchmarkMetrics {
            scenario: scenario.name().to_string(),
            vertex_count: scenario.vertex_count(),
            triangle_count: scenario.triangle_indices().len() / 3,
            spring_count: scenario.spring_count(),
            locked_count: scenario.system.locked_count(),
            steps,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            max_displacement,
            final_max_speed,
            max_strain,
            clamped_springs,
            finite,
        };
        info!(
            scenario = %metrics.scenario,
            steps,
            avg_step_ms = metrics.avg_step_time * 1000.0,
            max_displacement,
            "scenario finished"
        );
        Ok(metrics)
    }

    /// Runs every canonical scenario and returns metrics for each.
    pub fn run_all() -> DrapeResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let mut scenario = Scenario::from_kind(kind)?;
            results.push(Self::run(&mut scenario)?);
        }
        Ok(results)
    }
}
