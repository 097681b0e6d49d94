//! Benchmark metrics collected during a scenario run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Springs over all nodes, structural and bend.
    pub spring_count: usize,
    /// Nodes locked at the start of the run.
    pub locked_count: usize,
    /// Number of steps executed.
    pub steps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per step (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Largest distance any vertex moved from its starting position.
    pub max_displacement: f32,
    /// Largest direction magnitude after the last step.
    pub final_max_speed: f32,
    /// Largest strain seen over the whole run.
    pub max_strain: f32,
    /// Clamped spring evaluations over the whole run.
    pub clamped_springs: usize,
    /// Whether every position and normal is finite after the run.
    pub finite: bool,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,vertex_count,triangle_count,spring_count,locked_count,steps,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,max_displacement,final_max_speed,max_strain,clamped_springs,finite".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6},{:.6},{:.6},{},{}",
            self.scenario,
            self.vertex_count,
            self.triangle_count,
            self.spring_count,
            self.locked_count,
            self.steps,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.max_displacement,
            self.final_max_speed,
            self.max_strain,
            self.clamped_springs,
            self.finite,
        )
    }

    /// Header plus one row per entry.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
