//! # drape-bench
//!
//! Scenario harness for the spring system: canonical cloth scenarios,
//! TOML-described custom scenarios, a runner that collects metrics and
//! telemetry, CSV export, and a JSON frame recorder for visual inspection.

pub mod metrics;
pub mod recorder;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use recorder::FrameRecorder;
pub use runner::BenchmarkRunner;
pub use scenarios::{Pinning, Scenario, ScenarioConfig, ScenarioKind};
