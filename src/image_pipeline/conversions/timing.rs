use std::time::{Duration, Instant};
use tracing::info;

pub const READ_FRAME: &str = "read_frame";
pub const VALIDATE_DIMENSIONS: &str = "validate_dimensions";
pub const EXTRACT_PLANES: &str = "extract_planes";
pub const WRITE_FRAME: &str = "write_frame";

/// Wall-clock cost of each stage one frame went through, in run order.
#[derive(Debug, Default, Clone)]
pub struct FrameTimings {
    steps: Vec<(&'static str, Duration)>,
}

impl FrameTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `f` and records it under `step`.
    pub fn record<T>(&mut self, step: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.steps.push((step, start.elapsed()));
        result
    }

    pub fn get_step(&self, step: &str) -> Option<Duration> {
        self.steps
            .iter()
            .find(|(name, _)| *name == step)
            .map(|(_, duration)| *duration)
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|(_, duration)| *duration).sum()
    }

    /// Emits one event for the frame with every stage in milliseconds.
    /// Stages the frame never reached are reported as 0.
    pub fn log_summary(&self) {
        let ms = |step: &str| self.get_step(step).map_or(0.0, |d| d.as_secs_f64() * 1000.0);
        info!(
            read_ms = ms(READ_FRAME),
            validate_ms = ms(VALIDATE_DIMENSIONS),
            extract_ms = ms(EXTRACT_PLANES),
            write_ms = ms(WRITE_FRAME),
            total_ms = self.total_duration().as_secs_f64() * 1000.0,
            "Frame timings"
        );
    }
}
