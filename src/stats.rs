//! Performance accounting for a finished run.

use crate::stencil::HeatStencil;
use std::time::Duration;

/// Throughput figures derived once the loop is done.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerformanceSummary {
    pub updates_per_second: f64,
    /// Seconds per step.
    pub time_per_step: f64,
    pub gflops: f64,
}

/// `updates_per_second = steps * cells / elapsed`,
/// `time_per_step = elapsed / steps`.
pub fn finalize(
    elapsed_seconds: f64,
    steps: usize,
    global_cell_count: usize,
) -> PerformanceSummary {
    let updates = steps as f64 * global_cell_count as f64;
    let updates_per_second = updates / elapsed_seconds;
    PerformanceSummary {
        updates_per_second,
        time_per_step: elapsed_seconds / steps as f64,
        gflops: HeatStencil::OPS_PER_CELL as f64 * updates_per_second / 1e9,
    }
}

/// Everything rank 0 knows at the end of a run.
/// Reported only, never fed back into the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    pub nx: usize,
    pub ny: usize,
    pub workers: usize,
    pub steps: usize,
    pub elapsed: Duration,
    /// Temperature of cell `(nx / 2, ny / 2)` after the last step.
    pub center_temperature: f64,
    /// Largest change any cell saw during the last step.
    pub max_change: Option<f64>,
}

impl RunStatistics {
    pub fn global_cell_count(&self) -> usize {
        self.nx * self.ny
    }

    pub fn summary(&self) -> PerformanceSummary {
        finalize(
            self.elapsed.as_secs_f64(),
            self.steps,
            self.global_cell_count(),
        )
    }
}

impl std::fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let summary = self.summary();
        let rule = "=".repeat(50);
        writeln!(f, "{rule}")?;
        writeln!(f, "Performance Summary")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Grid size: {} x {}", self.nx, self.ny)?;
        writeln!(f, "Processes: {}", self.workers)?;
        writeln!(f, "Time steps: {}", self.steps)?;
        writeln!(f, "Total time: {:.3} seconds", self.elapsed.as_secs_f64())?;
        writeln!(f, "Updates/sec: {:.2e}", summary.updates_per_second)?;
        writeln!(f, "Time per step: {:.3} ms", summary.time_per_step * 1e3)?;
        writeln!(f, "GFLOPS: {:.2}", summary.gflops)?;
        writeln!(f, "Center temperature: {:.2}", self.center_temperature)?;
        if let Some(max_change) = self.max_change {
            writeln!(f, "Max change (last step): {max_change:.3e}")?;
        }
        write!(f, "{rule}")
    }
}
