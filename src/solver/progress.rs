/// Receives progress updates from rank 0 while the time loop runs.
/// Reporting never changes what the solver does.
pub trait ProgressReporter: Sync {
    /// `step` steps of `total` are done.
    fn report(&self, step: usize, total: usize);
}

/// Logs a percentage through `tracing`.
#[derive(Debug, Default, Copy, Clone)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report(&self, step: usize, total: usize) {
        let percent = 100.0 * step as f64 / total as f64;
        tracing::info!(step, total, "progress: {percent:.1}%");
    }
}

/// Drops every update.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _step: usize, _total: usize) {}
}

/// Keeps every update, useful in tests.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    steps: std::sync::Mutex<Vec<usize>>,
}

impl RecordingProgress {
    pub fn steps(&self) -> Vec<usize> {
        self.steps.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, step: usize, _total: usize) {
        if let Ok(mut steps) = self.steps.lock() {
            steps.push(step);
        }
    }
}
