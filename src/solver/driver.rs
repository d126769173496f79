use crate::error::*;
use crate::exchange::*;
use crate::snapshot::GlobalField;
use crate::solver::*;
use crate::stats::RunStatistics;

/// Result of a successful run, as seen from rank 0.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub statistics: RunStatistics,
    /// Present when `gather_final_field` was set.
    pub final_field: Option<GlobalField>,
}

/// Run the whole group in this process, one thread per rank, connected by
/// in-memory channels.
pub fn run(
    config: &RunConfig,
    reporter: &dyn ProgressReporter,
) -> Result<RunReport> {
    let comms =
        ChannelCommunicator::world(config.workers(), config.channel_capacity);
    run_with(config, comms, reporter)
}

/// Run one worker per communicator and wait for all of them.
///
/// If any worker fails the run fails. Failures cascade through the
/// communicators, so usually every rank reports something. The one
/// returned is picked by [`most_specific`].
pub fn run_with<C: Communicator>(
    config: &RunConfig,
    comms: Vec<C>,
    reporter: &dyn ProgressReporter,
) -> Result<RunReport> {
    if comms.len() != config.workers() {
        return Err(HeatError::configuration(format!(
            "{} communicators for {} workers",
            comms.len(),
            config.workers()
        )));
    }

    let results: Vec<Result<WorkerOutcome>> = std::thread::scope(|s| {
        let mut results = Vec::with_capacity(comms.len());
        let mut handles = Vec::with_capacity(comms.len());
        for comm in comms {
            let rank = comm.rank();
            let spawned = std::thread::Builder::new()
                .name(format!("heat_worker_{rank}"))
                .spawn_scoped(s, move || {
                    Worker::new(config, comm)?.run(reporter)
                });
            match spawned {
                Ok(handle) => handles.push((rank, handle)),
                Err(source) => {
                    results.push(Err(HeatError::Spawn { rank, source }))
                }
            }
        }
        for (rank, handle) in handles {
            let result = handle
                .join()
                .unwrap_or_else(|_| Err(HeatError::WorkerPanic { rank }));
            results.push(result);
        }
        results
    });

    let mut outcomes = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                tracing::debug!(error = %e, "worker failed");
                errors.push(e);
            }
        }
    }
    if let Some(e) = most_specific(errors) {
        tracing::error!(kind = ?e.kind(), rank = ?e.rank(), "run failed: {e}");
        return Err(e);
    }

    let root = outcomes
        .into_iter()
        .find(|o| o.rank == 0)
        .ok_or_else(|| HeatError::configuration("no worker has rank 0"))?;
    let summary = root
        .summary
        .ok_or_else(|| HeatError::configuration("rank 0 has no summary"))?;

    let statistics = RunStatistics {
        nx: config.nx,
        ny: config.ny,
        workers: config.workers(),
        steps: root.steps_completed,
        elapsed: root.elapsed,
        center_temperature: summary.center_temperature,
        max_change: Some(summary.max_change),
    };
    tracing::info!(
        elapsed_s = statistics.elapsed.as_secs_f64(),
        center_temperature = statistics.center_temperature,
        "run finished"
    );
    Ok(RunReport {
        statistics,
        final_field: summary.final_field,
    })
}
