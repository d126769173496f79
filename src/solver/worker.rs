use crate::domain::*;
use crate::error::*;
use crate::exchange::*;
use crate::snapshot::*;
use crate::solver::*;
use crate::stencil::*;
use std::time::{Duration, Instant};

/// Lifecycle of one worker, strictly in this order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DriverState {
    /// Field allocated and initialized, no step taken.
    Initializing,
    Running,
    /// Loop done, collectives for the summary in flight.
    Finalizing,
    Done,
}

/// What rank 0 gathers from the whole group at the end of a run.
#[derive(Debug, Clone)]
pub struct RootSummary {
    pub center_temperature: f64,
    pub max_change: f64,
    pub final_field: Option<GlobalField>,
}

#[derive(Debug, Clone)]
pub struct WorkerOutcome {
    pub rank: usize,
    pub steps_completed: usize,
    /// Wall clock time of the time loop, barrier to barrier.
    pub elapsed: Duration,
    /// Only on rank 0.
    pub summary: Option<RootSummary>,
}

/// One rank of the cooperating group.
///
/// Owns its row band and its communicator. Dropping a worker, including on
/// an error return, disconnects it from all peers.
pub struct Worker<'a, C: Communicator> {
    config: &'a RunConfig,
    comm: C,
    field: LocalField,
    exchanger: BoundaryExchanger,
    state: DriverState,
    step: usize,
}

impl<'a, C: Communicator> Worker<'a, C> {
    /// Allocate and initialize this rank's band.
    pub fn new(config: &'a RunConfig, comm: C) -> Result<Self> {
        let rank = comm.rank();
        if comm.size() != config.workers() || rank >= comm.size() {
            return Err(HeatError::configuration(format!(
                "communicator for rank {rank} of {} does not match {} workers",
                comm.size(),
                config.workers()
            )));
        }
        let band = *config.partition.band(rank);
        let mut field = LocalField::allocate(band, config.nx, config.ny)?;
        field.set_initial_condition(
            &config.initial_condition,
            &config.boundary,
            config.chunk_size,
        );
        tracing::debug!(
            rank,
            start_row = band.start_row,
            row_count = band.row_count,
            "worker initialized"
        );

        let exchanger =
            BoundaryExchanger::new(rank, config.workers(), config.ny);
        Ok(Worker {
            config,
            comm,
            field,
            exchanger,
            state: DriverState::Initializing,
            step: 0,
        })
    }

    pub fn rank(&self) -> usize {
        self.comm.rank()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Steps completed so far.
    pub fn steps_completed(&self) -> usize {
        self.step
    }

    pub fn field(&self) -> &LocalField {
        &self.field
    }

    /// One time step: exchange, update, boundary, swap.
    /// Every rank has to call this the same number of times.
    pub fn step(&mut self) -> Result<()> {
        profiling::scope!("worker: step");
        debug_assert!(matches!(
            self.state,
            DriverState::Initializing | DriverState::Running
        ));
        self.state = DriverState::Running;

        self.exchanger
            .exchange(&self.comm, &mut self.field, self.step)?;

        let owned = self.field.owned_box();
        let (current, next) = self.field.split_mut();
        apply_band(
            &self.config.stencil,
            current,
            next,
            &owned,
            self.config.nx,
            self.config.chunk_size,
        );
        self.config.boundary.apply(next, &owned);
        self.field.swap();

        self.step += 1;
        Ok(())
    }

    /// Run every step, then the end of run collectives.
    pub fn run(
        mut self,
        reporter: &dyn ProgressReporter,
    ) -> Result<WorkerOutcome> {
        let rank = self.rank();
        let steps = self.config.steps;
        if rank == 0 {
            tracing::info!(
                nx = self.config.nx,
                ny = self.config.ny,
                steps,
                workers = self.config.workers(),
                dt = self.config.dt(),
                "starting time loop"
            );
        }

        self.comm.barrier(0)?;
        self.write_snapshot_if_due()?;
        let start = Instant::now();
        while self.step < steps {
            self.step()?;
            if rank == 0 {
                if let Some(interval) = self.config.progress_interval {
                    if self.step % interval == 0 {
                        reporter.report(self.step, steps);
                    }
                }
            }
            self.write_snapshot_if_due()?;
        }
        self.comm.barrier(steps)?;
        let elapsed = start.elapsed();

        self.state = DriverState::Finalizing;
        let summary = self.finalize()?;
        self.comm.barrier(steps)?;
        self.state = DriverState::Done;
        tracing::debug!(
            rank,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "worker done"
        );

        Ok(WorkerOutcome {
            rank,
            steps_completed: self.step,
            elapsed,
            summary,
        })
    }

    /// Center sample and max change go to rank 0, plus the final field if
    /// it was asked for.
    fn finalize(&self) -> Result<Option<RootSummary>> {
        let center_temperature = self.gather_center()?;
        let max_change = self.reduce_max_change()?;
        let final_field = if self.config.gather_final_field {
            self.gather_field()?
        } else {
            None
        };
        Ok(center_temperature.zip(max_change).map(
            |(center_temperature, max_change)| RootSummary {
                center_temperature,
                max_change,
                final_field,
            },
        ))
    }

    fn gather_center(&self) -> Result<Option<f64>> {
        let (row, col) = self.config.center();
        let owner = self
            .config
            .partition
            .owner_of_row(row)
            .ok_or_else(|| {
                HeatError::configuration("center row is outside the grid")
            })?;
        let rank = self.rank();
        let local = self.field.value(row, col);

        match (rank == 0, rank == owner) {
            (true, true) => Ok(local),
            (true, false) => {
                let message = self.comm.recv_expected(
                    owner,
                    Tag::CenterSample,
                    self.step,
                    Some(1),
                )?;
                Ok(Some(message.payload[0]))
            }
            (false, true) => {
                let value = local.into_iter().collect();
                self.comm.send(
                    0,
                    Message::new(Tag::CenterSample, self.step, value),
                )?;
                Ok(None)
            }
            (false, false) => Ok(None),
        }
    }

    fn reduce_max_change(&self) -> Result<Option<f64>> {
        let local = self.field.max_change(self.config.chunk_size);
        if self.rank() != 0 {
            self.comm.send(
                0,
                Message::new(Tag::MaxChange, self.step, vec![local]),
            )?;
            return Ok(None);
        }
        let mut result = local;
        for source in 1..self.comm.size() {
            let message = self.comm.recv_expected(
                source,
                Tag::MaxChange,
                self.step,
                Some(1),
            )?;
            result = result.max(message.payload[0]);
        }
        Ok(Some(result))
    }

    /// Collective. Every rank sends its owned rows, rank 0 assembles them.
    fn gather_field(&self) -> Result<Option<GlobalField>> {
        profiling::scope!("worker: gather field");
        let owned = self.field.owned_values();
        if self.rank() != 0 {
            self.comm.send(
                0,
                Message::new(Tag::Snapshot, self.step, owned.to_vec()),
            )?;
            return Ok(None);
        }

        let mut global =
            GlobalField::allocate(self.config.nx, self.config.ny, 0)?;
        global.insert_band(self.field.band(), owned);
        for band in &self.config.partition.bands()[1..] {
            let message = self.comm.recv_expected(
                band.rank,
                Tag::Snapshot,
                self.step,
                Some(band.row_count * self.config.ny),
            )?;
            global.insert_band(band, &message.payload);
        }
        Ok(Some(global))
    }

    fn write_snapshot_if_due(&self) -> Result<()> {
        let Some(snapshot) = &self.config.snapshot else {
            return Ok(());
        };
        if !snapshot.is_due(self.step) {
            return Ok(());
        }
        if let Some(global) = self.gather_field()? {
            let path = snapshot.path(self.step);
            global
                .write(&path, snapshot.format, self.step, self.config.dt())
                .map_err(|source| HeatError::Io {
                    rank: self.rank(),
                    path,
                    source,
                })?;
        }
        Ok(())
    }
}
