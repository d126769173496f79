use crate::decomposition::Partition;
use crate::domain::DirichletCheck;
use crate::error::*;
use crate::initial_conditions::*;
use crate::snapshot::SnapshotConfig;
use crate::stencil::HeatStencil;

/// Run setup is configurable.
/// These are all the parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParameters {
    /// Grid rows.
    pub nx: usize,

    /// Grid columns.
    pub ny: usize,

    /// Number of time steps.
    pub steps: usize,

    /// Thermal diffusivity.
    pub alpha: f64,

    /// Number of cooperating workers, one row band each.
    pub workers: usize,

    /// Row spacing, `1 / (nx - 1)` when unset.
    pub dx: Option<f64>,

    /// Column spacing, `1 / (ny - 1)` when unset.
    pub dy: Option<f64>,

    /// Time step, `cfl_fraction` of the stability limit when unset.
    pub dt: Option<f64>,

    /// Fraction of the stability limit used for the default time step.
    pub cfl_fraction: f64,

    /// Fixed temperature on the grid edges, also the background.
    pub edge_value: f64,

    /// Defaults to a centered hotspot sized for the grid.
    pub initial_condition: Option<InitialCondition>,

    /// Some multithreaded operations on vectors are chunked with this size
    pub chunk_size: usize,

    /// Steps between progress reports, `steps / 10` when unset.
    /// Zero disables reporting.
    pub progress_interval: Option<usize>,

    pub snapshot: Option<SnapshotConfig>,

    /// Keep the assembled final field in the run report.
    pub gather_final_field: bool,

    /// Messages a sender may run ahead of its receiver.
    pub channel_capacity: usize,
}

impl std::default::Default for SolverParameters {
    fn default() -> Self {
        SolverParameters {
            nx: 100,
            ny: 100,
            steps: 100,
            alpha: 0.01,
            workers: 1,
            dx: None,
            dy: None,
            dt: None,
            cfl_fraction: 0.8,
            edge_value: 0.0,
            initial_condition: None,
            chunk_size: 1000,
            progress_interval: None,
            snapshot: None,
            gather_final_field: false,
            channel_capacity: 1,
        }
    }
}

/// Validated, immutable run setup shared by every worker.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub nx: usize,
    pub ny: usize,
    pub steps: usize,
    pub dx: f64,
    pub dy: f64,
    pub stencil: HeatStencil,
    pub boundary: DirichletCheck,
    pub initial_condition: InitialCondition,
    pub partition: Partition,
    pub chunk_size: usize,
    /// `None` when progress reporting is off.
    pub progress_interval: Option<usize>,
    pub snapshot: Option<SnapshotConfig>,
    pub gather_final_field: bool,
    pub channel_capacity: usize,
}

impl RunConfig {
    pub fn workers(&self) -> usize {
        self.partition.workers()
    }

    pub fn dt(&self) -> f64 {
        self.stencil.dt()
    }

    pub fn global_cell_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Cell sampled for the run summary.
    pub fn center(&self) -> (usize, usize) {
        (self.nx / 2, self.ny / 2)
    }
}

fn spacing(name: &str, given: Option<f64>, cells: usize) -> Result<f64> {
    match given {
        Some(h) if h.is_finite() && h > 0.0 => Ok(h),
        Some(h) => Err(HeatError::configuration(format!(
            "{name} must be positive and finite, got {h}"
        ))),
        None if cells >= 2 => Ok(1.0 / (cells - 1) as f64),
        None => Err(HeatError::configuration(format!(
            "{name} cannot be derived from {cells} cells, need at least 2"
        ))),
    }
}

impl SolverParameters {
    /// Check everything that can be checked before a worker starts.
    pub fn validate(&self) -> Result<RunConfig> {
        if self.nx == 0 || self.ny == 0 {
            return Err(HeatError::configuration(format!(
                "grid must be non-empty, got {} x {}",
                self.nx, self.ny
            )));
        }
        if self.steps == 0 {
            return Err(HeatError::configuration("steps must be positive"));
        }
        if !(self.cfl_fraction > 0.0 && self.cfl_fraction <= 1.0) {
            return Err(HeatError::configuration(format!(
                "cfl fraction must be in (0, 1], got {}",
                self.cfl_fraction
            )));
        }
        if !self.edge_value.is_finite() {
            return Err(HeatError::configuration("edge value must be finite"));
        }
        if let Some(snapshot) = &self.snapshot {
            if snapshot.interval == 0 {
                return Err(HeatError::configuration(
                    "snapshot interval must be positive",
                ));
            }
        }

        let partition = Partition::new(self.nx, self.workers)?;
        let dx = spacing("dx", self.dx, self.nx)?;
        let dy = spacing("dy", self.dy, self.ny)?;
        let dt = self.dt.unwrap_or_else(|| {
            self.cfl_fraction * HeatStencil::max_stable_dt(self.alpha, dx, dy)
        });
        let stencil = HeatStencil::new(self.alpha, dt, dx, dy)?;

        let progress_interval = match self.progress_interval {
            Some(0) => None,
            Some(n) => Some(n),
            None => Some((self.steps / 10).max(1)),
        };
        let initial_condition = self.initial_condition.unwrap_or_else(|| {
            InitialCondition::Hotspot(HotspotSpec::for_grid(self.nx, self.ny))
        });

        Ok(RunConfig {
            nx: self.nx,
            ny: self.ny,
            steps: self.steps,
            dx,
            dy,
            stencil,
            boundary: DirichletCheck::new(self.edge_value, self.nx, self.ny),
            initial_condition,
            partition,
            chunk_size: self.chunk_size.max(1),
            progress_interval,
            snapshot: self.snapshot.clone(),
            gather_final_field: self.gather_final_field,
            channel_capacity: self.channel_capacity,
        })
    }
}
