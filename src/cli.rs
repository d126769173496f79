use crate::build_info;
use crate::error::*;
use crate::initial_conditions::*;
use crate::snapshot::*;
use crate::solver::SolverParameters;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "profile-with-puffin")]
static PUFFIN_SERVER: std::sync::OnceLock<puffin_http::Server> =
    std::sync::OnceLock::new();

/// 2D heat diffusion on row bands
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Grid rows.
    #[arg(long, default_value = "100")]
    pub nx: usize,

    /// Grid columns.
    #[arg(long, default_value = "100")]
    pub ny: usize,

    /// Number of time steps.
    #[arg(short, long, default_value = "100")]
    pub steps: usize,

    /// Thermal diffusivity.
    #[arg(short, long, default_value = "0.01")]
    pub alpha: f64,

    /// Number of workers, one row band each.
    #[arg(short, long, default_value = "1")]
    pub workers: usize,

    /// Time step, derived from the stability limit when unset.
    #[arg(long)]
    pub dt: Option<f64>,

    /// Fraction of the stability limit used for the derived time step.
    #[arg(long, default_value = "0.8")]
    pub cfl_fraction: f64,

    /// Fixed edge temperature.
    #[arg(long, default_value = "0.0")]
    pub edge_value: f64,

    /// Hotspot temperature.
    #[arg(long, default_value = "100.0")]
    pub peak: f64,

    /// Hotspot radius in cells, `min(nx, ny) / 10` when unset.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Fill with seeded random integers instead of a hotspot.
    #[arg(long)]
    pub rand_seed: Option<u64>,

    /// Chunk size to use for parallelism.
    #[arg(short, long, default_value = "1000")]
    pub chunk_size: usize,

    /// Rayon threads per process, rayon picks when unset.
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Steps between progress reports, `steps / 10` when unset.
    #[arg(long)]
    pub progress_interval: Option<usize>,

    /// Directory for snapshots, will be created.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Steps between snapshots.
    #[arg(long, requires("output_dir"))]
    pub snapshot_interval: Option<usize>,

    #[arg(long, value_enum, default_value_t = SnapshotFormat::Text)]
    pub snapshot_format: SnapshotFormat,

    /// Run a ring bandwidth probe between the workers and quit.
    #[arg(long)]
    pub comm_test: bool,

    /// Values per probe message.
    #[arg(long, default_value = "1000000")]
    pub probe_len: usize,

    /// Debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print build information and quit
    #[arg(long)]
    pub build_info: bool,
}

impl Args {
    pub fn initial_condition(&self) -> InitialCondition {
        match self.rand_seed {
            Some(seed) => InitialCondition::Random { seed, max_val: 100 },
            None => {
                let mut hotspot = HotspotSpec::for_grid(self.nx, self.ny);
                hotspot.peak = self.peak;
                if let Some(radius) = self.radius {
                    hotspot.radius = radius;
                }
                InitialCondition::Hotspot(hotspot)
            }
        }
    }

    pub fn snapshot_config(&self) -> Option<SnapshotConfig> {
        let output_dir = self.output_dir.clone()?;
        let interval = self.snapshot_interval?;
        Some(SnapshotConfig {
            output_dir,
            interval,
            format: self.snapshot_format,
        })
    }

    pub fn solver_parameters(&self) -> SolverParameters {
        SolverParameters {
            nx: self.nx,
            ny: self.ny,
            steps: self.steps,
            alpha: self.alpha,
            workers: self.workers,
            dt: self.dt,
            cfl_fraction: self.cfl_fraction,
            edge_value: self.edge_value,
            initial_condition: Some(self.initial_condition()),
            chunk_size: self.chunk_size,
            progress_interval: self.progress_interval,
            snapshot: self.snapshot_config(),
            ..Default::default()
        }
    }

    /// Parse the command line, set up logging and the output directory.
    /// Exits after printing build information if asked to.
    pub fn cli_setup(name: &str) -> Result<Self> {
        let args = Args::parse();

        if args.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        setup_logging(args.verbose, args.quiet);

        if let Some(output_dir) = &args.output_dir {
            ensure_dir_exists(output_dir).map_err(|source| HeatError::Io {
                rank: 0,
                path: output_dir.clone(),
                source,
            })?;
        }

        #[cfg(feature = "profile-with-puffin")]
        {
            let server_addr =
                format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
            match puffin_http::Server::new(&server_addr) {
                Ok(server) => {
                    tracing::info!(
                        "run this to view profiling data: \
                         puffin_viewer {server_addr}"
                    );
                    let _ = PUFFIN_SERVER.set(server);
                    profiling::puffin::set_scopes_on(true);
                }
                Err(e) => {
                    tracing::warn!("cannot start puffin server: {e}")
                }
            }
        }

        if let Some(threads) = args.threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("rayon_thread_{}", i))
                .build_global()
                .map_err(|e| {
                    HeatError::configuration(format!(
                        "cannot build thread pool: {e}"
                    ))
                })?;
        }

        Ok(args)
    }
}

/// Install the global `tracing` subscriber. `RUST_LOG` wins over the
/// flags when set.
pub fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .try_init();
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn parse_test() {
        let args = Args::parse_from([
            "heat",
            "--nx",
            "64",
            "--ny",
            "32",
            "-w",
            "4",
            "--radius",
            "3",
            "-o",
            "/tmp/out",
            "--snapshot-interval",
            "10",
            "--snapshot-format",
            "binary",
        ]);
        let p = args.solver_parameters();
        assert_eq!(p.nx, 64);
        assert_eq!(p.ny, 32);
        assert_eq!(p.workers, 4);
        assert_eq!(p.steps, 100);
        assert_eq!(
            p.initial_condition,
            Some(InitialCondition::Hotspot(HotspotSpec {
                peak: 100.0,
                radius: 3.0,
            }))
        );
        let snapshot = p.snapshot.as_ref().unwrap();
        assert_eq!(snapshot.interval, 10);
        assert_eq!(snapshot.format, SnapshotFormat::Binary);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn snapshot_needs_dir_test() {
        let args = Args::try_parse_from(["heat", "--snapshot-interval", "5"]);
        assert!(args.is_err());

        let args = Args::parse_from(["heat", "-o", "/tmp/out"]);
        assert!(args.snapshot_config().is_none());
    }
}
