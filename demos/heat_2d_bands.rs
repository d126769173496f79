use heat_bands::cli::Args;
use heat_bands::exchange::probe::*;
use heat_bands::exchange::*;
use heat_bands::solver::*;
use heat_bands::HeatError;
use std::process::ExitCode;

fn comm_test(args: &Args) -> heat_bands::Result<()> {
    let world = ChannelCommunicator::world(args.workers, 1);
    let len = args.probe_len;
    let reports: Vec<heat_bands::Result<ProbeReport>> =
        std::thread::scope(|s| {
            let handles: Vec<_> = world
                .iter()
                .map(|comm| s.spawn(move || ring_probe(comm, len)))
                .collect();
            handles
                .into_iter()
                .enumerate()
                .map(|(rank, h)| {
                    h.join().unwrap_or_else(|_| {
                        Err(HeatError::WorkerPanic { rank })
                    })
                })
                .collect()
        });

    for (rank, report) in reports.into_iter().enumerate() {
        let report = report?;
        println!(
            "rank {rank}: received {:.0} from rank {} in {:.3} ms, {:.1} MB/s",
            report.first_value,
            report.source,
            report.elapsed.as_secs_f64() * 1e3,
            report.megabytes_per_second
        );
    }
    Ok(())
}

fn solve(args: &Args) -> heat_bands::Result<()> {
    let config = args.solver_parameters().validate()?;
    let report = run(&config, &TracingProgress)?;
    println!("{}", report.statistics);
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::cli_setup("heat_2d_bands") {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = if args.comm_test {
        comm_test(&args)
    } else {
        solve(&args)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = ?e.kind(), rank = ?e.rank(), "{e}");
            ExitCode::FAILURE
        }
    }
}
