use heat_bands::decomposition::*;
use heat_bands::initial_conditions::*;
use heat_bands::solver::*;

fn final_field(params: &SolverParameters) -> Vec<f64> {
    let config = params.validate().unwrap();
    let report = run(&config, &NoProgress).unwrap();
    report.final_field.unwrap().values().to_vec()
}

#[test]
fn partition_coverage() {
    for nx in 1..60 {
        for workers in 1..=nx.min(17) {
            let bands = partition(nx, workers).unwrap();
            assert_eq!(bands.len(), workers);

            let mut next_row = 0;
            for (start_row, row_count) in &bands {
                assert_eq!(*start_row, next_row);
                assert!(*row_count >= 1);
                next_row += row_count;
            }
            assert_eq!(next_row, nx);

            let min = bands.iter().map(|b| b.1).min().unwrap();
            let max = bands.iter().map(|b| b.1).max().unwrap();
            assert!(max - min <= 1);

            // Larger bands come first.
            assert!(bands.windows(2).all(|w| w[0].1 >= w[1].1));
        }
    }
}

#[test]
fn partition_determinism() {
    for (nx, workers) in [(10, 3), (64, 4), (1000, 7), (5, 5)] {
        assert_eq!(partition(nx, workers), partition(nx, workers));
        let p = Partition::new(nx, workers).unwrap();
        for row in 0..nx {
            let rank = p.owner_of_row(row).unwrap();
            assert!(p.band(rank).contains_row(row));
        }
    }
}

#[test]
fn partition_rejects_too_many_workers() {
    assert!(partition(3, 4).is_err());
    assert!(partition(3, 0).is_err());
}

#[test]
fn hotspot_single_vs_four_workers() {
    let mut params = SolverParameters {
        nx: 40,
        ny: 33,
        steps: 50,
        workers: 1,
        gather_final_field: true,
        ..Default::default()
    };
    let single = final_field(&params);
    params.workers = 4;
    let four = final_field(&params);
    assert_eq!(single, four);
}

#[test]
fn random_uneven_bands() {
    let mut params = SolverParameters {
        nx: 31,
        ny: 17,
        steps: 20,
        workers: 1,
        edge_value: 1.5,
        initial_condition: Some(InitialCondition::Random {
            seed: 1234,
            max_val: 50,
        }),
        gather_final_field: true,
        ..Default::default()
    };
    let single = final_field(&params);
    for workers in [2, 3, 7, 31] {
        params.workers = workers;
        assert_eq!(single, final_field(&params), "workers: {workers}");
    }
}
