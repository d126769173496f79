use heat_bands::decomposition::*;
use heat_bands::domain::*;
use heat_bands::error::*;
use heat_bands::exchange::*;
use heat_bands::solver::*;

fn config(nx: usize, workers: usize) -> RunConfig {
    SolverParameters {
        nx,
        ny: 8,
        steps: 10,
        workers,
        ..Default::default()
    }
    .validate()
    .unwrap()
}

/// Shortens every row sent by one rank.
struct Truncating {
    inner: ChannelCommunicator,
    faulty_rank: usize,
}

impl Communicator for Truncating {
    fn rank(&self) -> usize {
        self.inner.rank()
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn send(&self, dest: usize, mut message: Message) -> Result<()> {
        if self.rank() == self.faulty_rank {
            if let Tag::Row(_) = message.tag {
                message.payload.pop();
            }
        }
        self.inner.send(dest, message)
    }

    fn recv(&self, source: usize) -> Result<Message> {
        self.inner.recv(source)
    }
}

#[test]
fn too_many_workers() {
    let e = SolverParameters {
        nx: 3,
        ny: 8,
        workers: 4,
        ..Default::default()
    }
    .validate()
    .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Configuration);
    assert_eq!(e.rank(), None);
}

#[test]
fn cfl_violation() {
    let mut p = SolverParameters {
        nx: 10,
        ny: 10,
        alpha: 1.0,
        dx: Some(1.0),
        dy: Some(1.0),
        dt: Some(0.5),
        ..Default::default()
    };
    assert_eq!(p.validate().unwrap_err().kind(), ErrorKind::Configuration);
    p.dt = Some(0.2);
    assert!(p.validate().is_ok());
}

#[test]
fn dropped_peer() {
    let config = config(12, 3);
    let mut world = ChannelCommunicator::world(3, 1);
    // Rank 2 never starts.
    drop(world.pop());

    let errors: Vec<HeatError> = std::thread::scope(|s| {
        let handles: Vec<_> = world
            .into_iter()
            .map(|comm| {
                let config = &config;
                s.spawn(move || {
                    Worker::new(config, comm)?.run(&NoProgress).map(|_| ())
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap_err())
            .collect()
    });

    for e in &errors {
        assert!(matches!(
            e,
            HeatError::Communication {
                failure: CommFailure::Disconnected,
                ..
            }
        ));
    }
    let e = most_specific(errors).unwrap();
    assert_eq!(e.rank(), Some(0));
}

#[test]
fn malformed_row() {
    let config = config(12, 3);
    let comms: Vec<Truncating> = ChannelCommunicator::world(3, 1)
        .into_iter()
        .map(|inner| Truncating {
            inner,
            faulty_rank: 1,
        })
        .collect();

    let e = run_with(&config, comms, &NoProgress).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Communication);
    match e {
        HeatError::Communication {
            rank,
            peer,
            failure: CommFailure::LengthMismatch { expected, found },
        } => {
            assert_eq!(rank, 0);
            assert_eq!(peer, 1);
            assert_eq!(expected, 8);
            assert_eq!(found, 7);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn allocation_failure() {
    let band = RowBand {
        rank: 3,
        start_row: 0,
        row_count: 1 << 28,
    };
    let e = LocalField::allocate(band, 1 << 28, (1 << 30) - 1).err().unwrap();
    assert_eq!(e.kind(), ErrorKind::Resource);
    assert_eq!(e.rank(), Some(3));
}
