//! Point to point bandwidth check, run before a job to make sure every rank
//! can reach its ring neighbors.

use crate::error::*;
use crate::exchange::*;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeReport {
    pub elapsed: Duration,
    pub megabytes_per_second: f64,
    /// Rank the data came from.
    pub source: usize,
    /// First value received, equals `source` as a float.
    pub first_value: f64,
}

/// Send `len` values filled with this rank to `rank + 1` and receive the
/// same from `rank - 1`, wrapping around. Even ranks send first, odd ranks
/// receive first.
pub fn ring_probe<C: Communicator>(
    comm: &C,
    len: usize,
) -> Result<ProbeReport> {
    let rank = comm.rank();
    let size = comm.size();
    let next = (rank + 1) % size;
    let prev = (rank + size - 1) % size;
    let payload = vec![rank as f64; len];

    let start = Instant::now();
    let received = if size == 1 {
        payload
    } else if rank % 2 == 0 {
        comm.send(next, Message::new(Tag::Probe, 0, payload))?;
        comm.recv_expected(prev, Tag::Probe, 0, Some(len))?.payload
    } else {
        let received = comm.recv_expected(prev, Tag::Probe, 0, Some(len))?;
        comm.send(next, Message::new(Tag::Probe, 0, payload))?;
        received.payload
    };
    let elapsed = start.elapsed();

    let bytes = (len * std::mem::size_of::<f64>()) as f64;
    let megabytes_per_second = bytes / elapsed.as_secs_f64().max(1e-9) / 1e6;
    tracing::debug!(
        rank,
        prev,
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        megabytes_per_second,
        "ring probe"
    );

    Ok(ProbeReport {
        elapsed,
        megabytes_per_second,
        source: prev,
        first_value: received.first().copied().unwrap_or(f64::NAN),
    })
}
