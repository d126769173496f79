//! Error types for a heat diffusion run.
//!
//! Every error is fatal to the whole run. Errors raised inside a worker
//! carry the rank they happened on so the caller can report where the
//! cooperating group broke.

use crate::exchange::Tag;
use thiserror::Error;

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, HeatError>;

/// What went wrong while moving a message between two ranks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommFailure {
    /// The peer dropped its end of the channel, usually because it failed.
    #[error("peer disconnected")]
    Disconnected,

    #[error("no channel to rank {0}")]
    InvalidPeer(usize),

    #[error("expected {expected:?} message, found {found:?}")]
    UnexpectedTag { expected: Tag, found: Tag },

    #[error("expected message for step {expected}, found step {found}")]
    StepMismatch { expected: usize, found: usize },

    #[error("expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Coarse error classes, used when picking which failure to report.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Communication,
    Resource,
    Io,
    WorkerPanic,
}

#[derive(Error, Debug)]
pub enum HeatError {
    /// Invalid partition, CFL violation, non-positive sizes.
    /// Always detected before the time loop starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A boundary exchange or collective could not complete.
    #[error("communication error on rank {rank} with rank {peer}: {failure}")]
    Communication {
        rank: usize,
        peer: usize,
        failure: CommFailure,
    },

    /// Local field storage could not be allocated.
    #[error("resource error on rank {rank}: cannot allocate {cells} cells")]
    Resource { rank: usize, cells: usize },

    #[error("io error on rank {rank} for {path:?}: {source}")]
    Io {
        rank: usize,
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot start worker thread for rank {rank}: {source}")]
    Spawn {
        rank: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker thread for rank {rank} panicked")]
    WorkerPanic { rank: usize },
}

impl HeatError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn communication(
        rank: usize,
        peer: usize,
        failure: CommFailure,
    ) -> Self {
        Self::Communication {
            rank,
            peer,
            failure,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Communication { .. } => ErrorKind::Communication,
            Self::Resource { .. } | Self::Spawn { .. } => ErrorKind::Resource,
            Self::Io { .. } => ErrorKind::Io,
            Self::WorkerPanic { .. } => ErrorKind::WorkerPanic,
        }
    }

    /// Rank the error happened on, configuration errors have none.
    pub fn rank(&self) -> Option<usize> {
        match self {
            Self::Configuration(_) => None,
            Self::Communication { rank, .. }
            | Self::Resource { rank, .. }
            | Self::Io { rank, .. }
            | Self::Spawn { rank, .. }
            | Self::WorkerPanic { rank } => Some(*rank),
        }
    }

    /// Lower is more specific. A disconnect is almost always the echo of
    /// a failure on another rank, so it ranks last.
    pub fn specificity(&self) -> u8 {
        match self {
            Self::Configuration(_) => 0,
            Self::Resource { .. } | Self::Io { .. } | Self::Spawn { .. } => 1,
            Self::WorkerPanic { .. } => 2,
            Self::Communication {
                failure: CommFailure::Disconnected,
                ..
            } => 4,
            Self::Communication { .. } => 3,
        }
    }
}

/// Pick the error to report for a failed group: most specific kind first,
/// then the lowest rank.
pub fn most_specific(errors: Vec<HeatError>) -> Option<HeatError> {
    errors
        .into_iter()
        .min_by_key(|e| (e.specificity(), e.rank().unwrap_or(0)))
}
