/// Which way a boundary row travels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// First owned row, sent to `rank - 1`.
    Upward,
    /// Last owned row, sent to `rank + 1`.
    Downward,
}

/// Message kinds, matched on receive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Row(Direction),
    CenterSample,
    MaxChange,
    Snapshot,
    Barrier,
    Probe,
}

/// A tagged flat buffer of reals.
/// For rows the payload holds exactly `ny` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub tag: Tag,
    pub step: usize,
    pub payload: Vec<f64>,
}

impl Message {
    pub fn new(tag: Tag, step: usize, payload: Vec<f64>) -> Self {
        Message { tag, step, payload }
    }

    /// Copy one boundary row into a message.
    pub fn row(direction: Direction, step: usize, row: &[f64]) -> Self {
        Self::new(Tag::Row(direction), step, row.to_vec())
    }

    pub fn empty(tag: Tag, step: usize) -> Self {
        Self::new(tag, step, Vec::new())
    }
}
