//! Row band domain decomposition.
//!
//! The global `nx x ny` grid is split along the row axis into one
//! contiguous band per worker. Bands never change after the run starts,
//! so neighbor relationships are just `rank - 1` and `rank + 1`.

use crate::error::*;
use crate::util::*;

/// Rows owned by one worker.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RowBand {
    pub rank: usize,
    pub start_row: usize,
    pub row_count: usize,
}

impl RowBand {
    /// One past the last owned row.
    pub fn end_row(&self) -> usize {
        self.start_row + self.row_count
    }

    pub fn contains_row(&self, row: usize) -> bool {
        row >= self.start_row && row < self.end_row()
    }

    /// Owned cells only, no ghost rows.
    pub fn owned_box(&self, ny: usize) -> GridBox {
        GridBox::rows(self.start_row as i32, self.row_count, ny)
    }

    /// Owned rows plus one ghost row on each side.
    pub fn halo_box(&self, ny: usize) -> GridBox {
        self.owned_box(ny).grow_rows(1)
    }
}

/// Ordered assignment of row bands to ranks `0..workers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    nx: usize,
    bands: Vec<RowBand>,
}

impl Partition {
    /// `base = nx / workers` rows each, the first `nx % workers` ranks
    /// take one extra row.
    pub fn new(nx: usize, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(HeatError::configuration(
                "worker count must be at least 1",
            ));
        }
        if nx < workers {
            return Err(HeatError::configuration(format!(
                "{nx} grid rows cannot be split across {workers} workers, \
                 every worker must own at least one row"
            )));
        }

        let base = nx / workers;
        let remainder = nx % workers;
        let mut bands = Vec::with_capacity(workers);
        let mut start_row = 0;
        for rank in 0..workers {
            let row_count = if rank < remainder { base + 1 } else { base };
            bands.push(RowBand {
                rank,
                start_row,
                row_count,
            });
            start_row += row_count;
        }
        debug_assert_eq!(start_row, nx);

        Ok(Partition { nx, bands })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn workers(&self) -> usize {
        self.bands.len()
    }

    pub fn bands(&self) -> &[RowBand] {
        &self.bands
    }

    pub fn band(&self, rank: usize) -> &RowBand {
        &self.bands[rank]
    }

    /// Rank that owns a global row.
    pub fn owner_of_row(&self, row: usize) -> Option<usize> {
        if row >= self.nx {
            return None;
        }
        // Bands are sorted by start row.
        let index = self.bands.partition_point(|b| b.end_row() <= row);
        Some(self.bands[index].rank)
    }

    pub fn above(&self, rank: usize) -> Option<usize> {
        rank.checked_sub(1)
    }

    pub fn below(&self, rank: usize) -> Option<usize> {
        (rank + 1 < self.workers()).then_some(rank + 1)
    }
}

/// `(start_row, row_count)` for ranks `0..workers`.
pub fn partition(nx: usize, workers: usize) -> Result<Vec<(usize, usize)>> {
    Ok(Partition::new(nx, workers)?
        .bands()
        .iter()
        .map(|b| (b.start_row, b.row_count))
        .collect())
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn remainder_rows_go_first_test() {
        assert_eq!(
            partition(10, 4).unwrap(),
            vec![(0, 3), (3, 3), (6, 2), (8, 2)]
        );
        assert_eq!(
            partition(8, 4).unwrap(),
            vec![(0, 2), (2, 2), (4, 2), (6, 2)]
        );
        assert_eq!(partition(5, 1).unwrap(), vec![(0, 5)]);
        assert_eq!(partition(3, 3).unwrap(), vec![(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn rejects_empty_bands_test() {
        assert!(matches!(
            partition(3, 4),
            Err(HeatError::Configuration(_))
        ));
        assert!(matches!(
            partition(3, 0),
            Err(HeatError::Configuration(_))
        ));
    }

    #[test]
    fn owner_of_row_test() {
        let p = Partition::new(10, 4).unwrap();
        let owners: Vec<usize> =
            (0..10).map(|r| p.owner_of_row(r).unwrap()).collect();
        assert_eq!(owners, vec![0, 0, 0, 1, 1, 1, 2, 2, 3, 3]);
        assert_eq!(p.owner_of_row(10), None);
    }

    #[test]
    fn neighbors_test() {
        let p = Partition::new(10, 3).unwrap();
        assert_eq!(p.above(0), None);
        assert_eq!(p.below(0), Some(1));
        assert_eq!(p.above(2), Some(1));
        assert_eq!(p.below(2), None);

        let single = Partition::new(10, 1).unwrap();
        assert_eq!(single.above(0), None);
        assert_eq!(single.below(0), None);
    }

    #[test]
    fn band_boxes_test() {
        let band = RowBand {
            rank: 1,
            start_row: 4,
            row_count: 3,
        };
        assert_eq!(band.owned_box(5).bounds, matrix![4, 6; 0, 4]);
        assert_eq!(band.halo_box(5).bounds, matrix![3, 7; 0, 4]);
        assert!(band.contains_row(6));
        assert!(!band.contains_row(7));
    }
}
