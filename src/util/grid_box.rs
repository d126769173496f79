use crate::util::indexing::*;
use crate::util::*;

/// Axis aligned box of grid cells in world coordinates.
/// Each instance is inclusive of both corners.
/// Responsible for mapping between a row-major linear buffer
/// and `[row, column]` coordinates.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridBox {
    pub bounds: Bounds,
}

impl std::fmt::Display for GridBox {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "rows [{}, {}] x cols [{}, {}]",
            self.bounds[(0, 0)],
            self.bounds[(0, 1)],
            self.bounds[(1, 0)],
            self.bounds[(1, 1)]
        )
    }
}

impl GridBox {
    #[inline]
    pub fn new(bounds: Bounds) -> Self {
        GridBox { bounds }
    }

    /// Box covering a whole `nx x ny` grid.
    pub fn grid(nx: usize, ny: usize) -> Self {
        Self::rows(0, nx, ny)
    }

    /// Box covering `row_count` full-width rows starting at `start_row`.
    /// `start_row` may be negative for halo rows above the grid.
    pub fn rows(start_row: i32, row_count: usize, ny: usize) -> Self {
        let result = GridBox::new(matrix![
            start_row, start_row + row_count as i32 - 1;
            0, ny as i32 - 1
        ]);
        debug_assert!(result.check_validity());
        result
    }

    /// Grow the row axis by `n` on both sides, the column axis is untouched.
    pub fn grow_rows(&self, n: i32) -> Self {
        let mut result = *self;
        result.bounds[(0, 0)] -= n;
        result.bounds[(0, 1)] += n;
        result
    }

    /// Exclusive size along each axis, i.e. `[0, 9]` has size 10.
    pub fn exclusive_bounds(&self) -> Coord {
        (self.bounds.column(1) - self.bounds.column(0)).add_scalar(1)
    }

    #[inline]
    pub fn buffer_size(&self) -> usize {
        real_buffer_size(&self.exclusive_bounds())
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.exclusive_bounds()[0] as usize
    }

    #[inline]
    pub fn row_len(&self) -> usize {
        self.exclusive_bounds()[1] as usize
    }

    #[inline]
    pub fn first_row(&self) -> i32 {
        self.bounds[(0, 0)]
    }

    #[inline]
    pub fn last_row(&self) -> i32 {
        self.bounds[(0, 1)]
    }

    pub fn coord_to_linear(&self, coord: &Coord) -> usize {
        coord_to_linear(&(coord - self.min()), &self.exclusive_bounds())
    }

    pub fn linear_to_coord(&self, index: usize) -> Coord {
        linear_to_coord(index, &self.exclusive_bounds()) + self.min()
    }

    /// Linear index of the first cell of a world row.
    pub fn row_offset(&self, row: i32) -> usize {
        debug_assert!(self.contains_row(row));
        (row - self.first_row()) as usize * self.row_len()
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        for d in 0..2 {
            if coord[d] < self.bounds[(d, 0)] || coord[d] > self.bounds[(d, 1)]
            {
                return false;
            }
        }
        true
    }

    pub fn contains_row(&self, row: i32) -> bool {
        row >= self.first_row() && row <= self.last_row()
    }

    pub fn contains_box(&self, other: &Self) -> bool {
        self.contains(&other.min()) && self.contains(&other.max())
    }

    pub fn min(&self) -> Coord {
        self.bounds.column(0).into()
    }

    pub fn max(&self) -> Coord {
        self.bounds.column(1).into()
    }

    /// Check that max >= min
    pub fn check_validity(&self) -> bool {
        (0..2).all(|d| self.bounds[(d, 0)] <= self.bounds[(d, 1)])
    }

    /// Contained coords in linear ordering.
    pub fn coord_iter(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.buffer_size()).map(|i| self.linear_to_coord(i))
    }
}
