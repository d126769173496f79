use crate::decomposition::RowBand;
use crate::domain::*;
use crate::error::*;
use crate::initial_conditions::*;
use crate::par_slice;
use crate::util::*;
use std::collections::TryReserveError;

/// One worker's exclusive storage: its row band plus a ghost row above and
/// below, held twice for ping-pong stepping.
///
/// Both buffers cover the halo box `[start_row - 1, end_row] x [0, ny)`.
/// Ghost rows are copies of the neighbors' boundary rows, refreshed by the
/// exchange at the start of every step. The topmost band's upper ghost and
/// the bottommost band's lower ghost sit outside the grid and are never
/// read.
pub struct LocalField {
    band: RowBand,
    nx: usize,
    ny: usize,
    current: OwnedDomain,
    next: OwnedDomain,
}

impl LocalField {
    /// Reserve `(row_count + 2) x ny` cells for each buffer.
    pub fn allocate(band: RowBand, nx: usize, ny: usize) -> Result<Self> {
        let halo = band.halo_box(ny);
        let resource_error = move |_: TryReserveError| HeatError::Resource {
            rank: band.rank,
            cells: 2 * halo.buffer_size(),
        };
        let current = OwnedDomain::try_new(halo).map_err(resource_error)?;
        let next = OwnedDomain::try_new(halo).map_err(resource_error)?;
        Ok(LocalField {
            band,
            nx,
            ny,
            current,
            next,
        })
    }

    pub fn band(&self) -> &RowBand {
        &self.band
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn owned_box(&self) -> GridBox {
        self.band.owned_box(self.ny)
    }

    /// Authoritative buffer for the current step.
    pub fn current(&self) -> &OwnedDomain {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut OwnedDomain {
        &mut self.current
    }

    pub fn next(&self) -> &OwnedDomain {
        &self.next
    }

    /// Read `current`, write `next`.
    pub fn split_mut(&mut self) -> (&OwnedDomain, &mut OwnedDomain) {
        (&self.current, &mut self.next)
    }

    /// `next` becomes `current`, the old `current` is reused as `next`.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Fill owned and ghost rows of both buffers with the initial field.
    pub fn set_initial_condition(
        &mut self,
        ic: &InitialCondition,
        bc: &DirichletCheck,
        chunk_size: usize,
    ) {
        generate_ic(&mut self.current, ic, bc, self.nx, self.ny, chunk_size);
        par_slice::copy(
            self.current.buffer(),
            self.next.buffer_mut(),
            chunk_size,
        );
    }

    fn first_row(&self) -> i32 {
        self.band.start_row as i32
    }

    fn last_row(&self) -> i32 {
        self.band.end_row() as i32 - 1
    }

    pub fn first_owned_row(&self) -> &[f64] {
        self.current.row(self.first_row())
    }

    pub fn last_owned_row(&self) -> &[f64] {
        self.current.row(self.last_row())
    }

    pub fn top_ghost(&self) -> &[f64] {
        self.current.row(self.first_row() - 1)
    }

    pub fn bottom_ghost(&self) -> &[f64] {
        self.current.row(self.last_row() + 1)
    }

    pub fn top_ghost_mut(&mut self) -> &mut [f64] {
        let row = self.first_row() - 1;
        self.current.row_mut(row)
    }

    pub fn bottom_ghost_mut(&mut self) -> &mut [f64] {
        let row = self.last_row() + 1;
        self.current.row_mut(row)
    }

    /// Owned rows of `current` as one contiguous slice, no ghosts.
    pub fn owned_values(&self) -> &[f64] {
        self.current.rows(self.first_row(), self.band.row_count)
    }

    /// Current value of an owned cell.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        (self.band.contains_row(row) && col < self.ny)
            .then(|| self.current.view(&vector![row as i32, col as i32]))
    }

    /// Largest absolute difference between `current` and `next` over the
    /// owned cells. Right after a swap this is the change made by the
    /// last step.
    pub fn max_change(&self, chunk_size: usize) -> f64 {
        let first = self.first_row();
        let n = self.band.row_count;
        par_slice::max_abs_diff(
            self.current.rows(first, n),
            self.next.rows(first, n),
            chunk_size,
        )
    }
}
