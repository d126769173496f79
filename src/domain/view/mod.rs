mod chunk;
mod owned;

pub use chunk::*;
pub use owned::*;

use crate::util::*;
use rayon::prelude::*;

/// A buffer of cells together with the world box it covers.
pub trait DomainView: Sync {
    fn grid_box(&self) -> &GridBox;

    fn buffer(&self) -> &[f64];

    fn buffer_mut(&mut self) -> &mut [f64];

    fn box_buffer_mut(&mut self) -> (&GridBox, &mut [f64]);

    #[track_caller]
    fn view(&self, world_coord: &Coord) -> f64 {
        debug_assert!(
            self.grid_box().contains(world_coord),
            "{} does not contain {:?}",
            self.grid_box(),
            world_coord
        );
        let index = self.grid_box().coord_to_linear(world_coord);
        self.buffer()[index]
    }

    #[track_caller]
    fn set_coord(&mut self, world_coord: &Coord, value: f64) {
        debug_assert!(
            self.grid_box().contains(world_coord),
            "{} does not contain {:?}",
            self.grid_box(),
            world_coord
        );
        let index = self.grid_box().coord_to_linear(world_coord);
        self.buffer_mut()[index] = value;
    }

    /// Cells of one world row.
    fn row(&self, row: i32) -> &[f64] {
        self.rows(row, 1)
    }

    fn row_mut(&mut self, row: i32) -> &mut [f64] {
        let (grid_box, buffer) = self.box_buffer_mut();
        let start = grid_box.row_offset(row);
        let len = grid_box.row_len();
        &mut buffer[start..start + len]
    }

    /// `count` consecutive world rows starting at `first_row`.
    fn rows(&self, first_row: i32, count: usize) -> &[f64] {
        let start = self.grid_box().row_offset(first_row);
        let len = count * self.grid_box().row_len();
        &self.buffer()[start..start + len]
    }

    fn rows_mut(&mut self, first_row: i32, count: usize) -> &mut [f64] {
        let (grid_box, buffer) = self.box_buffer_mut();
        let start = grid_box.row_offset(first_row);
        let len = count * grid_box.row_len();
        &mut buffer[start..start + len]
    }

    fn par_modify_access<'a>(
        &'a mut self,
        chunk_size: usize,
    ) -> impl ParallelIterator<Item = DomainChunk<'a>> {
        let (grid_box, buffer) = self.box_buffer_mut();
        par_modify_access_impl(buffer, grid_box, chunk_size)
    }

    fn par_set_values<F: Fn(Coord) -> f64 + Send + Sync>(
        &mut self,
        f: F,
        chunk_size: usize,
    ) {
        self.par_modify_access(chunk_size)
            .for_each(|mut d: DomainChunk<'_>| {
                d.coord_iter_mut().for_each(|(world_coord, value_mut)| {
                    *value_mut = f(world_coord);
                })
            });
    }
}

/// Why not just put this into DomainView::par_modify_access?
/// Rust compiler can't figure out how to borrow the box and buffer
/// at the same time in this way.
/// By putting their borrows into one function call first we work around it.
fn par_modify_access_impl<'a>(
    buffer: &'a mut [f64],
    grid_box: &'a GridBox,
    chunk_size: usize,
) -> impl ParallelIterator<Item = DomainChunk<'a>> + 'a {
    buffer[0..grid_box.buffer_size()]
        .par_chunks_mut(chunk_size.max(1))
        .enumerate()
        .map(move |(i, buffer_chunk): (usize, &mut [f64])| {
            let offset = i * chunk_size.max(1);
            DomainChunk::new(offset, grid_box, buffer_chunk)
        })
}
