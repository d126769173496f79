use crate::util::*;

/// A mutable run of cells handed to one rayon task.
pub struct DomainChunk<'a> {
    offset: usize,
    grid_box: &'a GridBox,
    buffer: &'a mut [f64],
}

impl<'a> DomainChunk<'a> {
    pub fn new(
        offset: usize,
        grid_box: &'a GridBox,
        buffer: &'a mut [f64],
    ) -> Self {
        DomainChunk {
            offset,
            grid_box,
            buffer,
        }
    }

    pub fn coord_iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (Coord, &mut f64)> {
        self.buffer
            .iter_mut()
            .enumerate()
            .map(|(i, v): (usize, &mut f64)| {
                let linear_index = self.offset + i;
                let coord = self.grid_box.linear_to_coord(linear_index);
                (coord, v)
            })
    }
}
