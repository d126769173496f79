use crate::util::*;

/// Number of cells for a box with the given exclusive extent.
pub fn real_buffer_size(exclusive_bound: &Coord) -> usize {
    exclusive_bound.iter().map(|d| *d as usize).product()
}

/// Row-major linear index of a coordinate relative to the box origin.
pub fn coord_to_linear(coord: &Coord, exclusive_bounds: &Coord) -> usize {
    debug_assert!(coord[0] >= 0 && coord[1] >= 0);
    coord[0] as usize * exclusive_bounds[1] as usize + coord[1] as usize
}

pub fn linear_to_coord(linear_index: usize, exclusive_bounds: &Coord) -> Coord {
    let width = exclusive_bounds[1] as usize;
    vector![(linear_index / width) as i32, (linear_index % width) as i32]
}
