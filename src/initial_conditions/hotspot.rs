use crate::util::*;

/// Circular hot region centered at `(nx / 2, ny / 2)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HotspotSpec {
    pub peak: f64,
    pub radius: f64,
}

impl HotspotSpec {
    pub const DEFAULT_PEAK: f64 = 100.0;

    /// Peak of 100 with radius `min(nx, ny) / 10` cells.
    pub fn for_grid(nx: usize, ny: usize) -> Self {
        HotspotSpec {
            peak: Self::DEFAULT_PEAK,
            radius: (nx.min(ny) / 10) as f64,
        }
    }

    /// Cells strictly closer than `radius` to the center are hot.
    pub fn contains(&self, coord: &Coord, nx: usize, ny: usize) -> bool {
        let dr = (coord[0] - (nx / 2) as i32) as f64;
        let dc = (coord[1] - (ny / 2) as i32) as f64;
        (dr * dr + dc * dc).sqrt() < self.radius
    }

    pub fn value(
        &self,
        coord: &Coord,
        nx: usize,
        ny: usize,
        background: f64,
    ) -> f64 {
        if self.contains(coord, nx, ny) {
            self.peak
        } else {
            background
        }
    }
}
