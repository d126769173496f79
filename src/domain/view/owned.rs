use super::*;
use crate::util::*;
use std::collections::TryReserveError;

/// Heap buffer for a box of cells, zero initialized.
#[derive(Debug, Clone)]
pub struct OwnedDomain {
    grid_box: GridBox,
    buffer: Vec<f64>,
}

impl OwnedDomain {
    pub fn new(grid_box: GridBox) -> Self {
        OwnedDomain {
            grid_box,
            buffer: vec![0.0; grid_box.buffer_size()],
        }
    }

    /// Reports allocation failure instead of aborting,
    /// large bands should fail as a resource error.
    pub fn try_new(grid_box: GridBox) -> Result<Self, TryReserveError> {
        let n = grid_box.buffer_size();
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(n)?;
        buffer.resize(n, 0.0);
        Ok(OwnedDomain { grid_box, buffer })
    }
}

impl DomainView for OwnedDomain {
    fn grid_box(&self) -> &GridBox {
        &self.grid_box
    }

    fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut [f64] {
        &mut self.buffer
    }

    fn box_buffer_mut(&mut self) -> (&GridBox, &mut [f64]) {
        (&self.grid_box, &mut self.buffer)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn mock_step(input: &mut OwnedDomain, output: &mut OwnedDomain) {
        std::mem::swap(input, output);
    }

    #[test]
    fn swap_test() {
        let mut a = OwnedDomain::new(GridBox::grid(2, 2));
        let mut b = OwnedDomain::new(GridBox::grid(2, 2));
        let a_ptr = a.buffer().as_ptr();
        let b_ptr = b.buffer().as_ptr();
        mock_step(&mut a, &mut b);
        assert_eq!(a.buffer().as_ptr(), b_ptr);
        assert_eq!(b.buffer().as_ptr(), a_ptr);
    }

    #[test]
    fn try_new_test() {
        let d = OwnedDomain::try_new(GridBox::rows(-1, 5, 7)).unwrap();
        assert_eq!(d.buffer().len(), 35);
        assert!(d.buffer().iter().all(|v| *v == 0.0));
    }
}
