use crate::domain::bc::BCCheck;
use crate::domain::*;
use crate::util::*;

/// Fixed temperature on the four edges of the global grid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirichletCheck {
    value: f64,
    nx: usize,
    ny: usize,
}

impl DirichletCheck {
    pub fn new(value: f64, nx: usize, ny: usize) -> Self {
        DirichletCheck { value, nx, ny }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Reassert the edge value on every owned cell that lies on a global
    /// edge. Columns `0` and `ny - 1` for each owned row, plus the whole of
    /// global rows `0` and `nx - 1` if this band owns them.
    /// Must run after the stencil update so it overwrites those cells.
    pub fn apply<DomainType: DomainView>(
        &self,
        output: &mut DomainType,
        owned: &GridBox,
    ) {
        profiling::scope!("bc: dirichlet");
        let last_col = self.ny - 1;
        for row in owned.first_row()..=owned.last_row() {
            let cells = output.row_mut(row);
            if row == 0 || row == self.nx as i32 - 1 {
                cells.fill(self.value);
            } else {
                cells[0] = self.value;
                cells[last_col] = self.value;
            }
        }
    }
}

impl BCCheck for DirichletCheck {
    fn check(&self, coord: &Coord) -> Option<f64> {
        let on_edge = coord[0] <= 0
            || coord[0] >= self.nx as i32 - 1
            || coord[1] <= 0
            || coord[1] >= self.ny as i32 - 1;
        on_edge.then_some(self.value)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn check_test() {
        let bc = DirichletCheck::new(-2.0, 6, 5);
        assert_eq!(bc.check(&vector![0, 2]), Some(-2.0));
        assert_eq!(bc.check(&vector![5, 2]), Some(-2.0));
        assert_eq!(bc.check(&vector![3, 0]), Some(-2.0));
        assert_eq!(bc.check(&vector![3, 4]), Some(-2.0));
        assert_eq!(bc.check(&vector![-1, 2]), Some(-2.0));
        assert_eq!(bc.check(&vector![1, 1]), None);
        assert_eq!(bc.check(&vector![4, 3]), None);
    }

    #[test]
    fn apply_top_band_test() {
        // Band owning global rows 0..3 of a 6 x 4 grid.
        let owned = GridBox::rows(0, 3, 4);
        let mut d = OwnedDomain::new(owned.grow_rows(1));
        d.par_set_values(|_| 7.0, 5);

        let bc = DirichletCheck::new(1.0, 6, 4);
        bc.apply(&mut d, &owned);

        assert_eq!(d.row(0), &[1.0; 4]);
        assert_eq!(d.row(1), &[1.0, 7.0, 7.0, 1.0]);
        assert_eq!(d.row(2), &[1.0, 7.0, 7.0, 1.0]);
        // Ghost rows are not owned, they stay untouched.
        assert_eq!(d.row(-1), &[7.0; 4]);
        assert_eq!(d.row(3), &[7.0; 4]);
    }

    #[test]
    fn apply_bottom_band_test() {
        let owned = GridBox::rows(4, 2, 4);
        let mut d = OwnedDomain::new(owned.grow_rows(1));
        d.par_set_values(|_| 7.0, 5);

        let bc = DirichletCheck::new(0.0, 6, 4);
        bc.apply(&mut d, &owned);

        assert_eq!(d.row(4), &[0.0, 7.0, 7.0, 0.0]);
        assert_eq!(d.row(5), &[0.0; 4]);
        assert_eq!(d.row(3), &[7.0; 4]);
    }
}
