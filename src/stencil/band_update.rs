use crate::domain::*;
use crate::stencil::*;
use crate::util::*;
use rayon::prelude::*;

/// Apply the heat stencil to every owned cell that is not on a global edge.
///
/// `input` and `output` must both cover `owned` plus one ghost row on each
/// side. Row neighbors of the first and last owned rows come from the
/// ghost rows of `input`, so the exchange for this step has to be done.
/// Global edge rows and columns of `output` are left untouched for the
/// boundary condition to fill in.
///
/// Rows are split into rayon tasks of roughly `chunk_size` cells.
pub fn apply_band<DomainType: DomainView + Send>(
    stencil: &HeatStencil,
    input: &DomainType,
    output: &mut DomainType,
    owned: &GridBox,
    nx: usize,
    chunk_size: usize,
) {
    profiling::scope!("stencil: band update");
    debug_assert_eq!(input.grid_box(), output.grid_box());
    debug_assert!(input.grid_box().contains_box(&owned.grow_rows(1)));

    let ny = owned.row_len();
    if ny < 3 {
        // Every column is an edge column.
        return;
    }
    let first_row = owned.first_row();
    let last_interior = nx as i32 - 2;
    let rows_per_task = (chunk_size / ny).max(1);

    output
        .rows_mut(first_row, owned.row_count())
        .par_chunks_mut(rows_per_task * ny)
        .enumerate()
        .for_each(|(task, out_rows)| {
            let task_first = first_row + (task * rows_per_task) as i32;
            for (i, out_row) in out_rows.chunks_exact_mut(ny).enumerate() {
                let row = task_first + i as i32;
                if row < 1 || row > last_interior {
                    continue;
                }
                let above = input.row(row - 1);
                let middle = input.row(row);
                let below = input.row(row + 1);
                for j in 1..ny - 1 {
                    out_row[j] = stencil.apply(&[
                        below[j],
                        middle[j - 1],
                        above[j],
                        middle[j + 1],
                        middle[j],
                    ]);
                }
            }
        });
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn field(
        owned: &GridBox,
        f: impl Fn(Coord) -> f64 + Send + Sync,
    ) -> OwnedDomain {
        let mut d = OwnedDomain::new(owned.grow_rows(1));
        d.par_set_values(f, 7);
        d
    }

    #[test]
    fn flat_field_test() {
        let stencil = HeatStencil::new(0.01, 0.1, 1.0, 1.0).unwrap();
        let owned = GridBox::rows(2, 4, 6);
        let input = field(&owned, |_| 2.5);
        let mut output = field(&owned, |_| -1.0);
        apply_band(&stencil, &input, &mut output, &owned, 10, 5);

        for c in owned.coord_iter() {
            let v = output.view(&c);
            if c[1] == 0 || c[1] == 5 {
                assert_eq!(v, -1.0);
            } else {
                assert_approx_eq!(f64, v, 2.5);
            }
        }
        // Ghost rows of the output are not owned.
        assert_eq!(output.row(1), &[-1.0; 6]);
        assert_eq!(output.row(6), &[-1.0; 6]);
    }

    #[test]
    fn reads_ghost_rows_test() {
        // Hot ghost row above a cold band, the first owned row warms up.
        let stencil = HeatStencil::new(1.0, 0.2, 1.0, 1.0).unwrap();
        let owned = GridBox::rows(3, 2, 5);
        let input = field(&owned, |c| if c[0] == 2 { 1.0 } else { 0.0 });
        let mut output = field(&owned, |_| 0.0);
        apply_band(&stencil, &input, &mut output, &owned, 10, 1);

        assert_eq!(output.row(3), &[0.0, 0.2, 0.2, 0.2, 0.0]);
        assert_eq!(output.row(4), &[0.0; 5]);
    }

    #[test]
    fn skips_global_edge_rows_test() {
        let stencil = HeatStencil::new(1.0, 0.2, 1.0, 1.0).unwrap();
        // Band owns all of a 4 x 4 grid.
        let owned = GridBox::grid(4, 4);
        let input = field(&owned, |c| (c[0] * 4 + c[1]) as f64);
        let mut output = field(&owned, |_| -7.0);
        apply_band(&stencil, &input, &mut output, &owned, 4, 3);

        assert_eq!(output.row(0), &[-7.0; 4]);
        assert_eq!(output.row(3), &[-7.0; 4]);
        // Linear field is a fixed point of the discrete laplacian.
        assert_approx_eq!(f64, output.view(&vector![1, 1]), 5.0);
        assert_approx_eq!(f64, output.view(&vector![2, 2]), 10.0);
    }

    #[test]
    fn chunking_is_invisible_test() {
        let stencil = HeatStencil::new(0.5, 0.1, 1.0, 1.0).unwrap();
        let owned = GridBox::rows(5, 9, 11);
        let input = field(&owned, |c| ((c[0] * 31 + c[1] * 17) % 13) as f64);
        let mut a = field(&owned, |_| 0.0);
        let mut b = field(&owned, |_| 0.0);
        apply_band(&stencil, &input, &mut a, &owned, 40, 1);
        apply_band(&stencil, &input, &mut b, &owned, 40, 1000);
        assert_eq!(a.buffer(), b.buffer());
    }
}
