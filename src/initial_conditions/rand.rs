use crate::domain::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Fill every row of `domain` with integers in `[0, max_val)`.
/// Each world row has its own generator, so a row holds the same values
/// no matter which band it lands in.
pub fn rand_ic<DomainType: DomainView>(
    domain: &mut DomainType,
    seed: u64,
    max_val: i32,
) {
    let (grid_box, buffer) = domain.box_buffer_mut();
    let first_row = grid_box.first_row();
    buffer
        .par_chunks_mut(grid_box.row_len())
        .enumerate()
        .for_each(|(i, row)| {
            let world_row = first_row as i64 + i as i64;
            let mut rng = StdRng::seed_from_u64(seed ^ world_row as u64);
            for v in row.iter_mut() {
                *v = rng.gen_range(0..max_val.max(1)) as f64;
            }
        });
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::util::*;

    #[test]
    fn rows_match_across_boxes_test() {
        let mut a = OwnedDomain::new(GridBox::rows(0, 6, 8));
        let mut b = OwnedDomain::new(GridBox::rows(3, 2, 8));
        rand_ic(&mut a, 17, 1024);
        rand_ic(&mut b, 17, 1024);
        assert_eq!(a.rows(3, 2), b.buffer());
        assert!(a.buffer().iter().all(|v| *v >= 0.0 && *v < 1024.0));
        assert_ne!(a.row(0), a.row(1));
    }
}
