use crate::error::*;
use crate::util::*;

/// Forward-time central-space 5 point heat stencil.
///
/// Neighbors are passed in the order of [`HeatStencil::offsets`]:
/// row below, column left, row above, column right, center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HeatStencil {
    alpha: f64,
    dt: f64,
    dx2: f64,
    dy2: f64,
}

impl HeatStencil {
    /// Neighbor offsets as `[row, column]`.
    pub const OFFSETS: [[i32; 2]; 5] =
        [[1, 0], [0, -1], [-1, 0], [0, 1], [0, 0]];

    /// Arithmetic operations per updated cell.
    pub const OPS_PER_CELL: usize = 9;

    /// Fails unless every input is positive and finite and `dt` satisfies
    /// `dt <= 0.25 * min(dx^2, dy^2) / alpha`.
    pub fn new(alpha: f64, dt: f64, dx: f64, dy: f64) -> Result<Self> {
        for (name, v) in [("alpha", alpha), ("dt", dt), ("dx", dx), ("dy", dy)]
        {
            if !(v.is_finite() && v > 0.0) {
                return Err(HeatError::configuration(format!(
                    "{name} must be positive and finite, got {v}"
                )));
            }
        }

        let limit = Self::max_stable_dt(alpha, dx, dy);
        if dt > limit {
            return Err(HeatError::configuration(format!(
                "time step {dt:e} violates the CFL limit {limit:e} \
                 (0.25 * min(dx^2, dy^2) / alpha)"
            )));
        }

        Ok(HeatStencil {
            alpha,
            dt,
            dx2: dx * dx,
            dy2: dy * dy,
        })
    }

    /// Largest stable time step for the explicit 2D scheme.
    pub fn max_stable_dt(alpha: f64, dx: f64, dy: f64) -> f64 {
        0.25 * (dx * dx).min(dy * dy) / alpha
    }

    pub fn offsets() -> [Coord; 5] {
        Self::OFFSETS.map(|[r, c]| vector![r, c])
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn apply(&self, args: &[f64; 5]) -> f64 {
        let below = args[0];
        let left = args[1];
        let above = args[2];
        let right = args[3];
        let middle = args[4];
        middle
            + self.alpha
                * self.dt
                * ((below - 2.0 * middle + above) / self.dx2
                    + (right - 2.0 * middle + left) / self.dy2)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn cfl_rejection_test() {
        assert!(matches!(
            HeatStencil::new(1.0, 0.5, 1.0, 1.0),
            Err(HeatError::Configuration(_))
        ));
        assert!(HeatStencil::new(1.0, 0.2, 1.0, 1.0).is_ok());
        // The limit itself is stable.
        assert!(HeatStencil::new(1.0, 0.25, 1.0, 1.0).is_ok());
        // Smallest spacing decides.
        assert!(HeatStencil::new(1.0, 0.2, 1.0, 0.5).is_err());
    }

    #[test]
    fn rejects_non_positive_test() {
        assert!(HeatStencil::new(0.0, 0.1, 1.0, 1.0).is_err());
        assert!(HeatStencil::new(1.0, 0.0, 1.0, 1.0).is_err());
        assert!(HeatStencil::new(1.0, 0.1, -1.0, 1.0).is_err());
        assert!(HeatStencil::new(1.0, f64::NAN, 1.0, 1.0).is_err());
        assert!(HeatStencil::new(f64::INFINITY, 0.1, 1.0, 1.0).is_err());
    }

    #[test]
    fn apply_test() {
        let s = HeatStencil::new(1.0, 0.2, 1.0, 1.0).unwrap();
        // Flat field is a fixed point.
        assert_approx_eq!(f64, s.apply(&[3.0; 5]), 3.0);
        // Single hot cell loses 4 * 0.2 of its heat.
        assert_approx_eq!(f64, s.apply(&[0.0, 0.0, 0.0, 0.0, 1.0]), 0.2);
        // Each neighbor contributes 0.2.
        assert_approx_eq!(f64, s.apply(&[1.0, 0.0, 0.0, 0.0, 0.0]), 0.2);
        assert_approx_eq!(f64, s.apply(&[0.0, 0.0, 0.0, 1.0, 0.0]), 0.2);
    }

    #[test]
    fn anisotropic_apply_test() {
        // dx = 1, dy = 2: row neighbors weigh 4 times the column neighbors.
        let s = HeatStencil::new(1.0, 0.2, 1.0, 2.0).unwrap();
        let row_only = s.apply(&[1.0, 0.0, 1.0, 0.0, 0.0]);
        let col_only = s.apply(&[0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_approx_eq!(f64, row_only, 4.0 * col_only);
    }

    #[test]
    fn offsets_test() {
        let o = HeatStencil::offsets();
        assert_eq!(o[0], vector![1, 0]);
        assert_eq!(o[4], vector![0, 0]);
    }
}
