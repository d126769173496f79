use crate::domain::*;
use crate::initial_conditions::rand::*;
use crate::initial_conditions::*;
use crate::util::*;

/// Fill the whole box of `domain` with the initial field.
/// The background is the edge value, and every cell on a global edge is
/// forced to the edge value in the same pass.
pub fn generate_ic<DomainType: DomainView>(
    domain: &mut DomainType,
    ic: &InitialCondition,
    bc: &DirichletCheck,
    nx: usize,
    ny: usize,
    chunk_size: usize,
) {
    profiling::scope!("generate_ic");
    match ic {
        InitialCondition::Hotspot(hotspot) => {
            let background = bc.value();
            domain.par_set_values(
                |coord: Coord| {
                    bc.check(&coord).unwrap_or_else(|| {
                        hotspot.value(&coord, nx, ny, background)
                    })
                },
                chunk_size,
            );
        }
        InitialCondition::Random { seed, max_val } => {
            rand_ic(domain, *seed, *max_val);
            let grid_box = *domain.grid_box();
            for coord in grid_box.coord_iter() {
                if let Some(v) = bc.check(&coord) {
                    domain.set_coord(&coord, v);
                }
            }
        }
    }
}
