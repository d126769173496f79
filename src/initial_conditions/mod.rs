mod generate_ic;
pub mod hotspot;
pub mod rand;

pub use generate_ic::*;
pub use hotspot::HotspotSpec;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InitialCondition {
    /// Hot disc centered in the grid, edge value elsewhere.
    Hotspot(HotspotSpec),

    /// Integers in `[0, max_val)`, seeded per global row so every
    /// decomposition of the grid sees the same field.
    Random { seed: u64, max_val: i32 },
}
