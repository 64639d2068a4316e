//! Text view of the cube's discrete state.
//!
//! The cube is printed as three z-slices side by side, rows from top (y=1)
//! to bottom (y=-1), columns x=-1..=1. Each cell shows the base-36 id of the
//! cubie resting there, or '.' if the cell is empty (its cubie is on a pivot).

use rustc_hash::FxHashSet;

use crate::cubie::{in_range, CubieStore, NUM_CUBIES};
use crate::geometry::{GridCoord, LAYER_INDICES};

/// Whether the store holds all 27 cubies on distinct in-range cells.
pub fn is_valid_permutation(store: &CubieStore) -> bool {
    let mut occupied = FxHashSet::default();
    store.len() == NUM_CUBIES
        && store
            .iter()
            .all(|cubie| in_range(cubie.grid_position) && occupied.insert(cubie.grid_position))
}

fn cell_char(store: &CubieStore, coord: GridCoord) -> char {
    store
        .at(coord)
        .and_then(|cubie| char::from_digit(cubie.id.0 as u32, 36))
        .map_or('.', |c| c.to_ascii_uppercase())
}

/// Formats the store as a human-readable grid.
pub fn format_state(store: &CubieStore) -> String {
    let mut output = String::new();

    let header: Vec<String> = LAYER_INDICES.iter().map(|z| format!("z{z:+}")).collect();
    output.push_str(&header.join("  "));
    output.push('\n');

    for y in LAYER_INDICES.into_iter().rev() {
        for (slice, z) in LAYER_INDICES.into_iter().enumerate() {
            if slice > 0 {
                output.push_str("  ");
            }
            for x in LAYER_INDICES {
                output.push(cell_char(store, GridCoord::new(x, y, z)));
            }
        }
        output.push('\n');
    }

    output
}
