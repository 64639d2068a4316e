//! Selection of the nine cubies that form one slice of the cube.
//!
//! A layer is never stored. It is recomputed from grid positions each time a
//! turn starts.

use crate::cubie::{Cubie, CubieId, CubieStore};
use crate::geometry::Axis;

/// Cubies per layer.
pub const LAYER_SIZE: usize = 9;

/// Whether `cubie` rests in layer `index` along `axis`.
#[inline]
pub fn in_layer(cubie: &Cubie, axis: Axis, index: i32) -> bool {
    axis.grid_component(cubie.grid_position) == index
}

/// Ids of the cubies in the layer, in id order. Empty for an index outside
/// the cube.
pub fn select(store: &CubieStore, axis: Axis, index: i32) -> Vec<CubieId> {
    store
        .iter()
        .filter(|cubie| in_layer(cubie, axis, index))
        .map(|cubie| cubie.id)
        .collect()
}

/// Moves the layer's cubies out of the store.
pub(crate) fn extract(store: &mut CubieStore, axis: Axis, index: i32) -> Vec<Cubie> {
    store.take_where(|cubie| in_layer(cubie, axis, index))
}
