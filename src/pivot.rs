//! Transient rotation frame that turns a layer as one rigid body.
//!
//! Attaching a cubie rewrites its transform relative to the pivot, and
//! releasing it rewrites the transform back into world space, so a cubie's
//! world transform is unchanged by either handover.

use glam::Quat;

use crate::cubie::{Cubie, CubieId};
use crate::geometry::{Axis, Transform};

/// A rotation frame at the origin holding the cubies of the turning layer.
#[derive(Debug, Clone)]
pub struct Pivot {
    axis: Axis,
    angle: f32,
    /// Attached cubies; their `transform` is relative to the pivot.
    members: Vec<Cubie>,
}

impl Pivot {
    /// Creates a zero-angle pivot about `axis` and takes ownership of `cubies`.
    pub fn attach(axis: Axis, cubies: Vec<Cubie>) -> Self {
        let mut pivot = Self {
            axis,
            angle: 0.0,
            members: Vec::with_capacity(cubies.len()),
        };
        let to_local = pivot.world_transform().inverse();
        pivot.members.extend(cubies.into_iter().map(|mut cubie| {
            cubie.transform = to_local * cubie.transform;
            cubie
        }));
        pivot
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// The pivot's own transform in world space.
    pub fn world_transform(&self) -> Transform {
        Transform::from_rotation(Quat::from_axis_angle(self.axis.unit(), self.angle))
    }

    /// Attached cubies with their current world transforms.
    pub fn world_cubies(&self) -> impl Iterator<Item = (CubieId, Transform)> + '_ {
        let frame = self.world_transform();
        self.members
            .iter()
            .map(move |cubie| (cubie.id, frame * cubie.transform))
    }

    /// Dissolves the pivot, returning its cubies with world transforms.
    ///
    /// The returned cubies are not snapped.
    pub fn release(self) -> Vec<Cubie> {
        let frame = self.world_transform();
        self.members
            .into_iter()
            .map(|mut cubie| {
                cubie.transform = frame * cubie.transform;
                cubie
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::{IVec3, Vec3};

    use super::*;
    use crate::cubie::CubieStore;
    use crate::layer;

    #[test]
    fn test_attach_preserves_world_transform() {
        let mut store = CubieStore::solved();
        let before: Vec<Transform> = layer::select(&store, Axis::Y, 1)
            .into_iter()
            .filter_map(|id| store.get(id).map(|cubie| cubie.transform))
            .collect();
        let pivot = Pivot::attach(Axis::Y, layer::extract(&mut store, Axis::Y, 1));
        let after: Vec<Transform> = pivot.world_cubies().map(|(_, t)| t).collect();
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            assert!(b.translation.abs_diff_eq(a.translation, 1e-6));
        }
    }

    #[test]
    fn test_release_applies_pivot_rotation() {
        let mut store = CubieStore::solved();
        let mut pivot = Pivot::attach(Axis::Z, layer::extract(&mut store, Axis::Z, 1));
        pivot.set_angle(FRAC_PI_2);
        let released = pivot.release();
        // +90° about z sends (1, 0, 1) to (0, 1, 1)
        let cubie = released
            .iter()
            .find(|cubie| cubie.grid_position == IVec3::new(1, 0, 1))
            .map(|cubie| cubie.transform.translation);
        assert!(cubie.is_some_and(|t| t.abs_diff_eq(Vec3::new(0.0, 1.0, 1.0), 1e-5)));
    }
}
