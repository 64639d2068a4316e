//! Ray picking against the cubies' oriented boxes.

use glam::Vec3;

use crate::camera::Ray;
use crate::cubie::CubieId;
use crate::geometry::{Axis, Transform};

/// Half the edge length of a cubie's pickable box.
pub const CUBIE_HALF_EXTENT: f32 = 0.5;

/// The cubie face under the pointer when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub cubie: CubieId,
    /// Outward normal of the touched face in the cubie's own frame.
    pub local_normal: Vec3,
    /// World-space hit point.
    pub point: Vec3,
    /// The cubie's world transform at the moment of the pick.
    pub transform: Transform,
}

impl Pick {
    /// The touched face's outward normal in world space.
    pub fn world_normal(&self) -> Vec3 {
        self.transform.transform_vector(self.local_normal)
    }
}

/// Returns the nearest cubie face hit by `ray`, if any.
///
/// Cubies containing the ray origin are skipped.
pub fn pick(
    cubies: impl IntoIterator<Item = (CubieId, Transform)>,
    ray: Ray,
    half_extent: f32,
) -> Option<Pick> {
    let mut nearest: Option<(f32, Pick)> = None;

    for (cubie, transform) in cubies {
        let to_local = transform.inverse();
        let origin = to_local.transform_point(ray.origin);
        let direction = to_local.transform_vector(ray.direction);
        let Some((t, local_normal)) = intersect_box(origin, direction, half_extent) else {
            continue;
        };
        if nearest.as_ref().is_some_and(|&(best, _)| best <= t) {
            continue;
        }
        nearest = Some((
            t,
            Pick {
                cubie,
                local_normal,
                point: ray.origin + ray.direction * t,
                transform,
            },
        ));
    }

    nearest.map(|(_, pick)| pick)
}

/// Slab test against the axis-aligned box `[-h, h]^3`. Returns the entry
/// distance and the outward normal of the entry face.
fn intersect_box(origin: Vec3, direction: Vec3, h: f32) -> Option<(f32, Vec3)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in Axis::ALL {
        let o = axis.component(origin);
        let d = axis.component(direction);
        if d.abs() < f32::EPSILON {
            // parallel to this slab
            if o.abs() > h {
                return None;
            }
            continue;
        }
        let t0 = (-h - o) / d;
        let t1 = (h - o) / d;
        let (near, far) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
        if near > t_enter {
            t_enter = near;
            normal = axis.unit() * -d.signum();
        }
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    (t_enter >= 0.0 && t_exit >= t_enter).then_some((t_enter, normal))
}
