//! Axes, moves, and the rigid transforms that carry cubies around the cube.
//!
//! Grid coordinates are integer triples in `{-1, 0, 1}` with the cube centred
//! on the origin, one world unit per cell. A positive quarter turn follows the
//! right-hand rule about the positive named axis.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

use glam::{IVec3, Mat3, Quat, Vec3};

use crate::error::ParseMoveError;

/// Integer cell position of a cubie.
pub type GridCoord = IVec3;

/// The three valid layer indices along any axis.
pub const LAYER_INDICES: [i32; 3] = [-1, 0, 1];

/// One of the three spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis in a vector.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the positive axis.
    pub const fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    #[inline]
    pub fn grid_component(self, coord: GridCoord) -> i32 {
        coord[self.index()]
    }

    #[inline]
    pub fn component(self, v: Vec3) -> f32 {
        v[self.index()]
    }

    pub const fn as_char(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Sense of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Counter-clockwise looking down the positive axis (right-hand rule).
    Positive,
    Negative,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Positive, Direction::Negative];

    /// `+1` or `-1`.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }

    pub const fn from_positive(positive: bool) -> Self {
        if positive {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    pub const fn reversed(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// A discrete quarter turn of one layer.
///
/// The layer index is deliberately not validated here: the engine treats a
/// move whose layer selects no cubies as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub axis: Axis,
    pub layer: i32,
    pub direction: Direction,
}

impl Move {
    pub const fn new(axis: Axis, layer: i32, direction: Direction) -> Self {
        Self {
            axis,
            layer,
            direction,
        }
    }

    /// The move that undoes this one.
    pub const fn inverse(self) -> Self {
        Self {
            direction: self.direction.reversed(),
            ..self
        }
    }

    /// Target angle of the turn in radians.
    #[inline]
    pub fn angle(self) -> f32 {
        FRAC_PI_2 * self.direction.sign() as f32
    }

    /// Rotation of the whole turn.
    pub fn rotation(self) -> Quat {
        Quat::from_axis_angle(self.axis.unit(), self.angle())
    }

    pub fn has_valid_layer(self) -> bool {
        LAYER_INDICES.contains(&self.layer)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Positive => '+',
            Direction::Negative => '-',
        };
        write!(f, "{}{}{}", self.axis, self.layer, dir)
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let axis = match chars.next() {
            None => return Err(ParseMoveError::Empty),
            Some('x' | 'X') => Axis::X,
            Some('y' | 'Y') => Axis::Y,
            Some('z' | 'Z') => Axis::Z,
            Some(other) => return Err(ParseMoveError::Axis(other)),
        };
        let direction = match chars.next_back() {
            Some('+') => Direction::Positive,
            Some('-') => Direction::Negative,
            _ => return Err(ParseMoveError::Direction(s.to_owned())),
        };
        let layer_text = chars.as_str();
        let layer = layer_text
            .parse::<i32>()
            .ok()
            .filter(|layer| LAYER_INDICES.contains(layer))
            .ok_or_else(|| ParseMoveError::Layer(layer_text.to_owned()))?;
        Ok(Move::new(axis, layer, direction))
    }
}

/// Applies a quarter turn to a grid coordinate using exact integer math.
///
/// Must agree with `Move::rotation` on every cell.
pub const fn quarter_turn(coord: GridCoord, axis: Axis, direction: Direction) -> GridCoord {
    let (x, y, z) = (coord.x, coord.y, coord.z);
    let (x, y, z) = match (axis, direction) {
        (Axis::X, Direction::Positive) => (x, -z, y),
        (Axis::X, Direction::Negative) => (x, z, -y),
        (Axis::Y, Direction::Positive) => (z, y, -x),
        (Axis::Y, Direction::Negative) => (-z, y, x),
        (Axis::Z, Direction::Positive) => (-y, x, z),
        (Axis::Z, Direction::Negative) => (y, -x, z),
    };
    IVec3::new(x, y, z)
}

/// Orientation of a cubie at rest, as an exact integer rotation matrix
/// (columns are the images of the local x, y, z axes).
pub type Orientation = [IVec3; 3];

/// A rigid transform: rotation followed by translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    pub const fn from_rotation(rotation: Quat) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation,
        }
    }

    /// Transform placing a cubie at rest at `coord` with identity orientation.
    pub fn at_grid(coord: GridCoord) -> Self {
        Self::from_translation(coord.as_vec3())
    }

    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            translation: -(rotation * self.translation),
            rotation,
        }
    }

    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.translation
    }

    /// Rotates a direction. Normals transform the same way since the
    /// transform is rigid.
    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }

    /// Removes floating-point drift: translation rounded to the nearest
    /// integer cell, rotation rounded to the nearest multiple of 90° about
    /// each axis.
    pub fn snapped(&self) -> Self {
        Self {
            translation: self.translation.round(),
            rotation: snap_rotation(self.rotation),
        }
    }

    /// The grid cell nearest to this transform's translation.
    pub fn grid_position(&self) -> GridCoord {
        self.translation.round().as_ivec3()
    }

    /// The nearest axis-aligned orientation.
    pub fn orientation(&self) -> Orientation {
        let m = Mat3::from_quat(self.rotation);
        [
            m.x_axis.round().as_ivec3(),
            m.y_axis.round().as_ivec3(),
            m.z_axis.round().as_ivec3(),
        ]
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// Composes `self` (parent) with `child`, yielding the child's transform
    /// in the parent's parent space.
    fn mul(self, child: Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }
}

fn snap_rotation(rotation: Quat) -> Quat {
    let m = Mat3::from_quat(rotation);
    let snapped = Mat3::from_cols(m.x_axis.round(), m.y_axis.round(), m.z_axis.round());
    Quat::from_mat3(&snapped).normalize()
}
