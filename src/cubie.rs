//! The 27 pieces of the cube and the store that owns them at rest.

use glam::IVec3;

use crate::geometry::{GridCoord, Orientation, Transform, LAYER_INDICES};

/// Number of cubies in a 3x3x3 cube.
pub const NUM_CUBIES: usize = 27;

/// Stable identity of a cubie, assigned from its solved position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubieId(pub usize);

impl CubieId {
    /// Id of the cubie whose solved position is `home`.
    ///
    /// x-major: `id = (x+1)*9 + (y+1)*3 + (z+1)`.
    pub const fn from_home(home: GridCoord) -> Self {
        Self(((home.x + 1) * 9 + (home.y + 1) * 3 + (home.z + 1)) as usize)
    }

    /// Solved position of this cubie.
    pub const fn home(self) -> GridCoord {
        let id = self.0 as i32;
        IVec3::new(id / 9 - 1, (id / 3) % 3 - 1, id % 3 - 1)
    }
}

/// One piece of the cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubie {
    pub id: CubieId,
    /// Cell this cubie occupies at rest.
    pub grid_position: GridCoord,
    /// Continuous world transform used for rendering. Congruent to
    /// `grid_position` with an axis-aligned rotation between turns.
    pub transform: Transform,
}

impl Cubie {
    pub fn solved(id: CubieId) -> Self {
        let home = id.home();
        Self {
            id,
            grid_position: home,
            transform: Transform::at_grid(home),
        }
    }

    /// Solved position, used to decide which faces carry stickers.
    #[inline]
    pub fn home(&self) -> GridCoord {
        self.id.home()
    }

    pub fn orientation(&self) -> Orientation {
        self.transform.orientation()
    }

    /// Rounds the transform onto the grid and refreshes `grid_position`.
    pub fn snap(&mut self) {
        self.transform = self.transform.snapped();
        self.grid_position = self.transform.grid_position();
    }
}

/// Owns every cubie that is not currently attached to a pivot.
#[derive(Debug, Clone)]
pub struct CubieStore {
    cubies: Vec<Cubie>,
}

impl Default for CubieStore {
    fn default() -> Self {
        Self::solved()
    }
}

impl CubieStore {
    /// A solved cube: every cubie at its home cell with identity orientation.
    pub fn solved() -> Self {
        let cubies = (0..NUM_CUBIES).map(|id| Cubie::solved(CubieId(id))).collect();
        Self { cubies }
    }

    pub fn len(&self) -> usize {
        self.cubies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cubie> {
        self.cubies.iter()
    }

    pub fn get(&self, id: CubieId) -> Option<&Cubie> {
        self.cubies.iter().find(|cubie| cubie.id == id)
    }

    /// The cubie resting at `coord`, if it is in the store.
    pub fn at(&self, coord: GridCoord) -> Option<&Cubie> {
        self.cubies.iter().find(|cubie| cubie.grid_position == coord)
    }

    /// Removes and returns every cubie matching `predicate`.
    pub(crate) fn take_where(&mut self, mut predicate: impl FnMut(&Cubie) -> bool) -> Vec<Cubie> {
        let (taken, kept): (Vec<Cubie>, Vec<Cubie>) = std::mem::take(&mut self.cubies)
            .into_iter()
            .partition(|cubie| predicate(cubie));
        self.cubies = kept;
        taken
    }

    /// Hands cubies back to the store, keeping id order.
    pub(crate) fn restore(&mut self, cubies: impl IntoIterator<Item = Cubie>) {
        self.cubies.extend(cubies);
        self.cubies.sort_by_key(|cubie| cubie.id);
    }

    /// Whether every cubie sits at rest in the cube. A complete store has
    /// all 27 cubies on distinct cells of `{-1, 0, 1}^3`.
    pub fn is_solved(&self) -> bool {
        self.cubies.len() == NUM_CUBIES
            && self.cubies.iter().all(|cubie| {
                cubie.grid_position == cubie.home()
                    && cubie.orientation() == [IVec3::X, IVec3::Y, IVec3::Z]
            })
    }
}

/// Whether `coord` lies inside the cube.
pub fn in_range(coord: GridCoord) -> bool {
    LAYER_INDICES.contains(&coord.x)
        && LAYER_INDICES.contains(&coord.y)
        && LAYER_INDICES.contains(&coord.z)
}
