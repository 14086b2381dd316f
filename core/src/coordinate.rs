use serde::{Deserialize, Serialize};

/// Single coordinate axis. Signed so that positions outside the board stay representable.
pub type Coord = i32;

/// Two-dimensional position `(x, y)`, with `x` counting columns and `y` counting rows.
///
/// A coordinate knows nothing about the board it is used with; range checks belong to the owner of the grid.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub x: Coord,
    pub y: Coord,
}

/// Offsets of the 3x3 block around a cell, origin included, row-major over `(dy, dx)`.
const BLOCK_OFFSETS: [(Coord, Coord); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Coordinate {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Returns a copy translated by `(dx, dy)`.
    pub const fn offset(self, dx: Coord, dy: Coord) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// The 3x3 block centered on `self`, including `self` at position 4.
    ///
    /// Anything counting neighbors should use [`Coordinate::neighbors`] instead.
    pub fn adjacent(self) -> impl Iterator<Item = Coordinate> {
        BLOCK_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// The 8 surrounding cells in the same order as [`Coordinate::adjacent`], without `self`.
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        BLOCK_OFFSETS
            .into_iter()
            .filter(|&offset| offset != (0, 0))
            .map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Converts to an `ndarray` index `[y, x]` when inside a grid of `(height, width)`.
    pub fn to_nd_index(self, (height, width): (usize, usize)) -> Option<[usize; 2]> {
        let x = usize::try_from(self.x).ok()?;
        let y = usize::try_from(self.y).ok()?;
        (x < width && y < height).then_some([y, x])
    }

    /// Inverse of [`Coordinate::to_nd_index`].
    pub(crate) fn from_nd_index([y, x]: [usize; 2]) -> Self {
        // grids are capped at `Coord::MAX` per axis when built
        Self::new(x as Coord, y as Coord)
    }
}

impl From<(Coord, Coord)> for Coordinate {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}
