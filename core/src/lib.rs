use serde::{Deserialize, Serialize};

pub use board::*;
pub use coordinate::*;
pub use error::*;
pub use game::*;
pub use record::*;

mod board;
mod coordinate;
mod error;
mod game;
mod record;

/// Largest width or height a board may have, so every cell is addressable by a [`Coordinate`].
pub const MAX_SIDE: usize = Coord::MAX as usize;

/// Generation parameters of a board, everything except the seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
}

impl BoardConfig {
    pub const fn new(width: usize, height: usize, mines: usize) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub const fn total_cells(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Ensures the size is addressable and the mines fit.
    pub fn check(self) -> Result<Self, GenerationError> {
        if !(1..=MAX_SIDE).contains(&self.width) || !(1..=MAX_SIDE).contains(&self.height) {
            return Err(GenerationError::InvalidSize {
                width: self.width,
                height: self.height,
                max: MAX_SIDE,
            });
        }

        let cells = self.total_cells();
        if self.mines > cells {
            return Err(GenerationError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }

        Ok(self)
    }
}

impl From<Difficulty> for BoardConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// Classic presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const fn config(self) -> BoardConfig {
        use Difficulty::*;
        match self {
            Beginner => BoardConfig::new(8, 8, 10),
            Intermediate => BoardConfig::new(16, 16, 40),
            Expert => BoardConfig::new(30, 16, 99),
        }
    }
}
