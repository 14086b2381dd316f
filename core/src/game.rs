use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Encoded value of a hidden blank cell, since `-0` cannot be told apart from a shown `0`.
pub const HIDDEN_BLANK: i8 = -10;

/// Player-visible state of a cell, carrying the board value underneath.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden(i8),
    Shown(i8),
}

impl CellState {
    /// Integer form used by the revealed grid: hidden cells are negative, shown cells are `>= 0`.
    ///
    /// A shown mine encodes as `9`.
    pub const fn encode(self) -> i8 {
        use CellState::*;
        match self {
            Hidden(0) => HIDDEN_BLANK,
            Hidden(MINE) => MINE,
            Hidden(value) => -value,
            Shown(value) => value.abs(),
        }
    }

    pub const fn value(self) -> i8 {
        match self {
            Self::Hidden(value) | Self::Shown(value) => value,
        }
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Shown(_))
    }

    pub const fn is_hidden_blank(self) -> bool {
        matches!(self, Self::Hidden(0))
    }

    const fn reveal(self) -> Self {
        Self::Shown(self.value())
    }
}

/// What a renderer needs to know about one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Board value, [`MINE`] for mines.
    pub value: i8,
    pub revealed: bool,
}

/// A play session over a private copy of a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    cells: Array2<CellState>,
    moves: Vec<Coordinate>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        let cells = board.field().map(|&value| CellState::Hidden(value));
        Self {
            board,
            cells,
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// Every cleared coordinate in the order it was requested.
    pub fn moves(&self) -> &[Coordinate] {
        &self.moves
    }

    pub fn cell_at(&self, coords: Coordinate) -> Option<CellState> {
        coords
            .to_nd_index(self.cells.dim())
            .map(|index| self.cells[index])
    }

    pub fn is_revealed(&self, coords: Coordinate) -> bool {
        self.cell_at(coords).is_some_and(CellState::is_revealed)
    }

    /// Encoded grid, indexed `[y, x]`, see [`CellState::encode`].
    pub fn revealed(&self) -> Array2<i8> {
        self.cells.map(|cell| cell.encode())
    }

    pub fn grid_snapshot(&self) -> Array2<CellView> {
        self.cells.map(|&cell| CellView {
            value: cell.value(),
            revealed: cell.is_revealed(),
        })
    }

    /// Reveals `coords`, flooding outward through hidden blank cells, and records the move.
    ///
    /// Blank cells open every hidden neighbor; hints and mines are shown but stop the fill. Clearing a
    /// shown or out-of-range cell changes nothing except the move list. Returns how many cells were
    /// newly shown.
    pub fn clear(&mut self, coords: Coordinate) -> usize {
        let dim = self.cells.dim();
        let mut shown = 0;
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let Some(index) = visit_coords.to_nd_index(dim) else {
                continue;
            };

            let cell = self.cells[index];
            if cell.is_hidden_blank() {
                to_visit.extend(visit_coords.neighbors().filter(|&pos| {
                    pos.to_nd_index(dim)
                        .is_some_and(|index| !self.cells[index].is_revealed())
                }));
            }

            if !cell.is_revealed() {
                self.cells[index] = cell.reveal();
                shown += 1;
            }
        }

        self.moves.push(coords);
        log::trace!(
            "Cleared ({}, {}), {} cells shown",
            coords.x,
            coords.y,
            shown
        );
        shown
    }
}
