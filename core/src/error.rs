use thiserror::Error;

use crate::{Board, Coordinate};

/// Reasons a board could not be generated at all.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Width and height must be between 1 and {max}, got {width}x{height}")]
    InvalidSize {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("Board of {cells} cells cannot hold {mines} mines")]
    TooManyMines { mines: usize, cells: usize },
    #[error("Field rows have differing lengths")]
    RaggedField,
}

/// A board broke one of its invariants.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Too many mines placed, actual {actual}, expected {expected}")]
    TooManyMines { actual: usize, expected: usize },
    #[error("Too few mines placed, actual {actual}, expected {expected}")]
    TooFewMines { actual: usize, expected: usize },
    #[error("Hint at ({}, {}) is {hint} but {counted} adjacent mines were counted", .coords.x, .coords.y)]
    HintMismatch {
        coords: Coordinate,
        hint: i8,
        counted: u8,
    },
}

/// Generation finished but the result failed validation; the board is kept for inspection.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Board generation failed, board is invalid: {error}")]
pub struct InvalidBoard {
    pub board: Board,
    #[source]
    pub error: ValidationError,
}

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Could not encode game record")]
    Encode(#[source] serde_json::Error),
    #[error("Malformed game record")]
    Decode(#[source] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Could not regenerate board from record")]
    Generation(#[from] GenerationError),
    #[error("Record regenerated an invalid board")]
    InvalidBoard(#[from] InvalidBoard),
}
