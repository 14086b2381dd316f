use core::cmp::Ordering;
use ndarray::Array2;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Field value marking a mine. Every other cell holds its adjacent mine count, `0..=8`.
pub const MINE: i8 = -9;

/// Seed driving board generation. Stored verbatim in game records.
pub type Seed = i64;

/// Mine layout plus hint numbers, immutable once generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    mines: usize,
    field: Array2<i8>,
    seed: Seed,
}

impl Board {
    /// Places `config.mines` mines by rejection sampling, fills in hints, then validates the result.
    ///
    /// The same `config` and `seed` always produce the same field, which is what lets a saved game keep
    /// only its seed and moves.
    pub fn generate(config: BoardConfig, seed: Seed) -> Result<Generated, GenerationError> {
        let BoardConfig {
            width,
            height,
            mines,
        } = config.check()?;

        let mut field: Array2<i8> = Array2::zeros((height, width));
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        let mut placed = 0;
        while placed < mines {
            let x = rng.random_range(0..width);
            let y = rng.random_range(0..height);
            if field[[y, x]] == MINE {
                // a repeat draw does not count towards progress
                continue;
            }
            field[[y, x]] = MINE;
            placed += 1;

            let dim = field.dim();
            for pos in Coordinate::from_nd_index([y, x]).neighbors() {
                if let Some(index) = pos.to_nd_index(dim)
                    && field[index] != MINE
                {
                    field[index] += 1;
                }
            }
        }

        let board = Self { mines, field, seed };
        let verdict = board.validate();
        match &verdict {
            Ok(()) => log::debug!(
                "Generated {}x{} board with {} mines from seed {}",
                width,
                height,
                mines,
                seed
            ),
            Err(error) => log::warn!("Generated board from seed {} is invalid: {}", seed, error),
        }
        Ok(Generated { board, verdict })
    }

    /// Builds a board from a literal grid of rows. The result is not validated.
    pub fn from_field(mines: usize, rows: &[Vec<i8>], seed: Seed) -> Result<Self, GenerationError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        BoardConfig::new(width, height, 0).check()?;
        if rows.iter().any(|row| row.len() != width) {
            return Err(GenerationError::RaggedField);
        }

        let field = Array2::from_shape_fn((height, width), |(y, x)| rows[y][x]);
        Ok(Self { mines, field, seed })
    }

    /// Recounts mines and hints from scratch, reporting the first broken invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let actual = self.field.iter().filter(|&&value| value == MINE).count();
        let expected = self.mines;
        match actual.cmp(&expected) {
            Ordering::Greater => return Err(ValidationError::TooManyMines { actual, expected }),
            Ordering::Less => return Err(ValidationError::TooFewMines { actual, expected }),
            Ordering::Equal => {}
        }

        for (index, &hint) in self.field.indexed_iter() {
            if hint == MINE {
                continue;
            }
            let coords = Coordinate::from_nd_index(index.into());
            let counted = self.adjacent_mine_count(coords);
            if i16::from(hint) != i16::from(counted) {
                return Err(ValidationError::HintMismatch {
                    coords,
                    hint,
                    counted,
                });
            }
        }

        Ok(())
    }

    pub fn width(&self) -> usize {
        self.field.ncols()
    }

    pub fn height(&self) -> usize {
        self.field.nrows()
    }

    pub fn mines(&self) -> usize {
        self.mines
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig::new(self.width(), self.height(), self.mines)
    }

    /// Raw field, indexed `[y, x]`.
    pub fn field(&self) -> &Array2<i8> {
        &self.field
    }

    pub fn is_in_range(&self, y: Coord, x: Coord) -> bool {
        Coordinate::new(x, y).to_nd_index(self.field.dim()).is_some()
    }

    pub fn value_at(&self, coords: Coordinate) -> Option<i8> {
        coords
            .to_nd_index(self.field.dim())
            .map(|index| self.field[index])
    }

    pub fn contains_mine(&self, coords: Coordinate) -> bool {
        self.value_at(coords) == Some(MINE)
    }

    /// Number of mines among the in-range neighbors of `coords`, never counting `coords` itself.
    pub fn adjacent_mine_count(&self, coords: Coordinate) -> u8 {
        coords
            .neighbors()
            .filter(|&pos| self.contains_mine(pos))
            .count()
            .try_into()
            .unwrap_or(u8::MAX)
    }
}

/// A freshly generated board together with its validation verdict.
///
/// The board is only reachable through methods that also hand over the verdict.
#[must_use = "the verdict of a generated board has to be checked before the board is used"]
#[derive(Clone, Debug, PartialEq)]
pub struct Generated {
    board: Board,
    verdict: Result<(), ValidationError>,
}

impl Generated {
    pub fn is_valid(&self) -> bool {
        self.verdict.is_ok()
    }

    pub fn verdict(&self) -> Result<(), ValidationError> {
        self.verdict
    }

    /// The board if it passed validation, otherwise the board and the failure together.
    pub fn into_valid(self) -> Result<Board, InvalidBoard> {
        match self.verdict {
            Ok(()) => Ok(self.board),
            Err(error) => Err(InvalidBoard {
                board: self.board,
                error,
            }),
        }
    }

    pub fn into_parts(self) -> (Board, Result<(), ValidationError>) {
        (self.board, self.verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine_count(board: &Board) -> usize {
        board.field().iter().filter(|&&value| value == MINE).count()
    }

    fn generate(width: usize, height: usize, mines: usize, seed: Seed) -> Board {
        Board::generate(BoardConfig::new(width, height, mines), seed)
            .unwrap()
            .into_valid()
            .unwrap()
    }

    #[test]
    fn generated_boards_pass_validation() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..500 {
            let width = rng.random_range(1..=24);
            let height = rng.random_range(1..=24);
            let mines = rng.random_range(0..=width * height);
            let seed: Seed = rng.random();

            let generated = Board::generate(BoardConfig::new(width, height, mines), seed).unwrap();
            assert_eq!(generated.verdict(), Ok(()), "{width}x{height} {mines} mines seed {seed}");

            let (board, _) = generated.into_parts();
            assert_eq!(mine_count(&board), mines);
            assert_eq!(board.width(), width);
            assert_eq!(board.height(), height);
        }
    }

    #[test]
    fn hints_match_neighbor_mines() {
        let board = generate(16, 16, 40, 7);

        for (index, &value) in board.field().indexed_iter() {
            let coords = Coordinate::from_nd_index(index.into());
            if value != MINE {
                assert_eq!(value, board.adjacent_mine_count(coords) as i8);
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let first = generate(30, 16, 99, -42);
        let second = generate(30, 16, 99, -42);

        assert_eq!(first.field(), second.field());
        assert_eq!(first.seed(), -42);
    }

    #[test]
    fn different_seeds_give_different_layouts() {
        let first = generate(16, 16, 40, 1);
        let second = generate(16, 16, 40, 2);

        assert_ne!(first.field(), second.field());
    }

    #[test]
    fn full_and_empty_boards() {
        let full = generate(3, 2, 6, 9);
        assert!(full.field().iter().all(|&value| value == MINE));

        let empty = generate(3, 2, 0, 9);
        assert!(empty.field().iter().all(|&value| value == 0));
    }

    #[test]
    fn too_many_mines_is_rejected() {
        assert_eq!(
            Board::generate(BoardConfig::new(2, 2, 5), 1),
            Err(GenerationError::TooManyMines { mines: 5, cells: 4 })
        );
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        assert!(matches!(
            Board::generate(BoardConfig::new(0, 3, 0), 1),
            Err(GenerationError::InvalidSize { .. })
        ));
        assert!(matches!(
            Board::from_field(0, &[], 0),
            Err(GenerationError::InvalidSize { .. })
        ));
    }

    #[test]
    fn ragged_fields_are_rejected() {
        let rows = vec![vec![0, 0], vec![0]];

        assert_eq!(
            Board::from_field(0, &rows, 0),
            Err(GenerationError::RaggedField)
        );
    }

    #[test]
    fn validate_accepts_consistent_field() {
        let rows = vec![
            vec![2, 2, 1, 0],
            vec![-9, -9, 1, 0],
            vec![-9, 4, 2, 1],
            vec![1, 2, -9, 1],
            vec![0, 1, 1, 1],
        ];
        let board = Board::from_field(4, &rows, 0).unwrap();

        assert_eq!(board.validate(), Ok(()));
        assert_eq!((board.width(), board.height()), (4, 5));
        assert!(board.is_in_range(4, 3));
        assert!(!board.is_in_range(3, 4));
    }

    #[test]
    fn validate_accepts_all_mines() {
        let board = Board::from_field(4, &[vec![-9, -9], vec![-9, -9]], 0).unwrap();

        assert_eq!(board.validate(), Ok(()));
    }

    #[test]
    fn validate_reports_mine_count_mismatch() {
        let rows = vec![vec![-9, 1], vec![1, 1]];

        assert_eq!(
            Board::from_field(2, &rows, 0).unwrap().validate(),
            Err(ValidationError::TooFewMines {
                actual: 1,
                expected: 2
            })
        );
        assert_eq!(
            Board::from_field(0, &rows, 0).unwrap().validate(),
            Err(ValidationError::TooManyMines {
                actual: 1,
                expected: 0
            })
        );
    }

    #[test]
    fn validate_reports_wrong_hint() {
        let rows = vec![vec![-9, 1, 0], vec![1, 2, 0]];
        let board = Board::from_field(1, &rows, 0).unwrap();

        assert_eq!(
            board.validate(),
            Err(ValidationError::HintMismatch {
                coords: Coordinate::new(1, 1),
                hint: 2,
                counted: 1,
            })
        );
    }

    #[test]
    fn invalid_board_is_still_handed_back() {
        let rows = vec![vec![-9, 0]];
        let board = Board::from_field(1, &rows, 3).unwrap();
        let generated = Generated {
            verdict: board.validate(),
            board: board.clone(),
        };

        assert!(!generated.is_valid());
        let invalid = generated.into_valid().unwrap_err();
        assert_eq!(invalid.board, board);
        assert_eq!(
            invalid.error,
            ValidationError::HintMismatch {
                coords: Coordinate::new(1, 0),
                hint: 0,
                counted: 1,
            }
        );
    }
}
