use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::*;

/// Minimal durable form of a game: generation parameters plus the moves to replay.
///
/// Field order and key names are part of the save format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub seed: Seed,
    pub width: usize,
    pub height: usize,
    pub mine_count: usize,
    pub moves: Vec<Coordinate>,
}

impl Record {
    pub fn from_game(game: &Game) -> Self {
        let board = game.board();
        Self {
            seed: board.seed(),
            width: board.width(),
            height: board.height(),
            mine_count: board.mines(),
            moves: game.moves().to_vec(),
        }
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig::new(self.width, self.height, self.mine_count)
    }

    /// Regenerates the board and replays every move in stored order.
    pub fn to_game(&self) -> Result<Game, RecordError> {
        let board = Board::generate(self.config(), self.seed)?.into_valid()?;
        let mut game = Game::new(board);
        for &coords in &self.moves {
            game.clear(coords);
        }
        log::debug!(
            "Replayed {} moves on seed {}",
            self.moves.len(),
            self.seed
        );
        Ok(game)
    }

    /// Writes the record as one line of JSON.
    pub fn encode<W: Write>(&self, mut writer: W) -> Result<(), RecordError> {
        serde_json::to_writer(&mut writer, self).map_err(RecordError::Encode)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn decode<R: Read>(reader: R) -> Result<Self, RecordError> {
        serde_json::from_reader(reader).map_err(RecordError::Decode)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        serde_json::to_string(self).map_err(RecordError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        serde_json::from_str(json).map_err(RecordError::Decode)
    }
}

impl From<&Game> for Record {
    fn from(game: &Game) -> Self {
        Self::from_game(game)
    }
}
