// --- Move History and Stats Saving ---

use crate::clock::ClockReading;
use crate::error::{Error, Result};
use crate::outcome::GameResult;
use crate::types::{index_to_algebraic, Color, Piece, PieceKind};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_STATS_FILENAME: &str = "chess_stats.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub ply: u32,
    pub player: Color,
    pub kind: PieceKind,
    pub from: String, // physical square, e.g. "e2"
    pub to: String,
    pub captured: Option<PieceKind>,
    pub promoted: bool,
    pub castled: bool,
    pub notation: String, // e2e4, e7e8=Q, O-O, O-O-O
}

impl MoveRecord {
    /// `from_sq`/`to_sq` are physical squares. For castling, `kingside` tells
    /// which notation to use.
    pub fn new(
        ply: u32,
        piece: Piece,
        from_sq: u8,
        to_sq: u8,
        captured: Option<Piece>,
        promoted: bool,
        castled: Option<bool>,
    ) -> Self {
        let from = index_to_algebraic(from_sq);
        let to = index_to_algebraic(to_sq);
        let notation = match castled {
            Some(true) => "O-O".to_string(),
            Some(false) => "O-O-O".to_string(),
            None if promoted => format!("{}{}=Q", from, to),
            None => format!("{}{}", from, to),
        };
        MoveRecord {
            ply,
            player: piece.color,
            kind: piece.kind,
            from,
            to,
            captured: captured.map(|p| p.kind),
            promoted,
            castled: castled.is_some(),
            notation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameSummary {
    pub result: Option<GameResult>,
    pub clock_remaining: ClockReading,
    pub completed_turns: u32,
    pub moves: Vec<MoveRecord>,
    pub captured_by_white: Vec<Piece>,
    pub captured_by_black: Vec<Piece>,
}

impl GameSummary {
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json_data = serde_json::to_string_pretty(self)?;
        fs::write(path, json_data)
            .map_err(|e| Error::Io(path.display().to_string(), e))?;
        Ok(())
    }
}
