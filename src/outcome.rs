use crate::board::Board;
use crate::types::{Color, PieceKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome { Continue, WhiteWins, BlackWins }

impl GameOutcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameOutcome::Continue => None,
            GameOutcome::WhiteWins => Some(Color::White),
            GameOutcome::BlackWins => Some(Color::Black),
        }
    }

    pub fn win_for(color: Color) -> Self {
        match color { Color::White => GameOutcome::WhiteWins, Color::Black => GameOutcome::BlackWins }
    }

    pub fn is_over(&self) -> bool { *self != GameOutcome::Continue }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum WinReason { KingCaptured, Timeout }

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Color,
    pub reason: WinReason,
}

impl GameResult {
    pub fn loser(&self) -> Color { self.winner.opponent() }

    pub fn outcome(&self) -> GameOutcome { GameOutcome::win_for(self.winner) }
}

fn has_king(board: &Board, color: Color) -> bool {
    board.squares_of(color).any(|sq| board.piece_at(sq).map_or(false, |p| p.kind == PieceKind::King))
}

/// A side without a king on the board has lost. There is no check or mate
/// detection; the king has to actually be taken.
pub fn evaluate(board: &Board) -> GameOutcome {
    if !has_king(board, Color::White) {
        GameOutcome::BlackWins
    } else if !has_king(board, Color::Black) {
        GameOutcome::WhiteWins
    } else {
        GameOutcome::Continue
    }
}
