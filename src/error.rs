//! Error types for kingfall_chess

use crate::types::{Color, PieceKind};
use serde::Serialize;
use thiserror::Error;

/// Why a move proposal was turned down. Rejections leave the game untouched
/// and are recoverable; the presenter shows them and waits for the next move.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveError {
    #[error("illegal {kind:?} move from active square {start} to {target}")]
    IllegalMove { kind: PieceKind, start: u8, target: u8 },

    #[error("forbidden to go here: active square {target} holds a friendly piece")]
    OccupiedBySameColor { target: u8 },

    #[error("the game is already over")]
    GameAlreadyOver,

    #[error("no piece on active square {start}")]
    NoPieceAtSource { start: u8 },

    #[error("it is not {0}'s turn")]
    NotSideToMove(Color),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error with file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Problems turning a typed line into a move or command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Unrecognised input '{0}'. Type 'help' for commands.")]
    Unrecognised(String),

    #[error("Invalid square '{0}'")]
    InvalidSquare(String),

    #[error("No piece on {0}")]
    EmptySquare(String),

    #[error("No {0} king on the board to castle with")]
    NoKing(Color),
}
