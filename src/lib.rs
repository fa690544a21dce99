//! Two-player chess on one shared board where taking the king wins.
//!
//! The engine decides legality from piece kind and square-index arithmetic in
//! an index space that is relabeled after every turn, so "forward" is `+8` for
//! whichever side is on move. Rendering and input belong to the caller.

pub mod board;
pub mod castling;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod outcome;
pub mod promotion;
pub mod record;
pub mod turn;
pub mod types;
pub mod validator;

pub use board::{Board, BoardView};
pub use clock::{ClockReading, GameClock, TickAccumulator};
pub use config::{GameConfig, RuleOptions};
pub use error::{Error, InputError, MoveError, Result};
pub use game::{Game, MoveReport, TickReport};
pub use outcome::{GameOutcome, GameResult, WinReason};
pub use record::{GameSummary, MoveRecord, DEFAULT_STATS_FILENAME};
pub use turn::{IndexSpace, TurnCoordinator};
pub use types::{algebraic_to_index, index_to_algebraic, Color, Piece, PieceKind};
