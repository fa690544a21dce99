//! The game controller. Owns every piece of mutable state and runs each move
//! proposal to completion: validate, mutate, promote, look for a winner, hand
//! over the turn. Clock ticks go through here too, so the two never overlap.

use crate::board::Board;
use crate::castling::{self, CastlePlan};
use crate::clock::{ClockReading, GameClock};
use crate::config::{GameConfig, RuleOptions};
use crate::error::{MoveError, Result};
use crate::outcome::{self, GameOutcome, GameResult, WinReason};
use crate::promotion;
use crate::record::{GameSummary, MoveRecord};
use crate::turn::{IndexSpace, TurnCoordinator};
use crate::types::{Color, Piece, PieceKind, BOARD_SQUARES};
use crate::validator;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// What an accepted move did. Rejections come back as `MoveError` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub captured: Option<Piece>,
    pub promoted: bool,
    pub castled: bool,
    pub outcome: GameOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub remaining: ClockReading,
    pub expired: bool,
    pub loser: Option<Color>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Game {
    board: Board,
    turn: TurnCoordinator,
    clock: GameClock,
    rules: RuleOptions,
    captured: Vec<Piece>, // capture order, both colors
    history: Vec<MoveRecord>,
    result: Option<GameResult>,
}

impl Default for Game {
    fn default() -> Self { Game::initialize() }
}

impl Game {
    /// Standard layout, White to move, default clock and rules.
    pub fn initialize() -> Self {
        Game::new(&GameConfig::default())
    }

    pub fn new(config: &GameConfig) -> Self {
        Game::from_position(Board::standard(), Color::White, config)
    }

    /// Starts from an arbitrary board. `side_to_move` fixes the active index space.
    /// A clock that starts at zero has already run out on the side to move.
    pub fn from_position(board: Board, side_to_move: Color, config: &GameConfig) -> Self {
        let mut game = Game {
            board,
            turn: TurnCoordinator::new(side_to_move),
            clock: GameClock::new(config.clock_duration()),
            rules: config.rules,
            captured: Vec::new(),
            history: Vec::new(),
            result: None,
        };
        if game.clock.is_expired() {
            game.declare(GameResult { winner: side_to_move.opponent(), reason: WinReason::Timeout });
        }
        game
    }

    pub fn board(&self) -> &Board { &self.board }

    pub fn side_to_move(&self) -> Color { self.turn.side_to_move() }

    pub fn index_space(&self) -> IndexSpace { self.turn.space() }

    pub fn to_active(&self, physical: u8) -> u8 { self.turn.space().to_active(physical) }

    pub fn to_physical(&self, active: u8) -> u8 { self.turn.space().to_physical(active) }

    /// The piece on an active-space square.
    pub fn piece_at(&self, active: u8) -> Option<Piece> {
        self.board.view(self.turn.space()).piece_at(active)
    }

    pub fn captured(&self) -> &[Piece] { &self.captured }

    /// Pieces taken by `color`, in the order they fell.
    pub fn captured_by(&self, color: Color) -> Vec<Piece> {
        self.captured.iter().copied().filter(|p| p.color != color).collect()
    }

    pub fn history(&self) -> &[MoveRecord] { &self.history }

    pub fn clock(&self) -> &GameClock { &self.clock }

    pub fn result(&self) -> Option<GameResult> { self.result }

    pub fn is_over(&self) -> bool { self.result.is_some() }

    // --- Move Proposal ---

    /// Tries to move the `kind` piece on active square `start` to `target`.
    pub fn attempt_move(&mut self, kind: PieceKind, start: u8, target: u8) -> std::result::Result<MoveReport, MoveError> {
        let rejection = self.check_proposal(kind, start, target);
        if let Err(e) = rejection {
            debug!(?kind, start, target, error = %e, "move rejected");
            return Err(e);
        }

        let space = self.turn.space();
        if kind == PieceKind::King && (target as i16 - start as i16).abs() == 2 {
            if let Some(plan) = castling::plan_castle(&self.board.view(space), start, target) {
                return Ok(self.complete_castle(&plan));
            }
        }

        if !validator::is_legal(kind, start, target, &self.board.view(space), &self.rules) {
            let e = MoveError::IllegalMove { kind, start, target };
            debug!(?kind, start, target, error = %e, "move rejected");
            return Err(e);
        }

        let (from, to) = (space.to_physical(start), space.to_physical(target));
        let captured = self.board.clear(to);
        let moving = self.board.clear(from);
        let Some(moving) = moving else {
            // check_proposal guarantees a piece on the start square.
            return Err(MoveError::NoPieceAtSource { start });
        };
        self.board.place(to, moving);
        self.board.mark_moved(to);
        if let Some(piece) = captured {
            self.captured.push(piece);
        }

        let promoted = kind == PieceKind::Pawn && promotion::promote_if_eligible(&mut self.board, space, target);

        let ply = self.history.len() as u32 + 1;
        self.history.push(MoveRecord::new(ply, moving, from, to, captured, promoted, None));
        info!(player = %moving.color, ?kind, from, to, captured = ?captured.map(|p| p.kind), promoted, "move accepted");

        let outcome = self.finish_move();
        Ok(MoveReport { captured, promoted, castled: false, outcome })
    }

    /// Everything that can be rejected before any geometry is looked at.
    fn check_proposal(&self, kind: PieceKind, start: u8, target: u8) -> std::result::Result<(), MoveError> {
        if self.result.is_some() {
            return Err(MoveError::GameAlreadyOver);
        }
        if start as usize >= BOARD_SQUARES || target as usize >= BOARD_SQUARES {
            return Err(MoveError::IllegalMove { kind, start, target });
        }
        let view = self.board.view(self.turn.space());
        let piece = view.piece_at(start).ok_or(MoveError::NoPieceAtSource { start })?;
        if piece.color != self.turn.side_to_move() {
            return Err(MoveError::NotSideToMove(piece.color));
        }
        if piece.kind != kind {
            return Err(MoveError::IllegalMove { kind, start, target });
        }
        if view.piece_at(target).map_or(false, |p| p.color == piece.color) {
            return Err(MoveError::OccupiedBySameColor { target });
        }
        Ok(())
    }

    fn complete_castle(&mut self, plan: &CastlePlan) -> MoveReport {
        let space = self.turn.space();
        let king = self.board.view(space).piece_at(plan.king_from);
        castling::perform_castle(&mut self.board, space, plan);

        if let Some(king) = king {
            let rook_from = space.to_physical(plan.rook_from);
            let kingside = rook_from % 8 == 7;
            let ply = self.history.len() as u32 + 1;
            self.history.push(MoveRecord::new(
                ply,
                king,
                space.to_physical(plan.king_from),
                space.to_physical(plan.king_to),
                None,
                false,
                Some(kingside),
            ));
        }

        let outcome = self.finish_move();
        MoveReport { captured: None, promoted: false, castled: true, outcome }
    }

    /// Win check, then either the game ends here or the turn passes.
    fn finish_move(&mut self) -> GameOutcome {
        let outcome = outcome::evaluate(&self.board);
        match outcome.winner() {
            Some(winner) => self.declare(GameResult { winner, reason: WinReason::KingCaptured }),
            None => self.turn.switch_turn(),
        }
        outcome
    }

    fn declare(&mut self, result: GameResult) {
        info!(winner = %result.winner, reason = ?result.reason, "game over");
        self.result = Some(result);
        self.clock.stop();
    }

    /// Runs the win check against the current board and latches a win.
    pub fn evaluate_outcome(&mut self) -> GameOutcome {
        if let Some(result) = self.result {
            return result.outcome();
        }
        let outcome = outcome::evaluate(&self.board);
        if let Some(winner) = outcome.winner() {
            self.declare(GameResult { winner, reason: WinReason::KingCaptured });
        }
        outcome
    }

    // --- Clock ---

    /// One second of the shared clock. If it runs out, the side to move loses.
    pub fn tick(&mut self) -> TickReport {
        if self.result.is_none() && self.clock.tick() {
            let loser = self.turn.side_to_move();
            info!(%loser, "clock expired");
            self.declare(GameResult { winner: loser.opponent(), reason: WinReason::Timeout });
        }
        let loser = match self.result {
            Some(result) if result.reason == WinReason::Timeout => Some(result.loser()),
            _ => None,
        };
        TickReport { remaining: self.clock.remaining(), expired: self.clock.is_expired(), loser }
    }

    // --- Stats ---

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            result: self.result,
            clock_remaining: self.clock.remaining(),
            completed_turns: self.turn.completed_turns(),
            moves: self.history.clone(),
            captured_by_white: self.captured_by(Color::White),
            captured_by_black: self.captured_by(Color::Black),
        }
    }

    pub fn save_summary_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.summary().save_to_file(path)
    }
}

// Display trait for printing the board and game state
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // --- Captured Pieces ---
        let mut sorted_capt_w = self.captured_by(Color::White);
        sorted_capt_w.sort_by_key(|p| p.value());
        write!(f, "Captured by White: ")?;
        for piece in &sorted_capt_w { write!(f, "{} ", piece)?; }
        writeln!(f)?;
        let mut sorted_capt_b = self.captured_by(Color::Black);
        sorted_capt_b.sort_by_key(|p| p.value());
        write!(f, "Captured by Black: ")?;
        for piece in &sorted_capt_b { write!(f, "{} ", piece)?; }
        writeln!(f)?;
        writeln!(f, "---------------------")?;

        // --- Time ---
        writeln!(f, "Time: {}", self.clock.remaining())?;
        writeln!(f, "---------------------")?;

        writeln!(f, "{}", self.board)?;

        match self.result {
            Some(result) => writeln!(f, "Result: {} wins ({:?})", result.winner, result.reason)?,
            None => writeln!(f, "Turn: {}", self.turn.side_to_move())?,
        }

        // --- Move History ---
        if !self.history.is_empty() {
            writeln!(f, "Move History:")?;
            for pair in self.history.chunks(2) {
                let number = (pair[0].ply + 1) / 2;
                match pair {
                    [first, second] => writeln!(f, "{}. {} {}", number, first.notation, second.notation)?,
                    [only] => writeln!(f, "{}. {}", number, only.notation)?,
                    _ => {}
                }
            }
        }
        Ok(())
    }
}
