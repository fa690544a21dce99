//! King-and-rook castling: the only move that is allowed a two-square king
//! step. Attacks are never computed, so a king may castle out of, through or
//! into attack.

use crate::board::{Board, BoardView};
use crate::turn::IndexSpace;
use crate::types::{PieceKind, BOARD_SQUARES};
use tracing::info;

/// Squares of a castling move, all in the active index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePlan {
    pub king_from: u8,
    pub king_to: u8,
    pub rook_from: u8,
    pub rook_to: u8,
}

/// Works out whether the king on `start` may castle to `target`.
///
/// The rook is the one standing in the corner of the king's rank in the
/// direction of travel; it lands next to the king on the side it came from.
/// Only the squares the king crosses and lands on have to be empty.
pub fn plan_castle(view: &BoardView, start: u8, target: u8) -> Option<CastlePlan> {
    if start as usize >= BOARD_SQUARES || target as usize >= BOARD_SQUARES {
        return None;
    }
    let delta = target as i16 - start as i16;
    if delta.abs() != 2 {
        return None;
    }
    let king = view.piece_at(start)?;
    if king.kind != PieceKind::King || king.has_moved {
        return None;
    }
    // Castling never leaves the king's rank, with or without the edge guard.
    if start / 8 != target / 8 {
        return None;
    }

    let direction = delta.signum();
    let rank_start = (start / 8) * 8;
    let rook_from = if direction > 0 { rank_start + 7 } else { rank_start };
    let rook = view.piece_at(rook_from)?;
    if rook.kind != PieceKind::Rook || rook.color != king.color || rook.has_moved {
        return None;
    }

    // Only the king's own path matters; the rook may hop over the b-file.
    let mut sq = start as i16 + direction;
    while sq != target as i16 {
        if !view.is_empty(sq as u8) {
            return None;
        }
        sq += direction;
    }
    if !view.is_empty(target) {
        return None;
    }

    Some(CastlePlan {
        king_from: start,
        king_to: target,
        rook_from,
        rook_to: (target as i16 - direction) as u8,
    })
}

pub fn can_castle(view: &BoardView, start: u8, target: u8) -> bool {
    plan_castle(view, start, target).is_some()
}

/// Moves king and rook per the plan and marks both as moved.
pub fn perform_castle(board: &mut Board, space: IndexSpace, plan: &CastlePlan) {
    for (from, to) in [(plan.king_from, plan.king_to), (plan.rook_from, plan.rook_to)] {
        let (from, to) = (space.to_physical(from), space.to_physical(to));
        if let Some(piece) = board.clear(from) {
            board.place(to, piece);
            board.mark_moved(to);
        }
    }
    info!(king_to = plan.king_to, rook_to = plan.rook_to, "castled");
}
