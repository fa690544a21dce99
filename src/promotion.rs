use crate::board::Board;
use crate::turn::IndexSpace;
use crate::types::{Piece, PieceKind};
use tracing::info;

/// Either back rank of the active space (indices 56..63 and 0..7).
#[inline]
pub fn is_back_rank(sq: u8) -> bool {
    sq >= 56 || sq <= 7
}

/// Turns a pawn that has just landed on a back rank into a Queen of its color.
/// The new piece counts as moved. Returns whether a promotion happened; nothing
/// is touched otherwise.
pub fn promote_if_eligible(board: &mut Board, space: IndexSpace, target: u8) -> bool {
    if !is_back_rank(target) {
        return false;
    }
    let square = space.to_physical(target);
    match board.piece_at(square) {
        Some(pawn) if pawn.kind == PieceKind::Pawn => {
            let queen = Piece { kind: PieceKind::Queen, color: pawn.color, has_moved: true };
            board.place(square, queen);
            info!(color = %pawn.color, square = target, "pawn promoted to queen");
            true
        }
        _ => false,
    }
}
