//! Per-piece move legality, evaluated entirely in the active index space.
//!
//! The predicate only answers "does this piece move like that?". Friendly-fire,
//! side to move and castling are settled by the caller before it gets here.

use crate::board::BoardView;
use crate::config::RuleOptions;
use crate::promotion::is_back_rank;
use crate::types::{PieceKind, BOARD_SQUARES, WIDTH};

/// Active indices of the mover's pawn rank.
const PAWN_START_SQUARES: std::ops::RangeInclusive<u8> = 8..=15;

// (dr, df) pairs; the index offset is dr * WIDTH + df.
const KNIGHT_OFFSETS: [(i16, i16); 8] = [
    ( 2, -1), ( 2,  1), ( 1, -2), ( 1,  2),
    (-2,  1), (-2, -1), (-1, -2), (-1,  2),
];

const KING_OFFSETS: [(i16, i16); 8] = [
    ( 0,  1), ( 0, -1), ( 1,  0), (-1,  0),
    ( 1, -1), ( 1,  1), (-1, -1), (-1,  1),
];

// Directions for sliding pieces
const DIRECTIONS: &[(i16, i16, bool)] = &[ // (dr, df, is_diagonal)
    ( 1,  0, false), (-1,  0, false), ( 0,  1, false), ( 0, -1, false), // Orthogonal
    ( 1,  1, true),  ( 1, -1, true),  (-1,  1, true),  (-1, -1, true),  // Diagonal
];

#[inline]
fn rank(sq: u8) -> i16 { (sq / 8) as i16 }

#[inline]
fn file(sq: u8) -> i16 { (sq % 8) as i16 }

/// True when `target - start` is the offset of (dr, df). With the edge guard on
/// the rank and file deltas must match too, so `+1` from the h-file is not "right".
fn shape_matches(start: u8, target: u8, dr: i16, df: i16, rules: &RuleOptions) -> bool {
    let delta = target as i16 - start as i16;
    if delta != dr * WIDTH + df {
        return false;
    }
    !rules.guard_board_edges || (rank(target) - rank(start) == dr && file(target) - file(start) == df)
}

/// Walks one ray from `start`; succeeds if `target` is met within seven steps
/// with every square before it empty.
fn ray_reaches(view: &BoardView, start: u8, target: u8, dr: i16, df: i16, rules: &RuleOptions) -> bool {
    let step = dr * WIDTH + df;
    let (mut sq, mut r, mut f) = (start as i16, rank(start), file(start));
    for _ in 1..=7 {
        sq += step;
        r += dr;
        f += df;
        if !(0..BOARD_SQUARES as i16).contains(&sq) {
            return false;
        }
        if rules.guard_board_edges && !((0..8).contains(&r) && (0..8).contains(&f)) {
            return false;
        }
        if sq == target as i16 {
            return true;
        }
        if !view.is_empty(sq as u8) {
            return false;
        }
    }
    false
}

fn slides_to(view: &BoardView, start: u8, target: u8, diagonals: bool, orthogonals: bool, rules: &RuleOptions) -> bool {
    DIRECTIONS.iter()
        .filter(|&&(_, _, is_diagonal)| if is_diagonal { diagonals } else { orthogonals })
        .any(|&(dr, df, _)| ray_reaches(view, start, target, dr, df, rules))
}

fn pawn_move_is_legal(view: &BoardView, start: u8, target: u8, rules: &RuleOptions) -> bool {
    // Reaching either back rank is always allowed; promotion takes over from here.
    if is_back_rank(target) {
        return true;
    }

    let double_push = PAWN_START_SQUARES.contains(&start)
        && shape_matches(start, target, 2, 0, rules)
        && (!rules.strict_pawn_pushes
            || (view.is_empty(start + WIDTH as u8) && view.is_empty(target)));
    let single_push = shape_matches(start, target, 1, 0, rules)
        && (!rules.strict_pawn_pushes || view.is_empty(target));
    let capture = (shape_matches(start, target, 1, -1, rules) || shape_matches(start, target, 1, 1, rules))
        && !view.is_empty(target);

    double_push || single_push || capture
}

/// Decides whether a piece of `kind` may go from `start` to `target`.
/// Indices outside 0..63 are never legal.
pub fn is_legal(kind: PieceKind, start: u8, target: u8, view: &BoardView, rules: &RuleOptions) -> bool {
    if start as usize >= BOARD_SQUARES || target as usize >= BOARD_SQUARES {
        return false;
    }
    match kind {
        PieceKind::Pawn => pawn_move_is_legal(view, start, target, rules),
        PieceKind::Knight => KNIGHT_OFFSETS.iter().any(|&(dr, df)| shape_matches(start, target, dr, df, rules)),
        PieceKind::Bishop => slides_to(view, start, target, true, false, rules),
        PieceKind::Rook => slides_to(view, start, target, false, true, rules),
        PieceKind::Queen => slides_to(view, start, target, true, true, rules),
        PieceKind::King => KING_OFFSETS.iter().any(|&(dr, df)| shape_matches(start, target, dr, df, rules)),
    }
}
