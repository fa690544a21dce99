use crate::turn::IndexSpace;
use crate::types::{Color, Piece, PieceKind, BOARD_SQUARES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard layout in screen order, one rank per chunk from rank 8 down to rank 1.
const STANDARD_LAYOUT: &str = "rnbqkbnr pppppppp ........ ........ ........ ........ PPPPPPPP RNBQKBNR";

// --- Board State ---

/// The 64 cells addressed by physical index. No legality checks live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Option<Piece>>,
}

impl Default for Board {
    fn default() -> Self { Board::standard() }
}

impl Board {
    pub fn empty() -> Self {
        Board { cells: vec![None; BOARD_SQUARES] }
    }

    pub fn standard() -> Self {
        // The layout constant is well formed, so the fallback is never taken.
        Board::from_layout(STANDARD_LAYOUT).unwrap_or_else(Board::empty)
    }

    /// Builds a board from 64 piece letters in screen order (`.` = empty square,
    /// whitespace ignored). Returns `None` for a bad letter or the wrong count.
    pub fn from_layout(layout: &str) -> Option<Self> {
        let mut cells = Vec::with_capacity(BOARD_SQUARES);
        for c in layout.chars().filter(|c| !c.is_whitespace()) {
            if c == '.' {
                cells.push(None);
            } else {
                cells.push(Some(Piece::from_char(c)?));
            }
        }
        if cells.len() != BOARD_SQUARES { return None; }
        Some(Board { cells })
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.cells.get(sq as usize).copied().flatten()
    }

    pub fn place(&mut self, sq: u8, piece: Piece) {
        if let Some(cell) = self.cells.get_mut(sq as usize) {
            *cell = Some(piece);
        }
    }

    /// Empties a square, returning whatever stood there.
    pub fn clear(&mut self, sq: u8) -> Option<Piece> {
        self.cells.get_mut(sq as usize).and_then(Option::take)
    }

    pub fn mark_moved(&mut self, sq: u8) {
        if let Some(Some(piece)) = self.cells.get_mut(sq as usize) {
            piece.has_moved = true;
        }
    }

    /// Physical squares of every piece of the given color.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().enumerate().filter_map(move |(sq, cell)| match cell {
            Some(piece) if piece.color == color => Some(sq as u8),
            _ => None,
        })
    }

    pub fn find_king(&self, color: Color) -> Option<u8> {
        self.squares_of(color).find(|&sq| {
            self.piece_at(sq).map_or(false, |p| p.kind == PieceKind::King)
        })
    }

    pub fn view(&self, space: IndexSpace) -> BoardView<'_> {
        BoardView { board: self, space }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for row in 0..8u8 {
            write!(f, "{} | ", 8 - row)?;
            for file in 0..8u8 {
                match self.piece_at(row * 8 + file) {
                    Some(piece) => write!(f, "{} ", piece)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        write!(f, "    a b c d e f g h")
    }
}

/// Read-only access to a board in one of the two active index spaces.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
    space: IndexSpace,
}

impl<'a> BoardView<'a> {
    pub fn piece_at(&self, active: u8) -> Option<Piece> {
        if active as usize >= BOARD_SQUARES { return None; }
        self.board.piece_at(self.space.to_physical(active))
    }

    pub fn is_empty(&self, active: u8) -> bool {
        self.piece_at(active).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::algebraic_to_index;

    fn at(board: &Board, name: &str) -> Option<Piece> {
        board.piece_at(algebraic_to_index(name).unwrap())
    }

    #[test]
    fn standard_layout_matches_the_opening_position() {
        let board = Board::standard();
        assert_eq!(at(&board, "e1"), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(at(&board, "d8"), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(at(&board, "h1"), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert_eq!(at(&board, "e4"), None);
        assert_eq!(board.squares_of(Color::White).count(), 16);
        assert_eq!(board.squares_of(Color::Black).count(), 16);
    }

    #[test]
    fn both_sides_see_their_pawns_on_the_same_active_rank() {
        let board = Board::standard();
        for color in [Color::White, Color::Black] {
            let view = board.view(IndexSpace::for_side(color));
            for sq in 8..16 {
                assert_eq!(view.piece_at(sq), Some(Piece::new(PieceKind::Pawn, color)));
            }
        }
    }

    #[test]
    fn place_clear_and_mark_moved() {
        let mut board = Board::empty();
        board.place(20, Piece::new(PieceKind::Bishop, Color::Black));
        board.mark_moved(20);
        assert!(board.piece_at(20).unwrap().has_moved);
        assert_eq!(board.clear(20).map(|p| p.kind), Some(PieceKind::Bishop));
        assert_eq!(board.piece_at(20), None);
        assert_eq!(board.clear(99), None);
    }

    #[test]
    fn rejects_malformed_layouts() {
        assert!(Board::from_layout("rnbqkbnr").is_none());
        assert!(Board::from_layout(&"x".repeat(64)).is_none());
    }

    #[test]
    fn finds_kings() {
        let board = Board::standard();
        assert_eq!(board.find_king(Color::White), algebraic_to_index("e1"));
        assert_eq!(Board::empty().find_king(Color::Black), None);
    }
}
