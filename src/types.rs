use serde::{Deserialize, Serialize};
use std::fmt;

/// Squares per rank. `+WIDTH` is one rank forward in the active index space.
pub const WIDTH: i16 = 8;
pub const BOARD_SQUARES: usize = 64;

// --- Enums and Basic Structs ---
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color { White, Black }

impl Color {
    pub fn opponent(&self) -> Color {
        match self { Color::White => Color::Black, Color::Black => Color::White }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceKind { Pawn, Knight, Bishop, Rook, Queen, King }

impl PieceKind {
    pub fn symbol(&self) -> char {
        match self {
            PieceKind::Pawn => 'p', PieceKind::Knight => 'n', PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r', PieceKind::Queen => 'q', PieceKind::King => 'k',
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color, has_moved: false }
    }

    pub fn value(&self) -> u32 {
        match self.kind {
            PieceKind::Pawn => 1, PieceKind::Knight => 3, PieceKind::Bishop => 3,
            PieceKind::Rook => 5, PieceKind::Queen => 9, PieceKind::King => 0,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn, 'n' => PieceKind::Knight, 'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook, 'q' => PieceKind::Queen, 'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.symbol();
        let symbol = match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        };
        write!(f, "{}", symbol)
    }
}

// Physical squares are numbered in screen order: 0 = a8 (top-left from White's
// side), 7 = h8, 56 = a1, 63 = h1.

/// Converts a physical square index (0-63) to algebraic notation (e.g. "e4").
pub fn index_to_algebraic(index: u8) -> String {
    if index >= 64 { return "??".to_string(); }
    let row = index / 8;
    let file = index % 8;
    let file_char = (b'a' + file) as char;
    let rank_char = (b'8' - row) as char;
    format!("{}{}", file_char, rank_char)
}

/// Converts algebraic notation to a physical square index (0-63).
pub fn algebraic_to_index(s: &str) -> Option<u8> {
    if s.len() != 2 { return None; }
    let mut chars = s.chars();
    let file_char = chars.next()?.to_ascii_lowercase();
    let rank_char = chars.next()?;
    let file = match file_char { 'a'..='h' => Some(file_char as u8 - b'a'), _ => None }?;
    let rank = match rank_char { '1'..='8' => Some(rank_char as u8 - b'1'), _ => None }?;
    Some((7 - rank) * 8 + file)
}
