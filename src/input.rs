// --- Input Parsing ---

use crate::board::Board;
use crate::error::InputError;
use crate::types::{algebraic_to_index, Color};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MOVE_PATTERN: Regex =
        Regex::new(r"(?i)^([a-h][1-8])\s*[-x]?\s*([a-h][1-8])$").expect("move pattern compiles");
    static ref CASTLE_PATTERN: Regex =
        Regex::new(r"(?i)^[o0]-[o0](-[o0])?$").expect("castle pattern compiles");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Physical squares.
    Move { from: u8, to: u8 },
    CastleKingside,
    CastleQueenside,
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Board,
    History,
    Save(Option<String>),
    Quit,
}

/// Parses one line typed at the prompt.
pub fn parse_user_input(input: &str) -> Result<UserInput, InputError> {
    let trimmed = input.trim();

    if let Some(caps) = CASTLE_PATTERN.captures(trimmed) {
        return Ok(if caps.get(1).is_some() { UserInput::CastleQueenside } else { UserInput::CastleKingside });
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let command_word = parts.next().unwrap_or("").to_lowercase();
    let argument = parts.next().unwrap_or("").trim();
    match command_word.as_str() {
        "help" | "?" => return Ok(UserInput::Command(Command::Help)),
        "board" => return Ok(UserInput::Command(Command::Board)),
        "history" => return Ok(UserInput::Command(Command::History)),
        "quit" | "exit" => return Ok(UserInput::Command(Command::Quit)),
        "save" => {
            let file = if argument.is_empty() { None } else { Some(argument.to_string()) };
            return Ok(UserInput::Command(Command::Save(file)));
        }
        _ => {}
    }

    let caps = MOVE_PATTERN
        .captures(trimmed)
        .ok_or_else(|| InputError::Unrecognised(trimmed.to_string()))?;
    let square = |i: usize| {
        let name = &caps[i];
        algebraic_to_index(name).ok_or_else(|| InputError::InvalidSquare(name.to_string()))
    };
    Ok(UserInput::Move { from: square(1)?, to: square(2)? })
}

/// Physical king squares for a castling request: two files toward the h-file
/// for kingside, toward the a-file for queenside.
pub fn castle_squares(board: &Board, color: Color, kingside: bool) -> Result<(u8, u8), InputError> {
    let king = board.find_king(color).ok_or(InputError::NoKing(color))?;
    let file = king % 8;
    let to = match (kingside, file) {
        (true, f) if f <= 5 => king + 2,
        (false, f) if f >= 2 => king - 2,
        _ => return Err(InputError::Unrecognised(if kingside { "O-O" } else { "O-O-O" }.to_string())),
    };
    Ok((king, to))
}
