//! Side to move and the per-turn relabeling of square indices.
//!
//! Move geometry is written once, with `+WIDTH` meaning "forward". That only
//! holds for both colors because the active index space is flipped after every
//! completed turn: White moves in the reversed space (`63 - physical`), Black in
//! the identity space.

use crate::types::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IndexSpace { Reversed, Identity }

impl IndexSpace {
    /// The space in which `color` sees its own pawns on 8..15 moving `+WIDTH`.
    pub fn for_side(color: Color) -> Self {
        match color { Color::White => IndexSpace::Reversed, Color::Black => IndexSpace::Identity }
    }

    #[inline]
    pub fn to_physical(&self, active: u8) -> u8 {
        match self {
            IndexSpace::Reversed => 63 - active,
            IndexSpace::Identity => active,
        }
    }

    /// Both remappings are involutions, so this is the same arithmetic as `to_physical`.
    #[inline]
    pub fn to_active(&self, physical: u8) -> u8 {
        self.to_physical(physical)
    }

    pub fn flipped(&self) -> Self {
        match self { IndexSpace::Reversed => IndexSpace::Identity, IndexSpace::Identity => IndexSpace::Reversed }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnCoordinator {
    side_to_move: Color,
    space: IndexSpace,
    completed_turns: u32,
}

impl Default for TurnCoordinator {
    fn default() -> Self { TurnCoordinator::new(Color::White) }
}

impl TurnCoordinator {
    pub fn new(side_to_move: Color) -> Self {
        TurnCoordinator { side_to_move, space: IndexSpace::for_side(side_to_move), completed_turns: 0 }
    }

    pub fn side_to_move(&self) -> Color { self.side_to_move }

    pub fn space(&self) -> IndexSpace { self.space }

    pub fn completed_turns(&self) -> u32 { self.completed_turns }

    /// Hands the move to the other side and reorients the index space exactly once.
    pub fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
        self.space = self.space.flipped();
        self.completed_turns += 1;
    }
}
