//! Game configuration: clock length and the rule options for the loose spots
//! of the move rules. Loaded from JSON; every field has a default.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const INITIAL_TIME_SECONDS: u64 = 10 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// Evaluate move shapes as rank/file deltas so nothing wraps around the
    /// left or right edge. When off, raw index arithmetic decides.
    pub guard_board_edges: bool,
    /// Require empty squares for pawn pushes. Off keeps the loose push rule.
    pub strict_pawn_pushes: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        RuleOptions { guard_board_edges: true, strict_pawn_pushes: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub clock_seconds: u64,
    pub rules: RuleOptions,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { clock_seconds: INITIAL_TIME_SECONDS, rules: RuleOptions::default() }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Io(path.display().to_string(), e))?;
        let config: GameConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.clock_seconds == 0 {
            return Err(Error::Config("clock_seconds must be greater than zero".to_string()));
        }
        Ok(())
    }

    pub fn clock_duration(&self) -> Duration {
        Duration::from_secs(self.clock_seconds)
    }
}
