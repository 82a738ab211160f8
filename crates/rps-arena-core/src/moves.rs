//! Move encoding and outcome arithmetic.

use crate::error::ArenaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A rock-paper-scissors move.
///
/// The numeric codes (rock=1, paper=2, scissor=3) are part of the
/// commitment encoding: a commitment produced off-system must hash the
/// same byte this enum maps to, or reveal will reject it. Code 0 is the
/// "no move" sentinel and is never a valid `Move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Rock = 1,
    Paper = 2,
    Scissor = 3,
}

impl Move {
    /// Numeric code used in commitments and outcome arithmetic
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Parse a numeric code, rejecting the 0 sentinel and out-of-range values
    pub fn from_code(code: u8) -> Result<Self, ArenaError> {
        match code {
            1 => Ok(Move::Rock),
            2 => Ok(Move::Paper),
            3 => Ok(Move::Scissor),
            _ => Err(ArenaError::InvalidMove),
        }
    }
}

impl FromStr for Move {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissor" | "scissors" => Ok(Move::Scissor),
            _ => Err(ArenaError::InvalidMove),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Rock => write!(f, "rock"),
            Move::Paper => write!(f, "paper"),
            Move::Scissor => write!(f, "scissor"),
        }
    }
}

/// Outcome of a game where both moves are known, from the creator's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Draw,
    CreatorWins,
    OpponentWins,
}

impl Outcome {
    /// Decide the round with `(3 + creator - opponent) mod 3` over the
    /// move codes: 0 is a draw, 1 a creator win, 2 an opponent win.
    pub fn of(creator: Move, opponent: Move) -> Self {
        match (3 + creator.code() - opponent.code()) % 3 {
            0 => Outcome::Draw,
            1 => Outcome::CreatorWins,
            _ => Outcome::OpponentWins,
        }
    }
}
