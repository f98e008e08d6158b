//! Move selection logic.
//!
//! Determines which move to play in each round based on the configured
//! strategy. Round numbers start at 1.

use anyhow::{bail, Result};
use clap::ValueEnum;
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// A rock-paper-scissors move, serialized the way the arena expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

/// Play order for the `cycle` strategy and the pool for `random`.
pub const MOVES: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

impl Move {
    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "ROCK",
            Move::Paper => "PAPER",
            Move::Scissors => "SCISSORS",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How moves are picked across rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    Rock,
    #[default]
    Paper,
    Scissors,
    /// Uniformly random each round.
    Random,
    /// ROCK, PAPER, SCISSORS, ROCK, ...
    Cycle,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Rock => write!(f, "rock"),
            Strategy::Paper => write!(f, "paper"),
            Strategy::Scissors => write!(f, "scissors"),
            Strategy::Random => write!(f, "random"),
            Strategy::Cycle => write!(f, "cycle"),
        }
    }
}

impl Strategy {
    /// Parse a strategy name, case-insensitively.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rock" => Ok(Strategy::Rock),
            "paper" => Ok(Strategy::Paper),
            "scissors" => Ok(Strategy::Scissors),
            "random" => Ok(Strategy::Random),
            "cycle" => Ok(Strategy::Cycle),
            _ => bail!(
                "invalid strategy '{}': must be one of paper, rock, scissors, random, cycle",
                s
            ),
        }
    }
}

/// Select the move for `round_no` using the thread-local RNG.
pub fn choose_move(strategy: Strategy, round_no: u32) -> Move {
    choose_move_with(strategy, round_no, &mut rand::rng())
}

/// Select the move for `round_no`, drawing from `rng` for the random strategy.
pub fn choose_move_with<R: Rng + ?Sized>(strategy: Strategy, round_no: u32, rng: &mut R) -> Move {
    match strategy {
        Strategy::Rock => Move::Rock,
        Strategy::Paper => Move::Paper,
        Strategy::Scissors => Move::Scissors,
        Strategy::Random => MOVES[rng.random_range(0..MOVES.len())],
        Strategy::Cycle => MOVES[(round_no.saturating_sub(1) % 3) as usize],
    }
}
