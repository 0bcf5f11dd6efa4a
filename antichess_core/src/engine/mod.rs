use crate::engine::config::EngineConfig;
use crate::logic::board::{Board, Color, Piece, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod config;
pub mod eval;
pub mod search;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub score: i32,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to, score: 0 }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// A move request as the AI hands it to the turn controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMove {
    pub piece: Piece,
    pub to: Square,
}

impl AiMove {
    pub const fn from(&self) -> Square {
        self.piece.square
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn limit(self, config: &EngineConfig) -> SearchLimit {
        match self {
            Self::Easy => SearchLimit::Random,
            Self::Medium => SearchLimit::Depth(config.depth_medium),
            Self::Hard => SearchLimit::Depth(config.depth_hard),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty {0:?}, expected easy, medium or hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchLimit {
    /// Uniform choice among the root's legal moves.
    Random,
    /// Minimax plies searched below each root move.
    Depth(u8),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
    /// Set when the node budget ran out and some subtrees were cut to leaves.
    pub truncated: bool,
}

pub trait Evaluator {
    /// Score from `ai_color`'s point of view; higher is better for the AI.
    fn evaluate(&self, board: &Board, ai_color: Color) -> i32;
}

pub trait Searcher {
    fn search(
        &mut self,
        board: &Board,
        ai_color: Color,
        limit: SearchLimit,
    ) -> Option<(AiMove, SearchStats)>;
}
