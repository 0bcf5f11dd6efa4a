//! Anti-chess rules and opponent search.
//!
//! `logic` holds the board, move generation, mandatory-capture rules and the turn
//! controller; `engine` holds evaluation and minimax search; `worker` runs searches
//! on a background thread.

pub mod engine;
pub mod logic;
pub mod worker;

pub use engine::config::{EngineConfig, NoMovesPolicy, RulesConfig};
pub use engine::search::AlphaBetaEngine;
pub use engine::{AiMove, Difficulty};
pub use logic::board::{Board, Color, Piece, PieceKind, Square};
pub use logic::game::{GameState, GameStatus};
pub use logic::rules::MoveError;
