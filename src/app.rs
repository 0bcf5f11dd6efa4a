use antichess_core::engine::SearchStats;
use antichess_core::logic::game::{MoveRecord, Scores};
use antichess_core::worker::{AiWorker, Output};
use antichess_core::{Color, Difficulty, EngineConfig, GameState, GameStatus};
use anyhow::Context;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved(MoveRecord, SearchStats),
    /// The side to move had no legal move and the rules leave the game open.
    Stalled(Color),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub plies: usize,
    pub status: GameStatus,
    pub winner: Option<Color>,
    pub stalled: Option<Color>,
    pub scores: Scores,
    pub nodes_searched: u64,
    pub final_fen: String,
}

/// Plays engine against engine. Every move goes through `select_piece` and `move_piece`
/// exactly as a human's would.
pub struct MatchRunner {
    game: GameState,
    worker: AiWorker,
    white: Difficulty,
    black: Difficulty,
    config: EngineConfig,
}

impl MatchRunner {
    pub fn new(
        white: Difficulty,
        black: Difficulty,
        config: EngineConfig,
        seed: u64,
    ) -> anyhow::Result<Self> {
        let worker = AiWorker::spawn_seeded(seed).context("starting the AI worker")?;
        Ok(Self {
            game: GameState::with_rules(config.rules),
            worker,
            white,
            black,
            config,
        })
    }

    pub const fn game(&self) -> &GameState {
        &self.game
    }

    const fn difficulty(&self, color: Color) -> Difficulty {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn play_turn(&mut self) -> anyhow::Result<TurnOutcome> {
        if self.game.over() {
            return Ok(TurnOutcome::Finished);
        }

        let color = self.game.turn();
        let difficulty = self.difficulty(color);
        self.worker.compute_move(
            self.game.board().clone(),
            color,
            difficulty,
            self.config.clone(),
        )?;

        match self.worker.recv()? {
            Output::MoveFound(mv, stats) => {
                self.game
                    .select_piece(&mv.piece)
                    .with_context(|| format!("selecting {} for {color}", mv.from()))?;
                let record = self
                    .game
                    .move_piece(mv.from(), mv.to)
                    .with_context(|| format!("moving {} to {}", mv.from(), mv.to))?;
                tracing::debug!(
                    %color,
                    %difficulty,
                    from = %record.from,
                    to = %record.to,
                    nodes = stats.nodes,
                    time_ms = stats.time_ms,
                    "engine move"
                );
                Ok(TurnOutcome::Moved(record, stats))
            }
            Output::NoMove => {
                tracing::warn!(%color, "no legal move, stopping the match");
                Ok(TurnOutcome::Stalled(color))
            }
        }
    }

    /// Plays until the game ends, a side is stalled, or `max_plies` moves were made.
    pub fn run<F>(&mut self, max_plies: usize, mut on_move: F) -> anyhow::Result<MatchSummary>
    where
        F: FnMut(&GameState, &MoveRecord),
    {
        let mut plies = 0;
        let mut nodes_searched = 0;
        let mut stalled = None;

        while plies < max_plies {
            match self.play_turn()? {
                TurnOutcome::Moved(record, stats) => {
                    plies += 1;
                    nodes_searched += stats.nodes;
                    on_move(&self.game, &record);
                }
                TurnOutcome::Stalled(color) => {
                    stalled = Some(color);
                    break;
                }
                TurnOutcome::Finished => break,
            }
        }

        let summary = MatchSummary {
            plies,
            status: self.game.status(),
            winner: self.game.winner(),
            stalled,
            scores: self.game.scores(),
            nodes_searched,
            final_fen: self.game.to_fen(),
        };
        tracing::info!(
            plies,
            status = ?summary.status,
            white_captures = summary.scores.white,
            black_captures = summary.scores.black,
            "match finished"
        );
        Ok(summary)
    }
}
