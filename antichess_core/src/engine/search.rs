use crate::engine::config::EngineConfig;
use crate::engine::eval::LosingChessEvaluator;
use crate::engine::{AiMove, Difficulty, Evaluator, Move, SearchLimit, SearchStats, Searcher};
use crate::logic::board::{Board, Color};
use crate::logic::eval_constants::SCORE_INFINITY;
use crate::logic::generator::MoveGenerator;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;

pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: LosingChessEvaluator,
    rng: StdRng,
    nodes_searched: u64,
    truncated: bool,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with a reproducible random source for the easy tier.
    pub fn with_seed(config: Arc<EngineConfig>, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Arc<EngineConfig>, rng: StdRng) -> Self {
        Self {
            evaluator: LosingChessEvaluator::new(config.clone()),
            config,
            rng,
            nodes_searched: 0,
            truncated: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = LosingChessEvaluator::new(config.clone());
        self.config = config;
    }

    /// Picks a move for `ai_color`, or `None` when it has no legal move.
    /// `board` is never modified; every line is played out on a clone.
    pub fn best_move(
        &mut self,
        board: &Board,
        ai_color: Color,
        difficulty: Difficulty,
    ) -> Option<AiMove> {
        let limit = difficulty.limit(&self.config);
        self.search(board, ai_color, limit).map(|(mv, _)| mv)
    }

    /// Every move `color` may play here. When any capture exists only captures are kept.
    pub fn generate_moves(&self, board: &Board, color: Color) -> Vec<Move> {
        MoveGenerator::new().legal_moves(board, color)
    }

    fn budget_exhausted(&self) -> bool {
        self.config
            .node_budget
            .is_some_and(|budget| self.nodes_searched >= budget)
    }

    fn play(&self, board: &Board, mv: &Move) -> Option<Board> {
        let mut child = board.clone();
        child
            .apply_move(mv.from, mv.to, self.config.rules.promotion)
            .ok()?;
        Some(child)
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        ai_color: Color,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return self.evaluator.evaluate(board, ai_color);
        }
        if self.budget_exhausted() {
            self.truncated = true;
            return self.evaluator.evaluate(board, ai_color);
        }

        let to_move = if maximizing {
            ai_color
        } else {
            ai_color.opposite()
        };
        let moves = self.generate_moves(board, to_move);
        if moves.is_empty() {
            return self.evaluator.evaluate(board, ai_color);
        }

        if maximizing {
            let mut max_eval = -SCORE_INFINITY;
            for mv in &moves {
                let Some(child) = self.play(board, mv) else {
                    continue;
                };
                let eval = self.minimax(&child, depth - 1, false, ai_color, alpha, beta);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = SCORE_INFINITY;
            for mv in &moves {
                let Some(child) = self.play(board, mv) else {
                    continue;
                };
                let eval = self.minimax(&child, depth - 1, true, ai_color, alpha, beta);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }

    /// Scores each root move by a `depth`-ply search of the reply tree.
    /// Ties go to the earliest generated move.
    fn search_root(
        &mut self,
        board: &Board,
        ai_color: Color,
        moves: &[Move],
        depth: u8,
    ) -> Option<Move> {
        let mut best: Option<Move> = None;
        let mut alpha = -SCORE_INFINITY;

        for mv in moves {
            let Some(child) = self.play(board, mv) else {
                continue;
            };
            let score = self.minimax(&child, depth, false, ai_color, alpha, SCORE_INFINITY);
            if best.map_or(true, |b| score > b.score) {
                best = Some(Move { score, ..*mv });
                alpha = alpha.max(score);
            }
        }

        best
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(
        &mut self,
        board: &Board,
        ai_color: Color,
        limit: SearchLimit,
    ) -> Option<(AiMove, SearchStats)> {
        let start = Instant::now();
        self.nodes_searched = 0;
        self.truncated = false;

        let moves = self.generate_moves(board, ai_color);
        if moves.is_empty() {
            log::debug!("{ai_color} has no legal move");
            return None;
        }

        let (chosen, depth) = match limit {
            SearchLimit::Random => (*moves.choose(&mut self.rng)?, 0),
            SearchLimit::Depth(depth) => (self.search_root(board, ai_color, &moves, depth)?, depth),
        };
        let piece = board.get_piece(chosen.from)?;

        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            truncated: self.truncated,
        };
        log::debug!(
            "{ai_color} plays {chosen} (score {}, depth {}, nodes {}, {}ms{})",
            chosen.score,
            stats.depth,
            stats.nodes,
            stats.time_ms,
            if stats.truncated { ", truncated" } else { "" }
        );

        Some((
            AiMove {
                piece,
                to: chosen.to,
            },
            stats,
        ))
    }
}
