use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color};
use crate::logic::eval_constants::{BONUS_OPPONENT_FORCED, PENALTY_OWN_FORCED, WEIGHT_PIECE};
use crate::logic::rules::has_forced_capture;
use std::sync::Arc;

/// Static evaluation with the default weights.
pub fn evaluate(board: &Board, ai_color: Color) -> i32 {
    score_position(
        board,
        ai_color,
        WEIGHT_PIECE,
        PENALTY_OWN_FORCED,
        BONUS_OPPONENT_FORCED,
    )
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn score_position(
    board: &Board,
    ai_color: Color,
    weight_piece: i32,
    penalty_own_forced: i32,
    bonus_opponent_forced: i32,
) -> i32 {
    let ai_pieces = board.count(ai_color) as i32;
    let opponent_pieces = board.count(ai_color.opposite()) as i32;

    // Fewer own pieces is better.
    let mut score = (opponent_pieces - ai_pieces) * weight_piece;

    if has_forced_capture(board, ai_color) {
        score -= penalty_own_forced;
    }
    if has_forced_capture(board, ai_color.opposite()) {
        score += bonus_opponent_forced;
    }

    score
}

/// Loss-seeking evaluator: rewards shedding pieces and constraining the opponent.
pub struct LosingChessEvaluator {
    config: Arc<EngineConfig>,
}

impl LosingChessEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Evaluator for LosingChessEvaluator {
    fn evaluate(&self, board: &Board, ai_color: Color) -> i32 {
        score_position(
            board,
            ai_color,
            self.config.weight_piece,
            self.config.penalty_own_forced,
            self.config.bonus_opponent_forced,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_is_balanced() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Color::White), 0);
        assert_eq!(evaluate(&board, Color::Black), 0);
    }

    #[test]
    fn test_fewer_own_pieces_scores_higher() {
        // White 1 piece, Black 3, nothing in contact.
        let (board, _) = Board::from_fen("k5r1/8/8/8/8/8/8/5p1K w").unwrap();
        assert!(!has_forced_capture(&board, Color::White));
        assert!(!has_forced_capture(&board, Color::Black));
        assert_eq!(evaluate(&board, Color::White), 20);
        assert_eq!(evaluate(&board, Color::Black), -20);
    }

    #[test]
    fn test_forced_capture_terms() {
        // Pawns in mutual contact: both sides must capture.
        let (board, _) = Board::from_fen("8/8/8/3p4/4P3/8/8/8 w").unwrap();
        assert_eq!(evaluate(&board, Color::White), -15 + 5);

        // Only Black's rook can capture; White's pawn is blocked.
        let (board, _) = Board::from_fen("8/8/8/8/4r3/8/4P3/8 w").unwrap();
        assert!(!has_forced_capture(&board, Color::White));
        assert!(has_forced_capture(&board, Color::Black));
        assert_eq!(evaluate(&board, Color::White), 5);
        assert_eq!(evaluate(&board, Color::Black), -15);
    }

    #[test]
    fn test_evaluator_uses_configured_weights() {
        let config = EngineConfig {
            weight_piece: 100,
            penalty_own_forced: 1,
            bonus_opponent_forced: 2,
            ..EngineConfig::default()
        };
        let evaluator = LosingChessEvaluator::new(Arc::new(config));
        let (board, _) = Board::from_fen("8/8/8/3p4/4P3/8/8/7K w").unwrap();
        // White 2, Black 1, both forced.
        assert_eq!(evaluator.evaluate(&board, Color::White), -100 - 1 + 2);
    }
}
