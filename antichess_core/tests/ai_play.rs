use antichess_core::engine::search::AlphaBetaEngine;
use antichess_core::logic::game::GameState;
use antichess_core::{Color, Difficulty, EngineConfig};
use std::sync::Arc;

fn budgeted_config() -> Arc<EngineConfig> {
    Arc::new(EngineConfig {
        node_budget: Some(5_000),
        ..EngineConfig::default()
    })
}

/// Drives both sides through the same selection path a human would use.
fn play_out(white: Difficulty, black: Difficulty, seed: u64, max_plies: usize) -> GameState {
    let mut engine = AlphaBetaEngine::with_seed(budgeted_config(), seed);
    let mut game = GameState::new();

    for _ in 0..max_plies {
        if game.over() {
            break;
        }
        let difficulty = match game.turn() {
            Color::White => white,
            Color::Black => black,
        };
        let Some(mv) = engine.best_move(game.board(), game.turn(), difficulty) else {
            assert!(game.legal_moves().is_empty());
            break;
        };

        let targets = game.select_piece(&mv.piece).unwrap();
        assert!(targets.contains(&mv.to));
        game.move_piece(mv.from(), mv.to).unwrap();
    }
    game
}

#[test]
fn random_players_finish_or_keep_playing_legally() {
    for seed in 0..4 {
        let game = play_out(Difficulty::Easy, Difficulty::Easy, seed, 300);
        let total = game.board().pieces().count();
        assert_eq!(
            total + game.captured_by(Color::White).len() + game.captured_by(Color::Black).len(),
            32
        );
        if let Some(winner) = game.winner() {
            assert_eq!(game.board().count(winner), 0);
        }
    }
}

#[test]
fn searching_players_make_only_accepted_moves() {
    let game = play_out(Difficulty::Medium, Difficulty::Hard, 11, 40);
    assert!(!game.history().is_empty());

    let captures = game
        .history()
        .iter()
        .filter(|record| record.captured.is_some())
        .count();
    let scores = game.scores();
    assert_eq!(captures as u32, scores.white + scores.black);
}
