use crate::engine::config::{NoMovesPolicy, RulesConfig};
use crate::logic::board::{Color, PieceId, PieceKind, Square};
use crate::logic::game::{GameState, GameStatus};
use crate::logic::rules::MoveError;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn snapshot(game: &GameState) -> String {
    serde_json::to_string(game).unwrap()
}

fn with_policy(no_moves: NoMovesPolicy) -> RulesConfig {
    RulesConfig {
        no_moves,
        ..RulesConfig::default()
    }
}

#[test]
fn test_forced_capture_selection() {
    // Only the rook can capture; pawns and knight have quiet moves only.
    let mut game =
        GameState::from_fen("8/8/8/3p4/8/8/PP6/3R2N1 w", RulesConfig::default()).unwrap();

    assert!(game.select_square(sq("g1")).unwrap().is_empty());
    assert_eq!(game.selected().map(|p| p.kind), Some(PieceKind::Knight));
    assert_eq!(
        game.move_piece(sq("g1"), sq("f3")),
        Err(MoveError::IllegalTarget { to: sq("f3") })
    );

    assert!(game.select_square(sq("a2")).unwrap().is_empty());

    assert_eq!(game.select_square(sq("d1")).unwrap(), &[sq("d5")]);
    let record = game.move_piece(sq("d1"), sq("d5")).unwrap();
    assert_eq!(record.captured.map(|p| p.color), Some(Color::Black));
}

#[test]
fn test_unforced_selection_gets_all_targets() {
    let mut game = GameState::new();
    let mut targets = game.select_square(sq("b1")).unwrap().to_vec();
    targets.sort_by_key(|s| s.index());
    assert_eq!(targets, vec![sq("a3"), sq("c3")]);
}

#[test]
fn test_rejected_calls_leave_state_identical() {
    let mut game = GameState::new();
    let before = snapshot(&game);

    assert_eq!(
        game.move_piece(sq("e2"), sq("e4")),
        Err(MoveError::NoSelection)
    );
    assert_eq!(
        game.select_square(sq("e7")).map(<[Square]>::to_vec),
        Err(MoveError::NotYourTurn)
    );
    assert_eq!(
        game.select_square(sq("e4")).map(<[Square]>::to_vec),
        Err(MoveError::NoPieceAtSource)
    );
    assert_eq!(snapshot(&game), before);

    game.select_square(sq("e2")).unwrap();
    let selected = snapshot(&game);

    assert_eq!(
        game.move_piece(sq("e2"), sq("e5")),
        Err(MoveError::IllegalTarget { to: sq("e5") })
    );
    assert_eq!(
        game.move_piece(sq("d2"), sq("d4")),
        Err(MoveError::SelectionMismatch { selected: sq("e2") })
    );
    assert_eq!(
        game.move_piece(sq("e2"), sq("d2")),
        Err(MoveError::TargetOccupiedByFriendly { to: sq("d2") })
    );
    assert_eq!(snapshot(&game), selected);
}

#[test]
fn test_stale_piece_is_rejected() {
    let mut game = GameState::new();
    let mut pawn = game.board().get_piece(sq("e2")).unwrap();
    pawn.id = PieceId(999);

    let before = snapshot(&game);
    assert_eq!(
        game.select_piece(&pawn).map(<[Square]>::to_vec),
        Err(MoveError::StaleSelection)
    );
    assert_eq!(snapshot(&game), before);
}

#[test]
fn test_turn_alternates_and_selection_clears() {
    let mut game = GameState::new();
    game.select_square(sq("e2")).unwrap();
    game.move_piece(sq("e2"), sq("e4")).unwrap();

    assert_eq!(game.turn(), Color::Black);
    assert!(game.selected().is_none());
    assert!(game.legal_targets().is_empty());
    assert!(game.board().get_piece(sq("e4")).unwrap().has_moved);

    assert_eq!(
        game.select_square(sq("d2")).map(<[Square]>::to_vec),
        Err(MoveError::NotYourTurn)
    );
}

#[test]
fn test_win_when_black_loses_all_pieces() {
    let mut game =
        GameState::from_fen("8/p7/8/p7/8/8/8/R6K w", RulesConfig::default()).unwrap();

    assert_eq!(game.select_square(sq("a1")).unwrap(), &[sq("a5")]);
    game.move_piece(sq("a1"), sq("a5")).unwrap();
    assert!(!game.over());

    assert_eq!(game.select_square(sq("a7")).unwrap(), &[sq("a6")]);
    game.move_piece(sq("a7"), sq("a6")).unwrap();

    assert_eq!(game.select_square(sq("a5")).unwrap(), &[sq("a6")]);
    game.move_piece(sq("a5"), sq("a6")).unwrap();

    assert!(game.over());
    assert_eq!(game.status(), GameStatus::Won(Color::Black));
    assert_eq!(game.winner(), Some(Color::Black));
    assert_eq!(game.board().count(Color::Black), 0);
    assert_eq!(game.scores().white, 2);
    assert_eq!(game.scores().black, 0);
    assert_eq!(game.captured_by(Color::White).len(), 2);

    // Reads after the end keep working; writes are refused.
    let _ = game.turn();
    assert!(game.selected().is_none());
    assert!(game.legal_moves().is_empty());
    assert_eq!(
        game.select_square(sq("a6")).map(<[Square]>::to_vec),
        Err(MoveError::GameOver)
    );

    assert!(game.undo_move());
    assert!(!game.over());
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_no_moves_policies() {
    let fen = "8/8/8/8/4p3/4P3/8/8 w";

    let game = GameState::from_fen(fen, with_policy(NoMovesPolicy::Unresolved)).unwrap();
    assert_eq!(game.status(), GameStatus::Playing);
    assert!(game.legal_moves().is_empty());

    let game = GameState::from_fen(fen, with_policy(NoMovesPolicy::StalledPlayerWins)).unwrap();
    assert_eq!(game.winner(), Some(Color::White));

    let game = GameState::from_fen(fen, with_policy(NoMovesPolicy::StalledPlayerLoses)).unwrap();
    assert_eq!(game.winner(), Some(Color::Black));

    let game = GameState::from_fen(fen, with_policy(NoMovesPolicy::Draw)).unwrap();
    assert_eq!(game.status(), GameStatus::Drawn);
    assert!(game.over());
    assert_eq!(game.winner(), None);
}

#[test]
fn test_no_moves_policy_applies_after_a_move() {
    let mut game = GameState::from_fen(
        "8/8/8/8/4p3/8/4P3/8 w",
        with_policy(NoMovesPolicy::StalledPlayerLoses),
    )
    .unwrap();

    assert_eq!(game.select_square(sq("e2")).unwrap(), &[sq("e3")]);
    game.move_piece(sq("e2"), sq("e3")).unwrap();
    assert_eq!(game.winner(), Some(Color::White));
}

#[test]
fn test_empty_side_at_setup_is_already_over() {
    let game = GameState::from_fen("8/8/8/8/8/8/8/4K3 b", RulesConfig::default()).unwrap();
    assert_eq!(game.winner(), Some(Color::Black));
}

#[test]
fn test_state_serializes_as_plain_data() {
    let mut game = GameState::new();
    game.select_square(sq("g1")).unwrap();

    let json = snapshot(&game);
    let back: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, game);
    assert_eq!(back.legal_targets(), game.legal_targets());
}

#[test]
fn test_state_with_misplaced_piece_is_rejected() {
    let json = snapshot(&GameState::new());
    let tampered = json.replacen("\"e2\"", "\"e4\"", 1);
    assert_ne!(tampered, json);
    assert!(serde_json::from_str::<GameState>(&tampered).is_err());
}

#[test]
fn test_games_do_not_share_identity() {
    let mut first = GameState::new();
    let second = GameState::new();
    first.select_square(sq("e2")).unwrap();
    first.move_piece(sq("e2"), sq("e4")).unwrap();

    let moved = first.board().get_piece(sq("e4")).map(|p| p.id);
    assert_eq!(second.board().get_piece(sq("e2")).map(|p| p.id), moved);
    assert!(second.board().get_piece(sq("e4")).is_none());
}
