use crate::engine::Move;
use crate::logic::board::{Board, Color, Piece, Square};
use crate::logic::generator::moves_for;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("square ({file}, {rank}) is off the board")]
    InvalidSquare { file: i32, rank: i32 },
    #[error("no piece on the source square")]
    NoPieceAtSource,
    #[error("piece does not belong to the side to move")]
    NotYourTurn,
    #[error("the game is over")]
    GameOver,
    #[error("no piece is selected")]
    NoSelection,
    #[error("move does not start from the selected piece on {selected}")]
    SelectionMismatch { selected: Square },
    #[error("{to} is not a legal target")]
    IllegalTarget { to: Square },
    #[error("selection no longer matches the board")]
    StaleSelection,
    #[error("{to} is occupied by a friendly piece")]
    TargetOccupiedByFriendly { to: Square },
}

/// Generated moves never land on a friendly piece, so an occupied target is a capture.
pub fn is_capture(board: &Board, to: Square) -> bool {
    board.is_occupied(to)
}

/// True iff some piece of `color` can capture right now.
pub fn has_forced_capture(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|piece| moves_for(&piece, board).iter().any(|&to| is_capture(board, to)))
}

/// Applies mandatory capture to the full move set of one side: when any move captures,
/// only the captures remain. Generation order is kept.
pub fn apply_forced_capture(moves: &mut Vec<Move>, board: &Board) {
    if moves.iter().any(|mv| is_capture(board, mv.to)) {
        moves.retain(|mv| is_capture(board, mv.to));
    }
}

pub fn restrict_to_captures(mut moves: Vec<Square>, board: &Board) -> Vec<Square> {
    moves.retain(|&to| is_capture(board, to));
    moves
}

/// Destinations `piece` may move to once mandatory capture is applied for its color.
/// A piece without captures of its own gets an empty set when another piece must capture.
pub fn legal_targets(board: &Board, piece: &Piece) -> Vec<Square> {
    let raw = moves_for(piece, board);
    if has_forced_capture(board, piece.color) {
        restrict_to_captures(raw, board)
    } else {
        raw
    }
}

/// Checks a full move request against turn, occupancy, geometry and mandatory capture.
pub fn is_valid_move(
    board: &Board,
    from: Square,
    to: Square,
    turn: Color,
) -> Result<(), MoveError> {
    let piece = board.get_piece(from).ok_or(MoveError::NoPieceAtSource)?;

    if piece.color != turn {
        return Err(MoveError::NotYourTurn);
    }

    if let Some(target) = board.get_piece(to) {
        if target.color == piece.color {
            return Err(MoveError::TargetOccupiedByFriendly { to });
        }
    }

    if !legal_targets(board, &piece).contains(&to) {
        return Err(MoveError::IllegalTarget { to });
    }

    Ok(())
}
