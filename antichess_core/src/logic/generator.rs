use crate::engine::Move;
use crate::logic::board::{Board, Color, Piece, PieceKind, Square};
use crate::logic::lookup::{AttackTables, ALL_DIRS, DIAGONAL_DIRS, ORTHOGONAL_DIRS};
use crate::logic::rules::apply_forced_capture;

/// Every square `piece` can reach by its own geometry.
///
/// Turn and mandatory capture are not considered here; see `rules::legal_targets`.
/// Friendly-occupied and off-board squares are never returned.
pub fn moves_for(piece: &Piece, board: &Board) -> Vec<Square> {
    let mut moves = Vec::with_capacity(27);
    let tables = AttackTables::get();

    match piece.kind {
        PieceKind::Pawn => pawn_moves(piece, board, &mut moves),
        PieceKind::Knight => {
            step_moves(piece, board, tables.knight_targets(piece.square), &mut moves);
        }
        PieceKind::King => step_moves(piece, board, tables.king_targets(piece.square), &mut moves),
        PieceKind::Bishop => sliding_moves(piece, board, &DIAGONAL_DIRS, &mut moves),
        PieceKind::Rook => sliding_moves(piece, board, &ORTHOGONAL_DIRS, &mut moves),
        PieceKind::Queen => sliding_moves(piece, board, &ALL_DIRS, &mut moves),
    }

    moves
}

fn pawn_moves(piece: &Piece, board: &Board, moves: &mut Vec<Square>) {
    let forward = piece.color.forward();

    if let Some(one) = piece.square.offset(0, forward) {
        if !board.is_occupied(one) {
            moves.push(one);
            if !piece.has_moved && piece.square.rank() == piece.color.pawn_rank() {
                if let Some(two) = one.offset(0, forward) {
                    if !board.is_occupied(two) {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(target) = piece.square.offset(df, forward) {
            if board
                .get_piece(target)
                .is_some_and(|occupant| occupant.is_enemy_of(piece))
            {
                moves.push(target);
            }
        }
    }
}

fn step_moves(piece: &Piece, board: &Board, targets: &[Square], moves: &mut Vec<Square>) {
    for &to in targets {
        match board.get_piece(to) {
            Some(occupant) if !occupant.is_enemy_of(piece) => {}
            _ => moves.push(to),
        }
    }
}

fn sliding_moves(piece: &Piece, board: &Board, dirs: &[(i8, i8)], moves: &mut Vec<Square>) {
    for &(df, dr) in dirs {
        let mut current = piece.square.offset(df, dr);
        while let Some(to) = current {
            if let Some(occupant) = board.get_piece(to) {
                if occupant.is_enemy_of(piece) {
                    moves.push(to);
                }
                break;
            }
            moves.push(to);
            current = to.offset(df, dr);
        }
    }
}

/// Color-wide move enumeration on top of `moves_for`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// All geometric moves of `color`, captures and quiet moves alike.
    pub fn generate_moves(&self, board: &Board, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for piece in board.pieces_of(color) {
            for to in moves_for(&piece, board) {
                moves.push(Move::new(piece.square, to));
            }
        }
        moves
    }

    /// The moves `color` may actually play: only captures when any capture exists.
    pub fn legal_moves(&self, board: &Board, color: Color) -> Vec<Move> {
        let mut moves = self.generate_moves(board, color);
        apply_forced_capture(&mut moves, board);
        moves
    }

    /// Checks if `color` has at least one move, returning as soon as one is found.
    /// Mandatory capture never empties a non-empty move set, so geometry alone decides.
    pub fn has_legal_moves(&self, board: &Board, color: Color) -> bool {
        board
            .pieces_of(color)
            .any(|piece| !moves_for(&piece, board).is_empty())
    }
}
